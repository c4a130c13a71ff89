//! Command executors and error-to-exit-code mapping.
//!
//! Each `run_*` function is one subcommand's whole behavior: load inputs,
//! call the engine, shape a response. The binary in `main.rs` only parses
//! arguments, dispatches here, and serializes the result.
//!
//! ## Exit codes
//!
//! - `2`: invalid arguments or configuration (bad expression, unknown
//!   group, circular reference, unreadable input file)
//! - `3`: resolution errors (ambiguous token)
//! - `10`: internal errors (bugs, unexpected state)

use std::fmt;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use cmdlens_core::{
    collect_leaves, expand_abbreviations, resolve_patterns, CommandMatcher, GroupTable,
    MatcherOptions, ResolveError,
};

use crate::definition::CommandDef;
use crate::output::{ExpandResponse, GateResponse, LeavesResponse, PatternsResponse};

// ============================================================================
// Error Codes
// ============================================================================

/// Stable numeric codes for JSON error responses and process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments or configuration from the caller.
    InvalidArguments = 2,
    /// Resolution errors (ambiguous token).
    ResolutionError = 3,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified CLI Error
// ============================================================================

/// Unified error type for CLI output.
#[derive(Debug, Error)]
pub enum CliError {
    /// Engine-level resolution or policy failure.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// An input file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An input file did not parse as the expected JSON shape.
    #[error("invalid {what} in {path}: {source}")]
    ParseFile {
        what: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl CliError {
    /// Structured detail for the JSON error envelope, where the variant
    /// carries more than its message.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            CliError::Resolve(ResolveError::AmbiguousToken {
                token,
                context,
                candidates,
            }) => Some(serde_json::json!({
                "token": token,
                "context": context,
                "candidates": candidates,
            })),
            CliError::Resolve(ResolveError::CircularGroupReference { chain }) => {
                Some(serde_json::json!({ "chain": chain }))
            }
            _ => None,
        }
    }
}

impl From<&CliError> for OutputErrorCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::Resolve(ResolveError::AmbiguousToken { .. }) => {
                OutputErrorCode::ResolutionError
            }
            CliError::Resolve(ResolveError::UnknownGroup { .. })
            | CliError::Resolve(ResolveError::CircularGroupReference { .. })
            | CliError::Resolve(ResolveError::InvalidPattern { .. })
            | CliError::ReadFile { .. }
            | CliError::ParseFile { .. } => OutputErrorCode::InvalidArguments,
            CliError::Internal { .. } => OutputErrorCode::InternalError,
        }
    }
}

// ============================================================================
// Input Loading
// ============================================================================

/// Load a command tree definition from a JSON file.
pub fn load_tree(path: &Path) -> Result<CommandDef, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseFile {
        what: "command tree",
        path: path.display().to_string(),
        source,
    })
}

/// Load the group table: builtins, with a user-supplied table merged on
/// top when given.
pub fn load_groups(path: Option<&Path>) -> Result<GroupTable, CliError> {
    let mut table = cmdlens_core::builtin_groups();
    if let Some(path) = path {
        let text = fs::read_to_string(path).map_err(|source| CliError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let user: GroupTable =
            serde_json::from_str(&text).map_err(|source| CliError::ParseFile {
                what: "group table",
                path: path.display().to_string(),
                source,
            })?;
        table.merge(user);
    }
    Ok(table)
}

// ============================================================================
// Command Executors
// ============================================================================

/// Expand abbreviated tokens against a command tree.
pub fn run_expand(tree: &CommandDef, tokens: &[String]) -> Result<ExpandResponse, CliError> {
    let expanded = expand_abbreviations(tree, tokens)?;
    info!(input = tokens.len(), output = expanded.len(), "expanded");
    Ok(ExpandResponse::new(expanded))
}

/// Flatten a command tree into its leaf commands.
pub fn run_leaves(tree: &CommandDef) -> Result<LeavesResponse, CliError> {
    Ok(LeavesResponse::new(collect_leaves(tree)))
}

/// Expand a policy expression into normalized patterns.
pub fn run_patterns(expression: &str, groups: &GroupTable) -> Result<PatternsResponse, CliError> {
    let patterns = resolve_patterns(expression, groups)?;
    Ok(PatternsResponse::new(patterns))
}

/// Apply an include/exclude policy to a tree's leaves and report which
/// command paths it admits.
pub fn run_gate(
    tree: &CommandDef,
    options: &MatcherOptions,
    groups: &GroupTable,
) -> Result<GateResponse, CliError> {
    let matcher = CommandMatcher::build(options, groups)?;
    let leaves = collect_leaves(tree);
    let total = leaves.len();
    let allowed: Vec<String> = leaves
        .into_iter()
        .filter(|leaf| matcher.matches(&leaf.command_path))
        .map(|leaf| leaf.command_path)
        .collect();
    info!(total, allowed = allowed.len(), "policy gate evaluated");
    Ok(GateResponse::new(
        matcher.include_patterns().map(str::to_string).collect(),
        matcher.exclude_patterns().map(str::to_string).collect(),
        total,
        allowed,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> CommandDef {
        CommandDef::from_json(
            r#"{
                "name": "shop",
                "children": [
                    {
                        "name": "order",
                        "aliases": ["ord"],
                        "children": [{"name": "list"}, {"name": "cancel"}]
                    },
                    {
                        "name": "connection",
                        "children": [{"name": "add"}, {"name": "list"}]
                    },
                    {"name": "website", "children": [{"name": "list"}]}
                ]
            }"#,
        )
        .unwrap()
    }

    mod executors {
        use super::*;

        #[test]
        fn expand_returns_canonical_tokens() {
            let response = run_expand(
                &sample_tree(),
                &["ord".to_string(), "l".to_string(), "--json".to_string()],
            )
            .unwrap();
            assert_eq!(response.tokens, vec!["order", "list", "--json"]);
        }

        #[test]
        fn leaves_reports_count_and_preorder_paths() {
            let response = run_leaves(&sample_tree()).unwrap();
            assert_eq!(response.count, 5);
            assert_eq!(response.leaves[0].command_path, "order:list");
            assert_eq!(response.leaves[4].command_path, "website:list");
        }

        #[test]
        fn patterns_expands_groups_in_order() {
            let mut groups = GroupTable::new();
            groups.insert("sales", &["order:*", "invoice:*"]);
            let response = run_patterns("@sales tax:*", &groups).unwrap();
            assert_eq!(response.patterns, vec!["order:*", "invoice:*", "tax:*"]);
        }

        #[test]
        fn gate_filters_leaves_and_echoes_patterns() {
            let options = MatcherOptions {
                include: Some("order:*".to_string()),
                exclude: Some("order:cancel".to_string()),
            };
            let response =
                run_gate(&sample_tree(), &options, &cmdlens_core::builtin_groups()).unwrap();
            assert_eq!(response.total, 5);
            assert_eq!(response.allowed, vec!["order:list"]);
            assert_eq!(response.include, vec!["order:*"]);
            assert_eq!(response.exclude, vec!["order:cancel"]);
        }

        #[test]
        fn gate_default_policy_is_the_safe_group() {
            let response = run_gate(
                &sample_tree(),
                &MatcherOptions::default(),
                &cmdlens_core::builtin_groups(),
            )
            .unwrap();
            assert_eq!(
                response.allowed,
                vec!["order:list", "connection:list", "website:list"]
            );
        }
    }

    mod error_codes {
        use super::*;

        #[test]
        fn ambiguity_maps_to_resolution_error() {
            let tree = CommandDef::from_json(
                r#"{"name": "p", "children": [
                    {"name": "child", "children": [{"name": "x"}]},
                    {"name": "chipmunk", "children": [{"name": "y"}]}
                ]}"#,
            )
            .unwrap();
            let err = run_expand(&tree, &["chi".to_string()]).unwrap_err();
            assert_eq!(OutputErrorCode::from(&err), OutputErrorCode::ResolutionError);
            assert_eq!(OutputErrorCode::from(&err).code(), 3);
        }

        #[test]
        fn unknown_group_maps_to_invalid_arguments() {
            let err = run_patterns("@nope", &GroupTable::new()).unwrap_err();
            assert_eq!(
                OutputErrorCode::from(&err),
                OutputErrorCode::InvalidArguments
            );
        }

        #[test]
        fn missing_tree_file_maps_to_invalid_arguments() {
            let err = load_tree(Path::new("/definitely/not/here.json")).unwrap_err();
            assert_eq!(
                OutputErrorCode::from(&err),
                OutputErrorCode::InvalidArguments
            );
        }
    }
}
