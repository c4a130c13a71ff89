//! Include/exclude policy matching over leaf command paths.
//!
//! [`CommandMatcher`] combines an include expression and an exclude
//! expression (both expanded through the group table and compiled to
//! wildcard matchers) into one predicate over lower-cased colon-joined
//! command paths. Exclude always wins; an empty include list admits
//! everything.

use tracing::debug;

use crate::error::ResolveError;
use crate::group::{resolve_patterns, GroupTable};
use crate::pattern::CompiledPattern;

/// Expression used when the caller supplies no include expression: the
/// well-known conservative `safe` group.
pub const DEFAULT_INCLUDE: &str = "@safe";

/// Include/exclude expression pair for building a [`CommandMatcher`].
///
/// `include` falls back to [`DEFAULT_INCLUDE`] when absent or blank;
/// `exclude` falls back to excluding nothing.
#[derive(Debug, Clone, Default)]
pub struct MatcherOptions {
    pub include: Option<String>,
    pub exclude: Option<String>,
}

/// Compiled policy predicate over command paths.
#[derive(Debug)]
pub struct CommandMatcher {
    include: Vec<CompiledPattern>,
    exclude: Vec<CompiledPattern>,
}

impl CommandMatcher {
    /// Expand and compile both expressions against `groups`.
    pub fn build(options: &MatcherOptions, groups: &GroupTable) -> Result<Self, ResolveError> {
        let include_expr = options
            .include
            .as_deref()
            .map(str::trim)
            .filter(|expr| !expr.is_empty())
            .unwrap_or(DEFAULT_INCLUDE);
        let exclude_expr = options.exclude.as_deref().unwrap_or("");

        let include = compile_all(&resolve_patterns(include_expr, groups)?)?;
        let exclude = compile_all(&resolve_patterns(exclude_expr, groups)?)?;
        debug!(
            include = include.len(),
            exclude = exclude.len(),
            "built command matcher"
        );
        Ok(CommandMatcher { include, exclude })
    }

    /// Decide whether a command path is admitted by this policy.
    ///
    /// The path is lower-cased before testing. An empty include list
    /// matches unconditionally; any exclude match vetoes the result.
    pub fn matches(&self, command_path: &str) -> bool {
        let path = command_path.to_lowercase();
        let included = self.include.is_empty() || self.include.iter().any(|m| m.is_match(&path));
        included && !self.exclude.iter().any(|m| m.is_match(&path))
    }

    /// Normalized include patterns this matcher was compiled from.
    pub fn include_patterns(&self) -> impl Iterator<Item = &str> {
        self.include.iter().map(CompiledPattern::pattern)
    }

    /// Normalized exclude patterns this matcher was compiled from.
    pub fn exclude_patterns(&self) -> impl Iterator<Item = &str> {
        self.exclude.iter().map(CompiledPattern::pattern)
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<CompiledPattern>, ResolveError> {
    patterns
        .iter()
        .map(|p| CompiledPattern::compile(p))
        .collect()
}
