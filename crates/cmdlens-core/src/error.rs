//! Error types for tree resolution and policy expansion.
//!
//! The engine has exactly three user-triggerable failure kinds (ambiguous
//! token, unknown group, circular group reference), modeled as a closed
//! enum so callers can match exhaustively when rendering messages. A token
//! that matches nothing, an empty expression, or an empty tree are *not*
//! errors; those degrade to passthrough or empty results at the call site.

use thiserror::Error;

/// Unified error type for resolution and policy operations.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A token prefix-matched more than one sibling command.
    #[error("ambiguous command '{token}' in {context}: could be {}", .candidates.join(", "))]
    AmbiguousToken {
        /// The offending input token.
        token: String,
        /// Resolved path so far, space-joined, or `"root"` at the top.
        context: String,
        /// Sorted names of every candidate that matched.
        candidates: Vec<String>,
    },

    /// A `@name` reference has no entry in the group table.
    #[error("unknown command group '{token}'")]
    UnknownGroup { token: String },

    /// A group transitively references itself.
    #[error("circular group reference: {}", .chain.join(" -> "))]
    CircularGroupReference {
        /// Group names from the first occurrence back to the repeat.
        chain: Vec<String>,
    },

    /// A wildcard pattern compiled to a regex the engine rejected.
    #[error("invalid wildcard pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl ResolveError {
    /// Create an ambiguity error with candidates sorted for stable output.
    pub fn ambiguous(
        token: impl Into<String>,
        context: impl Into<String>,
        mut candidates: Vec<String>,
    ) -> Self {
        candidates.sort();
        ResolveError::AmbiguousToken {
            token: token.into(),
            context: context.into(),
            candidates,
        }
    }

    /// Create an unknown-group error from the raw `@name` token.
    pub fn unknown_group(token: impl Into<String>) -> Self {
        ResolveError::UnknownGroup {
            token: token.into(),
        }
    }
}
