//! Wildcard pattern compilation.
//!
//! A pattern uses `:` as the hierarchy separator and `*` as the only
//! metacharacter. `*` matches any run of characters and is *not*
//! delimiter-aware: `order:*` matches `order:list` and also
//! `order:cancel:force`. Matching is case-sensitive at this layer;
//! callers lower-case both patterns and paths upstream.

use regex::Regex;

use crate::error::ResolveError;

/// One wildcard pattern, compiled to an anchored regex.
///
/// Compilation happens once; the matcher is immutable and reusable across
/// any number of path tests.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Compile a wildcard pattern.
    ///
    /// Every regex metacharacter except `*` is escaped; each `*` becomes
    /// `.*`; the result is anchored at both ends.
    pub fn compile(pattern: &str) -> Result<Self, ResolveError> {
        let mut source = String::with_capacity(pattern.len() + 8);
        source.push('^');
        let mut parts = pattern.split('*');
        if let Some(first) = parts.next() {
            source.push_str(&regex::escape(first));
        }
        for part in parts {
            source.push_str(".*");
            source.push_str(&regex::escape(part));
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|source| ResolveError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(CompiledPattern {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The original wildcard pattern this matcher was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Test a command path against this pattern.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}
