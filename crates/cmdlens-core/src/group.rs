//! Named pattern groups and recursive expression expansion.
//!
//! A policy expression is a flat list of tokens separated by whitespace
//! and/or commas. A token is either a literal wildcard pattern or a
//! `@name` reference into a [`GroupTable`]; references expand recursively,
//! with the visitation stack threaded explicitly so cycles are detected
//! and the function stays pure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ResolveError;

/// Case-insensitive mapping from group name to an ordered entry list.
///
/// Each entry is either a literal wildcard pattern (`order:*`) or another
/// group reference (`@sales`). The table is plain data: build it from
/// JSON, merge tables, pass it by reference into every expansion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupTable {
    groups: BTreeMap<String, Vec<String>>,
}

impl GroupTable {
    /// Empty table.
    pub fn new() -> Self {
        GroupTable::default()
    }

    /// Insert a group. The name is stored lower-cased; entries keep their
    /// declared order.
    pub fn insert(&mut self, name: &str, entries: &[&str]) {
        self.groups.insert(
            name.to_lowercase(),
            entries.iter().map(|e| e.to_string()).collect(),
        );
    }

    /// Look up a group by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.groups.get(&name.to_lowercase()).map(Vec::as_slice)
    }

    /// Overlay `other` on top of this table; same-named groups in `other`
    /// win wholesale.
    pub fn merge(&mut self, other: GroupTable) {
        self.groups.extend(other.groups);
    }

    /// Group names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }
}

/// The group table shipped with the engine.
///
/// Embedding applications normally merge their own groups over this one.
/// `safe` is the well-known conservative allow-list the default policy
/// refers to: read-only verbs only.
pub fn builtin_groups() -> GroupTable {
    let mut table = GroupTable::new();
    table.insert("safe", &["*:list", "*:show", "*:search", "*:status"]);
    table.insert("connection", &["connection:*"]);
    table.insert("everything", &["*"]);
    table
}

/// Expand a policy expression into a flat list of normalized wildcard
/// patterns.
///
/// Tokens are separated by runs of whitespace and/or commas; a blank
/// expression yields an empty list. Duplicates are permitted and order is
/// expansion order. Fails with [`ResolveError::UnknownGroup`] for a
/// `@name` absent from the table and
/// [`ResolveError::CircularGroupReference`] when a group transitively
/// references itself.
pub fn resolve_patterns(expression: &str, groups: &GroupTable) -> Result<Vec<String>, ResolveError> {
    let mut patterns = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    for token in tokenize(expression) {
        resolve_entry(token, groups, &mut stack, &mut patterns)?;
    }
    debug!(expression, count = patterns.len(), "expanded policy expression");
    Ok(patterns)
}

fn tokenize(expression: &str) -> impl Iterator<Item = &str> {
    expression
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn resolve_entry(
    token: &str,
    groups: &GroupTable,
    stack: &mut Vec<String>,
    patterns: &mut Vec<String>,
) -> Result<(), ResolveError> {
    if let Some(raw_name) = token.strip_prefix('@') {
        let name = raw_name.to_lowercase();
        if let Some(first) = stack.iter().position(|seen| *seen == name) {
            let mut chain: Vec<String> = stack[first..].to_vec();
            chain.push(name);
            return Err(ResolveError::CircularGroupReference { chain });
        }
        let entries = groups
            .get(&name)
            .ok_or_else(|| ResolveError::unknown_group(token))?;
        stack.push(name);
        for entry in entries {
            resolve_entry(entry, groups, stack, patterns)?;
        }
        stack.pop();
        return Ok(());
    }

    patterns.push(normalize_pattern(token));
    Ok(())
}

/// Normalize a literal pattern: lower-case, with each run of whitespace
/// or underscores collapsed to a single `:`.
fn normalize_pattern(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut in_separator = false;
    for ch in token.chars() {
        if ch.is_whitespace() || ch == '_' {
            if !in_separator {
                out.push(':');
                in_separator = true;
            }
        } else {
            out.extend(ch.to_lowercase());
            in_separator = false;
        }
    }
    out
}
