//! Token resolution and abbreviation expansion.
//!
//! [`resolve_token`] matches one input token against one node's children:
//! an exact (case-insensitive) name match always wins; otherwise every
//! child whose name or alias starts with the token is a candidate.
//! [`expand_abbreviations`] runs the full token stream through that
//! resolver, handling flags, colon-joined compound tokens, and descent
//! into the tree, producing the canonical token stream or an ambiguity
//! error.

use tracing::{debug, trace};

use crate::error::ResolveError;
use crate::tree::CommandNode;

/// Outcome of resolving one token against one node's children.
#[derive(Debug)]
pub struct Resolution<'a, N> {
    /// The single winning child, if resolution was unambiguous.
    pub unique: Option<&'a N>,
    /// Every child the token matched; used for ambiguity diagnostics.
    pub candidates: Vec<&'a N>,
}

/// Resolve `token` against the children of `parent`.
///
/// Comparison is case-insensitive throughout. An exact name match returns
/// that child alone, even when siblings share the prefix; otherwise any
/// child whose name or any alias starts with the token is a candidate,
/// and the match is unique only when exactly one candidate remains.
pub fn resolve_token<'a, N: CommandNode>(parent: &'a N, token: &str) -> Resolution<'a, N> {
    let token_lc = token.to_lowercase();

    if let Some(exact) = parent
        .children()
        .iter()
        .find(|child| child.name().to_lowercase() == token_lc)
    {
        return Resolution {
            unique: Some(exact),
            candidates: vec![exact],
        };
    }

    let candidates: Vec<&N> = parent
        .children()
        .iter()
        .filter(|child| {
            child.name().to_lowercase().starts_with(&token_lc)
                || child
                    .aliases()
                    .iter()
                    .any(|alias| alias.to_lowercase().starts_with(&token_lc))
        })
        .collect();

    let unique = match candidates.as_slice() {
        [only] => Some(*only),
        _ => None,
    };
    Resolution { unique, candidates }
}

/// Expand abbreviated, aliased, and colon-joined tokens into the tree's
/// canonical names.
///
/// Flags (tokens starting with `-`) pass through untouched. Once the
/// cursor reaches a leaf, all remaining tokens are opaque arguments and
/// are copied verbatim. A token containing `:` is split and spliced back
/// into the stream when its first part resolves, so `c:gc arg` expands
/// like `c gc arg`. A token that matches nothing is copied through
/// without moving the cursor; later tokens keep resolving against the
/// same node.
///
/// Fails with [`ResolveError::AmbiguousToken`] when a token matches more
/// than one sibling.
pub fn expand_abbreviations<N: CommandNode>(
    root: &N,
    tokens: &[String],
) -> Result<Vec<String>, ResolveError> {
    let mut stream: Vec<String> = tokens.to_vec();
    let mut expanded: Vec<String> = Vec::with_capacity(stream.len());
    let mut path: Vec<String> = Vec::new();
    let mut current = root;

    let mut i = 0;
    while i < stream.len() {
        let token = stream[i].clone();

        if token.starts_with('-') {
            expanded.push(token);
            i += 1;
            continue;
        }

        if current.children().is_empty() {
            // Leaf context: the rest of the stream is arguments.
            expanded.extend(stream[i..].iter().cloned());
            break;
        }

        if token.contains(':') {
            let parts: Vec<String> = token.split(':').map(str::to_string).collect();
            if resolve_token(current, &parts[0]).unique.is_some() {
                trace!(token = %token, "splicing compound token into {} parts", parts.len());
                stream.splice(i..=i, parts);
                // Re-process from the same position; the head part now
                // takes the single-token path below.
                continue;
            }
            // Head did not resolve: treat the unsplit token as a literal.
        }

        let resolution = resolve_token(current, &token);
        if resolution.candidates.len() > 1 {
            let context = if path.is_empty() {
                "root".to_string()
            } else {
                path.join(" ")
            };
            let candidates = resolution
                .candidates
                .iter()
                .map(|c| c.name().to_string())
                .collect();
            return Err(ResolveError::ambiguous(token, context, candidates));
        }

        match resolution.unique {
            Some(node) => {
                let name = node.name().to_string();
                trace!(token = %token, canonical = %name, "token resolved");
                expanded.push(name.clone());
                path.push(name);
                current = node;
            }
            None => {
                // No match: pass through, but keep resolving later tokens
                // against the same node.
                expanded.push(token);
            }
        }
        i += 1;
    }

    debug!(input = tokens.len(), output = expanded.len(), "expanded token stream");
    Ok(expanded)
}
