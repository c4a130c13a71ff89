//! Resolution and matching engine for hierarchical command trees.
//!
//! This crate answers two questions about an externally supplied command
//! tree, without executing anything:
//!
//! - **Expansion**: given abbreviated, aliased, or colon-joined input
//!   tokens (`c:gc`, `chi`, `ord list`), what is the canonical dotted path
//!   into the tree — or is the input ambiguous?
//! - **Policy**: given an include/exclude expression built from wildcard
//!   patterns and named groups, which leaf commands may be exposed to an
//!   outside caller?
//!
//! Every operation is a pure, synchronous function over caller-owned data.
//! The crate holds no state between calls, performs no I/O, and never
//! mutates the tree or the group table it is handed.

pub mod error;
pub mod group;
pub mod pattern;
pub mod policy;
pub mod resolve;
pub mod tree;

pub use error::ResolveError;
pub use group::{builtin_groups, resolve_patterns, GroupTable};
pub use pattern::CompiledPattern;
pub use policy::{CommandMatcher, MatcherOptions, DEFAULT_INCLUDE};
pub use resolve::{expand_abbreviations, resolve_token, Resolution};
pub use tree::{collect_leaves, CommandNode, LeafEntry};
