//! cmdlens: a JSON-speaking front door for the command-tree resolution
//! engine.
//!
//! The binary plays both consumer roles the engine was built for:
//! expanding abbreviated input against a command tree loaded from a JSON
//! definition file, and gating which leaf commands an include/exclude
//! policy would expose to an external tool transport. All output is JSON
//! for easy parsing by scripts and agents.

// Engine re-exports
pub use cmdlens_core::{
    builtin_groups, collect_leaves, expand_abbreviations, resolve_patterns, CommandMatcher,
    CommandNode, GroupTable, LeafEntry, MatcherOptions, ResolveError,
};

pub mod cli;
pub mod definition;
pub mod output;
