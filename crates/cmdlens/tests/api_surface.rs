//! Compile-only test to verify the public API surface.
//!
//! This file serves as a compile-time contract for the public API.
//! If this file fails to compile, the public API has regressed.

// Allow unused imports - this test is about compile-time verification, not runtime usage
#![allow(unused_imports)]

// Engine re-exports at the crate root
use cmdlens::{
    builtin_groups, collect_leaves, expand_abbreviations, resolve_patterns, CommandMatcher,
    CommandNode, GroupTable, LeafEntry, MatcherOptions, ResolveError,
};

// definition module - serde-backed command trees
use cmdlens::definition::CommandDef;

// cli module - executors, input loading, error codes
use cmdlens::cli::{
    load_groups, load_tree, run_expand, run_gate, run_leaves, run_patterns, CliError,
    OutputErrorCode,
};

// output module - JSON response envelope
use cmdlens::output::{
    emit_response, emit_response_compact, ErrorInfo, ErrorResponse, ExpandResponse, GateResponse,
    LeavesResponse, PatternsResponse, SCHEMA_VERSION,
};

// Engine crate direct surface
use cmdlens_core::pattern::CompiledPattern;
use cmdlens_core::policy::DEFAULT_INCLUDE;
use cmdlens_core::resolve::Resolution;

#[test]
fn api_surface_compiles() {
    // The imports above are the test.
}
