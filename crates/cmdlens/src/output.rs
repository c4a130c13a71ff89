//! JSON output types and serialization for CLI responses.
//!
//! Every response follows the same envelope discipline:
//!
//! 1. **Always JSON**: all CLI output is valid JSON, success and error alike
//! 2. **Status first**: every response has `status` as its first field
//! 3. **Deterministic**: same input produces identical bytes
//! 4. **Versioned**: `schema_version` enables forward compatibility

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use cmdlens_core::LeafEntry;

use crate::cli::{CliError, OutputErrorCode};

/// Current schema version for all responses.
pub const SCHEMA_VERSION: &str = "1";

// ============================================================================
// Success Responses
// ============================================================================

/// Response for `cmdlens expand`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Canonical token stream, ready for literal dispatch.
    pub tokens: Vec<String>,
}

impl ExpandResponse {
    pub fn new(tokens: Vec<String>) -> Self {
        ExpandResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            tokens,
        }
    }
}

/// Response for `cmdlens leaves`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeavesResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Number of leaf commands found.
    pub count: usize,
    /// Leaf commands in the tree's pre-order.
    pub leaves: Vec<LeafEntry>,
}

impl LeavesResponse {
    pub fn new(leaves: Vec<LeafEntry>) -> Self {
        LeavesResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            count: leaves.len(),
            leaves,
        }
    }
}

/// Response for `cmdlens patterns`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternsResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Normalized wildcard patterns, in expansion order. Duplicates from
    /// overlapping groups are preserved.
    pub patterns: Vec<String>,
}

impl PatternsResponse {
    pub fn new(patterns: Vec<String>) -> Self {
        PatternsResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            patterns,
        }
    }
}

/// Response for `cmdlens gate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Normalized include patterns the policy compiled to.
    pub include: Vec<String>,
    /// Normalized exclude patterns the policy compiled to.
    pub exclude: Vec<String>,
    /// Total number of leaf commands in the tree.
    pub total: usize,
    /// Leaf command paths the policy admits, in pre-order.
    pub allowed: Vec<String>,
}

impl GateResponse {
    pub fn new(
        include: Vec<String>,
        exclude: Vec<String>,
        total: usize,
        allowed: Vec<String>,
    ) -> Self {
        GateResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            include,
            exclude,
            total,
            allowed,
        }
    }
}

// ============================================================================
// Error Response
// ============================================================================

/// Error information carried in an [`ErrorResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable numeric code, also used as the process exit code.
    pub code: u8,
    /// Human-readable message.
    pub message: String,
    /// Structured detail, when the error carries more than a message
    /// (e.g. the candidate list of an ambiguity).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorInfo {
    /// Build error info from a CLI error, including structured details
    /// where the underlying error carries them.
    pub fn from_error(err: &CliError) -> Self {
        ErrorInfo {
            code: OutputErrorCode::from(err).code(),
            message: err.to_string(),
            details: err.details(),
        }
    }
}

/// Error response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status: "error".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Error information.
    pub error: ErrorInfo,
}

impl ErrorResponse {
    /// Create an error response from a CLI error.
    pub fn from_error(err: &CliError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

// ============================================================================
// Response Emission
// ============================================================================

/// Emit a response as pretty-printed JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

/// Emit a response as compact JSON (single line) to a writer.
pub fn emit_response_compact<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}
