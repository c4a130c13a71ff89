//! Binary entry point for the cmdlens CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Expand abbreviated tokens to canonical command names
//! cmdlens expand --tree shop.json c:gc --json arg
//!
//! # List leaf commands in pre-order
//! cmdlens leaves --tree shop.json
//!
//! # Expand a policy expression into wildcard patterns
//! cmdlens patterns --groups groups.json "@catalog order:*"
//!
//! # Show which leaf commands a policy would expose
//! cmdlens gate --tree shop.json --include "@safe order:*" --exclude "order:cancel"
//! ```
//!
//! All output is JSON; errors are JSON too, with a stable numeric code
//! that doubles as the process exit code.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use cmdlens::cli::{
    load_groups, load_tree, run_expand, run_gate, run_leaves, run_patterns, CliError,
    OutputErrorCode,
};
use cmdlens::output::{emit_response, emit_response_compact, ErrorResponse};
use cmdlens::MatcherOptions;

// ============================================================================
// CLI Structure
// ============================================================================

/// Resolve abbreviations and tool-exposure policy over a command tree.
#[derive(Parser, Debug)]
#[command(name = "cmdlens", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

/// Global arguments shared by all subcommands.
#[derive(Parser, Debug)]
struct GlobalArgs {
    /// Log level for tracing output (stderr).
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Emit compact single-line JSON instead of pretty-printed.
    #[arg(long, global = true)]
    compact: bool,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Expand abbreviated, aliased, or colon-joined tokens.
    Expand {
        /// Path to the command tree definition (JSON).
        #[arg(long)]
        tree: PathBuf,

        /// Tokens to expand, in order.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// List leaf commands in pre-order.
    Leaves {
        /// Path to the command tree definition (JSON).
        #[arg(long)]
        tree: PathBuf,
    },

    /// Expand a policy expression into normalized wildcard patterns.
    Patterns {
        /// Path to a group table (JSON), merged over the builtin groups.
        #[arg(long)]
        groups: Option<PathBuf>,

        /// Policy expression (patterns and @group references).
        expression: String,
    },

    /// Show which leaf commands an include/exclude policy admits.
    Gate {
        /// Path to the command tree definition (JSON).
        #[arg(long)]
        tree: PathBuf,

        /// Path to a group table (JSON), merged over the builtin groups.
        #[arg(long)]
        groups: Option<PathBuf>,

        /// Include expression (default: the builtin safe group).
        #[arg(long)]
        include: Option<String>,

        /// Exclude expression (default: exclude nothing).
        #[arg(long)]
        exclude: Option<String>,
    },
}

// ============================================================================
// Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.global.log_level);

    let compact = cli.global.compact;
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let error_code = OutputErrorCode::from(&err);
            let response = ErrorResponse::from_error(&err);

            // Errors go to stdout as JSON, like every other response.
            let _ = emit(&response, compact);
            let _ = io::stdout().flush();

            ExitCode::from(error_code.code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Execute the CLI command.
fn execute(cli: Cli) -> Result<(), CliError> {
    let compact = cli.global.compact;
    match cli.command {
        Command::Expand { tree, tokens } => {
            let tree = load_tree(&tree)?;
            emit(&run_expand(&tree, &tokens)?, compact)
        }
        Command::Leaves { tree } => {
            let tree = load_tree(&tree)?;
            emit(&run_leaves(&tree)?, compact)
        }
        Command::Patterns { groups, expression } => {
            let groups = load_groups(groups.as_deref())?;
            emit(&run_patterns(&expression, &groups)?, compact)
        }
        Command::Gate {
            tree,
            groups,
            include,
            exclude,
        } => {
            let tree = load_tree(&tree)?;
            let groups = load_groups(groups.as_deref())?;
            let options = MatcherOptions { include, exclude };
            emit(&run_gate(&tree, &options, &groups)?, compact)
        }
    }
}

/// Serialize one response to stdout.
fn emit<T: serde::Serialize>(response: &T, compact: bool) -> Result<(), CliError> {
    let result = if compact {
        emit_response_compact(response, &mut io::stdout())
    } else {
        emit_response(response, &mut io::stdout())
    };
    result.map_err(|e| CliError::Internal {
        message: format!("failed to write response: {}", e),
    })
}
