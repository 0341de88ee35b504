//! CLI module for the modelmeta generator.
//!
//! ## Commands
//!
//! - `generate` - Scan packages and write metadata artifacts
//! - `paths` - Scan packages and print reachable field paths
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use crate::version::MODELMETA_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Artifact flavor written by `generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Rust modules of field-path constants
    Rust,
    /// JSON entry catalogues
    Json,
}

/// The modelmeta field-path metadata generator
#[derive(Parser, Debug)]
#[command(name = "modelmeta")]
#[command(version = MODELMETA_VERSION)]
#[command(about = "Static field-path metadata generator for plain data models", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan packages and write one metadata artifact per model
    Generate {
        /// Root directory of the source tree
        #[arg(long = "source-dir", value_name = "DIR")]
        source_dir: PathBuf,

        /// Package to scan (repeatable)
        #[arg(long = "package", value_name = "PACKAGE", required = true)]
        packages: Vec<String>,

        /// Directory artifacts are written into (cleared per run)
        #[arg(long, value_name = "DIR", default_value = "./target/modelmeta")]
        target: PathBuf,

        /// Maximum times one field name may recur along a single path
        #[arg(long = "depth-limit", value_name = "N", default_value_t = 1)]
        depth_limit: u32,

        /// Artifact format
        #[arg(long, value_enum, default_value_t = Format::Rust)]
        format: Format,

        /// Namespace assumed for names that resolve to nothing scanned
        #[arg(
            long = "default-namespace",
            value_name = "NAMESPACE",
            default_value = "java.lang"
        )]
        default_namespace: String,
    },

    /// Scan packages and print every reachable field path
    Paths {
        /// Root directory of the source tree
        #[arg(long = "source-dir", value_name = "DIR")]
        source_dir: PathBuf,

        /// Package to scan (repeatable)
        #[arg(long = "package", value_name = "PACKAGE", required = true)]
        packages: Vec<String>,

        /// Maximum times one field name may recur along a single path
        #[arg(long = "depth-limit", value_name = "N", default_value_t = 1)]
        depth_limit: u32,

        /// Namespace assumed for names that resolve to nothing scanned
        #[arg(
            long = "default-namespace",
            value_name = "NAMESPACE",
            default_value = "java.lang"
        )]
        default_namespace: String,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate {
            source_dir,
            packages,
            target,
            depth_limit,
            format,
            default_namespace,
        } => commands::generate(
            &source_dir,
            packages,
            &target,
            depth_limit,
            format,
            default_namespace,
        ),
        Command::Paths {
            source_dir,
            packages,
            depth_limit,
            default_namespace,
        } => commands::paths(&source_dir, packages, depth_limit, default_namespace),
    }
}
