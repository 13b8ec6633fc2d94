//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use kustogen_core::{CoreError, ErrorKind};
use kustogen_helm::GenerateError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Generator pipeline failed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Generate(#[from] GenerateError),

    /// Config file missing or malformed
    #[error("Failed to load config from {path}")]
    #[diagnostic(
        code(kustogen::cli::config),
        help("pass the generator config with --config or KUSTOGEN_CONFIG")
    )]
    Config {
        path: String,
        #[source]
        source: CoreError,
    },

    /// Kustomization could not be serialized
    #[error("Failed to serialize kustomization")]
    #[diagnostic(code(kustogen::cli::serialize))]
    Serialize(#[source] CoreError),

    /// IO error while writing output
    #[error("Failed to write {path}")]
    #[diagnostic(code(kustogen::cli::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Generate(e) => match e.kind() {
                ErrorKind::Config => exit_codes::CONFIG_ERROR,
                ErrorKind::Network
                | ErrorKind::Parse
                | ErrorKind::ChartNotFound
                | ErrorKind::VersionNotFound
                | ErrorKind::UrlMissing
                | ErrorKind::AmbiguousUrl => exit_codes::RESOLVE_ERROR,
                ErrorKind::TempResource | ErrorKind::ExecutableNotFound | ErrorKind::Render => {
                    exit_codes::RENDER_ERROR
                }
                ErrorKind::List | ErrorKind::Copy => exit_codes::IO_ERROR,
                _ => exit_codes::ERROR,
            },
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Serialize(_) => exit_codes::ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
