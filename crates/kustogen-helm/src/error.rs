//! Pipeline error types

use kustogen_core::{CoreError, ErrorKind};
use kustogen_repo::RepoError;
use miette::Diagnostic;
use thiserror::Error;

/// Rendering stage errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Writing temporary values file failed: {message}")]
    ValuesFile { message: String },

    #[error("Preparing temporary folder failed: {message}")]
    OutputDir { message: String },

    #[error("Executable not found: {name}")]
    ExecutableNotFound { name: String },

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}:\n{output}", exit_status(.code))]
    Failed {
        program: String,
        code: Option<i32>,
        /// Combined stdout and stderr of the engine, verbatim
        output: String,
    },
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl RenderError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RenderError::ValuesFile { .. } | RenderError::OutputDir { .. } => {
                ErrorKind::TempResource
            }
            RenderError::ExecutableNotFound { .. } => ErrorKind::ExecutableNotFound,
            RenderError::Spawn { .. } | RenderError::Failed { .. } => ErrorKind::Render,
        }
    }
}

/// Error of a whole generator run, tagged with the failing stage
#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    #[error("Invalid generator config")]
    #[diagnostic(
        code(kustogen::config),
        help("registry, chart, version, name and namespace are required")
    )]
    Config(#[source] CoreError),

    #[error("Resolving chart failed")]
    #[diagnostic(
        code(kustogen::resolve),
        help("check the registry URL and that the chart version is listed in its index.yaml")
    )]
    Resolve(#[from] RepoError),

    #[error("Rendering chart failed")]
    #[diagnostic(code(kustogen::render))]
    Render(#[from] RenderError),

    #[error("Listing helm generated resources failed")]
    #[diagnostic(code(kustogen::collect))]
    Collect(#[source] CoreError),

    #[error("Copying files to target failed")]
    #[diagnostic(
        code(kustogen::copy),
        help("the destination directory may be partially written")
    )]
    Copy(#[source] CoreError),
}

impl GenerateError {
    /// Category of the underlying failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerateError::Config(e) | GenerateError::Collect(e) | GenerateError::Copy(e) => {
                e.kind()
            }
            GenerateError::Resolve(e) => e.kind(),
            GenerateError::Render(e) => e.kind(),
        }
    }

    /// Name of the stage that failed
    pub fn stage(&self) -> &'static str {
        match self {
            GenerateError::Config(_) => "config",
            GenerateError::Resolve(_) => "resolve",
            GenerateError::Render(_) => "render",
            GenerateError::Collect(_) => "collect",
            GenerateError::Copy(_) => "copy",
        }
    }
}
