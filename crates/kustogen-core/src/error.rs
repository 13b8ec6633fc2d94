//! Core error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to parse generator config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Failed to list files under {}: {source}", root.display())]
    List {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize kustomization: {message}")]
    Serialize { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ConfigParse(_)
            | CoreError::MissingField { .. }
            | CoreError::InvalidPattern { .. }
            | CoreError::Serialize { .. }
            | CoreError::Io(_) => ErrorKind::Config,
            CoreError::List { .. } => ErrorKind::List,
            CoreError::Copy { .. } => ErrorKind::Copy,
        }
    }
}

/// Distinguishable failure categories across the whole generator pipeline
///
/// Note: This enum is non-exhaustive - new variants may be added in future versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    Network,
    Parse,
    ChartNotFound,
    VersionNotFound,
    UrlMissing,
    AmbiguousUrl,
    TempResource,
    ExecutableNotFound,
    Render,
    List,
    Copy,
    Config,
}

impl ErrorKind {
    /// Convert to a code string for diagnostics
    pub fn to_code_string(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parse => "parse",
            Self::ChartNotFound => "chart_not_found",
            Self::VersionNotFound => "version_not_found",
            Self::UrlMissing => "url_missing",
            Self::AmbiguousUrl => "ambiguous_url",
            Self::TempResource => "temp_resource",
            Self::ExecutableNotFound => "executable_not_found",
            Self::Render => "render",
            Self::List => "list",
            Self::Copy => "copy",
            Self::Config => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
