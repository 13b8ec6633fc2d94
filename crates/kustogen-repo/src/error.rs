//! Error types for registry operations

use kustogen_core::ErrorKind;
use thiserror::Error;

/// Registry operation errors
#[derive(Debug, Error)]
pub enum RepoError {
    // ============ Network Errors ============
    #[error("Failed to fetch registry index at {url}: HTTP {status}")]
    HttpError { url: String, status: u16 },

    #[error("Failed to fetch registry index at {url}: {message}")]
    NetworkError { url: String, message: String },

    // ============ Index Errors ============
    #[error("Failed to parse registry index at {url}: {message}")]
    IndexParseError { url: String, message: String },

    // ============ Chart Errors ============
    #[error("Chart {chart} could not be found")]
    ChartNotFound { chart: String },

    #[error("Chart {chart} version {version} could not be found (available: {available})")]
    VersionNotFound {
        chart: String,
        version: String,
        available: String,
    },

    #[error("Chart {chart} version {version} has no download urls")]
    UrlMissing { chart: String, version: String },

    #[error("Chart {chart} version {version} has multiple download urls: {}", urls.join(", "))]
    AmbiguousUrl {
        chart: String,
        version: String,
        urls: Vec<String>,
    },
}

impl RepoError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepoError::HttpError { .. } | RepoError::NetworkError { .. } => ErrorKind::Network,
            RepoError::IndexParseError { .. } => ErrorKind::Parse,
            RepoError::ChartNotFound { .. } => ErrorKind::ChartNotFound,
            RepoError::VersionNotFound { .. } => ErrorKind::VersionNotFound,
            RepoError::UrlMissing { .. } => ErrorKind::UrlMissing,
            RepoError::AmbiguousUrl { .. } => ErrorKind::AmbiguousUrl,
        }
    }

    pub(crate) fn from_reqwest(url: &str, e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            RepoError::HttpError {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else if e.is_connect() {
            RepoError::NetworkError {
                url: url.to_string(),
                message: format!("Connection failed: {}", e),
            }
        } else {
            RepoError::NetworkError {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    }
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RepoError>;
