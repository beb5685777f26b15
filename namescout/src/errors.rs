//! Error types for namescout.
//!
//! Only configuration and setup failures surface as errors. Problems reading a
//! single directory during a walk are absorbed by the walker and never reach
//! this type:
//! ```rust,ignore
//! match search_current_dir(query, &config) {
//!     Ok(stream) => // Consume matches,
//!     Err(SearchError::WorkingDirectory(e)) => // Exit with code 3,
//!     Err(e) => // Report and exit
//! }
//! ```
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while setting up or running a search
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Error getting current directory: {0}")]
    WorkingDirectory(#[source] io::Error),
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl SearchError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn thread_pool(msg: impl Into<String>) -> Self {
        Self::ThreadPool(msg.into())
    }

    /// Classifies an io error that occurred at `path`
    pub fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::not_found(path),
            io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::IoError(err),
        }
    }

    /// Whether this error came from the user's setup rather than the search itself
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigError(_) | Self::Config(_))
    }
}
