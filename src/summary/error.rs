//! Summary loading errors
//!
//! Every way the single summary read can fail. The dashboard treats all of
//! them the same: log and stay in the loading state.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the summary document
#[derive(Error, Debug)]
pub enum LoadError {
    /// Reading a local summary file failed
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// The remote source could not be reached
    #[error("Summary source unavailable: {0}")]
    Unavailable(String),

    /// The request did not complete in time
    #[error("Request timeout")]
    Timeout,

    /// The remote source answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Any other transport failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The document is not a valid summary
    #[error("Invalid summary document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LoadError {
    /// Whether another attempt could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            LoadError::Unavailable(_) | LoadError::Timeout => true,
            LoadError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias for summary loading
pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoadError::Status {
            status: 404,
            url: "http://localhost/data.json".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404 from http://localhost/data.json");
        assert_eq!(LoadError::Timeout.to_string(), "Request timeout");
    }

    #[test]
    fn test_transient_classification() {
        assert!(LoadError::Timeout.is_transient());
        assert!(LoadError::Unavailable("refused".into()).is_transient());
        assert!(LoadError::Status { status: 503, url: String::new() }.is_transient());
        assert!(!LoadError::Status { status: 404, url: String::new() }.is_transient());

        let parse = serde_json::from_str::<u64>("nope").unwrap_err();
        assert!(!LoadError::from(parse).is_transient());
    }
}
