//! Error types for notebook loading

use thiserror::Error;

/// Error raised when a notebook document cannot be loaded as a whole.
///
/// Individual malformed cells or outputs never produce a `LoadError`; they are
/// skipped during parsing. Only a failure of the top-level document does.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Transport failure while fetching a remote document
    #[error("Failed to fetch notebook from {url}: {source}")]
    Request {
        /// Requested URL
        url: String,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// Remote host answered with a non-success status
    #[error("Notebook request to {url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// I/O error when reading a local notebook file
    #[error("Failed to read notebook file: {0}")]
    Io(#[from] std::io::Error),

    /// Document body is not valid JSON
    #[error("Failed to parse notebook JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON that is not a notebook (no `cells` array)
    #[error("Invalid notebook format: {0}")]
    InvalidFormat(String),
}

impl LoadError {
    /// HTTP status code, when the failure came from a remote host
    #[inline]
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the document could not be found (HTTP 404 or missing file)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 404,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Result type alias for notebook operations
pub type Result<T> = std::result::Result<T, LoadError>;
