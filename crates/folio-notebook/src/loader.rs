//! One-shot notebook loading from the static asset host
//!
//! A location is either an `http(s)://` URL, a `file://` URL or a plain
//! filesystem path. Loading is all-or-nothing: there is no retry, no caching
//! and no partial result.

use crate::error::{LoadError, Result};
use crate::ipynb::{parse_notebook_from_str, Notebook};
use std::path::PathBuf;
use std::time::Duration;

/// Options for [`load_notebook`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Request timeout for remote documents (None = wait indefinitely)
    pub timeout: Option<Duration>,
}

impl LoadOptions {
    /// Create options with a request timeout
    #[inline]
    #[must_use = "returns options with the timeout configured"]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Where a notebook document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Remote document fetched over HTTP(S)
    Remote(String),
    /// Local file
    Local(PathBuf),
}

impl DocumentSource {
    /// Classify a location string
    #[must_use]
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Remote(location.to_string())
        } else {
            let path = location.strip_prefix("file://").unwrap_or(location);
            Self::Local(PathBuf::from(path))
        }
    }
}

/// Fetch and parse a notebook document
///
/// # Errors
///
/// Returns a [`LoadError`] when the document cannot be fetched, the host
/// answers with a non-success status, or the body is not a notebook.
pub fn load_notebook(location: &str, options: &LoadOptions) -> Result<Notebook> {
    let body = match DocumentSource::from_location(location) {
        DocumentSource::Remote(url) => fetch_remote(&url, options)?,
        DocumentSource::Local(path) => {
            log::debug!("Reading notebook from {}", path.display());
            std::fs::read_to_string(&path)?
        }
    };

    let notebook = parse_notebook_from_str(&body)?;
    log::debug!(
        "Loaded notebook from {location}: {} cells ({} code)",
        notebook.cells.len(),
        notebook.code_cell_count()
    );
    Ok(notebook)
}

fn fetch_remote(url: &str, options: &LoadOptions) -> Result<String> {
    log::debug!("Fetching notebook from {url}");

    let mut builder = reqwest::blocking::Client::builder();
    // reqwest's blocking client applies a 30s default unless told otherwise
    builder = builder.timeout(options.timeout);
    let client = builder.build().map_err(|source| LoadError::Request {
        url: url.to_string(),
        source,
    })?;

    let response = client.get(url).send().map_err(|source| LoadError::Request {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        log::warn!("HTTP error {status} fetching notebook from {url}");
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().map_err(|source| LoadError::Request {
        url: url.to_string(),
        source,
    })
}
