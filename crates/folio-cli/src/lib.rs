//! Command-line interface for the folio notebook showcase
//!
//! This crate provides the `folio` tool, which renders published Jupyter
//! notebooks to standalone HTML pages.
//!
//! # Quick Start
//!
//! ```bash
//! # List published notebooks
//! folio list
//!
//! # Render a notebook by slug (outputs to stdout)
//! folio render titanic-survival
//!
//! # Render any notebook URL or path to a file
//! folio convert analysis.ipynb -o analysis.html --title "My Analysis"
//!
//! # Create a .folio.toml with commented defaults
//! folio config init
//! ```
//!
//! # Exit Codes
//!
//! - `0` - Success
//! - `1` - General error
//! - `3` - Notebook not found in the catalog
//! - `5` - Notebook failed to load

pub mod catalog;
pub mod config;

pub use catalog::{title_from_location, Catalog, CatalogEntry, CatalogError};
pub use config::{Config, ConfigError, CONFIG_FILE_NAME};

/// Process exit codes
pub mod exit_code {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// General error
    pub const GENERAL_ERROR: i32 = 1;
    /// Unknown catalog slug
    pub const NOT_FOUND: i32 = 3;
    /// Document failed to load
    pub const LOAD_ERROR: i32 = 5;
}
