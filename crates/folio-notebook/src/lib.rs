//! # folio-notebook
//!
//! Jupyter Notebook (.ipynb) model and loading for folio.
//!
//! This crate parses nbformat 4 documents leniently and extracts:
//! - Markdown cells, with `attachment:<key>` references inlined as `data:` URIs
//! - Code cells (with execution counts)
//! - Cell outputs (stream, display data, execute results, errors)
//! - Notebook metadata (title, kernel, language)
//!
//! Malformed cells and outputs are skipped rather than failing the document.
//! Only a document that cannot be fetched or is not a notebook at all produces
//! a [`LoadError`].
//!
//! ## Example
//!
//! ```no_run
//! use folio_notebook::{load_notebook, LoadOptions};
//!
//! let notebook = load_notebook("https://example.com/notebooks/titanic.ipynb", &LoadOptions::default())?;
//! for cell in &notebook.cells {
//!     println!("Cell type: {}", cell.cell_type());
//! }
//! # Ok::<(), folio_notebook::LoadError>(())
//! ```

/// Error types for notebook loading
pub mod error;
/// Jupyter notebook (ipynb) model and parser
pub mod ipynb;
/// Fetching notebooks from URLs and paths
pub mod loader;

pub use error::{LoadError, Result};
pub use ipynb::{
    data_uri, parse_notebook, parse_notebook_from_str, Attachment, Cell, CellType, CodeCell,
    MarkdownCell, MimeBundle, Notebook, NotebookMetadata, Output, OutputType, RawCell,
};
pub use loader::{load_notebook, DocumentSource, LoadOptions};
