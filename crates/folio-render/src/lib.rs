//! # folio-render
//!
//! Renders parsed Jupyter notebooks to HTML for the folio showcase site.
//!
//! ## Pipeline
//!
//! - **Markdown cells**: special-case substitution table, asset path
//!   rewriting, then pulldown-cmark with raw HTML passthrough
//! - **Code cells**: `In [n]` prompt and syntect-highlighted source
//! - **Outputs**: one representation per output chosen by a fixed MIME
//!   priority (HTML, video, audio, SVG, raster image, plain text), framed with
//!   an `Out [n]` label; streams and tracebacks render as preformatted text
//!
//! ## Example
//!
//! ```rust
//! use folio_notebook::parse_notebook_from_str;
//! use folio_render::{render_page, Renderer};
//!
//! let notebook = parse_notebook_from_str(
//!     r#"{"cells": [{"cell_type": "markdown", "source": "![alt](images/foo.png)"}]}"#,
//! )?;
//! let rendered = Renderer::default().render(&notebook);
//! assert_eq!(rendered.blocks.len(), 1);
//! assert!(rendered.to_html().contains("/notebooks/images/foo.png"));
//!
//! let page = render_page("Demo", &rendered);
//! assert!(page.starts_with("<!DOCTYPE html>"));
//! # Ok::<(), folio_notebook::LoadError>(())
//! ```

pub mod dispatch;
pub mod highlight;
pub mod html;
pub mod markdown;
pub mod options;
pub mod page;
pub mod paths;
pub mod renderer;
pub mod substitutions;
pub mod telemetry;
pub mod viewer;

pub use dispatch::{dispatch, has_video_signal, MimeRule, OutputBody, MIME_DISPATCH};
pub use highlight::CodeHighlighter;
pub use markdown::{markdown_to_html, render_markdown_cell, MarkdownRender};
pub use options::RenderOptions;
pub use page::{render_error_page, render_not_found, render_page};
pub use paths::rewrite_asset_paths;
pub use renderer::{Block, CodeBlock, RenderedNotebook, RenderedOutput, Renderer};
pub use substitutions::{apply_substitutions, Substitution, SubstitutionOutcome, SUBSTITUTIONS};
pub use telemetry::{LogTelemetry, NoopTelemetry, RecordingTelemetry, Telemetry, TelemetryEvent};
pub use viewer::{NotebookViewer, ViewOutcome};
