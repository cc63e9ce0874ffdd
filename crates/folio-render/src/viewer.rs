//! Load → render → page, one notebook view at a time

use crate::page::{render_error_page, render_page};
use crate::renderer::{RenderedNotebook, Renderer};
use crate::telemetry::{NoopTelemetry, Telemetry, TelemetryEvent};
use folio_notebook::{load_notebook, LoadError, LoadOptions, Notebook};
use std::sync::Arc;

/// Result of viewing one notebook
#[derive(Debug)]
pub enum ViewOutcome {
    /// The notebook loaded and rendered
    Rendered {
        /// Full HTML page
        html: String,
        /// Rendered blocks
        notebook: RenderedNotebook,
    },
    /// The notebook failed to load; `html` shows the error state
    Failed {
        /// Full HTML error page
        html: String,
        /// Why loading failed
        error: LoadError,
    },
}

impl ViewOutcome {
    /// Page markup, whichever state was reached
    #[inline]
    #[must_use]
    pub fn html(&self) -> &str {
        match self {
            Self::Rendered { html, .. } | Self::Failed { html, .. } => html,
        }
    }

    /// Whether the notebook rendered
    #[inline]
    #[must_use]
    pub const fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// Owns a renderer, load options and a telemetry sink
pub struct NotebookViewer {
    renderer: Renderer,
    load_options: LoadOptions,
    telemetry: Arc<dyn Telemetry>,
}

impl std::fmt::Debug for NotebookViewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotebookViewer")
            .field("renderer", &self.renderer)
            .field("load_options", &self.load_options)
            .finish_non_exhaustive()
    }
}

impl NotebookViewer {
    /// Viewer with default load options and no telemetry
    #[must_use]
    pub fn new(renderer: Renderer) -> Self {
        Self {
            renderer,
            load_options: LoadOptions::default(),
            telemetry: Arc::new(NoopTelemetry),
        }
    }

    /// Use different load options
    #[must_use = "returns a viewer with the load options configured"]
    pub fn with_load_options(mut self, load_options: LoadOptions) -> Self {
        self.load_options = load_options;
        self
    }

    /// Report events to `telemetry`
    #[must_use = "returns a viewer with the telemetry sink configured"]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn Telemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Load the notebook at `location` and produce its page or an error page
    pub fn view(&self, title: &str, location: &str) -> ViewOutcome {
        match load_notebook(location, &self.load_options) {
            Ok(notebook) => self.view_loaded(title, location, &notebook),
            Err(error) => {
                log::warn!("Failed to load notebook '{title}' from {location}: {error}");
                self.telemetry.record(&TelemetryEvent::LoadFailed {
                    title: title.to_string(),
                    location: location.to_string(),
                    reason: error.to_string(),
                });
                ViewOutcome::Failed {
                    html: render_error_page(title, &error),
                    error,
                }
            }
        }
    }

    /// Produce the page for an already loaded notebook
    pub fn view_loaded(&self, title: &str, location: &str, notebook: &Notebook) -> ViewOutcome {
        let rendered = self.renderer.render(notebook);
        self.telemetry.record(&TelemetryEvent::NotebookViewed {
            title: title.to_string(),
            location: location.to_string(),
            blocks: rendered.blocks.len(),
        });
        ViewOutcome::Rendered {
            html: render_page(title, &rendered),
            notebook: rendered,
        }
    }
}
