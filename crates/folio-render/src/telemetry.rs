//! Optional page-view telemetry
//!
//! The viewer reports what happened through an injected [`Telemetry`]
//! collaborator. Nothing is recorded unless a caller supplies one.

use std::sync::Mutex;

/// Event reported by the notebook viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryEvent {
    /// A notebook loaded and rendered
    NotebookViewed {
        /// Page title
        title: String,
        /// Document location
        location: String,
        /// Number of rendered blocks
        blocks: usize,
    },
    /// A notebook failed to load
    LoadFailed {
        /// Page title
        title: String,
        /// Document location
        location: String,
        /// Error message
        reason: String,
    },
}

impl TelemetryEvent {
    /// Stable event name
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NotebookViewed { .. } => "notebook_viewed",
            Self::LoadFailed { .. } => "notebook_load_failed",
        }
    }
}

/// Sink for viewer events
pub trait Telemetry: Send + Sync {
    /// Record one event
    fn record(&self, event: &TelemetryEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopTelemetry;

impl Telemetry for NoopTelemetry {
    #[inline]
    fn record(&self, _event: &TelemetryEvent) {}
}

/// Writes events through the `log` facade at info level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogTelemetry;

impl Telemetry for LogTelemetry {
    fn record(&self, event: &TelemetryEvent) {
        match event {
            TelemetryEvent::NotebookViewed {
                title,
                location,
                blocks,
            } => log::info!(
                "[{}] title={title:?} location={location} blocks={blocks}",
                event.name()
            ),
            TelemetryEvent::LoadFailed {
                title,
                location,
                reason,
            } => log::info!(
                "[{}] title={title:?} location={location} reason={reason:?}",
                event.name()
            ),
        }
    }
}

/// Keeps events in memory, for tests and batch summaries
#[derive(Debug, Default)]
pub struct RecordingTelemetry {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingTelemetry {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far
    #[must_use]
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl Telemetry for RecordingTelemetry {
    fn record(&self, event: &TelemetryEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
