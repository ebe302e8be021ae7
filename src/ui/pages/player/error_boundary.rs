use serde::Serialize;
use tracing::info;

/// Failure reported by the media surface when it cannot load or play.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaFailure {
    pub message: String,
    /// Engine-specific error code, if the engine provides one
    pub code: Option<i32>,
}

impl MediaFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }
}

/// Holds the failure that replaced the control chrome, if any.
#[derive(Debug, Default)]
pub struct ErrorBoundary {
    failure: Option<MediaFailure>,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failure(&self) -> Option<&MediaFailure> {
        self.failure.as_ref()
    }

    /// Check if there's an active error
    pub fn has_error(&self) -> bool {
        self.failure.is_some()
    }

    /// Show an error. Returns true if the boundary just tripped, false if an
    /// error was already showing and has only been replaced.
    pub fn show_error(&mut self, failure: MediaFailure) -> bool {
        info!("Media failure: {}", failure.message);
        self.failure.replace(failure).is_none()
    }

    /// Clear the error, returning the failure that was showing
    pub fn clear_error(&mut self) -> Option<MediaFailure> {
        self.failure.take()
    }
}
