//! Controller tuning knobs.

use std::time::Duration;

/// Configuration for [`crate::SearchController`].
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Quiet period a text draft must hold before it is committed.
    pub debounce_interval: Duration,
    /// User-facing message shown for non-cancellation fetch failures.
    pub error_message: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce_interval: Duration::from_millis(300),
            error_message: "Failed to load products. Please try again.".to_string(),
        }
    }
}

impl ControllerConfig {
    /// Override the debounce interval.
    pub fn with_debounce_interval(mut self, interval: Duration) -> Self {
        self.debounce_interval = interval;
        self
    }

    /// Override the user-facing error message.
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }
}
