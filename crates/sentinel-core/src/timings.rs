//! Cosmetic stage delays.

use std::time::Duration;

/// Delays the wizard waits through to look like real work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTimings {
    /// Simulated file read before parsing an upload.
    pub file_read: Duration,
    /// Per preprocessing step.
    pub preprocess_step: Duration,
    /// Between training curve points.
    pub training_tick: Duration,
    /// After the curve completes, before metrics are handed on.
    pub training_settle: Duration,
    /// From entering Deploy until the endpoint reports active.
    pub activation: Duration,
}

impl Default for StageTimings {
    fn default() -> Self {
        Self {
            file_read: Duration::from_millis(1500),
            preprocess_step: Duration::from_millis(800),
            training_tick: Duration::from_millis(100),
            training_settle: Duration::from_millis(500),
            activation: Duration::from_secs(3),
        }
    }
}

impl StageTimings {
    /// No delays at all.
    pub fn instant() -> Self {
        Self {
            file_read: Duration::ZERO,
            preprocess_step: Duration::ZERO,
            training_tick: Duration::ZERO,
            training_settle: Duration::ZERO,
            activation: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_activation(mut self, activation: Duration) -> Self {
        self.activation = activation;
        self
    }
}
