//! Rejections reported by the playback controller
//!
//! None of these change any state: the controller returns one instead of
//! acting, and the caller decides whether to show it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// A run is executing; run, reset and seek wait until it finishes
    #[error("a run is already in progress")]
    RunInProgress,

    /// Seek target outside the recorded history
    #[error("step {step} is out of range (history has {total} steps)")]
    StepOutOfRange { step: usize, total: usize },

    /// Nothing has been recorded yet
    #[error("no steps recorded")]
    EmptyHistory,
}
