//! Shared run controls for the async runner.
//!
//! The runner task and whatever drives it (a UI task, a signal handler)
//! share one [`MatchControls`] behind an [`Arc`](std::sync::Arc). Flags are
//! atomics so the runner can poll them every frame without locking.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, Notify};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEndReason {
    /// A normal match produced a winner.
    Won,
    /// The tutorial reached its final step.
    TutorialComplete,
    /// Hit the configured frame limit.
    MaxTicksReached,
    /// Someone asked the runner to stop.
    Stopped,
}

/// Shared pause/stop state.
#[derive(Debug)]
pub struct MatchControls {
    /// Whether the run should be paused.
    paused: AtomicBool,

    /// Wakes the runner on resume.
    resume_notify: Notify,

    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Frame limit (0 = unlimited).
    max_ticks: u64,

    /// Reason the run ended, once it has.
    end_reason: Mutex<Option<RunEndReason>>,
}

impl MatchControls {
    /// Fresh controls with a frame limit (0 = unlimited).
    pub fn new(max_ticks: u64) -> Self {
        Self {
            paused: AtomicBool::new(false),
            resume_notify: Notify::new(),
            stop_requested: AtomicBool::new(false),
            max_ticks,
            end_reason: Mutex::new(None),
        }
    }

    // -----------------------------------------------------------------------
    // Pause / Resume
    // -----------------------------------------------------------------------

    /// Whether a pause is in effect.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Ask the runner to pause.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    /// Lift the pause and wake the runner.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Return once the pause is lifted or a stop is requested (immediately
    /// if neither paused nor stopping).
    pub async fn wait_if_paused(&self) {
        while self.is_paused() && !self.is_stop_requested() {
            self.resume_notify.notified().await;
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Ask the runner to stop before its next frame.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        // A paused runner must wake up to notice.
        self.resume_notify.notify_one();
    }

    /// Whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Record why the run ended.
    pub async fn set_end_reason(&self, reason: RunEndReason) {
        *self.end_reason.lock().await = Some(reason);
    }

    /// Why the run ended, if it has.
    pub async fn end_reason(&self) -> Option<RunEndReason> {
        *self.end_reason.lock().await
    }

    // -----------------------------------------------------------------------
    // Boundaries
    // -----------------------------------------------------------------------

    /// Whether `frames` has reached the limit.
    pub const fn tick_limit_reached(&self, frames: u64) -> bool {
        self.max_ticks > 0 && frames >= self.max_ticks
    }

    /// The configured frame limit.
    pub const fn max_ticks(&self) -> u64 {
        self.max_ticks
    }
}
