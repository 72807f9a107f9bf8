//! Cooperative timer facilities.
//!
//! Everything runs on the UI thread: a scheduled task is a callback the
//! host invokes later, never a parallel thread of work.

#[cfg(not(target_arch = "wasm32"))]
mod local;
mod manual;

#[cfg(not(target_arch = "wasm32"))]
pub use local::TokioScheduler;
pub use manual::ManualScheduler;

use std::time::Duration;

/// Identifies a scheduled task for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A host timer facility.
///
/// Scheduling calls return `None` when the host cannot provide the
/// facility (for example no animation-frame clock); callers then fall back
/// to applying their effect immediately.
pub trait Scheduler {
    /// Run `task` every `period` until cancelled. The first run happens one
    /// period after scheduling.
    fn set_interval(&self, period: Duration, task: Box<dyn FnMut()>) -> Option<TaskHandle>;

    /// Run `task` once after `delay`.
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<TaskHandle>;

    /// Run `task` before the next repaint.
    fn request_animation_frame(&self, task: Box<dyn FnOnce()>) -> Option<TaskHandle>;

    /// Cancel a pending task. Cancelling a finished or unknown handle is a
    /// no-op. After this returns the task never runs again.
    fn cancel(&self, handle: TaskHandle);
}
