//! Tokio-driven scheduler for native hosts.
//!
//! Tasks are spawned on an owned [`LocalSet`], so callbacks stay on the
//! thread that drives it and need not be `Send`. Nothing runs until the
//! owner drives the set, typically via [`TokioScheduler::run_until`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::{AbortHandle, LocalSet};
use tokio::time::{self, Instant, MissedTickBehavior};

use super::{Scheduler, TaskHandle};

/// Emulated display refresh used for animation-frame requests.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const MIN_PERIOD: Duration = Duration::from_millis(1);

pub struct TokioScheduler {
    local: LocalSet,
    tasks: Rc<RefCell<HashMap<u64, AbortHandle>>>,
    next_id: Cell<u64>,
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self {
            local: LocalSet::new(),
            tasks: Rc::new(RefCell::new(HashMap::new())),
            next_id: Cell::new(0),
        }
    }

    /// Drive scheduled tasks until `future` completes.
    pub async fn run_until<F: Future>(&self, future: F) -> F::Output {
        self.local.run_until(future).await
    }

    /// Tasks scheduled and not yet finished or cancelled.
    pub fn active_tasks(&self) -> usize {
        self.tasks.borrow().len()
    }

    fn allocate(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn spawn_once(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskHandle {
        let id = self.allocate();
        let tasks = Rc::clone(&self.tasks);
        let join = self.local.spawn_local(async move {
            time::sleep(delay).await;
            tasks.borrow_mut().remove(&id);
            task();
        });
        self.tasks.borrow_mut().insert(id, join.abort_handle());
        TaskHandle::from_raw(id)
    }
}

impl Scheduler for TokioScheduler {
    fn set_interval(&self, period: Duration, mut task: Box<dyn FnMut()>) -> Option<TaskHandle> {
        let period = period.max(MIN_PERIOD);
        let id = self.allocate();
        let join = self.local.spawn_local(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                task();
            }
        });
        self.tasks.borrow_mut().insert(id, join.abort_handle());
        tracing::trace!(id, ?period, "interval scheduled");
        Some(TaskHandle::from_raw(id))
    }

    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<TaskHandle> {
        Some(self.spawn_once(delay, task))
    }

    fn request_animation_frame(&self, task: Box<dyn FnOnce()>) -> Option<TaskHandle> {
        Some(self.spawn_once(FRAME_INTERVAL, task))
    }

    fn cancel(&self, handle: TaskHandle) {
        if let Some(abort) = self.tasks.borrow_mut().remove(&handle.raw()) {
            abort.abort();
            tracing::trace!(id = handle.raw(), "task cancelled");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, abort) in self.tasks.borrow_mut().drain() {
            abort.abort();
        }
    }
}
