//! Deterministic virtual-clock scheduler.
//!
//! Nothing runs until the owner calls [`ManualScheduler::advance`] or
//! [`ManualScheduler::run_frames`], which makes timer behavior exactly
//! reproducible in tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

use super::{Scheduler, TaskHandle};

const MIN_PERIOD: Duration = Duration::from_millis(1);

enum TimerTask {
    Once(Box<dyn FnOnce()>),
    Repeat {
        period: Duration,
        task: Box<dyn FnMut()>,
    },
}

struct Timer {
    due: Duration,
    task: TimerTask,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<u64, Timer>,
    frames: Vec<(u64, Box<dyn FnOnce()>)>,
    frames_unsupported: bool,
    /// Interval currently executing (removed from `timers` while it runs).
    running_interval: Option<u64>,
    running_cancelled: bool,
    peak_intervals: usize,
}

impl ManualState {
    fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn live_intervals(&self) -> usize {
        let queued = self
            .timers
            .values()
            .filter(|timer| matches!(timer.task, TimerTask::Repeat { .. }))
            .count();
        let running = usize::from(self.running_interval.is_some() && !self.running_cancelled);
        queued + running
    }
}

#[derive(Default)]
pub struct ManualScheduler {
    state: RefCell<ManualState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler whose host has no animation-frame clock.
    pub fn without_animation_frames() -> Self {
        let scheduler = Self::default();
        scheduler.state.borrow_mut().frames_unsupported = true;
        scheduler
    }

    /// Virtual time elapsed so far.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Move the clock forward by `by`, running every timer that comes due
    /// in chronological order. Returns the number of task runs.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut runs = 0;

        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due_id = state
                    .timers
                    .iter()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(id, timer)| (timer.due, **id))
                    .map(|(id, _)| *id);
                match due_id.and_then(|id| state.timers.remove(&id).map(|timer| (id, timer))) {
                    Some((id, timer)) => {
                        state.now = timer.due;
                        if matches!(timer.task, TimerTask::Repeat { .. }) {
                            state.running_interval = Some(id);
                            state.running_cancelled = false;
                        }
                        Some((id, timer))
                    }
                    None => None,
                }
            };

            let Some((id, Timer { due, task })) = next else {
                break;
            };
            runs += 1;

            match task {
                TimerTask::Once(task) => task(),
                TimerTask::Repeat { period, mut task } => {
                    task();
                    let mut state = self.state.borrow_mut();
                    state.running_interval = None;
                    if !state.running_cancelled {
                        state.timers.insert(
                            id,
                            Timer {
                                due: due + period,
                                task: TimerTask::Repeat { period, task },
                            },
                        );
                    }
                }
            }
        }

        self.state.borrow_mut().now = target;
        runs
    }

    /// Run every animation-frame callback queued so far. Callbacks queued
    /// while this runs wait for the next call, like a real frame boundary.
    pub fn run_frames(&self) -> usize {
        let frames = std::mem::take(&mut self.state.borrow_mut().frames);
        let count = frames.len();
        for (_, task) in frames {
            task();
        }
        count
    }

    /// Repeating tasks currently alive.
    pub fn active_intervals(&self) -> usize {
        self.state.borrow().live_intervals()
    }

    /// Highest number of simultaneously alive repeating tasks ever seen.
    pub fn peak_intervals(&self) -> usize {
        self.state.borrow().peak_intervals
    }

    /// One-shot timers not yet fired or cancelled.
    pub fn pending_timeouts(&self) -> usize {
        self.state
            .borrow()
            .timers
            .values()
            .filter(|timer| matches!(timer.task, TimerTask::Once(_)))
            .count()
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }
}

impl Scheduler for ManualScheduler {
    fn set_interval(&self, period: Duration, task: Box<dyn FnMut()>) -> Option<TaskHandle> {
        let period = period.max(MIN_PERIOD);
        let mut state = self.state.borrow_mut();
        let id = state.allocate();
        let due = state.now + period;
        state.timers.insert(
            id,
            Timer {
                due,
                task: TimerTask::Repeat { period, task },
            },
        );
        state.peak_intervals = state.peak_intervals.max(state.live_intervals());
        Some(TaskHandle(id))
    }

    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<TaskHandle> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate();
        let due = state.now + delay;
        state.timers.insert(
            id,
            Timer {
                due,
                task: TimerTask::Once(task),
            },
        );
        Some(TaskHandle(id))
    }

    fn request_animation_frame(&self, task: Box<dyn FnOnce()>) -> Option<TaskHandle> {
        let mut state = self.state.borrow_mut();
        if state.frames_unsupported {
            return None;
        }
        let id = state.allocate();
        state.frames.push((id, task));
        Some(TaskHandle(id))
    }

    fn cancel(&self, handle: TaskHandle) {
        let mut state = self.state.borrow_mut();
        let id = handle.0;
        if state.timers.remove(&id).is_none() && state.running_interval == Some(id) {
            state.running_cancelled = true;
        }
        state.frames.retain(|(frame_id, _)| *frame_id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        (count.clone(), count)
    }

    #[test]
    fn interval_runs_on_cadence() {
        let scheduler = ManualScheduler::new();
        let (count, sink) = counter();
        scheduler.set_interval(
            Duration::from_millis(45),
            Box::new(move || sink.set(sink.get() + 1)),
        );

        scheduler.advance(Duration::from_millis(44));
        assert_eq!(count.get(), 0);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(count.get(), 1);
        scheduler.advance(Duration::from_millis(450));
        assert_eq!(count.get(), 11);
        assert_eq!(scheduler.now(), Duration::from_millis(495));
    }

    #[test]
    fn cancelled_interval_never_runs_again() {
        let scheduler = ManualScheduler::new();
        let (count, sink) = counter();
        let handle = scheduler
            .set_interval(
                Duration::from_millis(10),
                Box::new(move || sink.set(sink.get() + 1)),
            )
            .unwrap();

        scheduler.advance(Duration::from_millis(25));
        scheduler.cancel(handle);
        scheduler.advance(Duration::from_millis(100));

        assert_eq!(count.get(), 2);
        assert_eq!(scheduler.active_intervals(), 0);
    }

    #[test]
    fn interval_can_cancel_itself() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (count, sink) = counter();
        let slot: Rc<Cell<Option<TaskHandle>>> = Rc::new(Cell::new(None));

        let inner = scheduler.clone();
        let own = slot.clone();
        let handle = scheduler.set_interval(
            Duration::from_millis(10),
            Box::new(move || {
                sink.set(sink.get() + 1);
                if sink.get() == 3 {
                    if let Some(handle) = own.get() {
                        inner.cancel(handle);
                    }
                }
            }),
        );
        slot.set(handle);

        scheduler.advance(Duration::from_millis(100));
        assert_eq!(count.get(), 3);
        assert_eq!(scheduler.active_intervals(), 0);
    }

    #[test]
    fn timeouts_fire_once_in_order() {
        let scheduler = ManualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (delay, tag) in [(30, "late"), (10, "early"), (10, "early-second")] {
            let order = order.clone();
            scheduler.set_timeout(
                Duration::from_millis(delay),
                Box::new(move || order.borrow_mut().push(tag)),
            );
        }

        assert_eq!(scheduler.pending_timeouts(), 3);
        scheduler.advance(Duration::from_millis(100));
        assert_eq!(*order.borrow(), vec!["early", "early-second", "late"]);
        assert_eq!(scheduler.pending_timeouts(), 0);
    }

    #[test]
    fn cancelled_timeout_is_dropped() {
        let scheduler = ManualScheduler::new();
        let (count, sink) = counter();
        let handle = scheduler
            .set_timeout(
                Duration::from_millis(50),
                Box::new(move || sink.set(sink.get() + 1)),
            )
            .unwrap();
        scheduler.cancel(handle);
        scheduler.advance(Duration::from_secs(1));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn frames_queued_during_a_frame_wait_for_the_next() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (count, sink) = counter();

        let inner = scheduler.clone();
        scheduler.request_animation_frame(Box::new(move || {
            inner.request_animation_frame(Box::new(move || sink.set(sink.get() + 1)));
        }));

        assert_eq!(scheduler.run_frames(), 1);
        assert_eq!(count.get(), 0);
        assert_eq!(scheduler.pending_frames(), 1);
        assert_eq!(scheduler.run_frames(), 1);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn frames_unsupported_returns_none() {
        let scheduler = ManualScheduler::without_animation_frames();
        assert!(scheduler
            .request_animation_frame(Box::new(|| {}))
            .is_none());
    }

    #[test]
    fn peak_tracks_concurrent_intervals() {
        let scheduler = ManualScheduler::new();
        let a = scheduler
            .set_interval(Duration::from_millis(10), Box::new(|| {}))
            .unwrap();
        scheduler.cancel(a);
        scheduler.set_interval(Duration::from_millis(10), Box::new(|| {}));
        assert_eq!(scheduler.peak_intervals(), 1);

        scheduler.set_interval(Duration::from_millis(10), Box::new(|| {}));
        assert_eq!(scheduler.peak_intervals(), 2);
        assert_eq!(scheduler.active_intervals(), 2);
    }
}
