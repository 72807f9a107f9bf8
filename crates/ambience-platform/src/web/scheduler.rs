use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::scheduler::{Scheduler, TaskHandle};

type Callback = Closure<dyn FnMut()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OneShot {
    Timeout,
    Frame,
}

struct Pending {
    kind: OneShot,
    js_id: i32,
    closure: Callback,
}

/// Window timers: `setInterval`, `setTimeout`, `requestAnimationFrame`.
///
/// Every scheduled callback is an owned [`Closure`], so cancelling a task
/// releases its closure instead of leaking it to the JS heap.
pub struct BrowserScheduler {
    window: Window,
    next_id: Cell<u64>,
    intervals: RefCell<HashMap<u64, (i32, Callback)>>,
    one_shots: Rc<RefCell<HashMap<u64, Pending>>>,
    /// Closures that are finished or cancelled. A closure may retire itself
    /// while running, so they are freed at the start of the next callback.
    retired: Rc<RefCell<Vec<Callback>>>,
}

impl BrowserScheduler {
    pub fn new() -> Option<Self> {
        Some(Self {
            window: web_sys::window()?,
            next_id: Cell::new(0),
            intervals: RefCell::new(HashMap::new()),
            one_shots: Rc::new(RefCell::new(HashMap::new())),
            retired: Rc::new(RefCell::new(Vec::new())),
        })
    }

    /// Tasks whose closures are still registered with the window.
    pub fn pending_tasks(&self) -> usize {
        self.intervals.borrow().len() + self.one_shots.borrow().len()
    }

    fn allocate(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    /// Wrap a one-shot task so it retires its own closure when it fires.
    fn one_shot_closure(&self, id: u64, task: Box<dyn FnOnce()>) -> Callback {
        let one_shots = Rc::clone(&self.one_shots);
        let retired = Rc::clone(&self.retired);
        let mut task = Some(task);
        Closure::wrap(Box::new(move || {
            retired.borrow_mut().clear();
            if let Some(pending) = one_shots.borrow_mut().remove(&id) {
                retired.borrow_mut().push(pending.closure);
            }
            if let Some(task) = task.take() {
                task();
            }
        }) as Box<dyn FnMut()>)
    }

    fn clear_js(&self, kind: OneShot, js_id: i32) {
        match kind {
            OneShot::Timeout => self.window.clear_timeout_with_handle(js_id),
            OneShot::Frame => {
                let _ = self.window.cancel_animation_frame(js_id);
            }
        }
    }
}

fn millis(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}

impl Scheduler for BrowserScheduler {
    fn set_interval(&self, period: Duration, mut task: Box<dyn FnMut()>) -> Option<TaskHandle> {
        let id = self.allocate();
        let retired = Rc::clone(&self.retired);
        let closure: Callback = Closure::wrap(Box::new(move || {
            retired.borrow_mut().clear();
            task();
        }) as Box<dyn FnMut()>);
        let js_id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis(period),
            )
            .ok()?;
        self.intervals.borrow_mut().insert(id, (js_id, closure));
        Some(TaskHandle::from_raw(id))
    }

    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<TaskHandle> {
        let id = self.allocate();
        let closure = self.one_shot_closure(id, task);
        let js_id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis(delay),
            )
            .ok()?;
        self.one_shots.borrow_mut().insert(
            id,
            Pending {
                kind: OneShot::Timeout,
                js_id,
                closure,
            },
        );
        Some(TaskHandle::from_raw(id))
    }

    fn request_animation_frame(&self, task: Box<dyn FnOnce()>) -> Option<TaskHandle> {
        let id = self.allocate();
        let closure = self.one_shot_closure(id, task);
        let js_id = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok()?;
        self.one_shots.borrow_mut().insert(
            id,
            Pending {
                kind: OneShot::Frame,
                js_id,
                closure,
            },
        );
        Some(TaskHandle::from_raw(id))
    }

    fn cancel(&self, handle: TaskHandle) {
        let id = handle.raw();
        let interval = self.intervals.borrow_mut().remove(&id);
        if let Some((js_id, closure)) = interval {
            self.window.clear_interval_with_handle(js_id);
            self.retired.borrow_mut().push(closure);
        }
        let pending = self.one_shots.borrow_mut().remove(&id);
        if let Some(pending) = pending {
            self.clear_js(pending.kind, pending.js_id);
            self.retired.borrow_mut().push(pending.closure);
        }
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        for (_, (js_id, _closure)) in self.intervals.borrow_mut().drain() {
            self.window.clear_interval_with_handle(js_id);
        }
        let pending: Vec<Pending> = self
            .one_shots
            .borrow_mut()
            .drain()
            .map(|(_, pending)| pending)
            .collect();
        for pending in pending {
            self.clear_js(pending.kind, pending.js_id);
        }
    }
}
