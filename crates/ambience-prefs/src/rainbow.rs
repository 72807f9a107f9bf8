//! Rainbow hue cycling.
//!
//! While running, a single repeating task advances the accent hue by one
//! degree per tick and writes it to `--hue`. The animator owns that task:
//! restarting cancels the previous one first, stopping cancels it and puts
//! the persisted hue back, and dropping the animator cancels it too.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use ambience_common::PreferenceEvent;
use ambience_config::parse_leading_i32;
use ambience_config::schema::RainbowConfig;
use ambience_platform::{LiveDocument, TaskHandle};

use crate::host::Host;
use crate::keys;
use crate::theme::ThemeController;

#[derive(Debug, Default)]
struct Animation {
    task: Option<TaskHandle>,
    hue: i32,
}

pub struct RainbowAnimator {
    host: Host,
    theme: Rc<ThemeController>,
    interval: Duration,
    animation: Rc<RefCell<Animation>>,
}

impl RainbowAnimator {
    pub fn new(host: Host, theme: Rc<ThemeController>, config: &RainbowConfig) -> Self {
        Self {
            host,
            theme,
            interval: Duration::from_millis(config.interval_ms),
            animation: Rc::new(RefCell::new(Animation::default())),
        }
    }

    /// The persisted rainbow flag.
    pub fn is_enabled(&self) -> bool {
        self.host
            .guard()
            .read(keys::RAINBOW_MODE)
            .is_some_and(|raw| keys::parse_flag(&raw))
    }

    pub fn is_running(&self) -> bool {
        self.animation.borrow().task.is_some()
    }

    /// Hue most recently written by the animation, while running.
    pub fn current_hue(&self) -> Option<i32> {
        let animation = self.animation.borrow();
        animation.task.map(|_| animation.hue)
    }

    /// Persist the flag, toggle the `rainbow-mode` marker, start or stop
    /// the animation and notify. Only persistence depends on storage.
    pub fn set_enabled(&self, enabled: bool) {
        self.host
            .guard()
            .write(keys::RAINBOW_MODE, &enabled.to_string());
        if let Some(document) = self.host.document() {
            document.toggle_class(keys::class::RAINBOW_MODE, enabled);
        }
        if enabled {
            self.start();
        } else {
            self.stop();
        }
        self.host
            .notify(PreferenceEvent::RainbowModeChange { enabled });
    }

    /// Begin cycling from the live `--hue` value, else the persisted hue.
    /// Any running animation is cancelled first. Returns whether a
    /// repeating task is now scheduled.
    pub fn start(&self) -> bool {
        self.cancel_task();
        let Some(document) = self.host.document() else {
            return false;
        };

        let start = document
            .style_var(keys::var::HUE)
            .and_then(|raw| parse_leading_i32(&raw))
            .unwrap_or_else(|| self.theme.hue());
        self.animation.borrow_mut().hue = start;
        advance(&self.animation, document.as_ref());

        let Some(scheduler) = self.host.scheduler() else {
            tracing::warn!("no timer facility, rainbow animation not started");
            return false;
        };
        let animation: Weak<RefCell<Animation>> = Rc::downgrade(&self.animation);
        let target = Rc::clone(document);
        let task = scheduler.set_interval(
            self.interval,
            Box::new(move || {
                if let Some(animation) = animation.upgrade() {
                    advance(&animation, target.as_ref());
                }
            }),
        );
        self.animation.borrow_mut().task = task;
        tracing::debug!(start, interval = ?self.interval, "rainbow animation started");
        task.is_some()
    }

    /// Cancel the animation and restore `--hue` to the persisted hue.
    pub fn stop(&self) {
        if self.cancel_task() {
            tracing::debug!("rainbow animation stopped");
        }
        if let Some(document) = self.host.document() {
            document.set_style_var(keys::var::HUE, &self.theme.hue().to_string());
        }
    }

    fn cancel_task(&self) -> bool {
        let task = self.animation.borrow_mut().task.take();
        let Some(task) = task else {
            return false;
        };
        if let Some(scheduler) = self.host.scheduler() {
            scheduler.cancel(task);
        }
        true
    }
}

impl Drop for RainbowAnimator {
    fn drop(&mut self) {
        self.cancel_task();
    }
}

fn advance(animation: &RefCell<Animation>, document: &dyn LiveDocument) {
    let hue = {
        let mut animation = animation.borrow_mut();
        // Reduce first: a preserved hue may sit at the edge of i32.
        animation.hue = (animation.hue.rem_euclid(360) + 1) % 360;
        animation.hue
    };
    document.set_style_var(keys::var::HUE, &hue.to_string());
}
