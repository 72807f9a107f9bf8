//! Background visibility and blur.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use ambience_common::PreferenceEvent;
use ambience_config::parse_leading_i32;
use ambience_config::schema::BackgroundConfig;
use ambience_platform::{LiveDocument, TaskHandle};

use crate::host::Host;
use crate::keys;

pub struct BackgroundPresentation {
    host: Host,
    default_blur: i32,
    fade_in_delay: Duration,
    /// Fade-in timer scheduled by the last re-enable, until it fires.
    pending_fade: Rc<Cell<Option<TaskHandle>>>,
}

impl BackgroundPresentation {
    pub fn new(host: Host, config: &BackgroundConfig) -> Self {
        Self {
            host,
            default_blur: config.default_blur,
            fade_in_delay: Duration::from_millis(config.fade_in_delay_ms),
            pending_fade: Rc::new(Cell::new(None)),
        }
    }

    pub fn disabled(&self) -> bool {
        self.host
            .guard()
            .read(keys::BACKGROUND_DISABLED)
            .is_some_and(|raw| keys::parse_flag(&raw))
    }

    /// Persist the flag, update the root markers, pause or resume
    /// background videos, then notify.
    pub fn set_disabled(&self, disabled: bool) {
        self.host
            .guard()
            .write(keys::BACKGROUND_DISABLED, &disabled.to_string());
        self.apply(disabled);
        tracing::debug!(disabled, "background visibility set");
        self.host
            .notify(PreferenceEvent::BackgroundDisabledChange { disabled });
    }

    /// Document side of [`set_disabled`](Self::set_disabled), without
    /// persisting or notifying.
    pub(crate) fn apply(&self, disabled: bool) {
        self.cancel_pending_fade();
        let Some(document) = self.host.document() else {
            return;
        };

        document.toggle_class(keys::class::BACKGROUND_DISABLED, disabled);
        if disabled {
            document.remove_class(keys::class::BACKGROUND_ACTIVE);
        } else {
            self.schedule_fade_in(document);
        }
        let videos = document.set_background_videos_playing(!disabled);
        tracing::trace!(videos, playing = !disabled, "background videos updated");
    }

    /// Whether a fade-in is still waiting to fire.
    pub fn fade_pending(&self) -> bool {
        self.pending_fade.get().is_some()
    }

    pub fn blur(&self) -> i32 {
        self.host
            .guard()
            .read(keys::BACKGROUND_BLUR)
            .and_then(|raw| parse_leading_i32(&raw))
            .unwrap_or(self.default_blur)
    }

    /// Persist the blur radius and write it to `--background-blur`. Any
    /// value is accepted.
    pub fn set_blur(&self, px: i32) {
        self.host
            .guard()
            .write(keys::BACKGROUND_BLUR, &px.to_string());
        self.apply_blur(px);
    }

    pub(crate) fn apply_blur(&self, px: i32) {
        if let Some(document) = self.host.document() {
            document.set_style_var(keys::var::BACKGROUND_BLUR, &blur_css(px));
        }
    }

    fn schedule_fade_in(&self, document: &Rc<dyn LiveDocument>) {
        let target = Rc::clone(document);
        let pending = Rc::clone(&self.pending_fade);
        let handle = self.host.scheduler().and_then(|scheduler| {
            scheduler.set_timeout(
                self.fade_in_delay,
                Box::new(move || {
                    pending.set(None);
                    target.add_class(keys::class::BACKGROUND_ACTIVE);
                }),
            )
        });
        match handle {
            Some(handle) => self.pending_fade.set(Some(handle)),
            None => document.add_class(keys::class::BACKGROUND_ACTIVE),
        }
    }

    fn cancel_pending_fade(&self) {
        let Some(handle) = self.pending_fade.take() else {
            return;
        };
        if let Some(scheduler) = self.host.scheduler() {
            scheduler.cancel(handle);
        }
    }
}

impl Drop for BackgroundPresentation {
    fn drop(&mut self) {
        self.cancel_pending_fade();
    }
}

pub(crate) fn blur_css(px: i32) -> String {
    format!("{px}px")
}
