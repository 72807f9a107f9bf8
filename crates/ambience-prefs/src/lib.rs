//! Visitor preference controllers.
//!
//! Each controller owns one slice of the visitor's visual preferences
//! (theme and hue, background selection, background presentation, rainbow
//! animation, rain overlay). A setter persists through the
//! [`StorageGuard`], mutates the live document, then notifies listeners on
//! the shared [`ChangeNotifier`](ambience_common::ChangeNotifier), in that
//! order and before it returns. No operation ever fails: a missing store,
//! document or timer facility degrades to defaults.

pub mod background;
pub mod css;
pub mod guard;
pub mod host;
pub mod keys;
pub mod presentation;
pub mod rain;
pub mod rainbow;
pub mod snapshot;
pub mod theme;

#[cfg(test)]
mod testing;

pub use background::BackgroundSelection;
pub use css::{generate_css_root, validate_css_numeric};
pub use guard::StorageGuard;
pub use host::{Host, HostBuilder};
pub use presentation::BackgroundPresentation;
pub use rain::RainController;
pub use rainbow::RainbowAnimator;
pub use snapshot::PreferenceSnapshot;
pub use theme::ThemeController;

use std::rc::Rc;

use ambience_common::ChangeNotifier;
use ambience_config::AmbienceConfig;
use ambience_platform::LiveDocument;

/// All controllers wired to one [`Host`].
pub struct Preferences {
    host: Host,
    theme: Rc<ThemeController>,
    background: BackgroundSelection,
    presentation: BackgroundPresentation,
    rainbow: RainbowAnimator,
    rain: RainController,
}

impl Preferences {
    pub fn new(host: Host, config: &AmbienceConfig) -> Self {
        let theme = Rc::new(ThemeController::new(host.clone(), config.theme.clone()));
        Self {
            background: BackgroundSelection::new(
                host.clone(),
                config.background.resolved_options(),
            ),
            presentation: BackgroundPresentation::new(host.clone(), &config.background),
            rainbow: RainbowAnimator::new(host.clone(), Rc::clone(&theme), &config.rainbow),
            rain: RainController::new(host.clone()),
            theme,
            host,
        }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn notifier(&self) -> &Rc<ChangeNotifier> {
        self.host.notifier()
    }

    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    pub fn background(&self) -> &BackgroundSelection {
        &self.background
    }

    pub fn presentation(&self) -> &BackgroundPresentation {
        &self.presentation
    }

    pub fn rainbow(&self) -> &RainbowAnimator {
        &self.rainbow
    }

    pub fn rain(&self) -> &RainController {
        &self.rain
    }

    /// Bring the live document in line with the persisted preferences, as
    /// on page load. Nothing is written and no events fire.
    pub fn restore(&self) {
        let Some(document) = self.host.document() else {
            tracing::debug!("no live document, nothing to restore");
            return;
        };

        self.theme
            .apply_theme_to_document(self.theme.stored_theme());
        document.set_style_var(keys::var::HUE, &self.theme.hue().to_string());
        self.presentation.apply_blur(self.presentation.blur());
        self.presentation.apply(self.presentation.disabled());
        self.rain.apply_mode(self.rain.mode());

        let rainbow = self.rainbow.is_enabled();
        document.toggle_class(keys::class::RAINBOW_MODE, rainbow);
        if rainbow {
            self.rainbow.start();
        } else if self.rainbow.is_running() {
            self.rainbow.stop();
        }
        tracing::debug!(
            storage = self.host.guard().is_available(),
            rainbow,
            "preferences restored"
        );
    }

    pub fn snapshot(&self) -> PreferenceSnapshot {
        let background_index = self.background.stored_index();
        PreferenceSnapshot {
            storage_available: self.host.guard().is_available(),
            theme: self.theme.stored_theme(),
            hue: self.theme.hue(),
            background_index,
            background: self
                .background
                .option(background_index.unwrap_or(0) as i64)
                .cloned(),
            background_disabled: self.presentation.disabled(),
            background_blur: self.presentation.blur(),
            rainbow_mode: self.rainbow.is_enabled(),
            rain_mode: self.rain.mode(),
            rain_config: self.rain.config(),
        }
    }

    /// Forget every persisted preference. The live document is left as is;
    /// call [`restore`](Self::restore) to reapply defaults.
    pub fn reset(&self) {
        self.rainbow.stop();
        for key in keys::ALL {
            self.host.guard().remove(key);
        }
        tracing::info!("preferences reset");
    }
}

#[cfg(test)]
mod tests;
