//! Light/dark/auto mode and the accent hue.

use std::cell::OnceCell;
use std::rc::{Rc, Weak};

use ambience_common::ThemeMode;
use ambience_config::parse_leading_i32;
use ambience_config::schema::ThemeConfig;
use ambience_platform::{LiveDocument, Scheduler};

use crate::host::Host;
use crate::keys;

pub struct ThemeController {
    host: Host,
    config: ThemeConfig,
    default_hue: OnceCell<i32>,
}

impl ThemeController {
    pub fn new(host: Host, config: ThemeConfig) -> Self {
        Self {
            host,
            config,
            default_hue: OnceCell::new(),
        }
    }

    /// Hue carried by the page's configuration marker, else the configured
    /// fallback. The marker is consulted once per controller.
    pub fn default_hue(&self) -> i32 {
        *self.default_hue.get_or_init(|| {
            self.host
                .document()
                .and_then(|document| document.configured_hue())
                .and_then(|raw| parse_leading_i32(&raw))
                .unwrap_or(self.config.fallback_hue)
        })
    }

    /// The persisted hue, or [`default_hue`](Self::default_hue).
    pub fn hue(&self) -> i32 {
        self.host
            .guard()
            .read(keys::HUE)
            .and_then(|raw| parse_leading_i32(&raw))
            .unwrap_or_else(|| self.default_hue())
    }

    /// Persist `hue` and write it to the `--hue` style variable. The
    /// configured [`HuePolicy`](ambience_config::HuePolicy) decides whether
    /// out-of-range values are kept, wrapped or clamped. Returns the hue
    /// actually applied.
    pub fn set_hue(&self, hue: i32) -> i32 {
        let hue = self.config.hue_policy.apply(hue);
        self.host.guard().write(keys::HUE, &hue.to_string());
        if let Some(document) = self.host.document() {
            document.set_style_var(keys::var::HUE, &hue.to_string());
        }
        tracing::debug!(hue, "hue set");
        hue
    }

    /// The persisted mode, or the configured default when absent,
    /// unrecognized or unavailable.
    pub fn stored_theme(&self) -> ThemeMode {
        self.host
            .guard()
            .read(keys::THEME)
            .and_then(|raw| ThemeMode::parse(&raw))
            .unwrap_or(self.config.default_mode)
    }

    /// Persist `mode` and apply it without transition flash: the
    /// `theme-switching` marker suppresses transitions until two animation
    /// frames have passed.
    pub fn set_theme(&self, mode: ThemeMode) {
        self.host.guard().write(keys::THEME, mode.as_str());
        let Some(document) = self.host.document() else {
            return;
        };

        document.add_class(keys::class::THEME_SWITCHING);
        self.apply_theme_to_document(mode);

        let scheduled = self.host.scheduler().and_then(|scheduler| {
            let outer_document = Rc::clone(document);
            let weak_scheduler = Rc::downgrade(scheduler);
            scheduler.request_animation_frame(Box::new(move || {
                end_switch_after_frame(&weak_scheduler, outer_document);
            }))
        });
        if scheduled.is_none() {
            document.remove_class(keys::class::THEME_SWITCHING);
        }
        tracing::debug!(mode = %mode, "theme set");
    }

    /// Resolve `mode` against the environment and toggle the `dark` marker.
    /// `Auto` reads the color-scheme preference now; later OS changes are
    /// not tracked. Also tags the root with the code-block theme.
    pub fn apply_theme_to_document(&self, mode: ThemeMode) {
        let Some(document) = self.host.document() else {
            return;
        };
        let dark = match mode {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::Auto => document.prefers_dark_scheme(),
        };
        document.toggle_class(keys::class::DARK, dark);
        document.set_attribute(keys::CODE_THEME_ATTRIBUTE, &self.config.code_theme);
    }
}

/// Second frame of the double-rAF: drop the marker once the new theme has
/// been painted.
fn end_switch_after_frame(scheduler: &Weak<dyn Scheduler>, document: Rc<dyn LiveDocument>) {
    let Some(scheduler) = scheduler.upgrade() else {
        document.remove_class(keys::class::THEME_SWITCHING);
        return;
    };
    let inner_document = Rc::clone(&document);
    let scheduled = scheduler.request_animation_frame(Box::new(move || {
        inner_document.remove_class(keys::class::THEME_SWITCHING);
    }));
    if scheduled.is_none() {
        document.remove_class(keys::class::THEME_SWITCHING);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use ambience_config::HuePolicy;
    use ambience_platform::{HeadlessDocument, ManualScheduler, MemoryStore};

    fn controller(fixture: &Fixture) -> ThemeController {
        ThemeController::new(fixture.host.clone(), ThemeConfig::default())
    }

    #[test]
    fn default_hue_prefers_config_marker() {
        let fixture = Fixture::with(
            MemoryStore::new(),
            HeadlessDocument::new().with_configured_hue("120"),
        );
        assert_eq!(controller(&fixture).default_hue(), 120);
    }

    #[test]
    fn default_hue_falls_back_without_marker() {
        let fixture = Fixture::new();
        assert_eq!(controller(&fixture).default_hue(), 250);

        let detached = ThemeController::new(Host::detached(), ThemeConfig::default());
        assert_eq!(detached.default_hue(), 250);
    }

    #[test]
    fn unparsable_marker_uses_fallback() {
        let fixture = Fixture::with(
            MemoryStore::new(),
            HeadlessDocument::new().with_configured_hue("teal"),
        );
        assert_eq!(controller(&fixture).default_hue(), 250);
    }

    #[test]
    fn hue_reads_stored_value_with_leading_int_semantics() {
        let fixture = Fixture::with(
            MemoryStore::with_entries([("hue", "42deg")]),
            HeadlessDocument::new(),
        );
        assert_eq!(controller(&fixture).hue(), 42);
    }

    #[test]
    fn set_hue_persists_and_writes_style_var() {
        let fixture = Fixture::new();
        let theme = controller(&fixture);

        assert_eq!(theme.set_hue(180), 180);
        assert_eq!(theme.hue(), 180);
        assert_eq!(fixture.document.style_var("--hue").as_deref(), Some("180"));
    }

    #[test]
    fn set_hue_preserves_out_of_range_by_default() {
        let fixture = Fixture::new();
        let theme = controller(&fixture);
        theme.set_hue(725);
        assert_eq!(theme.hue(), 725);
    }

    #[test]
    fn set_hue_honours_wrap_policy() {
        let fixture = Fixture::new();
        let theme = ThemeController::new(
            fixture.host.clone(),
            ThemeConfig {
                hue_policy: HuePolicy::Wrap,
                ..ThemeConfig::default()
            },
        );
        assert_eq!(theme.set_hue(-20), 340);
        assert_eq!(theme.hue(), 340);
    }

    #[test]
    fn stored_theme_defaults_and_ignores_garbage() {
        let fixture = Fixture::new();
        let theme = controller(&fixture);
        assert_eq!(theme.stored_theme(), ThemeMode::Auto);

        fixture.host.guard().write("theme", "sepia");
        assert_eq!(theme.stored_theme(), ThemeMode::Auto);
    }

    #[test]
    fn set_theme_auto_follows_dark_environment() {
        let fixture = Fixture::with(
            MemoryStore::new(),
            HeadlessDocument::new().with_prefers_dark(true),
        );
        let theme = controller(&fixture);

        theme.set_theme(ThemeMode::Auto);

        assert!(fixture.document.has_class("dark"));
        assert_eq!(theme.stored_theme(), ThemeMode::Auto);
    }

    #[test]
    fn set_theme_auto_follows_light_environment() {
        let fixture = Fixture::with(
            MemoryStore::new(),
            HeadlessDocument::new().with_prefers_dark(false),
        );
        fixture.document.add_class("dark");

        controller(&fixture).set_theme(ThemeMode::Auto);

        assert!(!fixture.document.has_class("dark"));
    }

    #[test]
    fn auto_is_evaluated_at_call_time() {
        let fixture = Fixture::new();
        let theme = controller(&fixture);

        theme.apply_theme_to_document(ThemeMode::Auto);
        assert!(!fixture.document.has_class("dark"));

        fixture.document.set_prefers_dark(true);
        assert!(!fixture.document.has_class("dark"));
        theme.apply_theme_to_document(ThemeMode::Auto);
        assert!(fixture.document.has_class("dark"));
    }

    #[test]
    fn explicit_modes_ignore_environment() {
        let fixture = Fixture::with(
            MemoryStore::new(),
            HeadlessDocument::new().with_prefers_dark(true),
        );
        let theme = controller(&fixture);

        theme.apply_theme_to_document(ThemeMode::Light);
        assert!(!fixture.document.has_class("dark"));
        theme.apply_theme_to_document(ThemeMode::Dark);
        assert!(fixture.document.has_class("dark"));
        assert_eq!(
            fixture.document.attribute("data-theme").as_deref(),
            Some("github-dark")
        );
    }

    #[test]
    fn switching_marker_cleared_after_two_frames() {
        let fixture = Fixture::new();
        controller(&fixture).set_theme(ThemeMode::Dark);

        assert!(fixture.document.has_class("theme-switching"));
        fixture.scheduler.run_frames();
        assert!(fixture.document.has_class("theme-switching"));
        fixture.scheduler.run_frames();
        assert!(!fixture.document.has_class("theme-switching"));
        assert!(fixture.document.has_class("dark"));
    }

    #[test]
    fn switching_marker_removed_immediately_without_frames() {
        let fixture = Fixture::with_scheduler(
            MemoryStore::new(),
            HeadlessDocument::new(),
            ManualScheduler::without_animation_frames(),
        );
        controller(&fixture).set_theme(ThemeMode::Dark);

        assert!(!fixture.document.has_class("theme-switching"));
        assert!(fixture.document.has_class("dark"));
    }

    #[test]
    fn setters_without_store_still_touch_document() {
        let fixture = Fixture::without_store();
        let theme = controller(&fixture);

        theme.set_hue(90);
        theme.set_theme(ThemeMode::Dark);

        assert_eq!(fixture.document.style_var("--hue").as_deref(), Some("90"));
        assert!(fixture.document.has_class("dark"));
        assert_eq!(theme.hue(), 250);
        assert_eq!(theme.stored_theme(), ThemeMode::Auto);
    }
}
