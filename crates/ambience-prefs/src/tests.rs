use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use ambience_common::{PreferenceEvent, RainConfig, ThemeMode};
use ambience_config::{AmbienceConfig, RainConfigPatch};
use ambience_platform::{HeadlessDocument, KeyValueStore, LiveDocument, MemoryStore};

use super::*;
use crate::testing::Fixture;

fn preferences(fixture: &Fixture) -> Preferences {
    Preferences::new(fixture.host.clone(), &AmbienceConfig::default())
}

fn returning_visitor() -> Fixture {
    Fixture::with(
        MemoryStore::with_entries([
            ("theme", "dark"),
            ("hue", "140"),
            ("backgroundBlur", "12"),
            ("backgroundDisabled", "false"),
            ("backgroundIndex", "3"),
            ("rainMode", "true"),
            ("rainbowMode", "true"),
            ("rainConfig", r#"{"count":300,"angle":0.2}"#),
        ]),
        HeadlessDocument::new().with_background_videos(1),
    )
}

#[test]
fn restore_applies_persisted_state_silently() {
    let fixture = returning_visitor();
    let events = fixture.record_events();
    let prefs = preferences(&fixture);

    prefs.restore();

    assert!(fixture.document.has_class("dark"));
    assert!(fixture.document.has_class("rain-effect"));
    assert!(fixture.document.has_class("rainbow-mode"));
    assert!(!fixture.document.has_class("background-disabled"));
    assert_eq!(
        fixture.document.style_var("--background-blur").as_deref(),
        Some("12px")
    );
    assert!(prefs.rainbow().is_running());
    assert_eq!(fixture.document.style_var("--hue").as_deref(), Some("141"));

    fixture.scheduler.advance(Duration::from_millis(50));
    assert!(fixture.document.has_class("background-active"));
    assert!(events.borrow().is_empty());
    assert_eq!(fixture.store.len(), 8);
}

#[test]
fn restore_with_extreme_stored_hue_keeps_session_usable() {
    let fixture = Fixture::with(
        MemoryStore::with_entries([("hue", "2147483647"), ("rainbowMode", "true")]),
        HeadlessDocument::new(),
    );
    let prefs = preferences(&fixture);

    prefs.restore();
    fixture.scheduler.advance(Duration::from_millis(45));

    assert!(prefs.rainbow().is_running());
    assert_eq!(fixture.document.style_var("--hue").as_deref(), Some("129"));

    prefs.reset();
    assert!(fixture.store.is_empty());
    assert!(!prefs.rainbow().is_running());
}

#[test]
fn restore_on_detached_host_is_a_no_op() {
    let prefs = Preferences::new(Host::detached(), &AmbienceConfig::default());
    prefs.restore();
    assert!(!prefs.rainbow().is_running());
}

#[test]
fn snapshot_of_fresh_visitor_is_all_defaults() {
    let fixture = Fixture::new();
    let snapshot = preferences(&fixture).snapshot();

    assert!(snapshot.storage_available);
    assert_eq!(snapshot.theme, ThemeMode::Auto);
    assert_eq!(snapshot.hue, 250);
    assert_eq!(snapshot.background_index, None);
    assert_eq!(
        snapshot.background.map(|o| o.src),
        Some("/background/1.webp".to_string())
    );
    assert!(!snapshot.background_disabled);
    assert_eq!(snapshot.background_blur, 8);
    assert!(!snapshot.rainbow_mode);
    assert!(!snapshot.rain_mode);
    assert_eq!(snapshot.rain_config, RainConfig::default());
}

#[test]
fn snapshot_reflects_stored_values() {
    let fixture = returning_visitor();
    let snapshot = preferences(&fixture).snapshot();

    assert_eq!(snapshot.theme, ThemeMode::Dark);
    assert_eq!(snapshot.hue, 140);
    assert_eq!(snapshot.background_index, Some(3));
    assert!(snapshot.rainbow_mode);
    assert_eq!(snapshot.rain_config.count, 300);
    assert_eq!(snapshot.rain_config.angle, 0.2);
    assert_eq!(
        snapshot.root_classes(),
        vec!["dark", "background-active", "rainbow-mode", "rain-effect"]
    );
    assert_eq!(
        snapshot.css_root(),
        ":root {\n  --hue: 140;\n  --background-blur: 12px;\n}"
    );
}

#[test]
fn snapshot_serializes_to_json() {
    let fixture = Fixture::new();
    let json = serde_json::to_value(preferences(&fixture).snapshot()).unwrap();
    assert_eq!(json["theme"], "auto");
    assert_eq!(json["background"]["type"], "image");
    assert_eq!(json["rain_config"]["count"], 165);
}

#[test]
fn persistence_and_dom_settle_before_listeners_run() {
    let fixture = Fixture::new();
    let observed = Rc::new(RefCell::new(Vec::new()));

    let store = fixture.store.clone();
    let document = fixture.document.clone();
    let sink = observed.clone();
    fixture.host.notifier().subscribe(move |event| {
        let state = match event {
            PreferenceEvent::RainModeChange { .. } => (
                store.get_item("rainMode"),
                document.has_class("rain-effect"),
            ),
            PreferenceEvent::BackgroundDisabledChange { .. } => (
                store.get_item("backgroundDisabled"),
                document.has_class("background-disabled"),
            ),
            _ => return,
        };
        sink.borrow_mut().push(state);
    });

    let prefs = preferences(&fixture);
    prefs.rain().set_mode(true);
    prefs.presentation().set_disabled(true);

    assert_eq!(
        *observed.borrow(),
        vec![
            (Some("true".to_string()), true),
            (Some("true".to_string()), true),
        ]
    );
}

#[test]
fn every_setter_is_total_without_storage() {
    let fixture = Fixture::without_store();
    let events = fixture.record_events();
    let prefs = preferences(&fixture);

    prefs.theme().set_theme(ThemeMode::Dark);
    prefs.theme().set_hue(30);
    prefs.background().set_index(-1);
    prefs.presentation().set_disabled(true);
    prefs.presentation().set_blur(2);
    prefs.rainbow().set_enabled(true);
    prefs.rain().set_mode(true);
    prefs.rain().set_config(&RainConfigPatch::default());

    assert!(fixture.document.has_class("dark"));
    assert!(fixture.document.has_class("background-disabled"));
    assert!(fixture.document.has_class("rain-effect"));
    assert!(prefs.rainbow().is_running());
    assert_eq!(events.borrow().len(), 5);
    assert!(!prefs.snapshot().storage_available);
}

#[test]
fn every_operation_is_total_when_detached() {
    let prefs = Preferences::new(Host::detached(), &AmbienceConfig::default());

    prefs.theme().set_theme(ThemeMode::Light);
    prefs.theme().set_hue(9);
    prefs.background().next();
    prefs.presentation().set_disabled(false);
    prefs.rainbow().set_enabled(true);
    prefs.rain().set_config(&RainConfigPatch::default());

    let snapshot = prefs.snapshot();
    assert!(!snapshot.storage_available);
    assert_eq!(snapshot.hue, 250);
    assert!(!prefs.rainbow().is_running());
}

#[test]
fn reset_forgets_everything() {
    let fixture = returning_visitor();
    let prefs = preferences(&fixture);
    prefs.restore();

    prefs.reset();

    assert!(fixture.store.is_empty());
    assert!(!prefs.rainbow().is_running());
    assert_eq!(fixture.scheduler.active_intervals(), 0);
    assert_eq!(prefs.snapshot().theme, ThemeMode::Auto);
}

#[test]
fn rainbow_restarts_from_live_hue_after_set_hue() {
    let fixture = Fixture::new();
    let prefs = preferences(&fixture);

    prefs.theme().set_hue(10);
    prefs.rainbow().set_enabled(true);
    fixture.scheduler.advance(Duration::from_millis(45 * 4));
    assert_eq!(fixture.document.style_var("--hue").as_deref(), Some("15"));

    prefs.rainbow().set_enabled(false);
    assert_eq!(fixture.document.style_var("--hue").as_deref(), Some("10"));
}
