use std::io::Write;
use std::time::Duration;

use ambience_common::{AmbienceError, Result};
use ambience_config::RainConfigPatch;
use ambience_platform::LiveDocument;
use ambience_prefs::PreferenceSnapshot;

use crate::cli::{BackgroundTarget, Command};
use crate::session::Session;

pub fn execute(
    command: &Command,
    session: &Session,
    out: &mut impl Write,
) -> Result<()> {
    let prefs = &session.prefs;
    match command {
        Command::Show { json } => {
            let snapshot = prefs.snapshot();
            if *json {
                let text = serde_json::to_string_pretty(&snapshot)
                    .map_err(|e| AmbienceError::Other(format!("failed to encode snapshot: {e}")))?;
                writeln!(out, "{text}")?;
            } else {
                write_table(out, &snapshot, session)?;
            }
        }
        Command::Theme { mode } => {
            prefs.theme().set_theme(*mode);
            writeln!(out, "theme: {mode}")?;
        }
        Command::Hue { degrees } => {
            let applied = prefs.theme().set_hue(*degrees);
            writeln!(out, "hue: {applied}")?;
        }
        Command::Blur { px } => {
            prefs.presentation().set_blur(*px);
            writeln!(out, "blur: {px}px")?;
        }
        Command::Background { target } => {
            let selected = match target {
                BackgroundTarget::On | BackgroundTarget::Off => {
                    let disabled = *target == BackgroundTarget::Off;
                    prefs.presentation().set_disabled(disabled);
                    writeln!(out, "background: {}", on_off(!disabled))?;
                    return Ok(());
                }
                BackgroundTarget::Next => prefs.background().next(),
                BackgroundTarget::Prev => prefs.background().previous(),
                BackgroundTarget::Index(index) => prefs.background().set_index(*index),
            };
            match selected.and_then(|index| Some((index, prefs.background().option(index as i64)?))) {
                Some((index, option)) => {
                    writeln!(out, "background: {index} ({})", option.src)?;
                }
                None => writeln!(out, "background: no options configured")?,
            }
        }
        Command::Rainbow { state, preview_ms } => {
            prefs.rainbow().set_enabled(state.enabled());
            match preview_ms {
                Some(ms) if state.enabled() => preview_rainbow(session, *ms, out)?,
                _ => writeln!(out, "rainbow: {}", on_off(state.enabled()))?,
            }
        }
        Command::Rain { state } => {
            prefs.rain().set_mode(state.enabled());
            writeln!(out, "rain: {}", on_off(state.enabled()))?;
        }
        Command::RainConfig {
            count,
            width,
            length,
            speed,
            angle,
        } => {
            let current = RainConfigPatch::from(prefs.rain().config());
            let patch = RainConfigPatch {
                count: count.or(current.count),
                width: width.or(current.width),
                length: length.or(current.length),
                speed: speed.or(current.speed),
                angle: angle.or(current.angle),
            };
            let config = prefs.rain().set_config(&patch);
            writeln!(
                out,
                "rain config: count={} width={} length={} speed={} angle={}",
                config.count, config.width, config.length, config.speed, config.angle
            )?;
        }
        Command::Reset => {
            prefs.reset();
            writeln!(out, "preferences reset ({})", session.store_path().display())?;
        }
    }
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Drive the animation on a current-thread runtime for `ms` milliseconds.
fn preview_rainbow(session: &Session, ms: u64, out: &mut impl Write) -> Result<()> {
    let start = session.document.style_var("--hue");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(async {
        session
            .scheduler
            .run_until(tokio::time::sleep(Duration::from_millis(ms)))
            .await;
    });
    let end = session.document.style_var("--hue");
    writeln!(
        out,
        "rainbow: on (hue {} -> {} over {ms}ms)",
        start.as_deref().unwrap_or("?"),
        end.as_deref().unwrap_or("?")
    )?;
    Ok(())
}

fn write_table(
    out: &mut impl Write,
    snapshot: &PreferenceSnapshot,
    session: &Session,
) -> Result<()> {
    let storage = if snapshot.storage_available {
        format!("{}", session.store_path().display())
    } else {
        "unavailable".to_string()
    };
    let background = match (&snapshot.background, snapshot.background_index) {
        (Some(option), Some(index)) => format!("{index} ({})", option.src),
        (Some(option), None) => format!("default ({})", option.src),
        (None, _) => "none".to_string(),
    };
    let rain = snapshot.rain_config;

    writeln!(out, "{:<14}{storage}", "store")?;
    writeln!(out, "{:<14}{}", "theme", snapshot.theme)?;
    writeln!(out, "{:<14}{}", "hue", snapshot.hue)?;
    writeln!(out, "{:<14}{background}", "background")?;
    writeln!(out, "{:<14}{}", "background", on_off(!snapshot.background_disabled))?;
    writeln!(out, "{:<14}{}px", "blur", snapshot.background_blur)?;
    writeln!(out, "{:<14}{}", "rainbow", on_off(snapshot.rainbow_mode))?;
    writeln!(out, "{:<14}{}", "rain", on_off(snapshot.rain_mode))?;
    writeln!(
        out,
        "{:<14}count={} width={} length={} speed={} angle={}",
        "rain config", rain.count, rain.width, rain.length, rain.speed, rain.angle
    )?;
    writeln!(out, "{:<14}{}", "classes", snapshot.root_classes().join(" "))?;
    writeln!(out, "{}", snapshot.css_root())?;
    Ok(())
}
