//! Full configuration validation.
//!
//! Validates numeric ranges, the background option list and the log
//! level, collecting every error into a single `ConfigError`.

mod helpers;


use crate::schema::{AmbienceConfig, VALID_LOG_LEVELS};
use ambience_common::ConfigError;

use helpers::validate_range;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AmbienceConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_theme(&mut errors, config);
    validate_background(&mut errors, config);
    validate_range(
        &mut errors,
        "rainbow.interval_ms",
        config.rainbow.interval_ms,
        10,
        1000,
    );
    validate_logging(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_theme(errors: &mut Vec<String>, config: &AmbienceConfig) {
    validate_range(
        errors,
        "theme.fallback_hue",
        config.theme.fallback_hue,
        0,
        359,
    );
    if config.theme.code_theme.trim().is_empty() {
        errors.push("theme.code_theme must not be empty".into());
    }
}

fn validate_background(errors: &mut Vec<String>, config: &AmbienceConfig) {
    let background = &config.background;
    validate_range(
        errors,
        "background.fade_in_delay_ms",
        background.fade_in_delay_ms,
        0,
        2000,
    );
    for (i, option) in background.options.iter().enumerate() {
        if option.src.trim().is_empty() {
            errors.push(format!("background.options[{i}].src must not be empty"));
        }
    }
}

fn validate_logging(errors: &mut Vec<String>, config: &AmbienceConfig) {
    let level = config.logging.level.to_lowercase();
    if !VALID_LOG_LEVELS.contains(&level.as_str()) {
        errors.push(format!(
            "logging.level = '{}' is not one of {}",
            config.logging.level,
            VALID_LOG_LEVELS.join(", ")
        ));
    }
}
