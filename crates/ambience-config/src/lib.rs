//! Ambience host configuration and value sanitization.
//!
//! Provides the TOML host configuration (theme defaults, background asset
//! list, animation cadence, storage location) with validation, plus the
//! pure range sanitizer every preference controller runs its input through.

pub mod sanitize;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use sanitize::{
    clamp, clamp_index, normalize_index, parse_leading_i32, parse_leading_int,
    sanitize_rain_config, wrap_hue, RainConfigPatch,
};
pub use schema::{AmbienceConfig, HuePolicy};

use ambience_common::ConfigError;

/// Load config from the platform default path and validate it.
pub fn load_config() -> Result<AmbienceConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}
