//! Configuration schema types for ambience hosts.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the site ships with.

mod background;
mod rainbow;
mod system;
mod theme;

pub use background::*;
pub use rainbow::*;
pub use system::*;
pub use theme::*;

use serde::{Deserialize, Serialize};

/// Root configuration for a preference host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct AmbienceConfig {
    pub theme: ThemeConfig,
    pub background: BackgroundConfig,
    pub rainbow: RainbowConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ambience_common::ThemeMode;

    #[test]
    fn default_config_sections() {
        let config = AmbienceConfig::default();
        assert_eq!(config.theme.default_mode, ThemeMode::Auto);
        assert_eq!(config.theme.fallback_hue, 250);
        assert_eq!(config.background.options.len(), 6);
        assert_eq!(config.rainbow.interval_ms, 45);
        assert!(config.storage.path.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config: AmbienceConfig = toml::from_str("").unwrap();
        assert_eq!(config.theme.fallback_hue, 250);
        assert_eq!(config.background.default_blur, 8);
    }

    #[test]
    fn partial_toml_overrides_one_field() {
        let toml_str = r#"
[rainbow]
interval_ms = 60

[storage]
path = "/tmp/prefs.json"
"#;
        let config: AmbienceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.rainbow.interval_ms, 60);
        assert_eq!(
            config.storage.path.as_deref(),
            Some(std::path::Path::new("/tmp/prefs.json"))
        );
        assert_eq!(config.theme.code_theme, "github-dark");
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = AmbienceConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AmbienceConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.background.options, config.background.options);
        assert_eq!(parsed.theme.hue_policy, config.theme.hue_policy);
    }
}
