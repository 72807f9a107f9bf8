//! Background asset list and presentation configuration types.

use ambience_common::BackgroundOption;
use serde::{Deserialize, Serialize};

/// Background system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Site base path joined onto absolute option paths.
    pub base_path: String,
    /// Selectable assets, in navigation order.
    pub options: Vec<BackgroundOption>,
    /// Blur radius in pixels when nothing is persisted.
    pub default_blur: i32,
    /// Delay before the fade-in marker is applied on re-enable.
    pub fade_in_delay_ms: u64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            base_path: "/".into(),
            options: vec![
                BackgroundOption::image("/background/1.webp"),
                BackgroundOption::image("/background/2.webp"),
                BackgroundOption::image("/background/3.webp"),
                BackgroundOption::image("/background/4.webp"),
                BackgroundOption::image("/background/5.webp"),
                BackgroundOption::video("/background/rain.mp4"),
            ],
            default_blur: 8,
            fade_in_delay_ms: 50,
        }
    }
}

impl BackgroundConfig {
    /// Options with `base_path` applied to their sources.
    pub fn resolved_options(&self) -> Vec<BackgroundOption> {
        self.options
            .iter()
            .map(|option| BackgroundOption {
                src: with_base_path(&self.base_path, &option.src),
                ..option.clone()
            })
            .collect()
    }
}

/// Prefix an absolute asset path with the site base path.
///
/// Relative paths and full URLs pass through untouched.
pub fn with_base_path(base: &str, path: &str) -> String {
    if !path.starts_with('/') {
        return path.to_string();
    }
    let base = base.strip_suffix('/').unwrap_or(base);
    format!("{base}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambience_common::BackgroundKind;

    #[test]
    fn background_config_defaults() {
        let config = BackgroundConfig::default();
        assert_eq!(config.options.len(), 6);
        assert_eq!(config.options[5].kind, BackgroundKind::Video);
        assert_eq!(config.default_blur, 8);
        assert_eq!(config.fade_in_delay_ms, 50);
    }

    #[test]
    fn with_base_path_root_is_identity() {
        assert_eq!(with_base_path("/", "/background/1.webp"), "/background/1.webp");
    }

    #[test]
    fn with_base_path_prefixes_subdirectory() {
        assert_eq!(
            with_base_path("/blog/", "/background/1.webp"),
            "/blog/background/1.webp"
        );
        assert_eq!(
            with_base_path("/blog", "/background/1.webp"),
            "/blog/background/1.webp"
        );
    }

    #[test]
    fn with_base_path_ignores_relative_and_urls() {
        assert_eq!(with_base_path("/blog/", "img/a.webp"), "img/a.webp");
        assert_eq!(
            with_base_path("/blog/", "https://cdn.example/a.webp"),
            "https://cdn.example/a.webp"
        );
    }

    #[test]
    fn options_from_toml() {
        let toml_str = r#"
base_path = "/site/"

[[options]]
src = "/bg/sea.webp"
type = "image"
label = "Sea"

[[options]]
src = "/bg/loop.mp4"
type = "video"
"#;
        let config: BackgroundConfig = toml::from_str(toml_str).unwrap();
        let resolved = config.resolved_options();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].src, "/site/bg/sea.webp");
        assert_eq!(resolved[0].label.as_deref(), Some("Sea"));
        assert!(resolved[1].is_video());
        assert_eq!(config.default_blur, 8); // default preserved
    }
}
