mod background;
mod rain;
mod theme;

pub use background::*;
pub use rain::*;
pub use theme::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_mode_parse_known_values() {
        assert_eq!(ThemeMode::parse("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("auto"), Some(ThemeMode::Auto));
        assert_eq!(ThemeMode::parse(" dark\n"), Some(ThemeMode::Dark));
    }

    #[test]
    fn theme_mode_parse_rejects_unknown() {
        assert_eq!(ThemeMode::parse("sepia"), None);
        assert_eq!(ThemeMode::parse(""), None);
        assert!("DARK".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn theme_mode_display_matches_stored_form() {
        for mode in ThemeMode::ALL {
            assert_eq!(ThemeMode::parse(&mode.to_string()), Some(mode));
        }
    }

    #[test]
    fn background_option_deserializes_type_field() {
        let json = r#"{"src":"/background/rain.mp4","type":"video"}"#;
        let option: BackgroundOption = serde_json::from_str(json).unwrap();
        assert!(option.is_video());
        assert!(option.label.is_none());
    }

    #[test]
    fn background_option_kind_defaults_to_image() {
        let json = r#"{"src":"/background/1.webp","label":"Dusk"}"#;
        let option: BackgroundOption = serde_json::from_str(json).unwrap();
        assert_eq!(option.kind, BackgroundKind::Image);
        assert_eq!(option.label.as_deref(), Some("Dusk"));
    }

    #[test]
    fn rain_config_defaults() {
        let config = RainConfig::default();
        assert_eq!(config.count, 165);
        assert!((config.width - 2.9).abs() < f64::EPSILON);
        assert_eq!(config.length, 70);
        assert_eq!(config.speed, 11);
        assert!((config.angle + 0.1).abs() < f64::EPSILON);
        assert!(config.is_within_bounds());
    }

    #[test]
    fn rain_config_bounds_check() {
        let config = RainConfig {
            count: 2000,
            ..RainConfig::default()
        };
        assert!(!config.is_within_bounds());

        let config = RainConfig {
            angle: f64::NAN,
            ..RainConfig::default()
        };
        assert!(!config.is_within_bounds());
    }
}
