//! Persisted key space and document contract names.

pub const HUE: &str = "hue";
pub const THEME: &str = "theme";
pub const BACKGROUND_DISABLED: &str = "backgroundDisabled";
pub const RAINBOW_MODE: &str = "rainbowMode";
pub const RAIN_CONFIG: &str = "rainConfig";
pub const RAIN_MODE: &str = "rainMode";
pub const BACKGROUND_BLUR: &str = "backgroundBlur";
pub const BACKGROUND_INDEX: &str = "backgroundIndex";

pub const ALL: [&str; 8] = [
    HUE,
    THEME,
    BACKGROUND_DISABLED,
    RAINBOW_MODE,
    RAIN_CONFIG,
    RAIN_MODE,
    BACKGROUND_BLUR,
    BACKGROUND_INDEX,
];

/// Marker classes toggled on the document root.
pub mod class {
    pub const DARK: &str = "dark";
    pub const BACKGROUND_DISABLED: &str = "background-disabled";
    pub const BACKGROUND_ACTIVE: &str = "background-active";
    pub const RAINBOW_MODE: &str = "rainbow-mode";
    pub const RAIN_EFFECT: &str = "rain-effect";
    pub const THEME_SWITCHING: &str = "theme-switching";
}

/// Style variables written on the document root.
pub mod var {
    pub const HUE: &str = "--hue";
    pub const BACKGROUND_BLUR: &str = "--background-blur";
}

/// Root attribute naming the code-block highlighting theme.
pub const CODE_THEME_ATTRIBUTE: &str = "data-theme";

/// Stored booleans are the literal strings `true` / `false`; anything
/// else reads as `false`.
pub(crate) fn parse_flag(raw: &str) -> bool {
    raw == "true"
}
