//! Theme and accent hue configuration types.

use ambience_common::ThemeMode;
use serde::{Deserialize, Serialize};

use crate::sanitize::{clamp, wrap_hue};

/// How `set_hue` treats values outside `[0, 360)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HuePolicy {
    /// Store the value as given.
    #[default]
    Preserve,
    /// Wrap into `[0, 360)` with floored modulo.
    Wrap,
    /// Saturate into `[0, 359]`.
    Clamp,
}

impl HuePolicy {
    pub fn apply(self, hue: i32) -> i32 {
        match self {
            HuePolicy::Preserve => hue,
            HuePolicy::Wrap => wrap_hue(hue),
            HuePolicy::Clamp => clamp(hue, 0, 359),
        }
    }
}

/// Theme selection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Mode used when nothing is persisted.
    pub default_mode: ThemeMode,
    /// Accent hue used when the page carries no configured hue.
    pub fallback_hue: i32,
    pub hue_policy: HuePolicy,
    /// Syntax-highlighting theme written to the root `data-theme` attribute.
    pub code_theme: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_mode: ThemeMode::Auto,
            fallback_hue: 250,
            hue_policy: HuePolicy::Preserve,
            code_theme: "github-dark".into(),
        }
    }
}
