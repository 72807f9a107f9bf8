use ambience_common::{BackgroundOption, RainConfig, ThemeMode};
use serde::Serialize;

use crate::css::generate_css_root;
use crate::keys;
use crate::presentation::blur_css;

/// Every preference as currently resolved, defaults included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceSnapshot {
    pub storage_available: bool,
    pub theme: ThemeMode,
    pub hue: i32,
    pub background_index: Option<usize>,
    pub background: Option<BackgroundOption>,
    pub background_disabled: bool,
    pub background_blur: i32,
    pub rainbow_mode: bool,
    pub rain_mode: bool,
    pub rain_config: RainConfig,
}

impl PreferenceSnapshot {
    /// Style variables the root starts out with.
    pub fn style_variables(&self) -> Vec<(&'static str, String)> {
        vec![
            (keys::var::HUE, self.hue.to_string()),
            (keys::var::BACKGROUND_BLUR, blur_css(self.background_blur)),
        ]
    }

    /// Marker classes implied by the stored flags. `dark` is omitted for
    /// [`ThemeMode::Auto`], which only the client can resolve.
    pub fn root_classes(&self) -> Vec<&'static str> {
        let mut classes = Vec::new();
        if self.theme == ThemeMode::Dark {
            classes.push(keys::class::DARK);
        }
        if self.background_disabled {
            classes.push(keys::class::BACKGROUND_DISABLED);
        } else {
            classes.push(keys::class::BACKGROUND_ACTIVE);
        }
        if self.rainbow_mode {
            classes.push(keys::class::RAINBOW_MODE);
        }
        if self.rain_mode {
            classes.push(keys::class::RAIN_EFFECT);
        }
        classes
    }

    pub fn css_root(&self) -> String {
        generate_css_root(&self.style_variables())
    }
}
