//! Rainbow hue animation configuration.

use serde::{Deserialize, Serialize};

/// Rainbow animator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RainbowConfig {
    /// Tick cadence in milliseconds (valid range: 10-1000).
    pub interval_ms: u64,
}

impl Default for RainbowConfig {
    fn default() -> Self {
        Self { interval_ms: 45 }
    }
}
