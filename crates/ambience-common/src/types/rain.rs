use serde::{Deserialize, Serialize};

/// Tunable parameters of the rain overlay.
///
/// Values read through the rain controller always sit inside the ranges
/// below; see `ambience_config::sanitize::sanitize_rain_config`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RainConfig {
    /// Droplet count (10-1000).
    pub count: u32,
    /// Droplet width in pixels (0.5-5).
    pub width: f64,
    /// Droplet length in pixels (5-120).
    pub length: u32,
    /// Fall speed (5-60).
    pub speed: u32,
    /// Slant in radians (-0.8-0.8).
    pub angle: f64,
}

impl RainConfig {
    pub const COUNT_RANGE: (u32, u32) = (10, 1000);
    pub const WIDTH_RANGE: (f64, f64) = (0.5, 5.0);
    pub const LENGTH_RANGE: (u32, u32) = (5, 120);
    pub const SPEED_RANGE: (u32, u32) = (5, 60);
    pub const ANGLE_RANGE: (f64, f64) = (-0.8, 0.8);

    /// Whether every field sits inside its documented range.
    pub fn is_within_bounds(&self) -> bool {
        fn within<T: PartialOrd>(value: T, (min, max): (T, T)) -> bool {
            value >= min && value <= max
        }

        within(self.count, Self::COUNT_RANGE)
            && within(self.width, Self::WIDTH_RANGE)
            && within(self.length, Self::LENGTH_RANGE)
            && within(self.speed, Self::SPEED_RANGE)
            && within(self.angle, Self::ANGLE_RANGE)
    }
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            count: 165,
            width: 2.9,
            length: 70,
            speed: 11,
            angle: -0.1,
        }
    }
}
