//! Range sanitization for persisted and user-supplied preference values.
//!
//! Everything here is pure. Stored values are untrusted: they may be missing,
//! truncated, hand-edited or written by an older release.

use std::collections::BTreeMap;

use ambience_common::RainConfig;
use serde_json::value::RawValue;
use serde_json::Value;

/// Saturating clamp. `NaN` passes through unchanged, so float callers
/// filter non-finite input first.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Wrap `index` into `[0, count)` with floored modulo, so `-1` selects the
/// last entry. `None` when `count` is zero.
pub fn normalize_index(index: i64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let count = i64::try_from(count).ok()?;
    usize::try_from(index.rem_euclid(count)).ok()
}

/// Saturate `index` into `[0, count - 1]`. `None` when `count` is zero.
pub fn clamp_index(index: i64, count: usize) -> Option<usize> {
    let last = count.checked_sub(1)?;
    if index <= 0 {
        return Some(0);
    }
    Some(usize::try_from(index).map_or(last, |i| i.min(last)))
}

/// Wrap a hue into `[0, 360)`.
pub fn wrap_hue(hue: i32) -> i32 {
    hue.rem_euclid(360)
}

/// Parse the leading base-10 integer of `raw`, ignoring leading whitespace
/// and any trailing garbage (`"42px"` is 42). `None` when no digits lead.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Like [`parse_leading_int`], narrowed to `i32`.
pub fn parse_leading_i32(raw: &str) -> Option<i32> {
    parse_leading_int(raw).and_then(|value| i32::try_from(value).ok())
}

// =============================================================================
// RAIN CONFIG
// =============================================================================

/// A partial, unvalidated rain configuration.
///
/// `None` fields fall back to the defaults during sanitization.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RainConfigPatch {
    pub count: Option<f64>,
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub speed: Option<f64>,
    pub angle: Option<f64>,
}

impl RainConfigPatch {
    /// Extract fields from arbitrary JSON. Numbers and numeric strings are
    /// accepted; anything else (including non-objects) leaves the field empty.
    pub fn from_json(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(lenient_number);
        Self {
            count: field("count"),
            width: field("width"),
            length: field("length"),
            speed: field("speed"),
            angle: field("angle"),
        }
    }

    /// Parse a stored JSON document field by field. Well-formed documents
    /// that are not objects yield an empty patch; numerals too large for
    /// `f64` become infinities and saturate during sanitization.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let fields: BTreeMap<String, Box<RawValue>> = match serde_json::from_str(raw) {
            Ok(fields) => fields,
            Err(e) if e.is_data() => {
                serde_json::from_str::<&RawValue>(raw)?;
                return Ok(Self::default());
            }
            Err(e) => return Err(e),
        };
        let field = |name: &str| fields.get(name).and_then(|value| raw_number(value));
        Ok(Self {
            count: field("count"),
            width: field("width"),
            length: field("length"),
            speed: field("speed"),
            angle: field("angle"),
        })
    }
}

impl From<RainConfig> for RainConfigPatch {
    fn from(config: RainConfig) -> Self {
        Self {
            count: Some(f64::from(config.count)),
            width: Some(config.width),
            length: Some(f64::from(config.length)),
            speed: Some(f64::from(config.speed)),
            angle: Some(config.angle),
        }
    }
}

fn raw_number(raw: &RawValue) -> Option<f64> {
    match serde_json::from_str::<Value>(raw.get()) {
        Ok(value) => lenient_number(&value),
        // Out-of-range numeral; Rust's float parser rounds it to infinity.
        Err(_) => raw.get().trim().parse::<f64>().ok(),
    }
}

fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Merge `patch` over the defaults field by field, then clamp every field
/// into range. Integer fields are rounded after clamping.
pub fn sanitize_rain_config(patch: &RainConfigPatch) -> RainConfig {
    let defaults = RainConfig::default();

    let pick = |field: Option<f64>, default: f64| match field {
        Some(value) if !value.is_nan() => value,
        _ => default,
    };
    let whole = |value: f64, (min, max): (u32, u32)| -> u32 {
        // Clamped into a u32 range first, so the cast cannot truncate.
        clamp(value, f64::from(min), f64::from(max)).round() as u32
    };
    let fractional =
        |value: f64, (min, max): (f64, f64)| -> f64 { clamp(value, min, max) };

    RainConfig {
        count: whole(
            pick(patch.count, f64::from(defaults.count)),
            RainConfig::COUNT_RANGE,
        ),
        width: fractional(pick(patch.width, defaults.width), RainConfig::WIDTH_RANGE),
        length: whole(
            pick(patch.length, f64::from(defaults.length)),
            RainConfig::LENGTH_RANGE,
        ),
        speed: whole(
            pick(patch.speed, f64::from(defaults.speed)),
            RainConfig::SPEED_RANGE,
        ),
        angle: fractional(pick(patch.angle, defaults.angle), RainConfig::ANGLE_RANGE),
    }
}
