//! Which background asset is active.

use ambience_common::{BackgroundOption, PreferenceEvent};
use ambience_config::{clamp_index, normalize_index, parse_leading_int};

use crate::host::Host;
use crate::keys;

/// Selection over a fixed, externally supplied list of background options.
/// An empty list turns every operation into a no-op returning `None`.
pub struct BackgroundSelection {
    host: Host,
    options: Vec<BackgroundOption>,
}

impl BackgroundSelection {
    pub fn new(host: Host, options: Vec<BackgroundOption>) -> Self {
        Self { host, options }
    }

    pub fn options(&self) -> &[BackgroundOption] {
        &self.options
    }

    /// Option at `index`, saturated into range.
    pub fn option(&self, index: i64) -> Option<&BackgroundOption> {
        clamp_index(index, self.options.len()).and_then(|i| self.options.get(i))
    }

    /// The persisted index clamped into range; `None` when unavailable,
    /// absent, unparsable or when there are no options.
    pub fn stored_index(&self) -> Option<usize> {
        if self.options.is_empty() {
            return None;
        }
        let raw = self.host.guard().read(keys::BACKGROUND_INDEX)?;
        let index = parse_leading_int(&raw)?;
        clamp_index(index, self.options.len())
    }

    /// The stored option, or the first one.
    pub fn current_option(&self) -> Option<&BackgroundOption> {
        self.option(self.current_index() as i64)
    }

    /// Select `index`, wrapping out-of-range values so `-1` is the last
    /// option. Persists, then notifies with the normalized index.
    pub fn set_index(&self, index: i64) -> Option<usize> {
        let Some(normalized) = normalize_index(index, self.options.len()) else {
            tracing::debug!(index, "no background options, ignoring selection");
            return None;
        };
        self.host
            .guard()
            .write(keys::BACKGROUND_INDEX, &normalized.to_string());
        tracing::debug!(index, normalized, "background selected");
        self.host
            .notify(PreferenceEvent::BackgroundSelectionChange { index: normalized });
        Some(normalized)
    }

    pub fn next(&self) -> Option<usize> {
        self.set_index(self.current_index() as i64 + 1)
    }

    pub fn previous(&self) -> Option<usize> {
        self.set_index(self.current_index() as i64 - 1)
    }

    fn current_index(&self) -> usize {
        self.stored_index().unwrap_or(0)
    }
}
