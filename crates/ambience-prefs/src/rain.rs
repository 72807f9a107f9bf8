//! Rain overlay mode and its physical parameters.

use ambience_common::{PreferenceEvent, RainConfig};
use ambience_config::{sanitize_rain_config, RainConfigPatch};

use crate::host::Host;
use crate::keys;

pub struct RainController {
    host: Host,
}

impl RainController {
    pub fn new(host: Host) -> Self {
        Self { host }
    }

    pub fn mode(&self) -> bool {
        self.host
            .guard()
            .read(keys::RAIN_MODE)
            .is_some_and(|raw| keys::parse_flag(&raw))
    }

    pub fn set_mode(&self, enabled: bool) {
        self.host
            .guard()
            .write(keys::RAIN_MODE, &enabled.to_string());
        self.apply_mode(enabled);
        tracing::debug!(enabled, "rain mode set");
        self.host.notify(PreferenceEvent::RainModeChange { enabled });
    }

    pub(crate) fn apply_mode(&self, enabled: bool) {
        if let Some(document) = self.host.document() {
            document.toggle_class(keys::class::RAIN_EFFECT, enabled);
        }
    }

    /// The persisted parameters, re-sanitized on every read. Absent,
    /// unavailable or unparsable data yields the defaults.
    pub fn config(&self) -> RainConfig {
        let Some(raw) = self.host.guard().read(keys::RAIN_CONFIG) else {
            return RainConfig::default();
        };
        match RainConfigPatch::parse(&raw) {
            Ok(patch) => sanitize_rain_config(&patch),
            Err(e) => {
                tracing::warn!(error = %e, "stored rain config is malformed, using defaults");
                RainConfig::default()
            }
        }
    }

    /// Merge `patch` over the defaults, clamp it, persist and notify.
    /// Returns the sanitized configuration that was stored and broadcast.
    pub fn set_config(&self, patch: &RainConfigPatch) -> RainConfig {
        let config = sanitize_rain_config(patch);
        match serde_json::to_string(&config) {
            Ok(json) => {
                self.host.guard().write(keys::RAIN_CONFIG, &json);
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode rain config"),
        }
        tracing::debug!(?config, "rain config set");
        self.host.notify(PreferenceEvent::RainConfigChange(config));
        config
    }

    /// A fresh copy of the default parameters.
    pub fn default_config(&self) -> RainConfig {
        RainConfig::default()
    }
}
