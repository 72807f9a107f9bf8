use ambience_common::StoreError;
use web_sys::Storage;

use super::js_error_message;
use crate::store::KeyValueStore;

/// `window.localStorage`.
pub struct BrowserStorage {
    storage: Storage,
}

impl BrowserStorage {
    /// `None` when there is no window or storage access is denied
    /// (prerendering, sandboxed frames, disabled cookies).
    pub fn local() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(key, error = %js_error_message(&e), "localStorage read failed");
                None
            }
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                reason: js_error_message(&e),
            })
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                reason: js_error_message(&e),
            })
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.storage
            .clear()
            .map_err(|e| StoreError::Io(js_error_message(&e)))
    }
}
