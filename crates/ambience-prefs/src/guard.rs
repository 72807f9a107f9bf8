//! Capability check in front of the persistent store.

use std::rc::Rc;

use ambience_platform::KeyValueStore;

/// Gates every persistent read and write.
///
/// Storage counts as available only when a store is reachable *and* a live
/// document exists. When unavailable, reads return `None` and writes are
/// skipped; nothing is ever reported to the caller.
#[derive(Clone)]
pub struct StorageGuard {
    store: Option<Rc<dyn KeyValueStore>>,
    has_document: bool,
}

impl StorageGuard {
    pub fn new(store: Option<Rc<dyn KeyValueStore>>, has_document: bool) -> Self {
        Self {
            store,
            has_document,
        }
    }

    pub fn is_available(&self) -> bool {
        self.has_document && self.store.is_some()
    }

    fn store(&self) -> Option<&Rc<dyn KeyValueStore>> {
        if self.has_document {
            self.store.as_ref()
        } else {
            None
        }
    }

    pub fn read(&self, key: &str) -> Option<String> {
        self.store()?.get_item(key)
    }

    /// Persist `value` under `key`. Returns whether the write landed.
    pub fn write(&self, key: &str, value: &str) -> bool {
        let Some(store) = self.store() else {
            tracing::debug!(key, "storage unavailable, not persisting");
            return false;
        };
        match store.set_item(key, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to persist preference");
                false
            }
        }
    }

    /// Remove `key`. Returns whether the removal landed.
    pub fn remove(&self, key: &str) -> bool {
        let Some(store) = self.store() else {
            return false;
        };
        match store.remove_item(key) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to remove preference");
                false
            }
        }
    }
}
