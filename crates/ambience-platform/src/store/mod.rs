//! Persistent key-value stores.
//!
//! Keys and values are plain strings, mirroring browser local storage.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use ambience_common::StoreError;

/// A string key-value store that survives page loads.
///
/// Reads never fail: an unreadable entry is reported as absent. Writes
/// report failures so callers can log them.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}
