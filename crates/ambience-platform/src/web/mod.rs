//! Browser bindings (`web` feature).
//!
//! Thin adapters from the capability traits onto `window.localStorage`,
//! `document.documentElement` and the window timer functions.

mod document;
mod events;
mod scheduler;
mod storage;

pub use document::BrowserDocument;
pub use events::attach_window_event_bridge;
pub use scheduler::BrowserScheduler;
pub use storage::BrowserStorage;

use wasm_bindgen::JsValue;

/// Best-effort text for a thrown JS value.
pub(crate) fn js_error_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
