//! Environment capabilities for preference controllers.
//!
//! The controllers never touch a browser API directly. They talk to a
//! persistent [`KeyValueStore`], a [`LiveDocument`] root and a cooperative
//! [`Scheduler`]; this crate defines those seams and ships headless,
//! file-backed and tokio-driven implementations, plus browser bindings
//! behind the `web` feature.

pub mod document;
pub mod paths;
pub mod scheduler;
pub mod store;
#[cfg(feature = "web")]
pub mod web;

pub use document::{HeadlessDocument, LiveDocument};
#[cfg(not(target_arch = "wasm32"))]
pub use scheduler::TokioScheduler;
pub use scheduler::{ManualScheduler, Scheduler, TaskHandle};
pub use store::{FileStore, KeyValueStore, MemoryStore};
