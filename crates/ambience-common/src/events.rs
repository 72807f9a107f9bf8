//! Synchronous change notification.
//!
//! Controllers publish a [`PreferenceEvent`] after each mutation; listeners
//! run in subscription order on the calling thread before `emit` returns.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::types::RainConfig;

/// A preference change, carrying the new value.
#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceEvent {
    BackgroundDisabledChange { disabled: bool },
    RainbowModeChange { enabled: bool },
    RainConfigChange(RainConfig),
    RainModeChange { enabled: bool },
    BackgroundSelectionChange { index: usize },
}

impl PreferenceEvent {
    /// Event name as seen by page-level listeners.
    pub fn name(&self) -> &'static str {
        match self {
            PreferenceEvent::BackgroundDisabledChange { .. } => "background-disabled-change",
            PreferenceEvent::RainbowModeChange { .. } => "rainbow-mode-change",
            PreferenceEvent::RainConfigChange(_) => "rain-config-change",
            PreferenceEvent::RainModeChange { .. } => "rain-mode-change",
            PreferenceEvent::BackgroundSelectionChange { .. } => "background-selection-change",
        }
    }

    /// Event payload in its wire shape. The rainbow and rain mode events
    /// carry a bare boolean; the others carry an object.
    pub fn detail(&self) -> serde_json::Value {
        match self {
            PreferenceEvent::BackgroundDisabledChange { disabled } => {
                serde_json::json!({ "disabled": disabled })
            }
            PreferenceEvent::RainbowModeChange { enabled }
            | PreferenceEvent::RainModeChange { enabled } => serde_json::Value::Bool(*enabled),
            PreferenceEvent::RainConfigChange(config) => {
                serde_json::to_value(config).unwrap_or(serde_json::Value::Null)
            }
            PreferenceEvent::BackgroundSelectionChange { index } => {
                serde_json::json!({ "index": index })
            }
        }
    }
}

/// Identifies a listener registered on a [`ChangeNotifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Rc<RefCell<dyn FnMut(&PreferenceEvent)>>;

/// Single-threaded observer registry.
///
/// Listeners may subscribe, unsubscribe or trigger further emits from inside
/// a callback: dispatch walks a snapshot taken when `emit` starts. A listener
/// that is already running (re-entrant emit) is skipped for the nested event.
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: Cell<u64>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: FnMut(&PreferenceEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let listener: Listener = Rc::new(RefCell::new(listener));
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver `event` to every current listener. Returns how many ran.
    pub fn emit(&self, event: PreferenceEvent) -> usize {
        let snapshot: Vec<(SubscriptionId, Listener)> = self.listeners.borrow().clone();
        let mut delivered = 0;

        for (id, listener) in snapshot {
            // Unsubscribed by an earlier listener during this dispatch.
            if !self.listeners.borrow().iter().any(|(live, _)| *live == id) {
                continue;
            }
            match listener.try_borrow_mut() {
                Ok(mut callback) => {
                    callback(&event);
                    delivered += 1;
                }
                Err(_) => {
                    tracing::warn!(
                        event = event.name(),
                        ?id,
                        "listener re-entered during its own dispatch, skipping"
                    );
                }
            }
        }

        tracing::debug!(event = event.name(), delivered, "preference event dispatched");
        delivered
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
