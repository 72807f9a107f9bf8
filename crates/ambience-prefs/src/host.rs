//! The environment a set of controllers runs in.

use std::fmt;
use std::rc::Rc;

use ambience_common::{ChangeNotifier, PreferenceEvent};
use ambience_platform::{KeyValueStore, LiveDocument, Scheduler};

use crate::guard::StorageGuard;

/// Capabilities shared by every controller: the persistent store (behind a
/// [`StorageGuard`]), the live document root, the timer facility and the
/// change notifier. Any capability may be missing; cloning is cheap.
#[derive(Clone)]
pub struct Host {
    guard: StorageGuard,
    document: Option<Rc<dyn LiveDocument>>,
    scheduler: Option<Rc<dyn Scheduler>>,
    notifier: Rc<ChangeNotifier>,
}

impl Host {
    /// A host with no store, no document and no timers, as during
    /// prerendering. Every read yields defaults.
    pub fn detached() -> Self {
        Self {
            guard: StorageGuard::new(None, false),
            document: None,
            scheduler: None,
            notifier: Rc::new(ChangeNotifier::new()),
        }
    }

    pub fn builder() -> HostBuilder {
        HostBuilder::default()
    }

    /// The current browser page. Capabilities the page cannot provide are
    /// left out. With `legacy_events`, every preference event is also
    /// dispatched as a `window` `CustomEvent`.
    #[cfg(feature = "web")]
    pub fn browser(legacy_events: bool) -> Self {
        use ambience_platform::web::{
            attach_window_event_bridge, BrowserDocument, BrowserScheduler, BrowserStorage,
        };

        let mut builder = Self::builder();
        if let Some(store) = BrowserStorage::local() {
            builder = builder.store(Rc::new(store));
        }
        if let Some(document) = BrowserDocument::current() {
            builder = builder.document(Rc::new(document));
        }
        if let Some(scheduler) = BrowserScheduler::new() {
            builder = builder.scheduler(Rc::new(scheduler));
        }
        let host = builder.build();
        if legacy_events && attach_window_event_bridge(&host.notifier).is_none() {
            tracing::warn!("no window, legacy preference events disabled");
        }
        host
    }

    pub fn guard(&self) -> &StorageGuard {
        &self.guard
    }

    pub fn document(&self) -> Option<&Rc<dyn LiveDocument>> {
        self.document.as_ref()
    }

    pub fn scheduler(&self) -> Option<&Rc<dyn Scheduler>> {
        self.scheduler.as_ref()
    }

    pub fn notifier(&self) -> &Rc<ChangeNotifier> {
        &self.notifier
    }

    pub(crate) fn notify(&self, event: PreferenceEvent) {
        self.notifier.emit(event);
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("storage_available", &self.guard.is_available())
            .field("document", &self.document.is_some())
            .field("scheduler", &self.scheduler.is_some())
            .field("notifier", &self.notifier)
            .finish()
    }
}

#[derive(Default)]
pub struct HostBuilder {
    store: Option<Rc<dyn KeyValueStore>>,
    document: Option<Rc<dyn LiveDocument>>,
    scheduler: Option<Rc<dyn Scheduler>>,
    notifier: Option<Rc<ChangeNotifier>>,
}

impl HostBuilder {
    pub fn store(mut self, store: Rc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn document(mut self, document: Rc<dyn LiveDocument>) -> Self {
        self.document = Some(document);
        self
    }

    pub fn scheduler(mut self, scheduler: Rc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Share an existing notifier; a fresh one is created otherwise.
    pub fn notifier(mut self, notifier: Rc<ChangeNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> Host {
        Host {
            guard: StorageGuard::new(self.store, self.document.is_some()),
            document: self.document,
            scheduler: self.scheduler,
            notifier: self.notifier.unwrap_or_default(),
        }
    }
}
