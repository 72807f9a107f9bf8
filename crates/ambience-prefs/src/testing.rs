//! Shared fixtures for controller tests.

use std::cell::RefCell;
use std::rc::Rc;

use ambience_common::PreferenceEvent;
use ambience_platform::{HeadlessDocument, ManualScheduler, MemoryStore};

use crate::host::Host;

pub(crate) struct Fixture {
    pub store: Rc<MemoryStore>,
    pub document: Rc<HeadlessDocument>,
    pub scheduler: Rc<ManualScheduler>,
    pub host: Host,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with(MemoryStore::new(), HeadlessDocument::new())
    }

    pub fn with(store: MemoryStore, document: HeadlessDocument) -> Self {
        Self::with_scheduler(store, document, ManualScheduler::new())
    }

    pub fn with_scheduler(
        store: MemoryStore,
        document: HeadlessDocument,
        scheduler: ManualScheduler,
    ) -> Self {
        let store = Rc::new(store);
        let document = Rc::new(document);
        let scheduler = Rc::new(scheduler);
        let host = Host::builder()
            .store(store.clone())
            .document(document.clone())
            .scheduler(scheduler.clone())
            .build();
        Self {
            store,
            document,
            scheduler,
            host,
        }
    }

    /// Document and timers, but no persistent store.
    pub fn without_store() -> Self {
        let document = Rc::new(HeadlessDocument::new());
        let scheduler = Rc::new(ManualScheduler::new());
        let host = Host::builder()
            .document(document.clone())
            .scheduler(scheduler.clone())
            .build();
        Self {
            store: Rc::new(MemoryStore::new()),
            document,
            scheduler,
            host,
        }
    }

    pub fn record_events(&self) -> Rc<RefCell<Vec<PreferenceEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        self.host
            .notifier()
            .subscribe(move |event| sink.borrow_mut().push(event.clone()));
        seen
    }
}
