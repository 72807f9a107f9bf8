//! A headless preference session backed by the file store.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use ambience_common::Result;
use ambience_config::AmbienceConfig;
use ambience_platform::{FileStore, HeadlessDocument, TokioScheduler};
use ambience_prefs::{Host, Preferences};

pub struct Session {
    pub prefs: Preferences,
    pub document: Rc<HeadlessDocument>,
    pub scheduler: Rc<TokioScheduler>,
    store_path: PathBuf,
}

impl Session {
    /// Open the store at `store_override`, else the configured path, else
    /// the platform default, and restore the persisted state onto a
    /// headless document.
    pub fn open(config: &AmbienceConfig, store_override: Option<&Path>) -> Result<Self> {
        let store = match store_override.or(config.storage.path.as_deref()) {
            Some(path) => FileStore::open(path)?,
            None => FileStore::open_default()?,
        };
        let store_path = store.path().to_path_buf();
        tracing::debug!(path = %store_path.display(), "preference store opened");

        let document = Rc::new(HeadlessDocument::new());
        let scheduler = Rc::new(TokioScheduler::new());
        let host = Host::builder()
            .store(Rc::new(store))
            .document(document.clone())
            .scheduler(scheduler.clone())
            .build();
        host.notifier().subscribe(|event| {
            tracing::info!(event = event.name(), detail = %event.detail(), "preference changed");
        });

        let prefs = Preferences::new(host, config);
        prefs.restore();

        Ok(Self {
            prefs,
            document,
            scheduler,
            store_path,
        })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }
}
