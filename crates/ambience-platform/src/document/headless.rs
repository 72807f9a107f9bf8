use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use super::LiveDocument;

/// In-memory document root for tests, prerendering and native hosts.
#[derive(Debug, Default)]
pub struct HeadlessDocument {
    classes: RefCell<BTreeSet<String>>,
    style: RefCell<BTreeMap<String, String>>,
    attributes: RefCell<BTreeMap<String, String>>,
    prefers_dark: Cell<bool>,
    configured_hue: RefCell<Option<String>>,
    videos: RefCell<Vec<bool>>,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefers_dark(self, prefers_dark: bool) -> Self {
        self.prefers_dark.set(prefers_dark);
        self
    }

    /// Simulate the configuration marker carrying `data-hue`.
    pub fn with_configured_hue(self, hue: impl Into<String>) -> Self {
        *self.configured_hue.borrow_mut() = Some(hue.into());
        self
    }

    /// Add `count` background video elements, initially playing.
    pub fn with_background_videos(self, count: usize) -> Self {
        self.videos.borrow_mut().extend(std::iter::repeat(true).take(count));
        self
    }

    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.prefers_dark.set(prefers_dark);
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }

    pub fn style_vars(&self) -> BTreeMap<String, String> {
        self.style.borrow().clone()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    pub fn playing_videos(&self) -> usize {
        self.videos.borrow().iter().filter(|playing| **playing).count()
    }
}

impl LiveDocument for HeadlessDocument {
    fn add_class(&self, class: &str) {
        self.classes.borrow_mut().insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn set_style_var(&self, name: &str, value: &str) {
        self.style
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn style_var(&self, name: &str) -> Option<String> {
        self.style.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn prefers_dark_scheme(&self) -> bool {
        self.prefers_dark.get()
    }

    fn configured_hue(&self) -> Option<String> {
        self.configured_hue.borrow().clone()
    }

    fn set_background_videos_playing(&self, playing: bool) -> usize {
        let mut videos = self.videos.borrow_mut();
        videos.iter_mut().for_each(|state| *state = playing);
        videos.len()
    }
}
