use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlVideoElement, Window};

use crate::document::LiveDocument;

const CONFIG_CARRIER_ID: &str = "config-carrier";
const BACKGROUND_VIDEO_SELECTOR: &str = ".background-video";
const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// `document.documentElement` of the current page.
pub struct BrowserDocument {
    window: Window,
    document: Document,
    root: HtmlElement,
    /// Swallows autoplay rejections from `video.play()`.
    ignore_rejection: Closure<dyn FnMut(JsValue)>,
}

impl BrowserDocument {
    /// `None` outside a browser page.
    pub fn current() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let root = document.document_element()?.dyn_into::<HtmlElement>().ok()?;
        Some(Self {
            window,
            document,
            root,
            ignore_rejection: Closure::new(|_: JsValue| {}),
        })
    }
}

impl LiveDocument for BrowserDocument {
    fn add_class(&self, class: &str) {
        let _ = self.root.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.root.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.root.class_list().contains(class)
    }

    fn set_style_var(&self, name: &str, value: &str) {
        if let Err(e) = self.root.style().set_property(name, value) {
            tracing::debug!(name, error = %super::js_error_message(&e), "style update rejected");
        }
    }

    fn style_var(&self, name: &str) -> Option<String> {
        self.root
            .style()
            .get_property_value(name)
            .ok()
            .filter(|value| !value.trim().is_empty())
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.root.set_attribute(name, value);
    }

    fn prefers_dark_scheme(&self) -> bool {
        self.window
            .match_media(DARK_SCHEME_QUERY)
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }

    fn configured_hue(&self) -> Option<String> {
        self.document
            .get_element_by_id(CONFIG_CARRIER_ID)?
            .get_attribute("data-hue")
    }

    fn set_background_videos_playing(&self, playing: bool) -> usize {
        let Ok(nodes) = self.document.query_selector_all(BACKGROUND_VIDEO_SELECTOR) else {
            return 0;
        };
        let mut addressed = 0;
        for i in 0..nodes.length() {
            let Some(video) = nodes
                .item(i)
                .and_then(|node| node.dyn_into::<HtmlVideoElement>().ok())
            else {
                continue;
            };
            if playing {
                if let Ok(promise) = video.play() {
                    let _ = promise.catch(&self.ignore_rejection);
                }
            } else {
                let _ = video.pause();
            }
            addressed += 1;
        }
        addressed
    }
}
