//! The live document root that presentation state is written to.

mod headless;

pub use headless::HeadlessDocument;

/// The single top-level element whose marker classes and style variables
/// drive visual presentation, plus the few page-level facts the
/// controllers query.
///
/// All methods are infallible: a host that cannot perform an operation
/// ignores it.
pub trait LiveDocument {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;

    /// Add `class` when `present` is true, remove it otherwise.
    fn toggle_class(&self, class: &str, present: bool) {
        if present {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    fn set_style_var(&self, name: &str, value: &str);
    fn style_var(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    /// Whether the OS/browser currently prefers a dark color scheme.
    /// Evaluated at call time; there is no subscription.
    fn prefers_dark_scheme(&self) -> bool;

    /// Raw hue carried by the server-rendered configuration marker, if any.
    fn configured_hue(&self) -> Option<String>;

    /// Pause or resume every video-type background element. Returns how
    /// many elements were addressed.
    fn set_background_videos_playing(&self, playing: bool) -> usize;
}
