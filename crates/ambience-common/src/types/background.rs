use serde::{Deserialize, Serialize};

/// Media type of a background asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    #[default]
    Image,
    Video,
}

/// One selectable background asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundOption {
    pub src: String,
    #[serde(rename = "type", default)]
    pub kind: BackgroundKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl BackgroundOption {
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            kind: BackgroundKind::Image,
            label: None,
        }
    }

    pub fn video(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            kind: BackgroundKind::Video,
            label: None,
        }
    }

    pub fn is_video(&self) -> bool {
        self.kind == BackgroundKind::Video
    }
}
