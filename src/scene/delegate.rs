use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    descriptor::{url::ResourceUrl, value::Descriptor},
    foundation::core::Rgba8Premul,
    scene::element::Element,
};

/// Styled text produced by the host's rich-text renderer.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RichText {
    /// Runs in reading order.
    pub spans: Vec<RichTextSpan>,
}

/// One uniformly styled run of rich text.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RichTextSpan {
    /// Run text, including any line breaks.
    pub text: String,
    /// Font size in device pixels, if the renderer fixed one.
    pub font_size: Option<f64>,
    /// Run color.
    pub color: Option<Rgba8Premul>,
    /// Bold weight.
    pub bold: bool,
}

/// The host environment an element tree is built against.
///
/// Lookups are consulted during load; notifications fire at runtime with the element
/// concerned. The delegate is passed into each call rather than stored in elements, so a
/// torn-down tree cannot call back into it.
pub trait ElementDelegate {
    /// Prototype descriptor supplying default fields for `name`.
    fn prototype(&self, name: &str) -> Option<Descriptor> {
        let _ = name;
        None
    }

    /// Shared path value registered under `name`.
    fn named_path(&self, name: &str) -> Option<Value> {
        let _ = name;
        None
    }

    /// Whether a finished video should loop in place instead of signalling completion.
    fn should_repeat_video(&self, element: &Element) -> bool {
        let _ = element;
        false
    }

    /// Primary tap/click on an element carrying `action`.
    fn on_action(&self, element: &Element) {
        let _ = element;
    }

    /// A video element started playing.
    fn on_playback_started(&self, element: &Element) {
        let _ = element;
    }

    /// A video element stopped; `completed` is `true` when it reached its end.
    fn on_playback_finished(&self, element: &Element, completed: bool) {
        let _ = (element, completed);
    }

    /// Render `markdown` lines into styled text.
    fn render_rich_text(&self, info: &Descriptor, lines: &[String]) -> Option<RichText> {
        let _ = (info, lines);
        None
    }

    /// Base URL relative sources resolve against.
    fn base_url(&self) -> Option<ResourceUrl> {
        None
    }

    /// Map a remote URL to a locally available resource; `None` omits the feature.
    fn map_to_local(&self, url: &ResourceUrl) -> Option<ResourceUrl> {
        Some(url.clone())
    }
}

/// Table-driven delegate: prototypes, named paths and a base URL loaded from data.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticDelegate {
    /// Prototype descriptors by name.
    pub prototypes: BTreeMap<String, Descriptor>,
    /// Named path values by name.
    pub paths: BTreeMap<String, Value>,
    /// Base URL for relative sources.
    pub base_url: Option<ResourceUrl>,
    /// Loop finished videos.
    pub repeat_video: bool,
    /// Plain-text stand-in for markdown rendering (one span per line).
    pub plain_markdown: bool,
}

impl StaticDelegate {
    /// Empty delegate with no prototypes, paths, or base URL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a delegate table from JSON text.
    pub fn from_json_str(s: &str) -> crate::SceneResult<Self> {
        serde_json::from_str(s).map_err(|e| crate::SceneError::serde(e.to_string()))
    }
}

impl ElementDelegate for StaticDelegate {
    fn prototype(&self, name: &str) -> Option<Descriptor> {
        self.prototypes.get(name).cloned()
    }

    fn named_path(&self, name: &str) -> Option<Value> {
        self.paths.get(name).cloned()
    }

    fn should_repeat_video(&self, _element: &Element) -> bool {
        self.repeat_video
    }

    fn render_rich_text(&self, _info: &Descriptor, lines: &[String]) -> Option<RichText> {
        if !self.plain_markdown {
            return None;
        }
        let spans = lines
            .iter()
            .map(|line| RichTextSpan {
                text: format!("{line}\n"),
                ..RichTextSpan::default()
            })
            .collect();
        Some(RichText { spans })
    }

    fn base_url(&self) -> Option<ResourceUrl> {
        self.base_url.clone()
    }
}
