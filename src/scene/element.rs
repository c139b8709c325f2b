use crate::{
    animation::directive::AnimationDirective,
    descriptor::value::Descriptor,
    foundation::{core::ScaleFactor, lifecycle::LiveGuard},
    layout::solver::ResolvedBox,
    playback::state::{PlaybackState, VideoSurface},
    scene::{delegate::ElementDelegate, layer::VisualLayerSet},
};

/// Opacity an action element shows while a touch is held on it.
pub const PRESSED_OPACITY: f64 = 0.5;

/// Identifier of one element within a loaded tree, unique per [`crate::BuildContext`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub u64);

/// One built visual node: resolved geometry, layers, compiled animations, owned children.
///
/// Built once by [`Element::load`]; afterwards only the playback controller and the
/// interaction methods mutate it.
#[derive(Debug)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) info: Descriptor,
    pub(crate) scale: ScaleFactor,
    pub(crate) action: Option<String>,
    pub(crate) resolved: ResolvedBox,
    pub(crate) layers: VisualLayerSet,
    pub(crate) animations: Vec<AnimationDirective>,
    pub(crate) children: Vec<Element>,
    pub(crate) playback: PlaybackState,
    pub(crate) video: Option<VideoSurface>,
    pub(crate) _live: Option<LiveGuard>,
}

impl Element {
    /// Identifier assigned at load.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Descriptor after prototype inheritance.
    pub fn info(&self) -> &Descriptor {
        &self.info
    }

    /// Scale factor the subtree was built with.
    pub fn scale(&self) -> ScaleFactor {
        self.scale
    }

    /// `action` field, if the element is a tap target.
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Resolved geometry.
    pub fn resolved(&self) -> &ResolvedBox {
        &self.resolved
    }

    /// Built layers with their current style.
    pub fn layers(&self) -> &VisualLayerSet {
        &self.layers
    }

    /// Compiled animation directives.
    pub fn animations(&self) -> &[AnimationDirective] {
        &self.animations
    }

    /// Owned child elements, in descriptor order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Playback controller state.
    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    /// Video surface, if this element hosts a player.
    pub fn video(&self) -> Option<&VideoSurface> {
        self.video.as_ref()
    }

    /// Whether this element or any descendant hosts a video player.
    pub fn is_video_element(&self) -> bool {
        self.video.is_some() || self.children.iter().any(Element::is_video_element)
    }

    /// Whether this element or any descendant is autoplaying.
    pub fn is_playing(&self) -> bool {
        self.video.as_ref().is_some_and(|v| v.playing)
            || self.children.iter().any(Element::is_playing)
    }

    /// Depth-first lookup by id.
    pub fn find(&self, id: ElementId) -> Option<&Element> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Depth-first mutable lookup by id.
    pub fn find_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Tear down the subtree: drop children and the video player, forget outstanding seeks.
    ///
    /// Completions for seeks issued before the teardown are reported as stale afterwards.
    pub fn clear(&mut self) {
        self.children.clear();
        self.video = None;
        self.playback.seek.reset();
    }

    /// A touch started on an action element.
    pub fn touch_down(&mut self) -> bool {
        self.set_action_opacity(PRESSED_OPACITY)
    }

    /// A touch left an action element without activating it.
    pub fn touch_cancel(&mut self) -> bool {
        self.set_action_opacity(1.0)
    }

    /// Activate an action element; returns `false` when the element has no action.
    pub fn press(&mut self, delegate: &dyn ElementDelegate) -> bool {
        if !self.set_action_opacity(1.0) {
            return false;
        }
        tracing::debug!(id = self.id.0, action = self.action.as_deref(), "action pressed");
        delegate.on_action(self);
        true
    }

    fn set_action_opacity(&mut self, opacity: f64) -> bool {
        if self.action.is_none() {
            return false;
        }
        self.layers.style.opacity = opacity;
        true
    }

    /// Serializable view of the subtree.
    pub fn snapshot(&self) -> ElementSnapshot<'_> {
        ElementSnapshot {
            id: self.id,
            action: self.action.as_deref(),
            frame: &self.resolved,
            layers: &self.layers,
            animations: &self.animations,
            playback: &self.playback,
            video: self.video.as_ref().map(|v| VideoSnapshot {
                start_secs: v.start_secs,
                duration_secs: v.duration_secs,
                playing: v.playing,
            }),
            children: self.children.iter().map(Element::snapshot).collect(),
        }
    }
}

/// Borrowed, serializable view of an element tree.
#[derive(Debug, serde::Serialize)]
pub struct ElementSnapshot<'a> {
    /// Element id.
    pub id: ElementId,
    /// `action` field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'a str>,
    /// Resolved geometry.
    pub frame: &'a ResolvedBox,
    /// Layers with current style.
    pub layers: &'a VisualLayerSet,
    /// Compiled directives.
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub animations: &'a [AnimationDirective],
    /// Playback state.
    pub playback: &'a PlaybackState,
    /// Video timing, if a player is attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoSnapshot>,
    /// Child snapshots.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementSnapshot<'a>>,
}

/// Serializable video surface summary.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct VideoSnapshot {
    /// Media time at offset 0.
    pub start_secs: f64,
    /// Media seconds per unit timeline.
    pub duration_secs: f64,
    /// Whether autoplay is running.
    pub playing: bool,
}
