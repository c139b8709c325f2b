use crate::{
    descriptor::url::ResourceUrl,
    foundation::{core::Size, error::SceneResult},
    scene::element::ElementId,
};

/// Tolerance on both sides of a scrub seek, in seconds.
pub const SEEK_TOLERANCE_SECS: f64 = 1.0 / 60.0;

/// What the scene builder needs to know about a still or animated image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ImageInfo {
    /// Pixel width of the first frame.
    pub width: u32,
    /// Pixel height of the first frame.
    pub height: u32,
    /// Number of frames (1 for still images).
    pub frame_count: u32,
}

impl ImageInfo {
    /// Pixel size as a float size.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Identifies one issued seek so that its completion can be routed back to the element.
///
/// The generation changes every time a seek is issued, so completions for seeks that were
/// superseded (or whose element was cleared) are recognizable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SeekTicket {
    /// Element hosting the video.
    pub element: ElementId,
    /// Per-element seek counter.
    pub generation: u64,
}

/// A seek handed to a [`VideoPlayer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeekRequest {
    /// Target time in seconds from the start of the media.
    pub target_secs: f64,
    /// Allowed early landing, in seconds.
    pub tolerance_before_secs: f64,
    /// Allowed late landing, in seconds.
    pub tolerance_after_secs: f64,
    /// Pass back to [`crate::Element::complete_seek`] once the seek lands.
    pub ticket: SeekTicket,
}

/// A platform video player driven by the playback controller.
///
/// Seeks are asynchronous: `seek` returns immediately and the host reports completion by
/// calling [`crate::Element::complete_seek`] with the request's ticket on the same thread.
pub trait VideoPlayer {
    /// Whether the media is loaded far enough to accept seeks.
    fn is_ready(&self) -> bool;
    /// Start an asynchronous seek.
    fn seek(&mut self, request: SeekRequest);
    /// Jump back to the start.
    fn rewind(&mut self);
    /// Start or resume playback.
    fn play(&mut self);
    /// Pause playback.
    fn pause(&mut self);
}

/// Media services consulted while building an element tree.
pub trait MediaBackend {
    /// Read image metadata for a local (already mapped) URL.
    fn probe_image(&mut self, url: &ResourceUrl) -> SceneResult<ImageInfo>;

    /// Open a player for a local file or, when `stream` is set, a remote stream.
    fn open_video(&mut self, url: &ResourceUrl, stream: bool) -> SceneResult<Box<dyn VideoPlayer>>;

    /// Natural wrapped height of `text` at `font_size` within `max_width` device pixels.
    fn measure_text(&mut self, text: &str, font_size: f64, max_width: f64) -> f64;
}
