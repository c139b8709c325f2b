//! Swipe-scene compiles declarative JSON element descriptors into positioned, styled,
//! time-scrubbable layer trees.
//!
//! The pipeline runs once per load:
//!
//! - Parse a [`Descriptor`] (merging prototypes supplied by an [`ElementDelegate`])
//! - Build an [`Element`] tree with [`Element::load`] against a [`MediaBackend`]
//! - Drive it at runtime with [`Element::set_time_offset`] and report seek completions
//!   through [`Element::complete_seek`]
//!
//! [`collect_resource_urls`] lists the media a descriptor needs without building anything.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod descriptor;
mod foundation;
mod layout;
mod playback;
mod resources;
mod scene;
mod shape;

pub use crate::animation::compiler::{
    DEFAULT_VIBRATE_DELTA, DEFAULT_WIGGLE_DEGREES, loop_repeat_count,
};
pub use crate::animation::directive::{
    AnimValue, AnimatedProperty, AnimationDirective, CalculationMode, FillMode, ImageFrame,
    Keyframes, LayerTarget, Lerp, UNIT_DURATION,
};
pub use crate::animation::transform::parse_transform;
pub use crate::assets::color::{parse_color, parse_color_or};
pub use crate::assets::probe::{FsMediaBackend, probe_file};
pub use crate::descriptor::inherit::inherit_properties;
pub use crate::descriptor::url::ResourceUrl;
pub use crate::descriptor::value::{Descriptor, Fields};
pub use crate::foundation::core::{
    Affine, BezPath, Point, Rect, Rgba8Premul, ScaleFactor, Size, Transform2D, Vec2,
};
pub use crate::foundation::error::{SceneError, SceneResult};
pub use crate::foundation::lifecycle::LiveCounter;
pub use crate::layout::solver::{ResolvedBox, intrinsic_size, resolve_box};
pub use crate::layout::units::{
    Axis, Extent, parse_percent, parse_percent_any, resolve_extent, resolve_offset,
};
pub use crate::playback::controller::SeekCompletion;
pub use crate::playback::state::{PlaybackState, SeekState, SpriteClock, VideoSurface};
pub use crate::resources::collector::{ResourceTag, collect_resource_urls};
pub use crate::scene::backend::{
    ImageInfo, MediaBackend, SEEK_TOLERANCE_SECS, SeekRequest, SeekTicket, VideoPlayer,
};
pub use crate::scene::builder::{BuildContext, DEFAULT_FONT_SIZE_RATIO};
pub use crate::scene::delegate::{ElementDelegate, RichText, RichTextSpan, StaticDelegate};
pub use crate::scene::element::{
    Element, ElementId, ElementSnapshot, PRESSED_OPACITY, VideoSnapshot,
};
pub use crate::scene::layer::{
    ContentGravity, ImageLayer, LayerStyle, MaskLayer, PrimaryContent, RichTextLayer, Shadow,
    ShapeLayer, SpriteLayer, TextAlign, TextLayer, TilingHost, VideoLayer, VisualLayerSet,
};
pub use crate::shape::path::{resolve_path, resolve_path_list, to_device, try_resolve_path};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;
