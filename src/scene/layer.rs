use crate::{
    descriptor::url::ResourceUrl,
    foundation::core::{BezPath, Point, Rect, Rgba8Premul, Transform2D},
    scene::delegate::RichText,
};

/// How content is fitted into its layer bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentGravity {
    /// Stretch to the bounds.
    #[default]
    Resize,
    /// Preserve aspect, cover the bounds and crop the overflow.
    AspectFill,
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Flush left.
    Left,
    /// Centered (default).
    #[default]
    Center,
    /// Flush right.
    Right,
}

/// Drop shadow parameters, in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Shadow {
    /// Shadow color (default black).
    pub color: Rgba8Premul,
    /// Offset of the shadow from the content.
    pub offset: (f64, f64),
    /// Shadow opacity (default 0.5).
    pub opacity: f64,
    /// Blur radius.
    pub radius: f64,
}

/// Baseline (pre-animation) style of the element's root layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayerStyle {
    /// Background fill.
    pub background: Option<Rgba8Premul>,
    /// Border stroke width; zero means no border.
    pub border_width: f64,
    /// Border stroke color.
    pub border_color: Rgba8Premul,
    /// Corner radius of background, border and clip.
    pub corner_radius: f64,
    /// Shadow of the root layer; shape elements put theirs on the shape instead.
    pub shadow: Option<Shadow>,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Transform around the anchor point.
    pub transform: Transform2D,
    /// Normalized anchor point within the bounds.
    pub anchor: Point,
    /// Position of the anchor point in the parent's device space.
    pub position: Point,
    /// Whether sublayers are clipped to the bounds.
    pub masks_to_bounds: bool,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            background: None,
            border_width: 0.0,
            border_color: Rgba8Premul::BLACK,
            corner_radius: 0.0,
            shadow: None,
            opacity: 1.0,
            transform: Transform2D::default(),
            anchor: Point::new(0.5, 0.5),
            position: Point::ZERO,
            masks_to_bounds: false,
        }
    }
}

/// Still or animated image content.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ImageLayer {
    /// Local URL of the image.
    pub url: ResourceUrl,
    /// Layer frame within the element bounds.
    pub frame: Rect,
    /// Number of frames in the source.
    pub frame_count: u32,
    /// Fitting mode (always aspect-fill for images).
    pub gravity: ContentGravity,
}

/// One cell of a sprite sheet.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SpriteLayer {
    /// Local URL of the sheet.
    pub url: ResourceUrl,
    /// Layer frame within the element bounds.
    pub frame: Rect,
    /// Grid size as `(columns, rows)`.
    pub slice: (u32, u32),
    /// Initially selected `(column, row)`.
    pub slot: (u32, u32),
    /// Normalized texture rectangle of the selected cell.
    pub contents_rect: Rect,
}

impl SpriteLayer {
    /// Texture rectangle of cell `(column, row)` in a `columns x rows` grid.
    pub fn cell_rect(slice: (u32, u32), column: u32, row: u32) -> Rect {
        let cols = f64::from(slice.0.max(1));
        let rows = f64::from(slice.1.max(1));
        Rect::new(
            f64::from(column) / cols,
            f64::from(row) / rows,
            (f64::from(column) + 1.0) / cols,
            (f64::from(row) + 1.0) / rows,
        )
    }
}

/// Vector shape content, in device pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ShapeLayer {
    /// Outline in device pixels.
    #[serde(serialize_with = "serialize_path")]
    pub path: BezPath,
    /// Layer frame within the element bounds.
    pub frame: Rect,
    /// Interior fill; `None` leaves the shape unfilled.
    pub fill: Option<Rgba8Premul>,
    /// Stroke color (default black).
    pub stroke: Rgba8Premul,
    /// Stroke width.
    pub line_width: f64,
    /// Shape shadow.
    pub shadow: Option<Shadow>,
    /// Fraction of the outline where the stroke starts.
    pub stroke_start: f64,
    /// Fraction of the outline where the stroke ends.
    pub stroke_end: f64,
}

/// Plain text content.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextLayer {
    /// Text to draw, wrapped to the frame width.
    pub text: String,
    /// Frame within the element bounds, vertically centred.
    pub frame: Rect,
    /// Font size in device pixels.
    pub font_size: f64,
    /// Text color.
    pub color: Rgba8Premul,
    /// Horizontal alignment.
    pub align: TextAlign,
}

/// Delegate-rendered markdown, filling the element bounds.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RichTextLayer {
    /// Styled runs.
    pub text: RichText,
    /// Frame within the element bounds.
    pub frame: Rect,
}

/// Alpha mask applied to the whole element.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MaskLayer {
    /// Local URL of the mask image.
    pub url: ResourceUrl,
    /// Mask frame within the element bounds.
    pub frame: Rect,
}

/// Surface a video player renders into.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct VideoLayer {
    /// URL handed to the player (local file or stream).
    pub url: ResourceUrl,
    /// Surface frame within the element bounds.
    pub frame: Rect,
    /// Fitting mode; aspect-fill when the element uses `"fill"` sizing.
    pub gravity: ContentGravity,
    /// Whether the source is streamed.
    pub stream: bool,
}

/// Intermediate layer holding five copies of the content for seamless wraparound.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TilingHost {
    /// Center tile followed by the copies at -x, +x, -y, +y.
    pub tiles: [Rect; 5],
    /// Baseline transform of the host (shift and position animations apply here).
    pub transform: Transform2D,
}

impl TilingHost {
    /// Tile the element bounds `rc` around itself.
    pub fn around(rc: Rect) -> Self {
        let (w, h) = (rc.width(), rc.height());
        Self {
            tiles: [
                rc,
                rc + kurbo::Vec2::new(-w, 0.0),
                rc + kurbo::Vec2::new(w, 0.0),
                rc + kurbo::Vec2::new(0.0, -h),
                rc + kurbo::Vec2::new(0.0, h),
            ],
            transform: Transform2D::default(),
        }
    }
}

/// The single primary content of an element.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrimaryContent {
    /// Still or animated image.
    Image(ImageLayer),
    /// Sprite sheet cell.
    Sprite(SpriteLayer),
    /// Vector shape.
    Shape(ShapeLayer),
    /// Video surface.
    Video(VideoLayer),
}

/// All drawable layers of one element.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct VisualLayerSet {
    /// Root layer style.
    pub style: LayerStyle,
    /// Primary content, if any.
    pub primary: Option<PrimaryContent>,
    /// Tiling host wrapping an image or shape primary.
    pub tiling: Option<TilingHost>,
    /// Element mask.
    pub mask: Option<MaskLayer>,
    /// Plain text overlay.
    pub text: Option<TextLayer>,
    /// Markdown overlay.
    pub rich_text: Option<RichTextLayer>,
}

impl VisualLayerSet {
    /// Image primary, if that is the primary content.
    pub fn image(&self) -> Option<&ImageLayer> {
        match &self.primary {
            Some(PrimaryContent::Image(l)) => Some(l),
            _ => None,
        }
    }

    /// Sprite primary, if that is the primary content.
    pub fn sprite(&self) -> Option<&SpriteLayer> {
        match &self.primary {
            Some(PrimaryContent::Sprite(l)) => Some(l),
            _ => None,
        }
    }

    pub(crate) fn sprite_mut(&mut self) -> Option<&mut SpriteLayer> {
        match &mut self.primary {
            Some(PrimaryContent::Sprite(l)) => Some(l),
            _ => None,
        }
    }

    /// Shape primary, if that is the primary content.
    pub fn shape(&self) -> Option<&ShapeLayer> {
        match &self.primary {
            Some(PrimaryContent::Shape(l)) => Some(l),
            _ => None,
        }
    }

    /// Video primary, if that is the primary content.
    pub fn video(&self) -> Option<&VideoLayer> {
        match &self.primary {
            Some(PrimaryContent::Video(l)) => Some(l),
            _ => None,
        }
    }
}

fn serialize_path<S: serde::Serializer>(path: &BezPath, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&path.to_svg())
}
