use serde_json::Value;

use crate::{
    animation::{
        compiler::{CompileInput, compile_animations},
        transform::parse_transform,
    },
    assets::color::{parse_color, parse_color_or},
    descriptor::{
        inherit::inherit_properties,
        url::ResourceUrl,
        value::{Descriptor, Fields},
    },
    foundation::{
        core::{BezPath, Point, Rect, Rgba8Premul, ScaleFactor, Size, Vec2},
        lifecycle::LiveCounter,
    },
    layout::{
        solver::{ResolvedBox, intrinsic_size, resolve_box},
        units::{parse_percent, parse_percent_any},
    },
    playback::state::{PlaybackState, SpriteClock, VideoSurface},
    scene::{
        backend::{ImageInfo, MediaBackend},
        delegate::ElementDelegate,
        element::{Element, ElementId},
        layer::{
            ContentGravity, ImageLayer, LayerStyle, MaskLayer, PrimaryContent, RichTextLayer,
            Shadow, ShapeLayer, SpriteLayer, TextAlign, TextLayer, TilingHost, VideoLayer,
            VisualLayerSet,
        },
    },
    shape::path::{resolve_path, to_device},
};

/// Default font size as a fraction of the screen width.
pub const DEFAULT_FONT_SIZE_RATIO: f64 = 20.0 / 320.0;

/// Collaborators and id allocation shared by one load.
pub struct BuildContext<'a> {
    pub(crate) delegate: &'a dyn ElementDelegate,
    pub(crate) media: &'a mut dyn MediaBackend,
    pub(crate) live: Option<LiveCounter>,
    next_id: u64,
}

impl<'a> BuildContext<'a> {
    /// Context over a delegate and a media backend.
    pub fn new(delegate: &'a dyn ElementDelegate, media: &'a mut dyn MediaBackend) -> Self {
        Self {
            delegate,
            media,
            live: None,
            next_id: 0,
        }
    }

    /// Count every built element in `counter` until it is dropped.
    pub fn with_live_counter(mut self, counter: LiveCounter) -> Self {
        self.live = Some(counter);
        self
    }

    fn allocate_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Resolve `src` against the delegate's base URL and map it to a local resource.
    fn local_url(&self, src: &str, base: Option<&ResourceUrl>) -> Option<ResourceUrl> {
        let Some(url) = ResourceUrl::resolve(src, base) else {
            tracing::debug!(src, "unresolvable source; feature omitted");
            return None;
        };
        let local = self.delegate.map_to_local(&url);
        if local.is_none() {
            tracing::debug!(%url, "no local resource; feature omitted");
        }
        local
    }

    /// Local URL and metadata of an image source.
    fn load_image(&mut self, src: &str, base: Option<&ResourceUrl>) -> Option<(ResourceUrl, ImageInfo)> {
        let url = self.local_url(src, base)?;
        match self.media.probe_image(&url) {
            Ok(info) if info.frame_count > 0 && info.width > 0 && info.height > 0 => {
                Some((url, info))
            }
            Ok(_) => {
                tracing::debug!(%url, "image has no frames; feature omitted");
                None
            }
            Err(e) => {
                tracing::debug!(%url, error = %e, "image probe failed; feature omitted");
                None
            }
        }
    }
}

impl Element {
    /// Build an element tree from `desc` inside a container of `dimension` local units.
    ///
    /// `dimension` doubles as the screen size for font defaults. Every malformed or
    /// unavailable feature is omitted; loading never fails.
    #[tracing::instrument(skip(desc, ctx))]
    pub fn load(
        desc: &Descriptor,
        dimension: Size,
        scale: ScaleFactor,
        ctx: &mut BuildContext<'_>,
    ) -> Element {
        build(desc, dimension, dimension, scale, ctx)
    }
}

fn build(
    desc: &Descriptor,
    container: Size,
    screen: Size,
    scale: ScaleFactor,
    ctx: &mut BuildContext<'_>,
) -> Element {
    let prototype = desc.string("element").and_then(|name| {
        let found = ctx.delegate.prototype(name);
        if found.is_none() {
            tracing::debug!(name, "prototype not found");
        }
        found
    });
    let info = inherit_properties(desc, prototype.as_ref());
    let id = ctx.allocate_id();
    let base = ctx.delegate.base_url();
    let base = base.as_ref();

    let image = info.string("img").and_then(|src| ctx.load_image(src, base));
    let mask = info.string("mask").and_then(|src| ctx.load_image(src, base));
    let path = resolve_path(info.field("path"), ctx.delegate);

    let intrinsic = intrinsic_size(
        image.as_ref().map(|(_, i)| i.size()),
        mask.as_ref().map(|(_, i)| i.size()),
        path.as_ref(),
    );
    let resolved = resolve_box(&info, container, intrinsic, scale);
    let bounds = resolved.bounds();

    let mut layers = VisualLayerSet {
        style: base_style(&info, &resolved, container, scale),
        ..VisualLayerSet::default()
    };
    let tiling = info.flag("tiling");

    // Primary content, first buildable in priority order.
    if let Some((url, img)) = image {
        layers.primary = Some(PrimaryContent::Image(ImageLayer {
            url,
            frame: bounds,
            frame_count: img.frame_count,
            gravity: ContentGravity::AspectFill,
        }));
    }
    let sprite_fields = info.string("sprite").zip(info.list("slice"));
    if let Some((src, slice)) = sprite_fields {
        layers.style.masks_to_bounds = true;
        if layers.primary.is_none() {
            layers.primary = build_sprite(&info, src, slice, bounds, base, ctx)
                .map(PrimaryContent::Sprite);
        }
    }
    if layers.primary.is_none()
        && let Some(path) = &path
    {
        layers.primary = Some(PrimaryContent::Shape(build_shape(&info, path, bounds, scale)));
        layers.style.shadow = None;
    }
    let mut video = None;
    if layers.primary.is_none()
        && let Some((layer, surface)) = build_video(&info, bounds, resolved.fill, base, ctx)
    {
        layers.primary = Some(PrimaryContent::Video(layer));
        video = Some(surface);
    }

    if tiling && matches!(layers.primary, Some(PrimaryContent::Image(_) | PrimaryContent::Shape(_))) {
        layers.tiling = Some(TilingHost::around(bounds));
        layers.style.masks_to_bounds = true;
    }

    layers.mask = mask.map(|(url, _)| MaskLayer { url, frame: bounds });
    layers.text = build_text(&info, bounds, screen, scale, ctx);
    if let Some(lines) = info.strings("markdown")
        && let Some(text) = ctx.delegate.render_rich_text(&info, &lines)
    {
        layers.rich_text = Some(RichTextLayer {
            text,
            frame: bounds,
        });
    }

    let compiled = {
        let input = CompileInput {
            info: &info,
            layers: &layers,
            scale,
            bounds,
        };
        let delegate = ctx.delegate;
        let mut load = |src: &str| ctx.load_image(src, base);
        compile_animations(&input, delegate, &mut load)
    };

    let mut playback = PlaybackState::default();
    if let Some(repeat) = compiled.sprite_repeat
        && let Some(sprite) = layers.sprite()
    {
        playback.sprite = Some(SpriteClock::new(sprite.slice, sprite.slot.1, repeat));
    }

    let children = info
        .children()
        .iter()
        .map(|child| build(child, resolved.content_size(), screen, scale, ctx))
        .collect();

    Element {
        id,
        action: info.string("action").map(str::to_owned),
        scale,
        resolved,
        layers,
        animations: compiled.directives,
        children,
        playback,
        video,
        _live: ctx.live.as_ref().map(LiveCounter::guard),
        info,
    }
}

fn base_style(info: &Descriptor, resolved: &ResolvedBox, container: Size, scale: ScaleFactor) -> LayerStyle {
    let mut style = LayerStyle {
        background: parse_color(info.field("bc")),
        corner_radius: info.number_or("cornerRadius", 0.0) * scale.x,
        opacity: info.number_or("opacity", 1.0),
        transform: parse_transform(info, scale, None).unwrap_or_default(),
        position: resolved.frame.center(),
        masks_to_bounds: info.flag("clip"),
        shadow: parse_shadow(info, scale),
        ..LayerStyle::default()
    };
    if let Some(width) = info.number("borderWidth") {
        style.border_width = width * scale.x;
        style.border_color = parse_color_or(info.field("borderColor"), Rgba8Premul::BLACK);
    }

    let local = resolved.local.size();
    if let Some([ax, ay]) = info.list("anchor").and_then(|v| <&[Value; 2]>::try_from(v).ok())
        && local.width > 0.0
        && local.height > 0.0
        && let (Some(px), Some(py)) = (
            parse_percent_any(ax, local.width, 0.0),
            parse_percent_any(ay, local.height, 0.0),
        )
    {
        // Position stays at the frame center; the drawn bounds shift around the anchor.
        style.anchor = Point::new(px / local.width, py / local.height);
    }
    if let Some([px, py]) = info.list("pos").and_then(|v| <&[Value; 2]>::try_from(v).ok())
        && let (Some(px), Some(py)) = (
            parse_percent_any(px, container.width, 0.0),
            parse_percent_any(py, container.height, 0.0),
        )
    {
        style.position = scale.apply_point(Point::new(px, py));
    }
    style
}

fn parse_shadow(info: &Descriptor, scale: ScaleFactor) -> Option<Shadow> {
    let shadow = info.record("shadow")?;
    let offset = shadow
        .numbers("offset")
        .and_then(|v| match v.as_slice() {
            [w, h] => Some((w * scale.x, h * scale.y)),
            _ => None,
        })
        .unwrap_or((scale.x, scale.y));
    Some(Shadow {
        color: parse_color_or(shadow.field("color"), Rgba8Premul::BLACK),
        offset,
        opacity: shadow.number_or("opacity", 0.5),
        radius: shadow.number_or("radius", 1.0) * scale.x,
    })
}

fn cell_count(value: Option<&Value>) -> Option<u32> {
    let v = value?.as_f64()?;
    v.is_finite().then(|| v.max(1.0) as u32)
}

fn build_sprite(
    info: &Descriptor,
    src: &str,
    slice: &[Value],
    bounds: Rect,
    base: Option<&ResourceUrl>,
    ctx: &mut BuildContext<'_>,
) -> Option<SpriteLayer> {
    let (url, _) = ctx.load_image(src, base)?;
    let columns = cell_count(slice.first()).unwrap_or(1);
    let rows = cell_count(slice.get(1)).unwrap_or(1);
    let slot = info
        .numbers("slot")
        .and_then(|v| match v.as_slice() {
            [x, y] => Some((x.max(0.0) as u32, y.max(0.0) as u32)),
            _ => None,
        })
        .unwrap_or((0, 0));
    Some(SpriteLayer {
        url,
        frame: bounds,
        slice: (columns, rows),
        slot,
        contents_rect: SpriteLayer::cell_rect((columns, rows), slot.0, slot.1),
    })
}

fn build_shape(info: &Descriptor, path: &BezPath, bounds: Rect, scale: ScaleFactor) -> ShapeLayer {
    ShapeLayer {
        path: to_device(path, scale),
        frame: bounds,
        fill: parse_color(info.field("fillColor")),
        stroke: parse_color_or(info.field("strokeColor"), Rgba8Premul::BLACK),
        line_width: info.number_or("lineWidth", 0.0) * scale.x,
        shadow: parse_shadow(info, scale),
        stroke_start: info.number_or("strokeStart", 0.0),
        stroke_end: info.number_or("strokeEnd", 1.0),
    }
}

fn build_video(
    info: &Descriptor,
    bounds: Rect,
    fill: bool,
    base: Option<&ResourceUrl>,
    ctx: &mut BuildContext<'_>,
) -> Option<(VideoLayer, VideoSurface)> {
    let mut stream = info.flag("stream");
    let url = if let Some(src) = info.string("video") {
        ResourceUrl::resolve(src, base)
    } else if let Some(src) = info.string("radio") {
        stream = true;
        ResourceUrl::resolve(src, base)
    } else {
        return None;
    };
    let Some(url) = url else {
        tracing::debug!("unresolvable video source; video omitted");
        return None;
    };
    let url = if stream {
        url
    } else {
        ctx.delegate.map_to_local(&url).or_else(|| {
            tracing::debug!(%url, "no local video; video omitted");
            None
        })?
    };

    let player = match ctx.media.open_video(&url, stream) {
        Ok(player) => player,
        Err(e) => {
            tracing::debug!(%url, error = %e, "video open failed; video omitted");
            return None;
        }
    };
    let layer = VideoLayer {
        url,
        frame: bounds,
        gravity: if fill {
            ContentGravity::AspectFill
        } else {
            ContentGravity::Resize
        },
        stream,
    };
    let surface = VideoSurface {
        player,
        start_secs: info.number_or("videoStart", 0.0),
        duration_secs: info.number_or("videoDuration", 1.0),
        playing: false,
        needs_rewind: false,
    };
    Some((layer, surface))
}

fn build_text(
    info: &Descriptor,
    bounds: Rect,
    screen: Size,
    scale: ScaleFactor,
    ctx: &mut BuildContext<'_>,
) -> Option<TextLayer> {
    let text = info.string("text")?;
    let default_size = DEFAULT_FONT_SIZE_RATIO * screen.width;
    let font_size = match info.field("fontSize") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(default_size),
        Some(Value::String(s)) => parse_percent(s, screen.height, default_size),
        _ => default_size,
    } * scale.y;
    let align = match info.string("textAlign") {
        Some("left") => TextAlign::Left,
        Some("right") => TextAlign::Right,
        _ => TextAlign::Center,
    };

    let measured = ctx.media.measure_text(text, font_size, bounds.width());
    let offset_y = (bounds.height() - measured) / 2.0;
    Some(TextLayer {
        text: text.to_owned(),
        frame: bounds + Vec2::new(0.0, offset_y),
        font_size,
        color: parse_color_or(info.field("textColor"), Rgba8Premul::BLACK),
        align,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/builder.rs"]
mod tests;
