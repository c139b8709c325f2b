use serde_json::{Map, Value};

use crate::{
    animation::{
        directive::{
            AnimValue, AnimatedProperty, AnimationDirective, CalculationMode, ImageFrame,
            LayerTarget,
        },
        transform::parse_transform,
    },
    assets::color::parse_color,
    descriptor::{url::ResourceUrl, value::Descriptor, value::Fields},
    foundation::core::{Affine, Rect, Rgba8Premul, ScaleFactor, Vec2},
    scene::{backend::ImageInfo, delegate::ElementDelegate, layer::VisualLayerSet},
    shape::path::{resolve_path, resolve_path_list, to_device},
};

/// Default `vibrate` amplitude in local units.
pub const DEFAULT_VIBRATE_DELTA: f64 = 10.0;
/// Default `wiggle` amplitude in degrees.
pub const DEFAULT_WIGGLE_DEGREES: f64 = 15.0;

/// Everything the compiler reads from an already built element.
pub(crate) struct CompileInput<'a> {
    pub(crate) info: &'a Descriptor,
    pub(crate) layers: &'a VisualLayerSet,
    pub(crate) scale: ScaleFactor,
    /// Element bounds in device pixels.
    pub(crate) bounds: Rect,
}

/// Output of compiling one element's `to` and `loop` fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompiledAnimations {
    /// Directives, at most one per (layer, property).
    pub directives: Vec<AnimationDirective>,
    /// Set by a `sprite` loop: frame stepping repeat count for the playback controller.
    pub sprite_repeat: Option<f64>,
}

impl CompiledAnimations {
    // A later directive on the same layer property replaces the earlier one.
    fn push(&mut self, directive: AnimationDirective) {
        self.directives
            .retain(|d| !(d.target == directive.target && d.property == directive.property));
        self.directives.push(directive);
    }
}

/// Compile the image-sequence, `to` and `loop` animations of one element.
///
/// `load_image` resolves a source string to a local URL and its metadata; it backs the
/// `to.img` frame list.
pub(crate) fn compile_animations(
    input: &CompileInput<'_>,
    delegate: &dyn ElementDelegate,
    load_image: &mut dyn FnMut(&str) -> Option<(ResourceUrl, ImageInfo)>,
) -> CompiledAnimations {
    let mut out = CompiledAnimations::default();

    if let Some(image) = input.layers.image()
        && image.frame_count > 1
    {
        // Frame 0 is the base contents; the sequence steps through the rest.
        let frames = (1..image.frame_count)
            .map(|index| {
                AnimValue::Image(ImageFrame {
                    url: image.url.clone(),
                    index,
                })
            })
            .collect();
        out.push(AnimationDirective::keyframes(
            LayerTarget::Image,
            AnimatedProperty::Contents,
            frames,
            CalculationMode::Discrete,
        ));
    }

    if let Some(to) = input.info.record("to") {
        compile_transitions(to, input, delegate, load_image, &mut out);
    }
    if let Some(spec) = input.info.record("loop") {
        compile_loop(spec, input, delegate, &mut out);
    }
    out
}

fn dropped(property: AnimatedProperty) {
    tracing::debug!(
        property = property.key_path(),
        "target layer missing; directive dropped"
    );
}

fn compile_transitions(
    to: &Map<String, Value>,
    input: &CompileInput<'_>,
    delegate: &dyn ElementDelegate,
    load_image: &mut dyn FnMut(&str) -> Option<(ResourceUrl, ImageInfo)>,
    out: &mut CompiledAnimations,
) {
    use AnimatedProperty as P;
    use LayerTarget as L;

    let style = &input.layers.style;
    let scale = input.scale;
    let color = |key: &str| parse_color(to.field(key));
    let root = |property, from, target| AnimationDirective::transition(L::Root, property, from, target);

    if let Some(xf) = parse_transform(to, scale, Some(input.info as &dyn Fields)) {
        out.push(root(
            P::Transform,
            AnimValue::Transform(style.transform),
            AnimValue::Transform(xf),
        ));
    }
    if let Some(opacity) = to.number("opacity") {
        out.push(root(
            P::Opacity,
            AnimValue::Scalar(style.opacity),
            AnimValue::Scalar(opacity),
        ));
    }
    if let Some(c) = color("bc") {
        let from = style.background.unwrap_or_else(Rgba8Premul::transparent);
        out.push(root(
            P::BackgroundColor,
            AnimValue::Color(from),
            AnimValue::Color(c),
        ));
    }
    if let Some(c) = color("borderColor") {
        out.push(root(
            P::BorderColor,
            AnimValue::Color(style.border_color),
            AnimValue::Color(c),
        ));
    }
    if let Some(w) = to.number("borderWidth") {
        out.push(root(
            P::BorderWidth,
            AnimValue::Scalar(style.border_width),
            AnimValue::Scalar(w * scale.x),
        ));
    }
    if let Some(r) = to.number("cornerRadius") {
        out.push(root(
            P::CornerRadius,
            AnimValue::Scalar(style.corner_radius),
            AnimValue::Scalar(r * scale.x),
        ));
    }

    if let Some(c) = color("textColor") {
        match &input.layers.text {
            Some(text) => out.push(AnimationDirective::transition(
                L::Text,
                P::TextColor,
                AnimValue::Color(text.color),
                AnimValue::Color(c),
            )),
            None => dropped(P::TextColor),
        }
    }

    if let Some(srcs) = to.list("img") {
        let frames: Vec<AnimValue> = srcs
            .iter()
            .filter_map(Value::as_str)
            .filter_map(|src| load_image(src))
            .map(|(url, _)| AnimValue::Image(ImageFrame { url, index: 0 }))
            .collect();
        if input.layers.image().is_none() {
            dropped(P::Contents);
        } else if !frames.is_empty() {
            out.push(AnimationDirective::keyframes(
                L::Image,
                P::Contents,
                frames,
                CalculationMode::Discrete,
            ));
        }
    }

    if let Some(path) = resolve_path(to.field("pos"), delegate) {
        let (target, origin) = match &input.layers.tiling {
            Some(_) => (L::TilingHost, input.bounds.center()),
            None => (L::Root, style.position),
        };
        let motion = Affine::translate(origin.to_vec2()) * to_device(&path, scale);
        out.push(AnimationDirective::motion(target, motion, true));
    }

    let shape_keys = [
        "path",
        "fillColor",
        "strokeColor",
        "lineWidth",
        "strokeStart",
        "strokeEnd",
    ];
    let Some(shape) = input.layers.shape() else {
        if shape_keys.iter().any(|k| to.contains_key(*k)) {
            dropped(P::Path);
        }
        return;
    };
    let on_shape = |property, from, target| {
        AnimationDirective::transition(L::Shape, property, from, target)
    };

    if let Some(list) = to.list("path") {
        let mut values = vec![AnimValue::Path(shape.path.clone())];
        values.extend(
            list.iter()
                .filter_map(|v| resolve_path(Some(v), delegate))
                .map(|p| AnimValue::Path(to_device(&p, scale))),
        );
        out.push(AnimationDirective::keyframes(
            L::Shape,
            P::Path,
            values,
            CalculationMode::Linear,
        ));
    } else if let Some(path) = resolve_path(to.field("path"), delegate) {
        out.push(on_shape(
            P::Path,
            AnimValue::Path(shape.path.clone()),
            AnimValue::Path(to_device(&path, scale)),
        ));
    }
    if let Some(c) = color("fillColor") {
        let from = shape.fill.unwrap_or_else(Rgba8Premul::transparent);
        out.push(on_shape(P::FillColor, AnimValue::Color(from), AnimValue::Color(c)));
    }
    if let Some(c) = color("strokeColor") {
        out.push(on_shape(
            P::StrokeColor,
            AnimValue::Color(shape.stroke),
            AnimValue::Color(c),
        ));
    }
    if let Some(w) = to.number("lineWidth") {
        out.push(on_shape(
            P::LineWidth,
            AnimValue::Scalar(shape.line_width),
            AnimValue::Scalar(w * scale.x),
        ));
    }
    if let Some(v) = to.number("strokeStart") {
        out.push(on_shape(
            P::StrokeStart,
            AnimValue::Scalar(shape.stroke_start),
            AnimValue::Scalar(v),
        ));
    }
    if let Some(v) = to.number("strokeEnd") {
        out.push(on_shape(
            P::StrokeEnd,
            AnimValue::Scalar(shape.stroke_end),
            AnimValue::Scalar(v),
        ));
    }
}

/// Repeat count of a `loop` record; non-positive or non-finite counts fall back to 1.
pub fn loop_repeat_count(spec: &impl Fields) -> f64 {
    spec.number("repeat")
        .filter(|r| r.is_finite() && *r > 0.0)
        .unwrap_or(1.0)
}

fn compile_loop(
    spec: &Map<String, Value>,
    input: &CompileInput<'_>,
    delegate: &dyn ElementDelegate,
    out: &mut CompiledAnimations,
) {
    use AnimatedProperty as P;
    use LayerTarget as L;

    let Some(style_name) = spec.string("style") else {
        return;
    };
    let repeat = loop_repeat_count(spec);
    let base = input.layers.style.transform;
    let xf = AnimValue::Transform;

    match style_name {
        "vibrate" => {
            let delta = spec.number_or("delta", DEFAULT_VIBRATE_DELTA) * input.scale.x;
            let values = vec![
                xf(base),
                xf(base.translated(Vec2::new(delta, 0.0))),
                xf(base),
                xf(base.translated(Vec2::new(-delta, 0.0))),
                xf(base),
            ];
            out.push(AnimationDirective::looping(L::Root, P::Transform, values, repeat));
        }
        "wiggle" => {
            let delta = spec
                .number_or("delta", DEFAULT_WIGGLE_DEGREES)
                .to_radians();
            let values = vec![
                xf(base),
                xf(base.rotated(delta)),
                xf(base),
                xf(base.rotated(-delta)),
                xf(base),
            ];
            out.push(AnimationDirective::looping(L::Root, P::Transform, values, repeat));
        }
        "shift" => {
            let (w, h) = (input.bounds.width(), input.bounds.height());
            let shift = match spec.string("direction") {
                Some("n") => Vec2::new(0.0, -h),
                Some("e") => Vec2::new(w, 0.0),
                Some("w") => Vec2::new(-w, 0.0),
                _ => Vec2::new(0.0, h),
            };
            let (target, from) = match &input.layers.tiling {
                Some(host) => (L::TilingHost, host.transform),
                None => (L::Root, base),
            };
            let values = vec![xf(from), xf(from.translated(shift))];
            out.push(AnimationDirective::looping(target, P::Transform, values, repeat));
        }
        "blink" => {
            let values = [1.0, 0.0, 1.0].map(AnimValue::Scalar).to_vec();
            out.push(AnimationDirective::looping(L::Root, P::Opacity, values, repeat));
        }
        "path" => {
            let Some(shape) = input.layers.shape() else {
                dropped(P::Path);
                return;
            };
            let original = AnimValue::Path(shape.path.clone());
            let mut values = vec![original.clone()];
            values.extend(
                resolve_path_list(spec.field("path"), delegate)
                    .iter()
                    .map(|p| AnimValue::Path(to_device(p, input.scale))),
            );
            if values.len() >= 2 {
                values.push(original);
                out.push(AnimationDirective::looping(L::Shape, P::Path, values, repeat));
            }
        }
        "sprite" => out.sprite_repeat = Some(repeat),
        other => tracing::debug!(style = other, "unknown loop style ignored"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/compiler.rs"]
mod tests;
