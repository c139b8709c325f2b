use kurbo::{ParamCurve as _, ParamCurveArclen as _, PathEl};

use crate::{
    descriptor::url::ResourceUrl,
    foundation::core::{BezPath, Point, Rgba8Premul, Transform2D, Vec2},
};

/// Real-world length of the normalized timeline every directive is anchored to.
pub const UNIT_DURATION: f64 = 1.0;

const ARCLEN_ACCURACY: f64 = 1e-6;

/// Layer a directive animates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerTarget {
    /// The element's root layer.
    Root,
    /// The tiling host wrapping the primary content.
    TilingHost,
    /// The image primary.
    Image,
    /// The shape primary.
    Shape,
    /// The text overlay.
    Text,
}

/// Animatable layer property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimatedProperty {
    /// Layer transform.
    Transform,
    /// Layer opacity.
    Opacity,
    /// Root background color.
    BackgroundColor,
    /// Root border color.
    BorderColor,
    /// Root border width.
    BorderWidth,
    /// Root corner radius.
    CornerRadius,
    /// Image contents (frame sequence).
    Contents,
    /// Layer position along a motion path.
    Position,
    /// Shape outline.
    Path,
    /// Shape fill color.
    FillColor,
    /// Shape stroke color.
    StrokeColor,
    /// Shape stroke width.
    LineWidth,
    /// Shape stroke start fraction.
    StrokeStart,
    /// Shape stroke end fraction.
    StrokeEnd,
    /// Text color.
    TextColor,
}

impl AnimatedProperty {
    /// Conventional key path name for platform animation backends.
    pub fn key_path(self) -> &'static str {
        match self {
            Self::Transform => "transform",
            Self::Opacity => "opacity",
            Self::BackgroundColor => "backgroundColor",
            Self::BorderColor => "borderColor",
            Self::BorderWidth => "borderWidth",
            Self::CornerRadius => "cornerRadius",
            Self::Contents => "contents",
            Self::Position => "position",
            Self::Path => "path",
            Self::FillColor => "fillColor",
            Self::StrokeColor => "strokeColor",
            Self::LineWidth => "lineWidth",
            Self::StrokeStart => "strokeStart",
            Self::StrokeEnd => "strokeEnd",
            Self::TextColor => "foregroundColor",
        }
    }
}

/// One frame of an image sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ImageFrame {
    /// Local URL of the source image.
    pub url: ResourceUrl,
    /// Frame index within the source.
    pub index: u32,
}

/// A keyframe value.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AnimValue {
    /// Plain number (opacity, widths, fractions).
    Scalar(f64),
    /// Color.
    Color(Rgba8Premul),
    /// Layer transform.
    Transform(Transform2D),
    /// Shape outline in device pixels.
    Path(BezPath),
    /// Image frame.
    Image(ImageFrame),
    /// Point on a motion path plus the tangent angle (zero unless auto-rotating).
    Motion {
        /// Position in the parent's device space.
        position: Point,
        /// Rotation following the path tangent.
        rotation_rad: f64,
    },
}

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Value at `t` between `a` (0) and `b` (1).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

impl Lerp for Transform2D {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            rotation_rad: a.rotation_rad + (b.rotation_rad - a.rotation_rad) * t,
            scale: <Vec2 as Lerp>::lerp(&a.scale, &b.scale, t),
        }
    }
}

impl Lerp for Rgba8Premul {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

impl Lerp for BezPath {
    /// Point-wise when both outlines share the same element structure, otherwise a hard
    /// switch at the midpoint.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let (ea, eb) = (a.elements(), b.elements());
        let same_shape = ea.len() == eb.len()
            && ea
                .iter()
                .zip(eb)
                .all(|(x, y)| std::mem::discriminant(x) == std::mem::discriminant(y));
        if !same_shape {
            return if t < 0.5 { a.clone() } else { b.clone() };
        }

        let p = |x: Point, y: Point| x.lerp(y, t);
        ea.iter()
            .zip(eb)
            .map(|(x, y)| match (*x, *y) {
                (PathEl::MoveTo(a0), PathEl::MoveTo(b0)) => PathEl::MoveTo(p(a0, b0)),
                (PathEl::LineTo(a0), PathEl::LineTo(b0)) => PathEl::LineTo(p(a0, b0)),
                (PathEl::QuadTo(a0, a1), PathEl::QuadTo(b0, b1)) => {
                    PathEl::QuadTo(p(a0, b0), p(a1, b1))
                }
                (PathEl::CurveTo(a0, a1, a2), PathEl::CurveTo(b0, b1, b2)) => {
                    PathEl::CurveTo(p(a0, b0), p(a1, b1), p(a2, b2))
                }
                (el, _) => el,
            })
            .collect()
    }
}

impl Lerp for AnimValue {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Scalar(x), Self::Scalar(y)) => Self::Scalar(<f64 as Lerp>::lerp(x, y, t)),
            (Self::Color(x), Self::Color(y)) => {
                Self::Color(<Rgba8Premul as Lerp>::lerp(x, y, t))
            }
            (Self::Transform(x), Self::Transform(y)) => {
                Self::Transform(<Transform2D as Lerp>::lerp(x, y, t))
            }
            (Self::Path(x), Self::Path(y)) => Self::Path(<BezPath as Lerp>::lerp(x, y, t)),
            _ if t < 1.0 => a.clone(),
            _ => b.clone(),
        }
    }
}

/// How a directive's values are laid out over one cycle.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Keyframes {
    /// Evenly spaced values.
    Values(Vec<AnimValue>),
    /// Movement along a device-space path.
    MotionPath {
        /// Path in the parent's device space.
        path: BezPath,
        /// Rotate the layer to follow the path tangent.
        rotate_auto: bool,
    },
}

/// Interpolation between keyframes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// Linear between adjacent values.
    #[default]
    Linear,
    /// Each value held for an equal share of the cycle.
    Discrete,
    /// Constant speed along the motion path.
    Paced,
}

/// Whether values hold outside the active interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Hold the first value before `begin` and the last after the end.
    #[default]
    Both,
}

/// A compiled, backend-neutral animation anchored to the normalized timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimationDirective {
    /// Animated layer.
    pub target: LayerTarget,
    /// Animated property.
    pub property: AnimatedProperty,
    /// Values over one cycle.
    pub keyframes: Keyframes,
    /// Start on the normalized timeline.
    pub begin: f64,
    /// Length of one cycle.
    pub duration: f64,
    /// Number of cycles.
    pub repeat_count: f64,
    /// Hold policy outside the active interval.
    pub fill: FillMode,
    /// Interpolation mode.
    pub calculation: CalculationMode,
}

impl AnimationDirective {
    /// Two-point transition from `from` to `to` across the whole timeline.
    pub fn transition(
        target: LayerTarget,
        property: AnimatedProperty,
        from: AnimValue,
        to: AnimValue,
    ) -> Self {
        Self::keyframes(target, property, vec![from, to], CalculationMode::Linear)
    }

    /// Keyframe sequence across the whole timeline.
    pub fn keyframes(
        target: LayerTarget,
        property: AnimatedProperty,
        values: Vec<AnimValue>,
        calculation: CalculationMode,
    ) -> Self {
        Self {
            target,
            property,
            keyframes: Keyframes::Values(values),
            begin: 0.0,
            duration: UNIT_DURATION,
            repeat_count: 1.0,
            fill: FillMode::Both,
            calculation,
        }
    }

    /// Closed cycle of values repeated `repeat_count` times within the unit timeline.
    pub fn looping(
        target: LayerTarget,
        property: AnimatedProperty,
        values: Vec<AnimValue>,
        repeat_count: f64,
    ) -> Self {
        Self {
            duration: UNIT_DURATION / repeat_count,
            repeat_count,
            ..Self::keyframes(target, property, values, CalculationMode::Linear)
        }
    }

    /// Paced movement along a device-space path.
    pub fn motion(target: LayerTarget, path: BezPath, rotate_auto: bool) -> Self {
        Self {
            target,
            property: AnimatedProperty::Position,
            keyframes: Keyframes::MotionPath { path, rotate_auto },
            begin: 0.0,
            duration: UNIT_DURATION,
            repeat_count: 1.0,
            fill: FillMode::Both,
            calculation: CalculationMode::Paced,
        }
    }

    /// Length of one cycle.
    pub fn cycle_duration(&self) -> f64 {
        self.duration
    }

    /// Value at timeline position `t` (same units as `begin`/`duration`).
    ///
    /// Returns `None` only for an empty keyframe list or an empty motion path.
    pub fn sample(&self, t: f64) -> Option<AnimValue> {
        let total = self.duration * self.repeat_count;
        let phase = if !t.is_finite() || t <= self.begin || self.duration <= 0.0 {
            0.0
        } else if t - self.begin >= total {
            1.0
        } else {
            let local = (t - self.begin) % self.duration;
            local / self.duration
        };

        match &self.keyframes {
            Keyframes::Values(values) => sample_values(values, phase, self.calculation),
            Keyframes::MotionPath { path, rotate_auto } => {
                let (position, tangent) = sample_along(path, phase)?;
                let rotation_rad = if *rotate_auto { tangent.atan2() } else { 0.0 };
                Some(AnimValue::Motion {
                    position,
                    rotation_rad,
                })
            }
        }
    }
}

fn sample_values(values: &[AnimValue], phase: f64, mode: CalculationMode) -> Option<AnimValue> {
    let last = values.len().checked_sub(1)?;
    if last == 0 || phase >= 1.0 {
        return values.last().cloned();
    }
    match mode {
        CalculationMode::Discrete => {
            let idx = ((phase * values.len() as f64).floor() as usize).min(last);
            Some(values[idx].clone())
        }
        CalculationMode::Linear | CalculationMode::Paced => {
            let pos = phase * last as f64;
            let idx = (pos.floor() as usize).min(last - 1);
            let local = pos - idx as f64;
            Some(<AnimValue as Lerp>::lerp(&values[idx], &values[idx + 1], local))
        }
    }
}

/// Point and tangent at `phase` of the path's total arc length.
fn sample_along(path: &BezPath, phase: f64) -> Option<(Point, Vec2)> {
    let segs: Vec<_> = path.segments().collect();
    let first = segs.first()?;
    let lens: Vec<f64> = segs.iter().map(|s| s.arclen(ARCLEN_ACCURACY)).collect();
    let total: f64 = lens.iter().sum();
    if total <= 0.0 {
        return Some((first.eval(0.0), Vec2::new(1.0, 0.0)));
    }

    let last = segs.len() - 1;
    let mut remaining = phase.clamp(0.0, 1.0) * total;
    for (i, (seg, len)) in segs.iter().zip(&lens).enumerate() {
        if remaining <= *len || i == last {
            let u = if *len > 0.0 {
                seg.inv_arclen(remaining.min(*len), ARCLEN_ACCURACY)
            } else {
                0.0
            };
            let (u0, u1) = ((u - 1e-4).max(0.0), (u + 1e-4).min(1.0));
            let tangent = seg.eval(u1) - seg.eval(u0);
            return Some((seg.eval(u), tangent));
        }
        remaining -= len;
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/animation/directive.rs"]
mod tests;
