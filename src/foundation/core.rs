pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Independent width/height multiplier applied to all geometry of one element subtree.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleFactor {
    /// Horizontal multiplier.
    pub x: f64,
    /// Vertical multiplier.
    pub y: f64,
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ScaleFactor {
    /// Unit scale (local units equal device pixels).
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    /// Create a scale factor from per-axis multipliers.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same multiplier on both axes.
    pub fn uniform(s: f64) -> Self {
        Self { x: s, y: s }
    }

    /// Scale a local-unit size into device pixels.
    pub fn apply_size(self, size: Size) -> Size {
        Size::new(size.width * self.x, size.height * self.y)
    }

    /// Scale a local-unit point into device pixels.
    pub fn apply_point(self, p: Point) -> Point {
        Point::new(p.x * self.x, p.y * self.y)
    }

    /// Affine equivalent, used to bring local-unit paths into device space.
    pub fn to_affine(self) -> Affine {
        Affine::scale_non_uniform(self.x, self.y)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Opaque black, the default for borders, strokes, shadows and text.
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }
}

/// Decomposed 2D layer transform, applied around the layer's anchor point by the backend.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    /// Translation in device pixels.
    pub translate: Vec2,
    /// Rotation in radians (clockwise in y-down space).
    pub rotation_rad: f64,
    /// Per-axis scale, default (1,1).
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_rad: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    /// Return `true` for the identity transform.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Same transform with an extra translation applied before it.
    pub fn translated(self, delta: Vec2) -> Self {
        Self {
            translate: self.translate + delta,
            ..self
        }
    }

    /// Same transform with an extra rotation applied before it.
    pub fn rotated(self, delta_rad: f64) -> Self {
        Self {
            rotation_rad: self.rotation_rad + delta_rad,
            ..self
        }
    }

    /// Matrix form relative to the anchor point.
    pub fn to_affine(self) -> Affine {
        let t_translate = Affine::translate(self.translate);
        let t_rotate = Affine::rotate(self.rotation_rad);
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);

        // T(translate) * R(rot) * S(scale)
        t_translate * t_rotate * t_scale
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
