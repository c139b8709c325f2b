use kurbo::Shape as _;

use crate::{
    descriptor::value::Fields,
    foundation::core::{BezPath, Point, Rect, ScaleFactor, Size},
    layout::units::{Axis, Extent, resolve_extent, resolve_offset},
};

/// Element geometry, computed once at load time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedBox {
    /// Box in the element's local (pre-scale) units, relative to the parent content box.
    pub local: Rect,
    /// Box in device pixels, relative to the parent's frame.
    pub frame: Rect,
    /// Whether `w` or `h` requested `"fill"` sizing.
    pub fill: bool,
}

impl ResolvedBox {
    /// Local-unit size handed to children as their container dimension.
    pub fn content_size(&self) -> Size {
        self.local.size()
    }

    /// Device-pixel bounds at the origin (the coordinate space of sublayers).
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.frame.size())
    }
}

/// Pick the intrinsic content size: image pixels, then mask pixels, then path extent.
///
/// A path contributes its bounding box's far corner so that offset paths keep their margin.
pub fn intrinsic_size(
    image: Option<Size>,
    mask: Option<Size>,
    path: Option<&BezPath>,
) -> Option<Size> {
    fn usable(s: Size) -> Option<Size> {
        (s.width.is_finite() && s.height.is_finite() && s.width > 0.0 && s.height > 0.0)
            .then_some(s)
    }

    image
        .and_then(usable)
        .or_else(|| mask.and_then(usable))
        .or_else(|| {
            path.map(|p| {
                let bbox = p.bounding_box();
                Size::new(bbox.x1, bbox.y1)
            })
            .and_then(usable)
        })
}

/// Compute an element's box from its descriptor, container, and intrinsic content size.
pub fn resolve_box(
    desc: &impl Fields,
    container: Size,
    intrinsic: Option<Size>,
    scale: ScaleFactor,
) -> ResolvedBox {
    let w_extent = resolve_extent(desc.field("w"), container.width);
    let h_extent = resolve_extent(desc.field("h"), container.height);
    let fill = w_extent == Extent::Fill || h_extent == Extent::Fill;

    let (mut w, mut h) = (container.width, container.height);
    if !fill {
        if let Extent::Fixed(v) = w_extent {
            w = v;
        }
        if let Extent::Fixed(v) = h_extent {
            h = v;
        }
    }

    if let Some(natural) = intrinsic {
        let aspect_h = natural.height / natural.width;
        let aspect_w = natural.width / natural.height;
        if fill {
            // Cover: whichever driving axis yields the larger box.
            if w * aspect_h > h {
                h = w * aspect_h;
            } else {
                w = h * aspect_w;
            }
        } else {
            match (w_extent, h_extent) {
                (Extent::Natural, Extent::Natural) => {
                    w = natural.width;
                    h = natural.height;
                }
                (Extent::Natural, _) => w = h * aspect_w,
                (_, Extent::Natural) => h = w * aspect_h,
                _ => {}
            }
        }
    }

    let w = w.max(0.0);
    let h = h.max(0.0);
    let x = resolve_offset(desc.field("x"), Axis::Horizontal, container.width, w);
    let y = resolve_offset(desc.field("y"), Axis::Vertical, container.height, h);

    let local = Rect::from_origin_size(Point::new(x, y), Size::new(w, h));
    let frame = Rect::from_origin_size(
        scale.apply_point(Point::new(x, y)),
        scale.apply_size(Size::new(w, h)),
    );
    ResolvedBox { local, frame, fill }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
