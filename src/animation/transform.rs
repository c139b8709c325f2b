use serde_json::Value;

use crate::{
    descriptor::value::Fields,
    foundation::core::{ScaleFactor, Transform2D, Vec2},
};

const KEYS: [&str; 3] = ["translate", "rotate", "scale"];

/// Parse `translate`/`rotate`/`scale` fields into a layer transform.
///
/// Returns `None` when `fields` names none of the three. Components missing from `fields` are
/// taken from `base` (the element's own fields when compiling a `to` target).
pub fn parse_transform(
    fields: &impl Fields,
    scale: ScaleFactor,
    base: Option<&dyn Fields>,
) -> Option<Transform2D> {
    if !KEYS.iter().any(|k| fields.field(k).is_some()) {
        return None;
    }
    let get = |key: &str| fields.field(key).or_else(|| base.and_then(|b| b.field(key)));

    let mut xf = Transform2D::default();
    if let Some(v) = get("translate").and_then(pair) {
        xf.translate = Vec2::new(v.0 * scale.x, v.1 * scale.y);
    }
    if let Some(deg) = get("rotate").and_then(rotation_degrees) {
        xf.rotation_rad = deg.to_radians();
    }
    match get("scale") {
        Some(Value::Number(n)) => {
            if let Some(s) = n.as_f64() {
                xf.scale = Vec2::new(s, s);
            }
        }
        Some(v) => {
            if let Some((sx, sy)) = pair(v) {
                xf.scale = Vec2::new(sx, sy);
            }
        }
        None => {}
    }
    Some(xf)
}

fn pair(value: &Value) -> Option<(f64, f64)> {
    match value.as_array()?.as_slice() {
        [x, y, ..] => Some((x.as_f64()?, y.as_f64()?)),
        _ => None,
    }
}

// A rotation list is `[x, y, z]` in degrees; only z applies in 2D.
fn rotation_degrees(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Array(items) => items.get(2).and_then(Value::as_f64),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/transform.rs"]
mod tests;
