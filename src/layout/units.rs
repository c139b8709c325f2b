use serde_json::Value;

/// Parse `"NN%"` against `full`; anything else yields `default`.
pub fn parse_percent(value: &str, full: f64, default: f64) -> f64 {
    let Some(digits) = value.trim().strip_suffix('%') else {
        return default;
    };
    match digits.trim().parse::<f64>() {
        Ok(pct) if pct.is_finite() => full * pct / 100.0,
        _ => default,
    }
}

/// Number as-is, percentage string against `full`, otherwise `None`.
pub fn parse_percent_any(value: &Value, full: f64, default: f64) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(parse_percent(s, full, default)),
        _ => None,
    }
}

/// Sizing outcome of one `w`/`h` field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Extent {
    /// `"fill"`: cover the container, preserving intrinsic aspect.
    Fill,
    /// Explicit length in local units.
    Fixed(f64),
    /// Not given: derived from intrinsic content.
    Natural,
}

/// Resolve a `w`/`h` field against the container length on that axis.
pub fn resolve_extent(value: Option<&Value>, full: f64) -> Extent {
    match value {
        Some(Value::Number(n)) => n.as_f64().map_or(Extent::Natural, Extent::Fixed),
        Some(Value::String(s)) if s == "fill" => Extent::Fill,
        Some(Value::String(s)) => Extent::Fixed(parse_percent(s, full, full)),
        _ => Extent::Natural,
    }
}

/// Axis an offset is resolved on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// `x`: keywords `left`, `center`, `right`.
    Horizontal,
    /// `y`: keywords `top`, `center`, `bottom`.
    Vertical,
}

/// Resolve an `x`/`y` field for a box of length `extent` inside `container`.
///
/// Positional keywords position the box itself, so they need the final box length.
pub fn resolve_offset(value: Option<&Value>, axis: Axis, container: f64, extent: f64) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => match (axis, s.as_str()) {
            (Axis::Horizontal, "left") | (Axis::Vertical, "top") => 0.0,
            (Axis::Horizontal, "right") | (Axis::Vertical, "bottom") => container - extent,
            (_, "center") => (container - extent) / 2.0,
            _ => parse_percent(s, container, 0.0),
        },
        _ => 0.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/units.rs"]
mod tests;
