use serde_json::Value;

use crate::{
    foundation::{
        core::{BezPath, ScaleFactor},
        error::{SceneError, SceneResult},
    },
    scene::delegate::ElementDelegate,
};

/// Resolve a shape value into a path in local (pre-scale) units.
///
/// Accepts SVG path data inline or a `{"ref": name}` redirection through the delegate's
/// named-path table. Unresolvable or malformed shapes yield `None`.
pub fn resolve_path(shape: Option<&Value>, delegate: &dyn ElementDelegate) -> Option<BezPath> {
    match try_resolve_path(shape?, delegate) {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::debug!(error = %e, "shape omitted");
            None
        }
    }
}

/// Like [`resolve_path`], reporting why a shape could not be built.
pub fn try_resolve_path(shape: &Value, delegate: &dyn ElementDelegate) -> SceneResult<BezPath> {
    if let Some(name) = shape
        .as_object()
        .and_then(|r| r.get("ref"))
        .and_then(Value::as_str)
    {
        let named = delegate
            .named_path(name)
            .ok_or_else(|| SceneError::unresolved(format!("path `{name}`")))?;
        return parse_inline(&named);
    }
    parse_inline(shape)
}

/// Resolve either a single shape or a list of shapes (used by path morph keyframes).
///
/// Entries that fail to resolve are skipped.
pub fn resolve_path_list(value: Option<&Value>, delegate: &dyn ElementDelegate) -> Vec<BezPath> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| resolve_path(Some(item), delegate))
            .collect(),
        other => resolve_path(other, delegate).into_iter().collect(),
    }
}

/// Bring a local-unit path into device pixels.
pub fn to_device(path: &BezPath, scale: ScaleFactor) -> BezPath {
    scale.to_affine() * path.clone()
}

fn parse_inline(value: &Value) -> SceneResult<BezPath> {
    let d = value
        .as_str()
        .ok_or_else(|| SceneError::malformed("path data must be a string"))?
        .trim();
    if d.is_empty() {
        return Err(SceneError::malformed("empty path data"));
    }
    BezPath::from_svg(d).map_err(|e| SceneError::malformed(format!("path data: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/shape/path.rs"]
mod tests;
