use super::*;
use crate::scene::delegate::StaticDelegate;
use kurbo::Shape as _;
use serde_json::json;

fn delegate() -> StaticDelegate {
    let mut d = StaticDelegate::new();
    d.paths
        .insert("box".to_owned(), json!("M0,0 L10,0 L10,20 L0,20 Z"));
    d
}

#[test]
fn inline_svg_parses_in_local_units() {
    let p = resolve_path(Some(&json!("M5,5 L25,45")), &delegate()).unwrap();
    let bbox = p.bounding_box();
    assert_eq!((bbox.x0, bbox.y0, bbox.x1, bbox.y1), (5.0, 5.0, 25.0, 45.0));
}

#[test]
fn ref_goes_through_named_path_table() {
    let p = resolve_path(Some(&json!({"ref": "box"})), &delegate()).unwrap();
    let bbox = p.bounding_box();
    assert_eq!((bbox.x1, bbox.y1), (10.0, 20.0));
}

#[test]
fn unresolved_or_malformed_shapes_are_absent() {
    let d = delegate();
    assert!(resolve_path(Some(&json!({"ref": "missing"})), &d).is_none());
    assert!(resolve_path(Some(&json!("not a path")), &d).is_none());
    assert!(resolve_path(Some(&json!("")), &d).is_none());
    assert!(resolve_path(Some(&json!(42)), &d).is_none());
    assert!(resolve_path(None, &d).is_none());
}

#[test]
fn list_skips_bad_entries() {
    let v = json!(["M0,0 L1,1", {"ref": "nope"}, {"ref": "box"}, 7]);
    assert_eq!(resolve_path_list(Some(&v), &delegate()).len(), 2);

    let single = json!("M0,0 L1,1");
    assert_eq!(resolve_path_list(Some(&single), &delegate()).len(), 1);
    assert!(resolve_path_list(None, &delegate()).is_empty());
}

#[test]
fn device_conversion_scales_per_axis() {
    let p = resolve_path(Some(&json!({"ref": "box"})), &delegate()).unwrap();
    let device = to_device(&p, ScaleFactor::new(2.0, 0.5));
    let bbox = device.bounding_box();
    assert_eq!((bbox.x1, bbox.y1), (20.0, 10.0));
}

#[test]
fn failures_carry_their_kind() {
    let d = delegate();
    assert!(matches!(
        try_resolve_path(&json!({"ref": "missing"}), &d),
        Err(SceneError::UnresolvedReference(name)) if name.contains("missing")
    ));
    assert!(matches!(
        try_resolve_path(&json!("not a path"), &d),
        Err(SceneError::MalformedValue(_))
    ));
    assert!(matches!(
        try_resolve_path(&json!(42), &d),
        Err(SceneError::MalformedValue(_))
    ));
    assert!(try_resolve_path(&json!("M0,0 L1,1"), &d).is_ok());
}
