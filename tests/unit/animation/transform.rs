use super::*;
use crate::descriptor::value::Descriptor;
use serde_json::json;

fn desc(v: serde_json::Value) -> Descriptor {
    Descriptor::from_value(v).unwrap()
}

#[test]
fn no_transform_fields_means_no_transform() {
    assert!(parse_transform(&desc(json!({"opacity": 0.5})), ScaleFactor::IDENTITY, None).is_none());
}

#[test]
fn translate_is_scaled_rotate_is_degrees() {
    let xf = parse_transform(
        &desc(json!({"translate": [10, 20], "rotate": 90, "scale": 2})),
        ScaleFactor::new(2.0, 0.5),
        None,
    )
    .unwrap();
    assert_eq!(xf.translate, Vec2::new(20.0, 10.0));
    assert!((xf.rotation_rad - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    assert_eq!(xf.scale, Vec2::new(2.0, 2.0));
}

#[test]
fn rotate_list_uses_z_and_scale_pair_is_per_axis() {
    let xf = parse_transform(
        &desc(json!({"rotate": [0, 0, 180], "scale": [1, 3]})),
        ScaleFactor::IDENTITY,
        None,
    )
    .unwrap();
    assert!((xf.rotation_rad - std::f64::consts::PI).abs() < 1e-12);
    assert_eq!(xf.scale, Vec2::new(1.0, 3.0));
}

#[test]
fn target_inherits_unspecified_components_from_base() {
    let base = desc(json!({"translate": [5, 5], "rotate": 45}));
    let to = desc(json!({"rotate": 90}));
    let xf = parse_transform(&to, ScaleFactor::IDENTITY, Some(&base)).unwrap();
    assert_eq!(xf.translate, Vec2::new(5.0, 5.0));
    assert!((xf.rotation_rad - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn malformed_components_keep_identity_defaults() {
    let xf = parse_transform(
        &desc(json!({"translate": "left", "scale": [1]})),
        ScaleFactor::IDENTITY,
        None,
    )
    .unwrap();
    assert!(xf.is_identity());
}
