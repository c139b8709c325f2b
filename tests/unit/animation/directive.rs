use super::*;

fn scalar(v: f64) -> AnimValue {
    AnimValue::Scalar(v)
}

fn as_scalar(v: Option<AnimValue>) -> f64 {
    match v {
        Some(AnimValue::Scalar(x)) => x,
        other => panic!("expected scalar, got {other:?}"),
    }
}

#[test]
fn transition_spans_the_unit_timeline() {
    let d = AnimationDirective::transition(
        LayerTarget::Root,
        AnimatedProperty::Opacity,
        scalar(1.0),
        scalar(0.0),
    );
    assert_eq!(d.begin, 0.0);
    assert_eq!(d.cycle_duration(), UNIT_DURATION);
    assert_eq!(d.fill, FillMode::Both);
    assert_eq!(as_scalar(d.sample(0.0)), 1.0);
    assert_eq!(as_scalar(d.sample(0.25)), 0.75);
    assert_eq!(as_scalar(d.sample(1.0)), 0.0);
}

#[test]
fn fill_both_holds_outside_the_interval() {
    let d = AnimationDirective::transition(
        LayerTarget::Root,
        AnimatedProperty::BorderWidth,
        scalar(2.0),
        scalar(4.0),
    );
    assert_eq!(as_scalar(d.sample(-1.0)), 2.0);
    assert_eq!(as_scalar(d.sample(3.0)), 4.0);
    assert_eq!(as_scalar(d.sample(f64::NAN)), 2.0);
}

#[test]
fn looping_cycle_is_a_fraction_of_the_unit() {
    let blink = AnimationDirective::looping(
        LayerTarget::Root,
        AnimatedProperty::Opacity,
        vec![scalar(1.0), scalar(0.0), scalar(1.0)],
        2.0,
    );
    assert_eq!(blink.cycle_duration(), 0.5);
    assert_eq!(blink.repeat_count, 2.0);
    // Trough of the first and second cycles.
    assert_eq!(as_scalar(blink.sample(0.25)), 0.0);
    assert_eq!(as_scalar(blink.sample(0.75)), 0.0);
    assert_eq!(as_scalar(blink.sample(0.5)), 1.0);
    assert_eq!(as_scalar(blink.sample(1.0)), 1.0);
}

#[test]
fn discrete_holds_each_value_for_an_equal_share() {
    let d = AnimationDirective::keyframes(
        LayerTarget::Image,
        AnimatedProperty::Contents,
        vec![scalar(0.0), scalar(1.0), scalar(2.0), scalar(3.0)],
        CalculationMode::Discrete,
    );
    assert_eq!(as_scalar(d.sample(0.1)), 0.0);
    assert_eq!(as_scalar(d.sample(0.3)), 1.0);
    assert_eq!(as_scalar(d.sample(0.6)), 2.0);
    assert_eq!(as_scalar(d.sample(0.99)), 3.0);
}

#[test]
fn colors_and_transforms_interpolate() {
    let d = AnimationDirective::transition(
        LayerTarget::Root,
        AnimatedProperty::BackgroundColor,
        AnimValue::Color(Rgba8Premul::transparent()),
        AnimValue::Color(Rgba8Premul::BLACK),
    );
    let Some(AnimValue::Color(c)) = d.sample(0.5) else {
        panic!("expected color");
    };
    assert_eq!(c.a, 128);

    let to = Transform2D::default().translated(Vec2::new(10.0, 0.0));
    let d = AnimationDirective::transition(
        LayerTarget::Root,
        AnimatedProperty::Transform,
        AnimValue::Transform(Transform2D::default()),
        AnimValue::Transform(to),
    );
    let Some(AnimValue::Transform(mid)) = d.sample(0.5) else {
        panic!("expected transform");
    };
    assert_eq!(mid.translate, Vec2::new(5.0, 0.0));
}

#[test]
fn matching_paths_morph_pointwise() {
    let a = BezPath::from_svg("M0,0 L10,0").unwrap();
    let b = BezPath::from_svg("M0,10 L20,10").unwrap();
    let mid = <BezPath as Lerp>::lerp(&a, &b, 0.5);
    assert_eq!(mid, BezPath::from_svg("M0,5 L15,5").unwrap());

    let other = BezPath::from_svg("M0,0 Q5,5 10,0").unwrap();
    assert_eq!(<BezPath as Lerp>::lerp(&a, &other, 0.25), a);
    assert_eq!(<BezPath as Lerp>::lerp(&a, &other, 0.75), other);
}

#[test]
fn motion_path_is_paced_by_arc_length() {
    // First leg is 10 long, second leg 30 long.
    let path = BezPath::from_svg("M0,0 L10,0 L10,30").unwrap();
    let d = AnimationDirective::motion(LayerTarget::Root, path, true);
    assert_eq!(d.calculation, CalculationMode::Paced);

    let Some(AnimValue::Motion {
        position,
        rotation_rad,
    }) = d.sample(0.5)
    else {
        panic!("expected motion sample");
    };
    assert!((position.x - 10.0).abs() < 1e-4);
    assert!((position.y - 10.0).abs() < 1e-4);
    assert!((rotation_rad - std::f64::consts::FRAC_PI_2).abs() < 1e-4);

    let Some(AnimValue::Motion { position, .. }) = d.sample(1.0) else {
        panic!("expected motion sample");
    };
    assert!((position.y - 30.0).abs() < 1e-4);
}

#[test]
fn empty_keyframes_have_no_value() {
    let d = AnimationDirective::keyframes(
        LayerTarget::Root,
        AnimatedProperty::Opacity,
        Vec::new(),
        CalculationMode::Linear,
    );
    assert!(d.sample(0.5).is_none());
}

#[test]
fn key_paths_follow_platform_names() {
    assert_eq!(AnimatedProperty::TextColor.key_path(), "foregroundColor");
    assert_eq!(AnimatedProperty::BackgroundColor.key_path(), "backgroundColor");
}
