use super::*;

#[test]
fn lerp_hits_endpoints_and_midpoint() {
    let a = Style {
        y: 50.0,
        opacity: 0.0,
        ..Style::IDENTITY
    };
    let b = Style::IDENTITY;
    assert_eq!(Style::lerp(&a, &b, 0.0), a);
    assert_eq!(Style::lerp(&a, &b, 1.0), b);

    let mid = Style::lerp(&a, &b, 0.5);
    assert_eq!(mid.y, 25.0);
    assert_eq!(mid.opacity, 0.5);
    assert_eq!(mid.scale_x, 1.0);
}

#[test]
fn partial_json_fills_identity() {
    let s: Style = serde_json::from_str(r#"{ "x": -50, "opacity": 0 }"#).unwrap();
    assert_eq!(s.x, -50.0);
    assert_eq!(s.y, 0.0);
    assert_eq!(s.opacity, 0.0);
    assert_eq!(s.scale_y, 1.0);
}

#[test]
fn axis_scale_overrides_shorthand() {
    let s: Style = serde_json::from_str(r#"{ "scale": 0.5, "scale_y": 0 }"#).unwrap();
    assert_eq!(s.scale_x, 0.5);
    assert_eq!(s.scale_y, 0.0);
}

#[test]
fn unknown_properties_are_rejected() {
    assert!(serde_json::from_str::<Style>(r#"{ "rotate": 10 }"#).is_err());
}

#[test]
fn serialized_form_reads_back() {
    let s = Style {
        x: 3.0,
        scale_y: 0.25,
        ..Style::IDENTITY
    };
    let json = serde_json::to_string(&s).unwrap();
    assert_eq!(serde_json::from_str::<Style>(&json).unwrap(), s);
}

#[test]
fn offset_adds_to_translation() {
    let s = Style::IDENTITY.offset_by(Vec2::new(0.0, -5.0));
    assert_eq!(s.translate(), Vec2::new(0.0, -5.0));
    assert_eq!(s.opacity, 1.0);
}
