use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.frames().count() as u64, r.len_frames());
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    assert!(FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap().is_empty());
}

#[test]
fn fps_maps_frames_to_session_time() {
    let fps = Fps::new(10, 1).unwrap();
    assert_eq!(fps.time_of(FrameIndex(0)), Time::ZERO);
    assert!((fps.time_of(FrameIndex(45)).secs() - 4.5).abs() < 1e-12);
    assert_eq!(fps.secs_to_frames_floor(4.5), 45);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn time_since_is_floored_at_zero() {
    let a = Time::from_secs(2.0);
    let b = a.after(1.5);
    assert_eq!(b.since(a), 1.5);
    assert_eq!(a.since(b), 0.0);
}

#[test]
fn element_ids_are_section_scoped() {
    let id = ElementId::scoped("about", "skill-card-0");
    assert_eq!(id.as_str(), "about/skill-card-0");
    assert_eq!(id.to_string(), "about/skill-card-0");
    assert_eq!(ElementId::from("about/skill-card-0"), id);
}
