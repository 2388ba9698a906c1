use super::*;

#[test]
fn starts_paused_at_zero() {
    let p = Playhead::new(1.0).unwrap();
    assert_eq!(p.progress(Time(10.0)), 0.0);
    assert_eq!(p.direction(), None);
}

#[test]
fn delayed_forward_play_holds_then_advances() {
    let mut p = Playhead::new(1.0).unwrap();
    p.play(Time(2.0), 0.5);
    assert_eq!(p.progress(Time(2.25)), 0.0);
    assert_eq!(p.progress(Time(3.0)), 0.5);
    assert!(p.is_complete(Time(3.5)));
    assert_eq!(p.progress(Time(9.0)), 1.0);
}

#[test]
fn reverse_starts_from_current_progress() {
    let mut p = Playhead::new(2.0).unwrap();
    p.play(Time(0.0), 0.0);
    p.reverse(Time(1.0));
    assert_eq!(p.progress(Time(1.0)), 0.5);
    assert_eq!(p.progress(Time(1.5)), 0.25);
    assert!(!p.is_rewound(Time(1.5)));
    assert!(p.is_rewound(Time(2.0)));
    assert_eq!(p.progress(Time(5.0)), 0.0);
}

#[test]
fn zero_duration_snaps() {
    let mut p = Playhead::new(0.0).unwrap();
    p.play(Time(1.0), 0.0);
    assert_eq!(p.progress(Time(1.0)), 1.0);
    p.reverse(Time(2.0));
    assert_eq!(p.progress(Time(2.0)), 0.0);
}
