use super::*;
use crate::carousel::slide::ColorTag;

fn slides(n: usize) -> Vec<Slide> {
    (0..n)
        .map(|i| Slide {
            title: format!("Certificate {i}"),
            issuer: "Issuer".to_string(),
            date: "2024".to_string(),
            description: String::new(),
            tags: vec!["Rust".to_string()],
            image_ref: format!("img/{i}.jpg"),
            color_tag: ColorTag::Blue,
            credential_id: None,
        })
        .collect()
}

fn mounted(n: usize) -> AutoplayCarousel {
    AutoplayCarousel::mount(slides(n), CarouselOpts::default(), Time::ZERO).unwrap()
}

#[test]
fn seven_tick_instants_wrap_exactly_once() {
    // Observed at mount and at each of the next six ticks: 0,1,2,3,4,5,0.
    let mut c = mounted(6);
    let mut seen = vec![c.current_index()];
    for k in 1..=6 {
        c.tick(Time(4.5 * k as f64));
        seen.push(c.current_index());
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 0]);
    assert_eq!(seen.iter().filter(|&&i| i == 0).count(), 2);
}

#[test]
fn catch_up_applies_every_missed_tick() {
    let mut c = mounted(6);
    assert_eq!(c.tick(Time(4.5 * 7.0)), 7);
    assert_eq!(c.stats().timer_advances, 7);
    assert_eq!(c.current_index(), 1);
}

#[test]
fn advance_and_retreat_wrap() {
    let mut c = mounted(3);
    c.retreat(Time::ZERO);
    assert_eq!(c.current_index(), 2);
    c.advance(Time::ZERO);
    assert_eq!(c.current_index(), 0);
}

#[test]
fn single_slide_advance_is_valid_noop() {
    let mut c = mounted(1);
    c.advance(Time(0.1));
    c.retreat(Time(0.2));
    assert_eq!(c.tick(Time(9.0)), 2);
    assert_eq!(c.current_index(), 0);
    assert_eq!(c.progress_fraction(), 1.0);
    assert!(!c.state(Time(9.0)).is_transitioning);
}

#[test]
fn jump_out_of_range_clamps() {
    let mut c = mounted(4);
    c.jump_to(99, Time::ZERO);
    assert_eq!(c.current_index(), 3);
}

#[test]
fn manual_jump_after_timer_tick_wins() {
    let mut c = mounted(6);
    c.tick(Time(4.5));
    c.jump_to(3, Time(4.5));
    assert_eq!(c.current_index(), 3);
    // Timer keeps its schedule: next tick still at 9.0.
    assert_eq!(c.next_tick(), Some(Time(9.0)));
    c.tick(Time(9.0));
    assert_eq!(c.current_index(), 4);
}

#[test]
fn empty_slide_list_is_disabled() {
    let mut c = AutoplayCarousel::mount(Vec::new(), CarouselOpts::default(), Time::ZERO).unwrap();
    assert!(c.is_disabled());
    assert!(c.next_tick().is_none());
    assert_eq!(c.tick(Time(100.0)), 0);
    c.advance(Time(1.0));
    c.jump_to(2, Time(1.0));
    assert_eq!(c.current_index(), 0);
    assert!(c.visible_slide().is_none());
    assert_eq!(c.progress_fraction(), 0.0);
    assert_eq!(c.position_label(), "0 of 0");
    let snap = c.snapshot(Time(1.0));
    assert_eq!(snap.current_index, None);
    assert!(snap.indicators.is_empty());
}

#[test]
fn invalid_opts_are_rejected() {
    let opts = CarouselOpts {
        interval_secs: 0.0,
        ..CarouselOpts::default()
    };
    assert!(AutoplayCarousel::mount(slides(2), opts, Time::ZERO).is_err());
    let opts = CarouselOpts {
        transition_secs: -0.1,
        ..CarouselOpts::default()
    };
    assert!(AutoplayCarousel::mount(slides(2), opts, Time::ZERO).is_err());
}

#[test]
fn unmount_stops_ticks() {
    let mut c = mounted(6);
    c.tick(Time(5.0));
    c.unmount();
    assert!(!c.is_mounted());
    assert_eq!(c.tick(Time(60.0)), 0);
    assert_eq!(c.stats().timer_advances, 1);
    assert_eq!(c.current_index(), 1);
}

#[test]
fn replacing_slides_after_unmount_stays_stopped() {
    let mut c = mounted(6);
    c.unmount();
    c.replace_slides(slides(6), Time(10.0)).unwrap();
    assert_eq!(c.tick(Time(100.0)), 0);
    assert!(!c.is_mounted());
    assert!(c.next_tick().is_none());
    assert_eq!(c.len(), 6);
    assert_eq!(c.stats().timer_advances, 0);
}

#[test]
fn long_absence_folds_ticks_into_one_move() {
    let mut c = mounted(6);
    assert_eq!(c.tick(Time(4.5e9)), 1_000_000_000);
    assert_eq!(c.stats().timer_advances, 1_000_000_000);
    assert_eq!(c.current_index(), (1_000_000_000 % 6) as usize);
    assert_eq!(c.next_tick(), Some(Time(4.5e9 + 4.5)));
}

#[test]
fn transition_retargets_latest_index() {
    let mut c = mounted(6);
    c.advance(Time(0.0));
    c.advance(Time(0.2));
    c.advance(Time(0.4));
    assert_eq!(c.target_offset(), -300.0);
    assert!(c.state(Time(0.5)).is_transitioning);
    let mid = c.offset(Time(0.5));
    assert!(mid < 0.0 && mid > -300.0);
    assert_eq!(c.offset(Time(1.3)), -300.0);
    assert!(!c.state(Time(1.3)).is_transitioning);
}

#[test]
fn read_outs_follow_index() {
    let mut c = mounted(6);
    c.jump_to(2, Time::ZERO);
    assert_eq!(c.position_label(), "3 of 6");
    assert_eq!(c.progress_fraction(), 0.5);
    assert_eq!(c.indicators(), vec![false, false, true, false, false, false]);
    assert_eq!(c.visible_slide().unwrap().title, "Certificate 2");
}

#[test]
fn replacing_slides_recreates_timer_and_clamps() {
    let mut c = mounted(6);
    c.jump_to(5, Time(1.0));
    c.replace_slides(slides(3), Time(2.0)).unwrap();
    assert_eq!(c.current_index(), 2);
    assert_eq!(c.next_tick(), Some(Time(6.5)));
    assert_eq!(c.tick(Time(6.5)), 1);
    assert_eq!(c.current_index(), 0);

    c.replace_slides(Vec::new(), Time(7.0)).unwrap();
    assert!(c.is_disabled());
    assert_eq!(c.tick(Time(100.0)), 0);
}
