use super::*;

#[test]
fn yields_each_due_tick_once() {
    let mut t = IntervalTimer::start(4.5, Time(0.0)).unwrap();
    assert_eq!(t.poll(Time(4.4)), None);
    assert_eq!(
        t.poll(Time(4.5)),
        Some(DueTicks {
            count: 1,
            last: Time(4.5)
        })
    );
    assert_eq!(t.poll(Time(4.5)), None);
    assert_eq!(
        t.poll(Time(13.6)),
        Some(DueTicks {
            count: 2,
            last: Time(13.5)
        })
    );
    assert_eq!(t.fired(), 3);
    assert_eq!(t.next_due(), Some(Time(18.0)));
}

#[test]
fn origin_offsets_the_schedule() {
    let mut t = IntervalTimer::start(2.0, Time(1.0)).unwrap();
    assert_eq!(t.poll(Time(2.9)), None);
    assert_eq!(t.poll(Time(3.0)).map(|d| d.last), Some(Time(3.0)));
}

#[test]
fn long_gap_is_counted_not_enumerated() {
    let mut t = IntervalTimer::start(4.5, Time(0.0)).unwrap();
    let due = t.poll(Time(4.5e9)).unwrap();
    assert_eq!(due.count, 1_000_000_000);
    assert_eq!(due.last, Time(4.5e9));
    assert_eq!(t.fired(), 1_000_000_000);
    assert_eq!(t.poll(Time(4.5e9)), None);
}

#[test]
fn cancelled_timer_never_fires() {
    let mut t = IntervalTimer::start(1.0, Time(0.0)).unwrap();
    assert_eq!(t.poll(Time(1.0)).map(|d| d.count), Some(1));
    t.cancel();
    assert!(t.is_cancelled());
    assert_eq!(t.poll(Time(50.0)), None);
    assert_eq!(t.next_due(), None);
    assert_eq!(t.fired(), 1);
}

#[test]
fn rejects_non_positive_period() {
    assert!(IntervalTimer::start(0.0, Time::ZERO).is_err());
    assert!(IntervalTimer::start(-1.0, Time::ZERO).is_err());
    assert!(IntervalTimer::start(f64::INFINITY, Time::ZERO).is_err());
}
