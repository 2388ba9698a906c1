use super::*;
use crate::foundation::core::Rect;
use crate::reveal::geometry::DocumentLayout;
use crate::reveal::target::{RevealEventKind, RevealPhase};

const VIEW_H: f64 = 1000.0;

fn id(s: &str) -> ElementId {
    ElementId::from(s)
}

fn fade() -> Entrance {
    Entrance {
        from: Style {
            y: 30.0,
            opacity: 0.0,
            ..Style::IDENTITY
        },
        to: Style::IDENTITY,
        duration: 0.6,
        ease: Ease::Linear,
    }
}

/// Section at y=2000..3000 with three cards inside.
fn layout() -> DocumentLayout {
    let mut l = DocumentLayout::new();
    l.insert(id("skills"), Rect::new(0.0, 2000.0, 1000.0, 3000.0));
    for i in 0..3 {
        let y = 2100.0 + i as f64 * 200.0;
        l.insert(id(&format!("skills/card-{i}")), Rect::new(0.0, y, 300.0, y + 150.0));
    }
    l
}

fn viewport(scroll_y: f64) -> Viewport {
    Viewport {
        width: 1280.0,
        height: VIEW_H,
        scroll_y,
    }
}

fn cards_group() -> RevealGroup {
    let mut g = RevealGroup::new(
        id("skills"),
        (0..3).map(|i| id(&format!("skills/card-{i}"))).collect(),
        fade(),
    );
    g.stagger = 0.1;
    g
}

#[test]
fn staggered_group_plays_in_registration_order() {
    let mut s = RevealScheduler::new();
    s.register(cards_group()).unwrap();
    let l = layout();

    assert!(s.update(Time(0.0), &viewport(0.0), &l).is_empty());
    // Section top at 2000 - 1300 = 700 <= 800: inside the band.
    let ev = s.update(Time(1.0), &viewport(1300.0), &l);
    let got: Vec<(String, RevealEventKind)> =
        ev.iter().map(|e| (e.element.to_string(), e.kind)).collect();
    assert_eq!(
        got,
        vec![
            ("skills/card-0".to_string(), RevealEventKind::PlayForward { delay: 0.0 }),
            ("skills/card-1".to_string(), RevealEventKind::PlayForward { delay: 0.1 }),
            ("skills/card-2".to_string(), RevealEventKind::PlayForward { delay: 0.2 }),
        ]
    );

    // Cascade: at t=1.1 card 0 is part way, card 2 has not started.
    let c0 = s.style_of(&id("skills/card-0"), Time(1.1)).unwrap();
    let c2 = s.style_of(&id("skills/card-2"), Time(1.1)).unwrap();
    assert!(c0.opacity > 0.0);
    assert_eq!(c2.opacity, 0.0);
    assert_eq!(s.style_of(&id("skills/card-2"), Time(5.0)).unwrap(), Style::IDENTITY);
}

#[test]
fn repeated_scroll_ticks_inside_band_do_not_replay() {
    let mut s = RevealScheduler::new();
    s.register(cards_group()).unwrap();
    let l = layout();
    let mut total = 0;
    for k in 0..20 {
        total += s.update(Time(k as f64 * 0.1), &viewport(1300.0 + k as f64), &l).len();
    }
    assert_eq!(total, 3);
}

#[test]
fn scrolling_back_up_reverses_and_allows_replay() {
    let mut s = RevealScheduler::new();
    s.register(RevealGroup::new(id("skills"), vec![id("skills/card-0")], fade())).unwrap();
    let l = layout();

    s.update(Time(0.0), &viewport(1300.0), &l);
    let back = s.update(Time(2.0), &viewport(0.0), &l);
    assert_eq!(back[0].kind, RevealEventKind::PlayBackward);
    assert_eq!(s.target(&id("skills/card-0")).unwrap().phase(), RevealPhase::Exiting);

    let settled = s.settle(Time(3.0));
    assert_eq!(settled[0].kind, RevealEventKind::Rewound);
    let again = s.update(Time(4.0), &viewport(1300.0), &l);
    assert_eq!(again[0].kind, RevealEventKind::PlayForward { delay: 0.0 });
}

#[test]
fn deregistration_is_idempotent() {
    let mut s = RevealScheduler::new();
    let h = s.register(cards_group()).unwrap();
    let other = s
        .register(RevealGroup::new(id("skills"), vec![id("skills/card-0")], fade()))
        .unwrap();
    assert_eq!(s.len(), 4);
    let owners: Vec<_> = s.targets().map(RevealTarget::registration).collect();
    assert_eq!(owners, vec![h, h, h, other]);
    assert_eq!(s.deregister(h), 3);
    assert_eq!(s.deregister(h), 0);
    assert_eq!(s.len(), 1);
    assert_eq!(s.deregister(other), 1);
    assert!(s.is_empty());
}

#[test]
fn stale_elements_are_pruned_before_evaluation() {
    let mut s = RevealScheduler::new();
    let h = s.register(cards_group()).unwrap();
    let mut l = layout();
    l.remove_section("skills");
    l.insert(id("skills"), Rect::new(0.0, 2000.0, 1000.0, 3000.0));
    let ev = s.update(Time(1.0), &viewport(1300.0), &l);
    assert!(ev.is_empty());
    assert!(s.is_empty());
    assert_eq!(s.deregister(h), 0);
}

#[test]
fn idle_motion_adds_to_entrance_style() {
    let mut s = RevealScheduler::new();
    s.register(cards_group()).unwrap();
    s.register_idle(
        IdleGroup {
            members: vec![id("skills/card-0"), id("skills/card-1")],
            offset: Vec2::new(0.0, -5.0),
            half_period: 2.0,
            ease: Ease::Linear,
            stagger: 0.2,
        },
        Time(0.0),
    )
    .unwrap();

    // Not revealed yet: hidden style plus bob.
    let c0 = s.style_of(&id("skills/card-0"), Time(1.0)).unwrap();
    assert_eq!(c0.opacity, 0.0);
    assert_eq!(c0.y, 30.0 - 2.5);
    // Second card is phase shifted.
    let c1 = s.style_of(&id("skills/card-1"), Time(1.0)).unwrap();
    assert!((c1.y - (30.0 - 2.0)).abs() < 1e-9);
    // Idle targets never produce reveal events.
    assert!(s.target(&id("skills/card-1")).is_some());
    assert_eq!(s.targets().filter(|t| t.repeat()).count(), 2);
}

#[test]
fn companions_mirror_their_member() {
    let mut s = RevealScheduler::new();
    let mut g = RevealGroup::new(id("skills"), vec![id("skills/card-0")], fade());
    g.companions.insert(id("skills/card-0"), id("skills/card-0-label"));
    s.register(g).unwrap();
    let label = s.style_of(&id("skills/card-0-label"), Time(0.0)).unwrap();
    assert_eq!(label, s.style_of(&id("skills/card-0"), Time(0.0)).unwrap());
    let snap = s.snapshot(Time(0.0));
    let ids: Vec<&str> = snap.iter().map(|e| e.element.as_str()).collect();
    assert_eq!(ids, vec!["skills/card-0", "skills/card-0-label"]);
    assert_eq!(s.targets().next().unwrap().companion(), Some(&id("skills/card-0-label")));
}

#[test]
fn rejects_bad_groups() {
    let mut s = RevealScheduler::new();
    assert!(s.register(RevealGroup::new(id("x"), vec![], fade())).is_err());
    let mut g = cards_group();
    g.stagger = -1.0;
    assert!(s.register(g).is_err());
    assert!(s.is_empty());
}
