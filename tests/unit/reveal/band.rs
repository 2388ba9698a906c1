use super::*;

#[test]
fn parses_edge_and_percentage() {
    let l = BandLine::parse("top 80%").unwrap();
    assert_eq!(l.edge, ElementEdge::Top);
    assert!((l.viewport_fraction - 0.8).abs() < 1e-12);

    let l = BandLine::parse("  Bottom   top ").unwrap();
    assert_eq!(l.edge, ElementEdge::Bottom);
    assert_eq!(l.viewport_fraction, 0.0);

    let l = BandLine::parse("center center").unwrap();
    assert_eq!(l.edge, ElementEdge::Center);
    assert_eq!(l.viewport_fraction, 0.5);
}

#[test]
fn rejects_malformed_lines() {
    assert!(BandLine::parse("").is_err());
    assert!(BandLine::parse("top").is_err());
    assert!(BandLine::parse("top 80% extra").is_err());
    assert!(BandLine::parse("left 80%").is_err());
    assert!(BandLine::parse("top 80").is_err());
    assert!(BandLine::parse("top abc%").is_err());
}

#[test]
fn default_band_matches_parsed_form() {
    let parsed = ActivationBand::parse("top 80%", "bottom 20%").unwrap();
    assert_eq!(parsed.start.edge, ActivationBand::default().start.edge);
    assert_eq!(parsed.end.edge, ActivationBand::default().end.edge);
}

#[test]
fn zones_follow_scroll_position() {
    let band = ActivationBand::default();
    let h = 1000.0;
    // Top edge below the 80% line.
    assert_eq!(band.zone(Rect::new(0.0, 900.0, 100.0, 1400.0), h), Zone::Before);
    // Top edge at the line counts as entered.
    assert_eq!(band.zone(Rect::new(0.0, 800.0, 100.0, 1300.0), h), Zone::Inside);
    // Bottom edge above the 20% line.
    assert_eq!(band.zone(Rect::new(0.0, -500.0, 100.0, 150.0), h), Zone::After);
}

#[test]
fn crossings_are_ordered() {
    assert_eq!(Zone::Before.crossings(Zone::After), &[Crossing::Enter, Crossing::Leave]);
    assert_eq!(
        Zone::After.crossings(Zone::Before),
        &[Crossing::EnterBack, Crossing::LeaveBack]
    );
    assert!(Zone::Inside.crossings(Zone::Inside).is_empty());
}
