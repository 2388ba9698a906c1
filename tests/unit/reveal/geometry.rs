use super::*;

#[test]
fn viewport_translates_by_scroll() {
    let mut v = Viewport::new(1280.0, 800.0).unwrap();
    v.scroll_y = 300.0;
    let r = v.to_viewport(Rect::new(0.0, 1000.0, 100.0, 1200.0));
    assert_eq!(r, Rect::new(0.0, 700.0, 100.0, 900.0));
}

#[test]
fn viewport_rejects_degenerate_sizes() {
    assert!(Viewport::new(0.0, 800.0).is_err());
    assert!(Viewport::new(1280.0, f64::NAN).is_err());
}

#[test]
fn layout_removes_whole_sections() {
    let mut l = DocumentLayout::new();
    l.insert(ElementId::scoped("about", "card"), Rect::new(0.0, 0.0, 1.0, 1.0));
    l.insert(ElementId::scoped("about", "title"), Rect::new(0.0, 0.0, 1.0, 1.0));
    l.insert(ElementId::scoped("aboutme", "x"), Rect::new(0.0, 0.0, 1.0, 1.0));
    assert_eq!(l.remove_section("about"), 2);
    assert_eq!(l.len(), 1);
    assert!(l.bounds(&ElementId::scoped("about", "card")).is_none());
    assert!(l.bounds(&ElementId::scoped("aboutme", "x")).is_some());
}

#[test]
fn layout_removes_single_elements() {
    let mut l = DocumentLayout::new();
    l.insert("about".into(), Rect::new(0.0, 0.0, 1.0, 1.0));
    assert!(l.remove(&"about".into()));
    assert!(!l.remove(&"about".into()));
    assert!(l.is_empty());
}
