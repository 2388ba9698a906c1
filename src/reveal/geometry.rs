use std::collections::BTreeMap;

use crate::{
    foundation::core::{ElementId, Rect, Vec2},
    foundation::error::{FolioError, FolioResult},
};

/// Visible window onto the document.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Document offset of the viewport's top edge.
    #[serde(default)]
    pub scroll_y: f64,
}

impl Viewport {
    /// Create a validated viewport scrolled to the top.
    pub fn new(width: f64, height: f64) -> FolioResult<Self> {
        let v = Self {
            width,
            height,
            scroll_y: 0.0,
        };
        v.validate()?;
        Ok(v)
    }

    /// Check that the viewport has a positive, finite size.
    pub fn validate(&self) -> FolioResult<()> {
        if !(self.width.is_finite() && self.width > 0.0)
            || !(self.height.is_finite() && self.height > 0.0)
        {
            return Err(FolioError::validation(
                "viewport width and height must be finite and > 0",
            ));
        }
        if !self.scroll_y.is_finite() {
            return Err(FolioError::validation("viewport scroll_y must be finite"));
        }
        Ok(())
    }

    /// Map a document-space rectangle into viewport space.
    pub fn to_viewport(&self, doc: Rect) -> Rect {
        doc + Vec2::new(0.0, -self.scroll_y)
    }
}

/// Source of element bounds, in document coordinates.
///
/// Returning `None` means the element is gone (unmounted); targets depending on it are pruned.
pub trait Geometry {
    /// Bounds of `element`, if it is still mounted.
    fn bounds(&self, element: &ElementId) -> Option<Rect>;
}

/// Static document layout: element id to document-space bounds.
#[derive(Clone, Debug, Default)]
pub struct DocumentLayout {
    rects: BTreeMap<ElementId, Rect>,
}

impl DocumentLayout {
    /// Empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place (or move) an element.
    pub fn insert(&mut self, element: ElementId, bounds: Rect) {
        self.rects.insert(element, bounds);
    }

    /// Remove one element. Returns `true` if it was placed.
    pub fn remove(&mut self, element: &ElementId) -> bool {
        self.rects.remove(element).is_some()
    }

    /// Remove every element whose id starts with `"<section>/"`. Returns how many were removed.
    pub fn remove_section(&mut self, section: &str) -> usize {
        let prefix = format!("{section}/");
        let before = self.rects.len();
        self.rects.retain(|id, _| !id.as_str().starts_with(&prefix));
        before - self.rects.len()
    }

    /// Number of placed elements.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// `true` when nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl Geometry for DocumentLayout {
    fn bounds(&self, element: &ElementId) -> Option<Rect> {
        self.rects.get(element).copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/geometry.rs"]
mod tests;
