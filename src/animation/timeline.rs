use crate::{
    animation::{ease::Ease, style::Style, tween::Tween},
    foundation::core::{ElementId, Time},
    foundation::error::{FolioError, FolioResult},
};

/// Where a timeline entry starts, relative to the entries pushed before it.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Start when the timeline so far ends.
    #[default]
    Sequential,
    /// Start this many seconds before the timeline so far ends (`"-=0.5"`).
    Overlap(f64),
    /// Start this many seconds after the timeline so far ends (`"+=0.5"`).
    Gap(f64),
    /// Start at an absolute offset from the timeline start.
    At(f64),
}

#[derive(Clone, Debug)]
struct TimelineEntry {
    element: ElementId,
    offset: f64,
    tween: Tween<Style>,
}

/// Sequenced one-shot entrance animations, e.g. the page-load intro.
///
/// Entries are absolute once pushed; sampling an element returns the style of its most recently
/// started entry, or the first entry's `from` style before anything has started.
#[derive(Clone, Debug)]
pub struct Timeline {
    start: Time,
    end: f64,
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// Empty timeline anchored at `start`.
    pub fn new(start: Time) -> Self {
        Self {
            start,
            end: 0.0,
            entries: Vec::new(),
        }
    }

    /// Append an entry and return its offset from the timeline start.
    pub fn push(
        &mut self,
        element: ElementId,
        from: Style,
        to: Style,
        duration: f64,
        ease: Ease,
        position: Position,
    ) -> FolioResult<f64> {
        let offset = match position {
            Position::Sequential => self.end,
            Position::Overlap(secs) => (self.end - secs).max(0.0),
            Position::Gap(secs) => self.end + secs,
            Position::At(secs) => secs,
        };
        if !offset.is_finite() || offset < 0.0 {
            return Err(FolioError::animation(format!(
                "timeline entry for '{element}' resolves to invalid offset {offset}"
            )));
        }
        let tween = Tween::new(from, to, self.start.after(offset), duration, ease)?;
        self.end = self.end.max(offset + duration);
        self.entries.push(TimelineEntry {
            element,
            offset,
            tween,
        });
        Ok(offset)
    }

    /// Total length in seconds.
    pub fn duration(&self) -> f64 {
        self.end
    }

    /// `true` once every entry has finished.
    pub fn is_finished(&self, now: Time) -> bool {
        now.since(self.start) >= self.end
    }

    /// Offsets of the entries animating `element`, in push order.
    pub fn offsets_of<'a>(&'a self, element: &'a ElementId) -> impl Iterator<Item = f64> + 'a {
        self.entries
            .iter()
            .filter(move |e| &e.element == element)
            .map(|e| e.offset)
    }

    /// Distinct elements animated by this timeline, in first-push order.
    pub fn elements(&self) -> Vec<&ElementId> {
        let mut out: Vec<&ElementId> = Vec::new();
        for e in &self.entries {
            if !out.contains(&&e.element) {
                out.push(&e.element);
            }
        }
        out
    }

    /// Style of `element` at `now`, `None` if the timeline does not animate it.
    pub fn sample(&self, element: &ElementId, now: Time) -> Option<Style> {
        let local = now.since(self.start);
        let mut first = None;
        let mut latest = None;
        for e in self.entries.iter().filter(|e| &e.element == element) {
            if first.is_none() {
                first = Some(e);
            }
            if e.offset <= local {
                latest = Some(e);
            }
        }
        latest.or(first).map(|e| e.tween.sample(now))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
