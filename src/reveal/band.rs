use crate::{
    foundation::core::Rect,
    foundation::error::{FolioError, FolioResult},
};

/// Which edge of the trigger element a band line tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ElementEdge {
    /// Top edge.
    Top,
    /// Vertical center.
    Center,
    /// Bottom edge.
    Bottom,
}

impl ElementEdge {
    fn y_of(self, r: Rect) -> f64 {
        match self {
            Self::Top => r.y0,
            Self::Center => (r.y0 + r.y1) * 0.5,
            Self::Bottom => r.y1,
        }
    }
}

/// One boundary of an activation band: "when `edge` of the element crosses `fraction` of the
/// viewport height, measured from the top".
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BandLine {
    /// Tracked element edge.
    pub edge: ElementEdge,
    /// Viewport line as a fraction of viewport height.
    pub viewport_fraction: f64,
}

impl BandLine {
    /// Parse `"<edge> <viewport>"`, e.g. `"top 80%"`, `"bottom top"`, `"center 50%"`.
    pub fn parse(text: &str) -> FolioResult<Self> {
        let mut parts = text.split_whitespace();
        let (Some(edge), Some(line), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(FolioError::validation(format!(
                "band line '{text}' must be '<edge> <viewport>'"
            )));
        };

        let edge = match edge.to_ascii_lowercase().as_str() {
            "top" => ElementEdge::Top,
            "center" | "middle" => ElementEdge::Center,
            "bottom" => ElementEdge::Bottom,
            other => {
                return Err(FolioError::validation(format!(
                    "unknown element edge '{other}' in band line '{text}'"
                )));
            }
        };

        let viewport_fraction = match line.to_ascii_lowercase().as_str() {
            "top" => 0.0,
            "center" | "middle" => 0.5,
            "bottom" => 1.0,
            pct => {
                let Some(num) = pct.strip_suffix('%') else {
                    return Err(FolioError::validation(format!(
                        "viewport position '{pct}' must be a keyword or a percentage"
                    )));
                };
                let v: f64 = num.trim().parse().map_err(|_| {
                    FolioError::validation(format!("invalid percentage '{pct}' in band line"))
                })?;
                if !v.is_finite() {
                    return Err(FolioError::validation("band percentage must be finite"));
                }
                v / 100.0
            }
        };

        Ok(Self {
            edge,
            viewport_fraction,
        })
    }
}

/// Position of a trigger relative to its activation band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum Zone {
    /// Start line not reached yet (element still below it).
    #[default]
    Before,
    /// Between start and end lines.
    Inside,
    /// End line passed (element scrolled above it).
    After,
}

/// A boundary crossing derived from two consecutive zone observations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Crossing {
    /// Scrolling down into the band.
    Enter,
    /// Scrolling down out of the band.
    Leave,
    /// Scrolling up back into the band.
    EnterBack,
    /// Scrolling up out of the band, past the start line.
    LeaveBack,
}

impl Zone {
    /// Crossings implied by moving from `self` to `next`, in the order they happened.
    pub fn crossings(self, next: Zone) -> &'static [Crossing] {
        match (self, next) {
            (Zone::Before, Zone::Inside) => &[Crossing::Enter],
            (Zone::Before, Zone::After) => &[Crossing::Enter, Crossing::Leave],
            (Zone::Inside, Zone::After) => &[Crossing::Leave],
            (Zone::After, Zone::Inside) => &[Crossing::EnterBack],
            (Zone::After, Zone::Before) => &[Crossing::EnterBack, Crossing::LeaveBack],
            (Zone::Inside, Zone::Before) => &[Crossing::LeaveBack],
            _ => &[],
        }
    }
}

/// Viewport-relative region in which a reveal target counts as entering.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ActivationBand {
    /// Line whose crossing starts the band.
    pub start: BandLine,
    /// Line whose crossing ends the band.
    pub end: BandLine,
}

impl Default for ActivationBand {
    fn default() -> Self {
        // "top 80%" / "bottom 20%"
        Self {
            start: BandLine {
                edge: ElementEdge::Top,
                viewport_fraction: 0.8,
            },
            end: BandLine {
                edge: ElementEdge::Bottom,
                viewport_fraction: 0.2,
            },
        }
    }
}

impl ActivationBand {
    /// Parse both band lines.
    pub fn parse(start: &str, end: &str) -> FolioResult<Self> {
        Ok(Self {
            start: BandLine::parse(start)?,
            end: BandLine::parse(end)?,
        })
    }

    /// Classify a trigger given its bounds in viewport coordinates.
    pub fn zone(&self, bounds: Rect, viewport_height: f64) -> Zone {
        let start_line = self.start.viewport_fraction * viewport_height;
        if self.start.edge.y_of(bounds) > start_line {
            return Zone::Before;
        }
        let end_line = self.end.viewport_fraction * viewport_height;
        if self.end.edge.y_of(bounds) <= end_line {
            return Zone::After;
        }
        Zone::Inside
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/band.rs"]
mod tests;
