use crate::{
    animation::ease::Ease,
    foundation::core::{Time, Vec2},
    foundation::error::{FolioError, FolioResult},
};

/// Non-terminating decorative motion: a yoyo between rest and `offset`, forever.
///
/// Each half cycle lasts `half_period` seconds. Going out uses `ease`; coming back plays the
/// same curve in reverse. Before `start` (the per-target stagger offset) the element rests.
#[derive(Clone, Debug, PartialEq)]
pub struct IdleMotion {
    offset: Vec2,
    half_period: f64,
    ease: Ease,
    start: Time,
}

impl IdleMotion {
    /// Create an idle motion. `half_period` must be finite and `> 0`.
    pub fn new(offset: Vec2, half_period: f64, ease: Ease, start: Time) -> FolioResult<Self> {
        if !half_period.is_finite() || half_period <= 0.0 {
            return Err(FolioError::animation(
                "idle motion half period must be finite and > 0",
            ));
        }
        Ok(Self {
            offset,
            half_period,
            ease,
            start,
        })
    }

    /// Phase start (mount time plus stagger offset).
    pub fn start(&self) -> Time {
        self.start
    }

    /// Translation offset to add to the element at `now`.
    pub fn sample(&self, now: Time) -> Vec2 {
        if now <= self.start {
            return Vec2::ZERO;
        }
        let cycle = now.since(self.start) / self.half_period;
        let k = cycle.floor();
        let frac = cycle - k;
        let t = if (k as u64) % 2 == 0 {
            self.ease.apply(frac)
        } else {
            self.ease.apply(1.0 - frac)
        };
        self.offset * t
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/idle.rs"]
mod tests;
