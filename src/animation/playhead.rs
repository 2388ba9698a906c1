use crate::{
    foundation::core::Time,
    foundation::error::{FolioError, FolioResult},
};

/// Direction a [`Playhead`] is moving in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Direction {
    /// Progress increases toward `1`.
    Forward,
    /// Progress decreases toward `0`.
    Backward,
}

/// Progress cursor over a fixed-length animation that can be played and reversed at any time.
///
/// Reversing starts from the current progress, so an animation interrupted half way plays back
/// from exactly where it was. Forward play may be delayed (stagger); reverse never is.
#[derive(Clone, Debug, PartialEq)]
pub struct Playhead {
    duration: f64,
    anchor: Time,
    anchor_progress: f64,
    direction: Option<Direction>, // None = paused
}

impl Playhead {
    /// Create a paused playhead at progress `0`.
    pub fn new(duration: f64) -> FolioResult<Self> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(FolioError::animation(
                "playhead duration must be finite and >= 0",
            ));
        }
        Ok(Self {
            duration,
            anchor: Time::ZERO,
            anchor_progress: 0.0,
            direction: None,
        })
    }

    /// Normalized progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Time) -> f64 {
        let Some(dir) = self.direction else {
            return self.anchor_progress;
        };
        if now < self.anchor {
            return self.anchor_progress;
        }
        let delta = if self.duration <= 0.0 {
            1.0
        } else {
            now.since(self.anchor) / self.duration
        };
        match dir {
            Direction::Forward => (self.anchor_progress + delta).min(1.0),
            Direction::Backward => (self.anchor_progress - delta).max(0.0),
        }
    }

    /// Current direction, `None` while paused.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Play toward `1` from the current progress, starting `delay` seconds after `now`.
    pub fn play(&mut self, now: Time, delay: f64) {
        self.anchor_progress = self.progress(now);
        self.anchor = now.after(delay.max(0.0));
        self.direction = Some(Direction::Forward);
    }

    /// Play toward `0` from the current progress, starting at `now`.
    pub fn reverse(&mut self, now: Time) {
        self.anchor_progress = self.progress(now);
        self.anchor = now;
        self.direction = Some(Direction::Backward);
    }

    /// `true` when playing forward and the end has been reached.
    pub fn is_complete(&self, now: Time) -> bool {
        self.direction == Some(Direction::Forward) && self.progress(now) >= 1.0
    }

    /// `true` when playing backward and progress is back at `0`.
    pub fn is_rewound(&self, now: Time) -> bool {
        self.direction == Some(Direction::Backward) && self.progress(now) <= 0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/playhead.rs"]
mod tests;
