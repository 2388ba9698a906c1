use crate::{
    animation::{ease::Ease, style::Lerp},
    foundation::core::Time,
    foundation::error::{FolioError, FolioResult},
};

/// A single eased interpolation from `from` to `to`, anchored at an absolute start time.
///
/// Tweens are never queued: [`Tween::retarget`] replaces the in-flight target and restarts
/// from whatever value is currently displayed, so the visual always tracks the latest request.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    start: Time,
    duration: f64,
    ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    /// Create a tween. `duration` must be finite and `>= 0` (zero jumps straight to `to`).
    pub fn new(from: T, to: T, start: Time, duration: f64, ease: Ease) -> FolioResult<Self> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(FolioError::animation(
                "tween duration must be finite and >= 0",
            ));
        }
        Ok(Self {
            from,
            to,
            start,
            duration,
            ease,
        })
    }

    /// A tween that has already settled on `value`.
    pub fn settled(value: T) -> Self {
        Self {
            from: value.clone(),
            to: value,
            start: Time::ZERO,
            duration: 0.0,
            ease: Ease::Linear,
        }
    }

    /// Normalized (un-eased) progress at `now`.
    pub fn progress(&self, now: Time) -> f64 {
        if self.duration <= 0.0 {
            return if now >= self.start { 1.0 } else { 0.0 };
        }
        (now.since(self.start) / self.duration).clamp(0.0, 1.0)
    }

    /// Sample the displayed value at `now`.
    pub fn sample(&self, now: Time) -> T {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to.clone();
        }
        T::lerp(&self.from, &self.to, self.ease.apply(t))
    }

    /// `true` once the tween has reached its target.
    pub fn is_finished(&self, now: Time) -> bool {
        self.progress(now) >= 1.0
    }

    /// Final value of the tween.
    pub fn target(&self) -> &T {
        &self.to
    }

    /// Replace the target, starting from the value displayed at `now`.
    pub fn retarget(&mut self, now: Time, to: T) {
        self.from = self.sample(now);
        self.to = to;
        self.start = now;
    }

    /// Replace the target, also changing duration and easing.
    pub fn retarget_with(&mut self, now: Time, to: T, duration: f64, ease: Ease) {
        self.retarget(now, to);
        if duration.is_finite() && duration >= 0.0 {
            self.duration = duration;
        }
        self.ease = ease;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
