use crate::{
    foundation::core::Time,
    foundation::error::{FolioError, FolioResult},
};

// Absorbs float error when `now` lands exactly on a tick boundary.
const TICK_EPSILON: f64 = 1e-9;

/// Ticks that became due in one [`IntervalTimer::poll`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DueTicks {
    /// How many ticks became due.
    pub count: u64,
    /// Due time of the most recent one.
    pub last: Time,
}

/// Periodic trigger owned by exactly one carousel.
///
/// Ticks are due at `origin + k * period` for `k = 1, 2, ...`. The timer never fires by
/// itself: the owner polls it with the current time and learns how many ticks became due
/// since the previous poll. Once cancelled it never yields another tick.
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalTimer {
    period: f64,
    origin: Time,
    fired: u64,
    cancelled: bool,
}

impl IntervalTimer {
    /// Start a timer at `origin`. `period` must be finite and `> 0`.
    pub fn start(period: f64, origin: Time) -> FolioResult<Self> {
        if !period.is_finite() || period <= 0.0 {
            return Err(FolioError::validation(
                "timer period must be finite and > 0",
            ));
        }
        Ok(Self {
            period,
            origin,
            fired: 0,
            cancelled: false,
        })
    }

    /// Interval between ticks in seconds.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Number of ticks delivered so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Time at which the next tick is due, `None` once cancelled.
    pub fn next_due(&self) -> Option<Time> {
        if self.cancelled {
            return None;
        }
        Some(self.due_at(self.fired + 1))
    }

    fn due_at(&self, k: u64) -> Time {
        self.origin.after(self.period * k as f64)
    }

    /// Consume every tick due at or before `now`. `None` when nothing is due.
    ///
    /// Runs in constant time however long the gap since the previous poll.
    pub fn poll(&mut self, now: Time) -> Option<DueTicks> {
        if self.cancelled {
            return None;
        }
        let due = (now.since(self.origin) / self.period + TICK_EPSILON).floor() as u64;
        if due <= self.fired {
            return None;
        }
        tracing::trace!(from = self.fired, to = due, "interval timer ticks due");
        let ticks = DueTicks {
            count: due - self.fired,
            last: self.due_at(due),
        };
        self.fired = due;
        Some(ticks)
    }

    /// Stop the timer permanently.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// `true` after [`IntervalTimer::cancel`].
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/timer.rs"]
mod tests;
