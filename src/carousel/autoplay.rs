use crate::{
    animation::{ease::Ease, tween::Tween},
    carousel::{slide::Slide, timer::IntervalTimer},
    foundation::core::Time,
    foundation::error::{FolioError, FolioResult},
};

fn default_interval() -> f64 {
    4.5
}

fn default_transition() -> f64 {
    0.8
}

fn default_ease() -> Ease {
    Ease::OutCubic
}

fn default_slide_width() -> f64 {
    100.0
}

/// Timing and geometry of an [`AutoplayCarousel`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CarouselOpts {
    /// Seconds between automatic advances.
    #[serde(default = "default_interval")]
    pub interval_secs: f64,
    /// Duration of the slide transition.
    #[serde(default = "default_transition")]
    pub transition_secs: f64,
    /// Easing of the slide transition.
    #[serde(default = "default_ease")]
    pub ease: Ease,
    /// Width of one slide in host units; the track offset is `-index * slide_width`.
    #[serde(default = "default_slide_width")]
    pub slide_width: f64,
}

impl Default for CarouselOpts {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            transition_secs: default_transition(),
            ease: default_ease(),
            slide_width: default_slide_width(),
        }
    }
}

impl CarouselOpts {
    /// Validate timing and geometry.
    pub fn validate(&self) -> FolioResult<()> {
        if !self.interval_secs.is_finite() || self.interval_secs <= 0.0 {
            return Err(FolioError::validation(
                "carousel interval_secs must be finite and > 0",
            ));
        }
        if !self.transition_secs.is_finite() || self.transition_secs < 0.0 {
            return Err(FolioError::validation(
                "carousel transition_secs must be finite and >= 0",
            ));
        }
        if !self.slide_width.is_finite() || self.slide_width < 0.0 {
            return Err(FolioError::validation(
                "carousel slide_width must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Index state of a carousel at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CarouselState {
    /// Displayed slide, always `< len`.
    pub current_index: usize,
    /// `true` while the track is still moving toward the current slide.
    pub is_transitioning: bool,
}

/// Counters of index mutations, split by origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CarouselStats {
    /// `advance` calls made by the timer.
    pub timer_advances: u64,
    /// Next/previous/jump calls made by the user.
    pub manual_moves: u64,
}

/// Render-ready view of a carousel.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CarouselSnapshot {
    /// Displayed slide index, `None` when disabled.
    pub current_index: Option<usize>,
    /// Number of slides.
    pub len: usize,
    /// Counter text, e.g. `"3 of 6"`.
    pub label: String,
    /// Completion bar fill in `(0, 1]`, `0` when disabled.
    pub progress: f64,
    /// Current track offset.
    pub offset: f64,
    /// Track still moving.
    pub is_transitioning: bool,
    /// One flag per indicator dot, `true` for the active one.
    pub indicators: Vec<bool>,
    /// Title of the displayed slide.
    pub title: Option<String>,
}

/// Rotates through a fixed list of slides on a timer, with manual next/previous/jump.
///
/// Manual navigation never pauses or resets the timer: both sources are plain index
/// assignments applied in arrival order, and the most recent one determines the index. Every
/// index change retargets the track transition from wherever it currently is.
///
/// An empty slide list yields a disabled carousel: no timer is started and every operation is a
/// no-op.
#[derive(Clone, Debug)]
pub struct AutoplayCarousel {
    slides: Vec<Slide>,
    opts: CarouselOpts,
    index: usize,
    timer: Option<IntervalTimer>,
    mounted: bool,
    track: Tween<f64>,
    stats: CarouselStats,
}

impl AutoplayCarousel {
    /// Mount a carousel at `now` and start its timer.
    pub fn mount(slides: Vec<Slide>, opts: CarouselOpts, now: Time) -> FolioResult<Self> {
        opts.validate()?;
        let mut carousel = Self {
            slides: Vec::new(),
            opts,
            index: 0,
            timer: None,
            mounted: true,
            track: Tween::settled(0.0),
            stats: CarouselStats::default(),
        };
        carousel.install_slides(slides, now)?;
        Ok(carousel)
    }

    fn install_slides(&mut self, slides: Vec<Slide>, now: Time) -> FolioResult<()> {
        if let Some(timer) = self.timer.as_mut() {
            timer.cancel();
        }
        self.timer = None;
        self.slides = slides;
        if self.slides.is_empty() {
            tracing::warn!("carousel has no slides; rendering disabled state without a timer");
            self.index = 0;
            self.track = Tween::settled(0.0);
            return Ok(());
        }
        if self.mounted {
            self.timer = Some(IntervalTimer::start(self.opts.interval_secs, now)?);
        }
        let clamped = self.index.min(self.slides.len() - 1);
        self.set_index(clamped, now);
        Ok(())
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// `true` when there are no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// `true` when the carousel cannot rotate (no slides or unmounted).
    pub fn is_disabled(&self) -> bool {
        self.slides.is_empty() || self.timer.is_none()
    }

    /// `true` while the carousel's timer is live.
    pub fn is_mounted(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Options in effect.
    pub fn opts(&self) -> &CarouselOpts {
        &self.opts
    }

    /// Displayed slide index.
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Index and transition state at `now`.
    pub fn state(&self, now: Time) -> CarouselState {
        CarouselState {
            current_index: self.index,
            is_transitioning: !self.track.is_finished(now),
        }
    }

    /// Mutation counters.
    pub fn stats(&self) -> CarouselStats {
        self.stats
    }

    /// Time the next automatic advance is due.
    pub fn next_tick(&self) -> Option<Time> {
        self.timer.as_ref().and_then(IntervalTimer::next_due)
    }

    fn set_index(&mut self, index: usize, now: Time) {
        let changed = index != self.index;
        self.index = index;
        let target = self.target_offset();
        if changed || *self.track.target() != target {
            tracing::debug!(index, "carousel index changed");
            self.track.retarget_with(
                now,
                target,
                self.opts.transition_secs,
                self.opts.ease,
            );
        }
    }

    fn accepts_input(&self) -> bool {
        if self.is_disabled() {
            tracing::debug!("carousel input ignored while disabled");
            return false;
        }
        true
    }

    /// Move to the next slide, wrapping at the end.
    pub fn advance(&mut self, now: Time) {
        if !self.accepts_input() {
            return;
        }
        self.stats.manual_moves += 1;
        let n = self.slides.len();
        self.set_index((self.index + 1) % n, now);
    }

    /// Move to the previous slide, wrapping at the start.
    pub fn retreat(&mut self, now: Time) {
        if !self.accepts_input() {
            return;
        }
        self.stats.manual_moves += 1;
        let n = self.slides.len();
        self.set_index((self.index + n - 1) % n, now);
    }

    /// Jump to slide `i`. Out-of-range indices are clamped to the last slide.
    pub fn jump_to(&mut self, i: usize, now: Time) {
        if !self.accepts_input() {
            return;
        }
        self.stats.manual_moves += 1;
        let last = self.slides.len() - 1;
        if i > last {
            tracing::debug!(requested = i, clamped = last, "carousel jump clamped");
        }
        self.set_index(i.min(last), now);
    }

    /// Apply every timer tick due at or before `now`. Returns the number of advances applied.
    ///
    /// Missed ticks are folded into one index change at the last due time.
    pub fn tick(&mut self, now: Time) -> u64 {
        let Some(due) = self.timer.as_mut().and_then(|timer| timer.poll(now)) else {
            return 0;
        };
        self.stats.timer_advances += due.count;
        let n = self.slides.len() as u64;
        let index = (self.index as u64 + due.count % n) % n;
        self.set_index(index as usize, due.last);
        due.count
    }

    /// Replace the slide list, recreating the timer from `now` and clamping the index.
    ///
    /// After [`AutoplayCarousel::unmount`] the slides are replaced but no timer is started.
    pub fn replace_slides(&mut self, slides: Vec<Slide>, now: Time) -> FolioResult<()> {
        tracing::debug!(
            len = slides.len(),
            mounted = self.mounted,
            "carousel slides replaced"
        );
        self.install_slides(slides, now)
    }

    /// Cancel the timer. No tick is applied afterwards.
    pub fn unmount(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.cancel();
        }
        self.timer = None;
        self.mounted = false;
    }

    /// The displayed slide, `None` when disabled.
    pub fn visible_slide(&self) -> Option<&Slide> {
        self.slides.get(self.index)
    }

    /// Completion bar fill `(index + 1) / len`, or `0` with no slides.
    pub fn progress_fraction(&self) -> f64 {
        if self.slides.is_empty() {
            return 0.0;
        }
        (self.index + 1) as f64 / self.slides.len() as f64
    }

    /// Counter text such as `"3 of 6"`.
    pub fn position_label(&self) -> String {
        if self.slides.is_empty() {
            return "0 of 0".to_string();
        }
        format!("{} of {}", self.index + 1, self.slides.len())
    }

    /// Active flag per indicator dot.
    pub fn indicators(&self) -> Vec<bool> {
        (0..self.slides.len()).map(|i| i == self.index).collect()
    }

    /// Offset the track is heading to.
    pub fn target_offset(&self) -> f64 {
        -(self.index as f64) * self.opts.slide_width
    }

    /// Offset displayed at `now`.
    pub fn offset(&self, now: Time) -> f64 {
        self.track.sample(now)
    }

    /// Render-ready view at `now`.
    pub fn snapshot(&self, now: Time) -> CarouselSnapshot {
        CarouselSnapshot {
            current_index: (!self.slides.is_empty()).then_some(self.index),
            len: self.slides.len(),
            label: self.position_label(),
            progress: self.progress_fraction(),
            offset: self.offset(now),
            is_transitioning: self.state(now).is_transitioning,
            indicators: self.indicators(),
            title: self.visible_slide().map(|s| s.title.clone()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/autoplay.rs"]
mod tests;
