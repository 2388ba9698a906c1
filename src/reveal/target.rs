use crate::{
    animation::{ease::Ease, idle::IdleMotion, playhead::Playhead, style::{Lerp, Style}},
    foundation::core::{ElementId, Time, Vec2},
    foundation::error::{FolioError, FolioResult},
    reveal::band::{ActivationBand, Crossing, Zone},
    reveal::scheduler::RegistrationHandle,
};

fn default_entrance_duration() -> f64 {
    1.0
}

/// Entrance animation: `from` is shown until the target plays, then eases to `to`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Entrance {
    /// Initial (hidden) style.
    pub from: Style,
    /// Final (revealed) style.
    #[serde(default)]
    pub to: Style,
    /// Duration in seconds.
    #[serde(default = "default_entrance_duration")]
    pub duration: f64,
    /// Easing curve.
    #[serde(default)]
    pub ease: Ease,
}

impl Entrance {
    /// Check duration.
    pub fn validate(&self) -> FolioResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(FolioError::validation(
                "entrance duration must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// State of a one-shot reveal target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum RevealPhase {
    /// Waiting to enter (initial style shown).
    Idle,
    /// Entrance played (or playing).
    Played,
    /// Reversing back to the initial style.
    Exiting,
}

/// Something the scheduler did to a target.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RevealEvent {
    /// Affected element.
    pub element: ElementId,
    /// What happened.
    pub kind: RevealEventKind,
    /// When it was decided.
    pub at: Time,
}

/// Kinds of [`RevealEvent`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum RevealEventKind {
    /// Forward entrance activation; starts after `delay` seconds (stagger).
    PlayForward {
        /// Stagger delay applied.
        delay: f64,
    },
    /// Backward activation toward the initial style.
    PlayBackward,
    /// Backward play finished; target may replay on re-entry.
    Rewound,
}

#[derive(Clone, Debug)]
pub(crate) enum Motion {
    Entrance { entrance: Entrance, playhead: Playhead },
    Idle(IdleMotion),
}

/// One registered element in a [`crate::RevealScheduler`].
#[derive(Clone, Debug)]
pub struct RevealTarget {
    pub(crate) element: ElementId,
    pub(crate) trigger: ElementId,
    pub(crate) band: ActivationBand,
    pub(crate) motion: Motion,
    pub(crate) reversible: bool,
    pub(crate) has_played: bool,
    pub(crate) phase: RevealPhase,
    pub(crate) zone: Zone,
    pub(crate) stagger_delay: f64,
    pub(crate) companion: Option<ElementId>,
    pub(crate) registration: RegistrationHandle,
}

impl RevealTarget {
    pub(crate) fn entrance(
        element: ElementId,
        trigger: ElementId,
        band: ActivationBand,
        entrance: Entrance,
        reversible: bool,
        stagger_delay: f64,
        registration: RegistrationHandle,
    ) -> FolioResult<Self> {
        entrance.validate()?;
        Ok(Self {
            element,
            trigger,
            band,
            motion: Motion::Entrance {
                entrance,
                playhead: Playhead::new(entrance.duration)?,
            },
            reversible,
            has_played: false,
            phase: RevealPhase::Idle,
            zone: Zone::Before,
            stagger_delay,
            companion: None,
            registration,
        })
    }

    pub(crate) fn idle(
        element: ElementId,
        motion: IdleMotion,
        registration: RegistrationHandle,
    ) -> Self {
        Self {
            trigger: element.clone(),
            element,
            band: ActivationBand::default(),
            motion: Motion::Idle(motion),
            reversible: false,
            has_played: false,
            phase: RevealPhase::Idle,
            zone: Zone::Before,
            stagger_delay: 0.0,
            companion: None,
            registration,
        }
    }

    /// Animated element.
    pub fn element(&self) -> &ElementId {
        &self.element
    }

    /// Element whose bounds decide when this target plays.
    pub fn trigger(&self) -> &ElementId {
        &self.trigger
    }

    /// Element that mirrors this target's entrance style (e.g. its label).
    pub fn companion(&self) -> Option<&ElementId> {
        self.companion.as_ref()
    }

    /// Activation thresholds.
    pub fn band(&self) -> &ActivationBand {
        &self.band
    }

    /// `true` for continuous decorative motion, which ignores scrolling.
    pub fn repeat(&self) -> bool {
        matches!(self.motion, Motion::Idle(_))
    }

    /// `true` when exiting the band backward replays the entrance in reverse.
    pub fn reversible(&self) -> bool {
        self.reversible
    }

    /// `true` once the entrance fired and has not been rewound.
    pub fn has_played(&self) -> bool {
        self.has_played
    }

    /// Current state-machine phase.
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Last observed zone of the trigger.
    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Registration this target belongs to.
    pub fn registration(&self) -> RegistrationHandle {
        self.registration
    }

    /// Entrance style at `now` (identity for idle targets).
    pub fn entrance_style(&self, now: Time) -> Style {
        match &self.motion {
            Motion::Entrance { entrance, playhead } => {
                let t = entrance.ease.apply(playhead.progress(now));
                Style::lerp(&entrance.from, &entrance.to, t)
            }
            Motion::Idle(_) => Style::IDENTITY,
        }
    }

    /// Idle offset at `now` (zero for entrance targets).
    pub fn idle_offset(&self, now: Time) -> Vec2 {
        match &self.motion {
            Motion::Idle(m) => m.sample(now),
            Motion::Entrance { .. } => Vec2::ZERO,
        }
    }

    /// Move to `zone`, applying every crossing in order.
    pub(crate) fn observe(&mut self, zone: Zone, now: Time, out: &mut Vec<RevealEvent>) {
        if self.repeat() {
            return;
        }
        for crossing in self.zone.crossings(zone) {
            if let Some(kind) = self.apply(*crossing, now) {
                out.push(RevealEvent {
                    element: self.element.clone(),
                    kind,
                    at: now,
                });
            }
        }
        self.zone = zone;
    }

    fn apply(&mut self, crossing: Crossing, now: Time) -> Option<RevealEventKind> {
        let Motion::Entrance { playhead, .. } = &mut self.motion else {
            return None;
        };
        match (crossing, self.phase) {
            (Crossing::Enter, RevealPhase::Idle) if !self.has_played => {
                playhead.play(now, self.stagger_delay);
            }
            (Crossing::Enter, RevealPhase::Exiting) => {
                playhead.play(now, self.stagger_delay);
            }
            (Crossing::LeaveBack, RevealPhase::Played) if self.reversible => {
                playhead.reverse(now);
                self.phase = RevealPhase::Exiting;
                tracing::debug!(element = %self.element, "reveal reversing");
                return Some(RevealEventKind::PlayBackward);
            }
            _ => return None,
        }
        self.phase = RevealPhase::Played;
        self.has_played = true;
        tracing::debug!(element = %self.element, delay = self.stagger_delay, "reveal playing");
        Some(RevealEventKind::PlayForward {
            delay: self.stagger_delay,
        })
    }

    /// Finish a completed backward play.
    pub(crate) fn settle(&mut self, now: Time) -> Option<RevealEvent> {
        let Motion::Entrance { playhead, .. } = &self.motion else {
            return None;
        };
        if self.phase == RevealPhase::Exiting && playhead.is_rewound(now) {
            self.phase = RevealPhase::Idle;
            self.has_played = false;
            return Some(RevealEvent {
                element: self.element.clone(),
                kind: RevealEventKind::Rewound,
                at: now,
            });
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/target.rs"]
mod tests;
