use std::collections::BTreeMap;

use crate::{
    animation::{ease::Ease, idle::IdleMotion, style::Style},
    foundation::core::{ElementId, Time, Vec2},
    foundation::error::{FolioError, FolioResult},
    reveal::band::ActivationBand,
    reveal::geometry::{Geometry, Viewport},
    reveal::target::{Entrance, Motion, RevealEvent, RevealTarget},
};

/// Opaque handle returned by registration, used to deregister.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RegistrationHandle(pub(crate) u64);

/// A set of elements revealed together when one trigger crosses its band.
///
/// Members play in registration order, each delayed by `stagger` more than the previous one.
#[derive(Clone, Debug)]
pub struct RevealGroup {
    /// Element whose bounds are tested against the band.
    pub trigger: ElementId,
    /// Activation thresholds.
    pub band: ActivationBand,
    /// Animated elements, in reveal order.
    pub members: Vec<ElementId>,
    /// Entrance animation shared by all members.
    pub entrance: Entrance,
    /// Per-member delay increment in seconds.
    pub stagger: f64,
    /// Play backward when scrolled back out past the start line.
    pub reversible: bool,
    /// Elements that mirror a member's entrance style (member -> companion).
    pub companions: BTreeMap<ElementId, ElementId>,
}

impl RevealGroup {
    /// Group with default band, no stagger, reversible.
    pub fn new(trigger: ElementId, members: Vec<ElementId>, entrance: Entrance) -> Self {
        Self {
            trigger,
            band: ActivationBand::default(),
            members,
            entrance,
            stagger: 0.0,
            reversible: true,
            companions: BTreeMap::new(),
        }
    }
}

/// Continuous decorative motion for a set of elements, independent of scrolling.
#[derive(Clone, Debug)]
pub struct IdleGroup {
    /// Animated elements, in phase order.
    pub members: Vec<ElementId>,
    /// Peak translation.
    pub offset: Vec2,
    /// Seconds per half cycle.
    pub half_period: f64,
    /// Easing of each half cycle.
    pub ease: Ease,
    /// Phase offset between consecutive members.
    pub stagger: f64,
}

/// Style of one element at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ElementStyle {
    /// Element id.
    pub element: ElementId,
    /// Style to render.
    pub style: Style,
}

fn check_stagger(stagger: f64) -> FolioResult<()> {
    if !stagger.is_finite() || stagger < 0.0 {
        return Err(FolioError::validation("stagger must be finite and >= 0"));
    }
    Ok(())
}

/// Turns viewport changes into entrance playback for every registered target.
///
/// One scheduler exists per page session and owns all targets; sections keep only the
/// [`RegistrationHandle`]s they were given. Targets are kept in registration order, which is
/// also the order events are produced in.
#[derive(Clone, Debug, Default)]
pub struct RevealScheduler {
    targets: Vec<RevealTarget>,
    next_handle: u64,
}

impl RevealScheduler {
    /// Empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> RegistrationHandle {
        self.next_handle += 1;
        RegistrationHandle(self.next_handle)
    }

    /// Register a reveal group. Its targets start in the initial style.
    pub fn register(&mut self, group: RevealGroup) -> FolioResult<RegistrationHandle> {
        if group.members.is_empty() {
            return Err(FolioError::validation(format!(
                "reveal group on '{}' has no members",
                group.trigger
            )));
        }
        check_stagger(group.stagger)?;
        group.entrance.validate()?;

        let handle = self.allocate();
        let mut batch = Vec::with_capacity(group.members.len());
        for (i, element) in group.members.into_iter().enumerate() {
            let mut target = RevealTarget::entrance(
                element,
                group.trigger.clone(),
                group.band,
                group.entrance,
                group.reversible,
                group.stagger * i as f64,
                handle,
            )?;
            target.companion = group.companions.get(&target.element).cloned();
            batch.push(target);
        }
        tracing::debug!(
            handle = handle.0,
            targets = batch.len(),
            trigger = %group.trigger,
            "reveal group registered"
        );
        self.targets.extend(batch);
        Ok(handle)
    }

    /// Register idle motion starting at `now`, member `i` phase-shifted by `i * stagger`.
    pub fn register_idle(
        &mut self,
        group: IdleGroup,
        now: Time,
    ) -> FolioResult<RegistrationHandle> {
        if group.members.is_empty() {
            return Err(FolioError::validation("idle group has no members"));
        }
        check_stagger(group.stagger)?;

        let handle = self.allocate();
        let mut batch = Vec::with_capacity(group.members.len());
        for (i, element) in group.members.into_iter().enumerate() {
            let motion = IdleMotion::new(
                group.offset,
                group.half_period,
                group.ease,
                now.after(group.stagger * i as f64),
            )?;
            batch.push(RevealTarget::idle(element, motion, handle));
        }
        tracing::debug!(handle = handle.0, targets = batch.len(), "idle group registered");
        self.targets.extend(batch);
        Ok(handle)
    }

    /// Remove every target of `handle`. Returns how many were removed; repeated calls return 0.
    pub fn deregister(&mut self, handle: RegistrationHandle) -> usize {
        let before = self.targets.len();
        self.targets.retain(|t| t.registration() != handle);
        let removed = before - self.targets.len();
        if removed > 0 {
            tracing::debug!(handle = handle.0, removed, "reveal registration removed");
        }
        removed
    }

    /// Number of live targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Live targets in registration order.
    pub fn targets(&self) -> impl Iterator<Item = &RevealTarget> {
        self.targets.iter()
    }

    /// First entrance target animating `element`.
    pub fn target(&self, element: &ElementId) -> Option<&RevealTarget> {
        self.targets
            .iter()
            .find(|t| !t.repeat() && &t.element == element)
    }

    /// Finish any backward play that has completed by `now`.
    pub fn settle(&mut self, now: Time) -> Vec<RevealEvent> {
        self.targets.iter_mut().filter_map(|t| t.settle(now)).collect()
    }

    /// Re-evaluate every target against the viewport.
    ///
    /// Targets whose element or trigger no longer has bounds are pruned before anything else
    /// happens, so a stale element is never animated.
    pub fn update(
        &mut self,
        now: Time,
        viewport: &Viewport,
        geometry: &dyn Geometry,
    ) -> Vec<RevealEvent> {
        let before = self.targets.len();
        self.targets.retain(|t| {
            let live =
                geometry.bounds(&t.element).is_some() && geometry.bounds(&t.trigger).is_some();
            if !live {
                tracing::warn!(element = %t.element, "pruning reveal target with stale element");
            }
            live
        });
        if self.targets.len() != before {
            tracing::debug!(pruned = before - self.targets.len(), "stale reveal targets pruned");
        }

        let mut events = self.settle(now);
        for t in &mut self.targets {
            if t.repeat() {
                continue;
            }
            let Some(doc) = geometry.bounds(&t.trigger) else {
                continue;
            };
            let zone = t.band.zone(viewport.to_viewport(doc), viewport.height);
            t.observe(zone, now, &mut events);
        }
        events
    }

    /// Style of `element` at `now`: its entrance style (or that of the target it accompanies)
    /// plus every idle offset. `None` if nothing animates it.
    pub fn style_of(&self, element: &ElementId, now: Time) -> Option<Style> {
        let mut base = None;
        let mut offset = Vec2::ZERO;
        let mut idle = false;
        for t in &self.targets {
            match &t.motion {
                Motion::Entrance { .. } => {
                    if base.is_none()
                        && (&t.element == element || t.companion.as_ref() == Some(element))
                    {
                        base = Some(t.entrance_style(now));
                    }
                }
                Motion::Idle(_) => {
                    if &t.element == element {
                        idle = true;
                        offset += t.idle_offset(now);
                    }
                }
            }
        }
        if base.is_none() && !idle {
            return None;
        }
        Some(base.unwrap_or(Style::IDENTITY).offset_by(offset))
    }

    /// Styles of every animated element (members and companions), sorted by id.
    pub fn snapshot(&self, now: Time) -> Vec<ElementStyle> {
        let mut ids: Vec<&ElementId> = Vec::new();
        for t in &self.targets {
            ids.push(&t.element);
            if let Some(c) = &t.companion {
                ids.push(c);
            }
        }
        ids.sort();
        ids.dedup();
        ids.into_iter()
            .filter_map(|id| {
                self.style_of(id, now).map(|style| ElementStyle {
                    element: id.clone(),
                    style,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/scheduler.rs"]
mod tests;
