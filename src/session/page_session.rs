use std::collections::BTreeMap;

use crate::{
    animation::{style::Style, timeline::Timeline},
    carousel::autoplay::{AutoplayCarousel, CarouselSnapshot},
    form::field::ContactForm,
    foundation::core::{ElementId, Time},
    foundation::error::{FolioError, FolioResult},
    reveal::geometry::{DocumentLayout, Geometry, Viewport},
    reveal::scheduler::{ElementStyle, RegistrationHandle, RevealScheduler},
    reveal::target::RevealEvent,
    scene::page::{PageConfig, SectionConfig},
};

/// Host notification delivered to a [`PageSession`].
///
/// Section and field names are the ids used in the [`PageConfig`]; fields are addressed by their
/// local input name.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// Viewport scrolled to document offset `y`.
    Scroll {
        /// New scroll offset.
        y: f64,
    },
    /// Viewport resized.
    Resize {
        /// New width.
        width: f64,
        /// New height.
        height: f64,
    },
    /// "Next" control of a carousel.
    CarouselNext {
        /// Hosting section.
        section: String,
    },
    /// "Previous" control of a carousel.
    CarouselPrev {
        /// Hosting section.
        section: String,
    },
    /// Indicator dot selection.
    CarouselJump {
        /// Hosting section.
        section: String,
        /// Requested slide.
        index: usize,
    },
    /// A form input gained focus.
    Focus {
        /// Hosting section.
        section: String,
        /// Input name.
        field: String,
    },
    /// A form input lost focus.
    Blur {
        /// Hosting section.
        section: String,
        /// Input name.
        field: String,
        /// Whether the input holds a value.
        #[serde(default)]
        has_value: bool,
    },
    /// The form was submitted.
    Submit {
        /// Hosting section.
        section: String,
    },
    /// Mount a previously unmounted section.
    Mount {
        /// Section id.
        section: String,
    },
    /// Tear a section down.
    Unmount {
        /// Section id.
        section: String,
    },
}

/// Everything the host needs to render one instant of the page.
#[derive(Clone, Debug, serde::Serialize)]
pub struct PageSnapshot {
    /// Session time.
    pub time: Time,
    /// Viewport scroll offset.
    pub scroll_y: f64,
    /// Carousels by hosting section.
    pub carousels: BTreeMap<String, CarouselSnapshot>,
    /// Styles of every animated element, sorted by id.
    pub elements: Vec<ElementStyle>,
}

#[derive(Clone, Debug, Default)]
struct MountedSection {
    handles: Vec<RegistrationHandle>,
    carousel: Option<AutoplayCarousel>,
    form: Option<ContactForm>,
}

/// The single event-delivery context of a page.
///
/// Every timer tick, scroll notification and user command is applied here, one at a time, in
/// time order. Before an event at `t` is applied the session first advances to `t`, so a
/// carousel tick due at `t` lands before a user command at `t` and the command has the last
/// word.
#[derive(Debug)]
pub struct PageSession {
    config: PageConfig,
    now: Time,
    viewport: Viewport,
    layout: DocumentLayout,
    scheduler: RevealScheduler,
    intro: Timeline,
    sections: BTreeMap<String, MountedSection>,
    reveal_log: Vec<RevealEvent>,
}

impl PageSession {
    /// Validate `config`, mount every section at `Time::ZERO` and start the intro.
    #[tracing::instrument(skip(config), fields(sections = config.sections.len()))]
    pub fn new(config: PageConfig) -> FolioResult<Self> {
        config.validate()?;
        let mut intro = Timeline::new(Time::ZERO);
        for entry in &config.intro {
            intro.push(
                entry.element.clone(),
                entry.from,
                entry.to,
                entry.duration,
                entry.ease,
                entry.position,
            )?;
        }

        let mut session = Self {
            viewport: config.viewport,
            config,
            now: Time::ZERO,
            layout: DocumentLayout::new(),
            scheduler: RevealScheduler::new(),
            intro,
            sections: BTreeMap::new(),
            reveal_log: Vec::new(),
        };
        let ids: Vec<String> = session.config.sections.iter().map(|s| s.id.clone()).collect();
        for id in &ids {
            session.mount(id)?;
        }
        session.observe();
        tracing::debug!(
            targets = session.scheduler.len(),
            intro_secs = session.intro.duration(),
            "page session started"
        );
        Ok(session)
    }

    /// Current session time.
    pub fn now(&self) -> Time {
        self.now
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Page description the session was built from.
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Reveal scheduler (read-only).
    pub fn scheduler(&self) -> &RevealScheduler {
        &self.scheduler
    }

    /// Every reveal event produced so far, in order.
    pub fn reveal_events(&self) -> &[RevealEvent] {
        &self.reveal_log
    }

    /// `true` while `section` is mounted.
    pub fn is_mounted(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Carousel hosted by `section`, if mounted.
    pub fn carousel(&self, section: &str) -> Option<&AutoplayCarousel> {
        self.sections.get(section).and_then(|s| s.carousel.as_ref())
    }

    /// Contact form hosted by `section`, if mounted.
    pub fn form(&self, section: &str) -> Option<&ContactForm> {
        self.sections.get(section).and_then(|s| s.form.as_ref())
    }

    /// Move the clock to `now`: fire due carousel ticks and settle finished reverse plays.
    pub fn advance_to(&mut self, now: Time) -> FolioResult<()> {
        if !now.secs().is_finite() || now < self.now {
            return Err(FolioError::evaluation(format!(
                "cannot move session time backwards from {} to {}",
                self.now.secs(),
                now.secs()
            )));
        }
        for (id, section) in &mut self.sections {
            if let Some(c) = section.carousel.as_mut() {
                let n = c.tick(now);
                if n > 0 {
                    tracing::trace!(section = %id, ticks = n, "carousel ticks applied");
                }
            }
        }
        let settled = self.scheduler.settle(now);
        self.reveal_log.extend(settled);
        self.now = now;
        Ok(())
    }

    /// Advance to `at`, then apply `event`. Returns the reveal events it caused.
    #[tracing::instrument(skip(self, at), fields(at = at.secs()))]
    pub fn dispatch(&mut self, at: Time, event: PageEvent) -> FolioResult<Vec<RevealEvent>> {
        let logged = self.reveal_log.len();
        self.advance_to(at)?;
        match event {
            PageEvent::Scroll { y } => {
                if !y.is_finite() {
                    return Err(FolioError::evaluation("scroll offset must be finite"));
                }
                self.viewport.scroll_y = y;
                self.observe();
            }
            PageEvent::Resize { width, height } => {
                let resized = Viewport {
                    width,
                    height,
                    ..self.viewport
                };
                resized.validate()?;
                self.viewport = resized;
                self.observe();
            }
            PageEvent::CarouselNext { section } => self.carousel_mut(&section)?.advance(at),
            PageEvent::CarouselPrev { section } => self.carousel_mut(&section)?.retreat(at),
            PageEvent::CarouselJump { section, index } => {
                self.carousel_mut(&section)?.jump_to(index, at)
            }
            PageEvent::Focus { section, field } => {
                let input = ElementId::scoped(&section, &field);
                self.form_mut(&section)?.focus(&input, at)?;
            }
            PageEvent::Blur {
                section,
                field,
                has_value,
            } => {
                let input = ElementId::scoped(&section, &field);
                self.form_mut(&section)?.blur(&input, has_value, at)?;
            }
            PageEvent::Submit { section } => self.form_mut(&section)?.submit(at),
            PageEvent::Mount { section } => {
                self.mount(&section)?;
                self.observe();
            }
            PageEvent::Unmount { section } => self.unmount(&section)?,
        }
        Ok(self.reveal_log[logged..].to_vec())
    }

    fn observe(&mut self) {
        let events = self.scheduler.update(self.now, &self.viewport, &self.layout);
        self.reveal_log.extend(events);
    }

    fn section_config(&self, id: &str) -> FolioResult<&SectionConfig> {
        self.config
            .section(id)
            .ok_or_else(|| FolioError::evaluation(format!("unknown section '{id}'")))
    }

    fn mounted_mut(&mut self, id: &str) -> FolioResult<&mut MountedSection> {
        self.sections
            .get_mut(id)
            .ok_or_else(|| FolioError::evaluation(format!("section '{id}' is not mounted")))
    }

    fn carousel_mut(&mut self, id: &str) -> FolioResult<&mut AutoplayCarousel> {
        self.mounted_mut(id)?
            .carousel
            .as_mut()
            .ok_or_else(|| FolioError::evaluation(format!("section '{id}' has no carousel")))
    }

    fn form_mut(&mut self, id: &str) -> FolioResult<&mut ContactForm> {
        self.mounted_mut(id)?
            .form
            .as_mut()
            .ok_or_else(|| FolioError::evaluation(format!("section '{id}' has no form")))
    }

    fn mount(&mut self, id: &str) -> FolioResult<()> {
        if self.sections.contains_key(id) {
            tracing::debug!(section = id, "section already mounted");
            return Ok(());
        }
        let now = self.now;
        let cfg = self.section_config(id)?.clone();
        for (element, bounds) in cfg.layout_entries() {
            self.layout.insert(element, bounds);
        }

        let mut mounted = MountedSection::default();
        for group in cfg.reveal_groups()? {
            mounted.handles.push(self.scheduler.register(group)?);
        }
        for group in cfg.idle_groups() {
            mounted.handles.push(self.scheduler.register_idle(group, now)?);
        }
        if let Some(c) = &cfg.carousel {
            mounted.carousel = Some(AutoplayCarousel::mount(
                c.slides.clone(),
                c.opts.clone(),
                now,
            )?);
        }
        if let Some(f) = &cfg.form {
            mounted.form = Some(ContactForm::new(
                cfg.element_id(&f.element),
                cfg.field_bindings(),
                f.opts.clone(),
            )?);
        }
        tracing::debug!(section = id, registrations = mounted.handles.len(), "section mounted");
        self.sections.insert(id.to_string(), mounted);
        Ok(())
    }

    fn unmount(&mut self, id: &str) -> FolioResult<()> {
        let Some(mut mounted) = self.sections.remove(id) else {
            self.section_config(id)?;
            tracing::debug!(section = id, "section already unmounted");
            return Ok(());
        };
        if let Some(c) = mounted.carousel.as_mut() {
            c.unmount();
        }
        let removed: usize = mounted
            .handles
            .iter()
            .map(|h| self.scheduler.deregister(*h))
            .sum();
        self.layout.remove_section(id);
        self.layout.remove(&ElementId(id.to_string()));
        tracing::debug!(section = id, removed, "section unmounted");
        Ok(())
    }

    /// Render-ready view of the page at the current time.
    pub fn snapshot(&self) -> PageSnapshot {
        let now = self.now;
        let mut styles: BTreeMap<ElementId, Style> = self
            .scheduler
            .snapshot(now)
            .into_iter()
            .map(|s| (s.element, s.style))
            .collect();

        for element in self.intro.elements() {
            if self.layout.bounds(element).is_none() {
                continue;
            }
            if let Some(style) = self.intro.sample(element, now) {
                styles.insert(element.clone(), style);
            }
        }

        let mut carousels = BTreeMap::new();
        for (id, section) in &self.sections {
            if let Some(c) = &section.carousel {
                carousels.insert(id.clone(), c.snapshot(now));
            }
            if let Some(form) = &section.form {
                for label in form.label_styles(now) {
                    styles.insert(label.element, label.style);
                }
                let scale = form.form_scale(now);
                let entry = styles.entry(form.form().clone()).or_insert(Style::IDENTITY);
                entry.scale_x *= scale;
                entry.scale_y *= scale;
            }
        }

        PageSnapshot {
            time: now,
            scroll_y: self.viewport.scroll_y,
            carousels,
            elements: styles
                .into_iter()
                .map(|(element, style)| ElementStyle { element, style })
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/page_session.rs"]
mod tests;
