use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::{ease::Ease, style::Style, timeline::Position},
    carousel::{autoplay::CarouselOpts, slide::Slide},
    form::field::{FieldBinding, FormOpts},
    foundation::core::{ElementId, Rect, Vec2},
    foundation::error::{FolioError, FolioResult},
    reveal::band::ActivationBand,
    reveal::geometry::Viewport,
    reveal::scheduler::{IdleGroup, RevealGroup},
    reveal::target::Entrance,
};

fn default_band_start() -> String {
    "top 80%".to_string()
}

fn default_band_end() -> String {
    "bottom 20%".to_string()
}

fn default_true() -> bool {
    true
}

fn default_half_period() -> f64 {
    2.0
}

fn default_idle_ease() -> Ease {
    Ease::InOutCubic
}

fn default_intro_duration() -> f64 {
    1.0
}

/// Full description of a portfolio page: viewport, sections and their motion.
///
/// Element names inside a section are local; the engine addresses them as `"<section>/<name>"`.
/// A section itself is addressable by its bare id and is the default reveal trigger.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    /// Initial viewport.
    pub viewport: Viewport,
    /// Page-load intro, played once from session start.
    #[serde(default)]
    pub intro: Vec<IntroEntry>,
    /// Sections in document order.
    pub sections: Vec<SectionConfig>,
}

/// One entry of the page-load intro timeline.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntroEntry {
    /// Fully scoped element id, e.g. `"hero/title"`.
    pub element: ElementId,
    /// Style before the entry starts.
    pub from: Style,
    /// Style after it ends.
    #[serde(default)]
    pub to: Style,
    /// Duration in seconds.
    #[serde(default = "default_intro_duration")]
    pub duration: f64,
    /// Easing curve.
    #[serde(default)]
    pub ease: Ease,
    /// Placement relative to previous entries.
    #[serde(default)]
    pub position: Position,
}

/// A page section with its document bounds and motion.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    /// Section id, unique on the page.
    pub id: String,
    /// Document-space bounds of the section.
    pub bounds: Rect,
    /// Document-space bounds of named elements.
    #[serde(default)]
    pub elements: BTreeMap<String, Rect>,
    /// Scroll-triggered reveal groups.
    #[serde(default)]
    pub reveals: Vec<RevealConfig>,
    /// Decorative idle motion groups.
    #[serde(default)]
    pub idle: Vec<IdleConfig>,
    /// Autoplay carousel hosted by this section.
    #[serde(default)]
    pub carousel: Option<CarouselConfig>,
    /// Contact form hosted by this section.
    #[serde(default)]
    pub form: Option<FormConfig>,
}

/// Reveal group as written in JSON.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevealConfig {
    /// Trigger element name; the section itself when absent.
    #[serde(default)]
    pub trigger: Option<String>,
    /// Start line, e.g. `"top 80%"`.
    #[serde(default = "default_band_start")]
    pub start: String,
    /// End line, e.g. `"bottom 20%"`.
    #[serde(default = "default_band_end")]
    pub end: String,
    /// Member element names, in reveal order.
    pub members: Vec<String>,
    /// Entrance animation.
    pub entrance: Entrance,
    /// Per-member delay increment.
    #[serde(default)]
    pub stagger: f64,
    /// Play backward on reverse exit.
    #[serde(default = "default_true")]
    pub reversible: bool,
    /// Member name -> companion element name.
    #[serde(default)]
    pub companions: BTreeMap<String, String>,
}

/// Idle group as written in JSON.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdleConfig {
    /// Member element names, in phase order.
    pub members: Vec<String>,
    /// Peak translation.
    pub offset: Vec2,
    /// Seconds per half cycle.
    #[serde(default = "default_half_period")]
    pub half_period: f64,
    /// Easing of each half cycle.
    #[serde(default = "default_idle_ease")]
    pub ease: Ease,
    /// Phase offset between members.
    #[serde(default)]
    pub stagger: f64,
}

/// Carousel as written in JSON.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarouselConfig {
    /// Timing and geometry.
    #[serde(default)]
    pub opts: CarouselOpts,
    /// Slides in display order.
    #[serde(default)]
    pub slides: Vec<Slide>,
}

/// One input/label pair as written in JSON.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    /// Input element name.
    pub input: String,
    /// Label element name.
    pub label: String,
}

/// Contact form as written in JSON.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormConfig {
    /// Form element name.
    pub element: String,
    /// Input/label pairs.
    pub fields: Vec<FieldConfig>,
    /// Label and pulse timing.
    #[serde(default)]
    pub opts: FormOpts,
}

fn check_rect(what: &str, r: Rect) -> FolioResult<()> {
    let finite = [r.x0, r.y0, r.x1, r.y1].iter().all(|v| v.is_finite());
    if !finite || r.x1 < r.x0 || r.y1 < r.y0 {
        return Err(FolioError::validation(format!(
            "{what} bounds must be finite with x0 <= x1 and y0 <= y1"
        )));
    }
    Ok(())
}

fn check_non_negative(what: &str, v: f64) -> FolioResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(FolioError::validation(format!(
            "{what} must be finite and >= 0"
        )));
    }
    Ok(())
}

impl PageConfig {
    /// Parse and validate a JSON page description.
    pub fn from_json(json: &str) -> FolioResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Look up a section by id.
    pub fn section(&self, id: &str) -> Option<&SectionConfig> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Every addressable element id with its document bounds.
    pub fn layout_entries(&self) -> Vec<(ElementId, Rect)> {
        self.sections
            .iter()
            .flat_map(SectionConfig::layout_entries)
            .collect()
    }

    /// Check structural invariants.
    pub fn validate(&self) -> FolioResult<()> {
        self.viewport.validate()?;

        let mut ids = BTreeSet::new();
        for s in &self.sections {
            if !ids.insert(s.id.as_str()) {
                return Err(FolioError::validation(format!(
                    "duplicate section id '{}'",
                    s.id
                )));
            }
            s.validate()?;
        }

        let known: BTreeSet<ElementId> = self
            .layout_entries()
            .into_iter()
            .map(|(e, _)| e)
            .collect();
        for entry in &self.intro {
            if !known.contains(&entry.element) {
                return Err(FolioError::validation(format!(
                    "intro references unknown element '{}'",
                    entry.element
                )));
            }
            check_non_negative("intro duration", entry.duration)?;
            match entry.position {
                Position::Sequential => {}
                Position::Overlap(v) | Position::Gap(v) | Position::At(v) => {
                    check_non_negative("intro position", v)?;
                }
            }
        }
        Ok(())
    }
}

impl SectionConfig {
    /// Scoped id of a local element name.
    pub fn element_id(&self, name: &str) -> ElementId {
        ElementId::scoped(&self.id, name)
    }

    /// Id of the section itself.
    pub fn section_element(&self) -> ElementId {
        ElementId(self.id.clone())
    }

    fn has_element(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    fn require(&self, what: &str, name: &str) -> FolioResult<()> {
        if !self.has_element(name) {
            return Err(FolioError::validation(format!(
                "section '{}': {what} references unknown element '{name}'",
                self.id
            )));
        }
        Ok(())
    }

    /// Section bounds plus every named element, scoped.
    pub fn layout_entries(&self) -> Vec<(ElementId, Rect)> {
        let mut out = Vec::with_capacity(self.elements.len() + 1);
        out.push((self.section_element(), self.bounds));
        for (name, rect) in &self.elements {
            out.push((self.element_id(name), *rect));
        }
        out
    }

    /// Check ids, references and timings.
    pub fn validate(&self) -> FolioResult<()> {
        if self.id.trim().is_empty() || self.id.contains('/') {
            return Err(FolioError::validation(format!(
                "section id '{}' must be non-empty and contain no '/'",
                self.id
            )));
        }
        check_rect(&format!("section '{}'", self.id), self.bounds)?;
        for (name, rect) in &self.elements {
            if name.trim().is_empty() {
                return Err(FolioError::validation(format!(
                    "section '{}' has an element with an empty name",
                    self.id
                )));
            }
            check_rect(&format!("element '{}/{name}'", self.id), *rect)?;
        }

        for r in &self.reveals {
            if let Some(t) = &r.trigger {
                self.require("reveal trigger", t)?;
            }
            if r.members.is_empty() {
                return Err(FolioError::validation(format!(
                    "section '{}' has a reveal group without members",
                    self.id
                )));
            }
            for m in &r.members {
                self.require("reveal member", m)?;
            }
            for (member, companion) in &r.companions {
                if !r.members.contains(member) {
                    return Err(FolioError::validation(format!(
                        "section '{}': companion key '{member}' is not a reveal member",
                        self.id
                    )));
                }
                self.require("reveal companion", companion)?;
            }
            ActivationBand::parse(&r.start, &r.end)?;
            r.entrance.validate()?;
            check_non_negative("reveal stagger", r.stagger)?;
        }

        for g in &self.idle {
            if g.members.is_empty() {
                return Err(FolioError::validation(format!(
                    "section '{}' has an idle group without members",
                    self.id
                )));
            }
            for m in &g.members {
                self.require("idle member", m)?;
            }
            if !g.half_period.is_finite() || g.half_period <= 0.0 {
                return Err(FolioError::validation("idle half_period must be finite and > 0"));
            }
            check_non_negative("idle stagger", g.stagger)?;
        }

        if let Some(c) = &self.carousel {
            c.opts.validate()?;
            if c.slides.is_empty() {
                tracing::warn!(section = %self.id, "carousel has no slides");
            }
            for slide in &c.slides {
                slide.validate()?;
            }
        }

        if let Some(f) = &self.form {
            self.require("form", &f.element)?;
            f.opts.validate()?;
            let mut seen = BTreeSet::new();
            for field in &f.fields {
                self.require("form input", &field.input)?;
                self.require("form label", &field.label)?;
                if !seen.insert(field.input.as_str()) || !seen.insert(field.label.as_str()) {
                    return Err(FolioError::validation(format!(
                        "section '{}': form element '{}' is bound twice",
                        self.id, field.input
                    )));
                }
            }
        }
        Ok(())
    }

    /// Reveal groups with scoped ids and parsed bands.
    pub fn reveal_groups(&self) -> FolioResult<Vec<RevealGroup>> {
        self.reveals
            .iter()
            .map(|r| {
                let trigger = match &r.trigger {
                    Some(t) => self.element_id(t),
                    None => self.section_element(),
                };
                let members = r.members.iter().map(|m| self.element_id(m)).collect();
                let mut group = RevealGroup::new(trigger, members, r.entrance);
                group.band = ActivationBand::parse(&r.start, &r.end)?;
                group.stagger = r.stagger;
                group.reversible = r.reversible;
                group.companions = r
                    .companions
                    .iter()
                    .map(|(m, c)| (self.element_id(m), self.element_id(c)))
                    .collect();
                Ok(group)
            })
            .collect()
    }

    /// Idle groups with scoped ids.
    pub fn idle_groups(&self) -> Vec<IdleGroup> {
        self.idle
            .iter()
            .map(|g| IdleGroup {
                members: g.members.iter().map(|m| self.element_id(m)).collect(),
                offset: g.offset,
                half_period: g.half_period,
                ease: g.ease,
                stagger: g.stagger,
            })
            .collect()
    }

    /// Form bindings with scoped ids.
    pub fn field_bindings(&self) -> Vec<FieldBinding> {
        self.form
            .iter()
            .flat_map(|f| f.fields.iter())
            .map(|f| FieldBinding {
                input: self.element_id(&f.input),
                label: self.element_id(&f.label),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/page.rs"]
mod tests;
