use crate::{
    animation::{ease::Ease, style::Style, tween::Tween},
    foundation::core::{ElementId, Time},
    foundation::error::{FolioError, FolioResult},
    reveal::scheduler::ElementStyle,
};

fn default_raised() -> Style {
    Style {
        y: -25.0,
        scale_x: 0.8,
        scale_y: 0.8,
        ..Style::IDENTITY
    }
}

fn default_label_secs() -> f64 {
    0.3
}

fn default_label_ease() -> Ease {
    Ease::OutCubic
}

fn default_pulse_scale() -> f64 {
    1.05
}

fn default_pulse_secs() -> f64 {
    0.2
}

/// Association of a form input with its floating label, fixed at registration.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldBinding {
    /// Input element.
    pub input: ElementId,
    /// Label element that floats above the input.
    pub label: ElementId,
}

/// Floating-label and submit-pulse timing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FormOpts {
    /// Label style while raised.
    #[serde(default = "default_raised")]
    pub raised: Style,
    /// Label move duration.
    #[serde(default = "default_label_secs")]
    pub label_secs: f64,
    /// Label move easing.
    #[serde(default = "default_label_ease")]
    pub label_ease: Ease,
    /// Peak form scale of the submit pulse.
    #[serde(default = "default_pulse_scale")]
    pub pulse_scale: f64,
    /// Seconds for each half of the pulse.
    #[serde(default = "default_pulse_secs")]
    pub pulse_secs: f64,
}

impl Default for FormOpts {
    fn default() -> Self {
        Self {
            raised: default_raised(),
            label_secs: default_label_secs(),
            label_ease: default_label_ease(),
            pulse_scale: default_pulse_scale(),
            pulse_secs: default_pulse_secs(),
        }
    }
}

impl FormOpts {
    /// Check durations and scale.
    pub fn validate(&self) -> FolioResult<()> {
        if !self.label_secs.is_finite() || self.label_secs < 0.0 {
            return Err(FolioError::validation("form label_secs must be finite and >= 0"));
        }
        if !self.pulse_secs.is_finite() || self.pulse_secs <= 0.0 {
            return Err(FolioError::validation("form pulse_secs must be finite and > 0"));
        }
        if !self.pulse_scale.is_finite() || self.pulse_scale <= 0.0 {
            return Err(FolioError::validation("form pulse_scale must be finite and > 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
struct Field {
    binding: FieldBinding,
    focused: bool,
    has_value: bool,
    label: Tween<Style>,
}

#[derive(Clone, Copy, Debug)]
struct Pulse {
    start: Time,
    half: f64,
    peak: f64,
}

impl Pulse {
    // Out over one half, back over the other (yoyo once).
    fn scale(&self, now: Time) -> f64 {
        if now < self.start {
            return 1.0;
        }
        let local = now.since(self.start) / self.half;
        let t = if local < 1.0 {
            Ease::OutQuad.apply(local)
        } else if local < 2.0 {
            Ease::OutQuad.apply(2.0 - local)
        } else {
            0.0
        };
        1.0 + (self.peak - 1.0) * t
    }
}

/// Contact form motion: labels float up on focus and stay up while their input has a value;
/// a successful submit pulses the form.
#[derive(Clone, Debug)]
pub struct ContactForm {
    form: ElementId,
    fields: Vec<Field>,
    opts: FormOpts,
    pulse: Option<Pulse>,
    submissions: u64,
}

impl ContactForm {
    /// Bind inputs to labels. Inputs and labels must be unique.
    pub fn new(form: ElementId, bindings: Vec<FieldBinding>, opts: FormOpts) -> FolioResult<Self> {
        opts.validate()?;
        let mut fields: Vec<Field> = Vec::with_capacity(bindings.len());
        for binding in bindings {
            if fields
                .iter()
                .any(|f| f.binding.input == binding.input || f.binding.label == binding.label)
            {
                return Err(FolioError::validation(format!(
                    "form field '{}' is bound twice",
                    binding.input
                )));
            }
            fields.push(Field {
                binding,
                focused: false,
                has_value: false,
                label: Tween::settled(Style::IDENTITY),
            });
        }
        Ok(Self {
            form,
            fields,
            opts,
            pulse: None,
            submissions: 0,
        })
    }

    fn field_mut(&mut self, input: &ElementId) -> FolioResult<&mut Field> {
        self.fields
            .iter_mut()
            .find(|f| &f.binding.input == input)
            .ok_or_else(|| FolioError::evaluation(format!("unknown form input '{input}'")))
    }

    /// Form element.
    pub fn form(&self) -> &ElementId {
        &self.form
    }

    /// Label bound to `input`.
    pub fn label_of(&self, input: &ElementId) -> Option<&ElementId> {
        self.fields
            .iter()
            .find(|f| &f.binding.input == input)
            .map(|f| &f.binding.label)
    }

    /// Number of completed submissions.
    pub fn submissions(&self) -> u64 {
        self.submissions
    }

    /// Input gained focus: raise its label.
    pub fn focus(&mut self, input: &ElementId, now: Time) -> FolioResult<()> {
        let (raised, secs, ease) = (self.opts.raised, self.opts.label_secs, self.opts.label_ease);
        let field = self.field_mut(input)?;
        field.focused = true;
        field.label.retarget_with(now, raised, secs, ease);
        Ok(())
    }

    /// Input lost focus: lower its label unless the input holds a value.
    pub fn blur(&mut self, input: &ElementId, has_value: bool, now: Time) -> FolioResult<()> {
        let (secs, ease) = (self.opts.label_secs, self.opts.label_ease);
        let field = self.field_mut(input)?;
        field.focused = false;
        field.has_value = has_value;
        if !has_value {
            field.label.retarget_with(now, Style::IDENTITY, secs, ease);
        }
        Ok(())
    }

    /// Record a successful (stubbed) submission: values are cleared and the form pulses.
    pub fn submit(&mut self, now: Time) {
        for f in &mut self.fields {
            f.has_value = false;
        }
        self.submissions += 1;
        self.pulse = Some(Pulse {
            start: now,
            half: self.opts.pulse_secs,
            peak: self.opts.pulse_scale,
        });
        tracing::debug!(form = %self.form, submissions = self.submissions, "form submitted");
    }

    /// Uniform scale factor of the form element at `now`.
    pub fn form_scale(&self, now: Time) -> f64 {
        self.pulse.map_or(1.0, |p| p.scale(now))
    }

    /// Label styles at `now`, in binding order.
    pub fn label_styles(&self, now: Time) -> Vec<ElementStyle> {
        self.fields
            .iter()
            .map(|f| ElementStyle {
                element: f.binding.label.clone(),
                style: f.label.sample(now),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/form/field.rs"]
mod tests;
