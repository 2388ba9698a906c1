use crate::{
    foundation::core::{Fps, FrameRange, Time},
    foundation::error::{FolioError, FolioResult},
    session::page_session::{PageEvent, PageSession, PageSnapshot},
};

/// One scheduled host event.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptStep {
    /// Delivery time.
    pub at: Time,
    /// Event to deliver.
    pub event: PageEvent,
}

/// Time-ordered host events for headless simulation.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Steps in delivery order.
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Parse and validate a JSON script.
    pub fn from_json(json: &str) -> FolioResult<Self> {
        let script: Self = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    /// Steps must have finite, non-negative, non-decreasing times.
    pub fn validate(&self) -> FolioResult<()> {
        let mut last = Time::ZERO;
        for (i, step) in self.steps.iter().enumerate() {
            if !step.at.secs().is_finite() || step.at < last {
                return Err(FolioError::validation(format!(
                    "script step {i} at {} is out of order",
                    step.at.secs()
                )));
            }
            last = step.at;
        }
        Ok(())
    }
}

/// Drive `session` through `range` at `fps`, delivering each step before the first frame at or
/// after its time. Returns one snapshot per frame.
///
/// Steps later than the last frame are not delivered.
pub fn run_script(
    session: &mut PageSession,
    script: &Script,
    range: FrameRange,
    fps: Fps,
) -> FolioResult<Vec<PageSnapshot>> {
    script.validate()?;
    let mut steps = script.steps.iter().peekable();
    let mut out = Vec::with_capacity(range.len_frames() as usize);
    for frame in range.frames() {
        let t = fps.time_of(frame);
        while let Some(step) = steps.next_if(|s| s.at <= t) {
            session.dispatch(step.at, step.event.clone())?;
        }
        session.advance_to(t)?;
        out.push(session.snapshot());
    }
    tracing::debug!(frames = out.len(), "script finished");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/session/script.rs"]
mod tests;
