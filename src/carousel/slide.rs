use crate::foundation::error::{FolioError, FolioResult};

/// Accent color family of a slide card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    /// Blue accent.
    #[default]
    Blue,
    /// Green accent.
    Green,
    /// Purple accent.
    Purple,
    /// Orange accent.
    Orange,
    /// Indigo accent.
    Indigo,
    /// Pink accent.
    Pink,
}

/// One immutable achievement card shown by the carousel.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Slide {
    /// Headline, e.g. the certification name.
    pub title: String,
    /// Issuing organisation.
    pub issuer: String,
    /// Human-readable issue date.
    pub date: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Ordered skill tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Image reference (URL or asset path), opaque to the engine.
    #[serde(default)]
    pub image_ref: String,
    /// Accent color.
    #[serde(default)]
    pub color_tag: ColorTag,
    /// Credential identifier printed on the card.
    #[serde(default)]
    pub credential_id: Option<String>,
}

impl Slide {
    /// Check the fields the carousel relies on.
    pub fn validate(&self) -> FolioResult<()> {
        if self.title.trim().is_empty() {
            return Err(FolioError::validation("slide title must be non-empty"));
        }
        if self.tags.iter().any(|t| t.trim().is_empty()) {
            return Err(FolioError::validation(format!(
                "slide '{}' has an empty tag",
                self.title
            )));
        }
        Ok(())
    }
}
