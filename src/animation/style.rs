use crate::foundation::core::Vec2;

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Visual state of one animated element: translation, opacity and scale.
///
/// This is the snapshot the host renders. Deserialization accepts partial objects (missing
/// properties take their identity value) and a `scale` shorthand for uniform scaling:
///
/// ```
/// let s: folio::Style = serde_json::from_str(r#"{ "y": 30, "opacity": 0, "scale": 0.9 }"#).unwrap();
/// assert_eq!(s.scale_x, 0.9);
/// assert_eq!(s.x, 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "StyleSpec")]
pub struct Style {
    /// Horizontal offset in pixels.
    pub x: f64,
    /// Vertical offset in pixels.
    pub y: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
}

impl Style {
    /// Untransformed, fully opaque.
    pub const IDENTITY: Style = Style {
        x: 0.0,
        y: 0.0,
        opacity: 1.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// Translation as a vector.
    pub fn translate(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Style with `delta` added to its translation.
    pub fn offset_by(self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..self
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Lerp for Style {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let tr = <Vec2 as Lerp>::lerp(&a.translate(), &b.translate(), t);
        Self {
            x: tr.x,
            y: tr.y,
            opacity: f64::lerp(&a.opacity, &b.opacity, t),
            scale_x: f64::lerp(&a.scale_x, &b.scale_x, t),
            scale_y: f64::lerp(&a.scale_y, &b.scale_y, t),
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct StyleSpec {
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    opacity: Option<f64>,
    #[serde(default)]
    scale: Option<f64>,
    #[serde(default)]
    scale_x: Option<f64>,
    #[serde(default)]
    scale_y: Option<f64>,
}

impl From<StyleSpec> for Style {
    fn from(s: StyleSpec) -> Self {
        Self {
            x: s.x.unwrap_or(0.0),
            y: s.y.unwrap_or(0.0),
            opacity: s.opacity.unwrap_or(1.0),
            scale_x: s.scale_x.or(s.scale).unwrap_or(1.0),
            scale_y: s.scale_y.or(s.scale).unwrap_or(1.0),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/style.rs"]
mod tests;
