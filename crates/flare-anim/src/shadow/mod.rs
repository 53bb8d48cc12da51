//! Drop shadow descriptions and their canonical form.
//!
//! A drop shadow reaches the engine in one of two authoring encodings, a
//! layer style ([`DropShadowStyle`]) or an effect ([`DropShadowEffect`]).
//! Both implement [`ShadowModel`], whose accessors translate each field into
//! canonical units on its own. [`ShadowSource`] tags the encoding and
//! projects it into a [`CanonicalShadow`] that the emitter consumes.
//!
//! ```text
//! DropShadowStyle ─┐
//!                  ├─ ShadowModel accessors ─> CanonicalShadow ─> emitter
//! DropShadowEffect ┘
//! ```

pub mod effect;
pub mod regression;
pub mod style;

use serde::{Deserialize, Serialize};

use crate::keyframe::KeyframeGroup;
use crate::value::Color;

pub use effect::DropShadowEffect;
pub use regression::QuadraticFit;
pub use style::DropShadowStyle;

/// Canonical accessors of a shadow description.
///
/// Each accessor depends on its own source field only, and returns `None`
/// when that field is missing.
pub trait ShadowModel {
    /// 0–100.
    fn opacity(&self) -> Option<KeyframeGroup<f64>>;
    fn color(&self) -> Option<KeyframeGroup<Color>>;
    /// Blur radius in render units.
    fn radius(&self) -> Option<KeyframeGroup<f64>>;
    /// Degrees from the renderer's zero direction.
    fn angle(&self) -> Option<KeyframeGroup<f64>>;
    /// Offset magnitude in render units.
    fn distance(&self) -> Option<KeyframeGroup<f64>>;
}

/// Renderer-agnostic shadow, every field optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanonicalShadow {
    pub opacity: Option<KeyframeGroup<f64>>,
    pub radius: Option<KeyframeGroup<f64>>,
    pub color: Option<KeyframeGroup<Color>>,
    pub angle: Option<KeyframeGroup<f64>>,
    pub distance: Option<KeyframeGroup<f64>>,
}

impl CanonicalShadow {
    pub fn from_model<M: ShadowModel + ?Sized>(model: &M) -> Self {
        Self {
            opacity: model.opacity(),
            radius: model.radius(),
            color: model.color(),
            angle: model.angle(),
            distance: model.distance(),
        }
    }

    /// No field present at all.
    pub fn is_empty(&self) -> bool {
        self.opacity.is_none()
            && self.radius.is_none()
            && self.color.is_none()
            && self.angle.is_none()
            && self.distance.is_none()
    }
}

/// A drop shadow in one of its authoring encodings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShadowSource {
    Style(DropShadowStyle),
    Effect(DropShadowEffect),
}

impl ShadowSource {
    /// Project into the canonical representation.
    pub fn canonical(&self) -> CanonicalShadow {
        match self {
            Self::Style(style) => CanonicalShadow::from_model(style),
            Self::Effect(effect) => CanonicalShadow::from_model(effect),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Style(_) => "style",
            Self::Effect(_) => "effect",
        }
    }
}

impl From<DropShadowStyle> for ShadowSource {
    fn from(style: DropShadowStyle) -> Self {
        Self::Style(style)
    }
}

impl From<DropShadowEffect> for ShadowSource {
    fn from(effect: DropShadowEffect) -> Self {
        Self::Effect(effect)
    }
}
