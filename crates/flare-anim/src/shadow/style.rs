//! Drop shadow authored as a layer style.

use serde::{Deserialize, Serialize};

use super::ShadowModel;
use crate::keyframe::KeyframeGroup;
use crate::value::Color;

/// Layer-style drop shadow as delivered by the document model.
///
/// Opacity is already on a 0–100 scale and angle/distance already use the
/// canonical conventions. `size` is the style's blur size, which is twice
/// the equivalent render radius.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DropShadowStyle {
    pub color: Option<KeyframeGroup<Color>>,
    pub opacity: Option<KeyframeGroup<f64>>,
    pub angle: Option<KeyframeGroup<f64>>,
    pub distance: Option<KeyframeGroup<f64>>,
    pub size: Option<KeyframeGroup<f64>>,
}

impl ShadowModel for DropShadowStyle {
    fn opacity(&self) -> Option<KeyframeGroup<f64>> {
        self.opacity.clone()
    }

    fn color(&self) -> Option<KeyframeGroup<Color>> {
        self.color.clone()
    }

    fn radius(&self) -> Option<KeyframeGroup<f64>> {
        self.size.as_ref().map(|size| size.map(|s| s / 2.0))
    }

    fn angle(&self) -> Option<KeyframeGroup<f64>> {
        self.angle.clone()
    }

    fn distance(&self) -> Option<KeyframeGroup<f64>> {
        self.distance.clone()
    }
}
