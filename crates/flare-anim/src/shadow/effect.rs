//! Drop shadow authored as an effect.

use serde::{Deserialize, Serialize};

use super::ShadowModel;
use super::regression::{DISTANCE_TO_OFFSET, SOFTNESS_TO_RADIUS};
use crate::keyframe::KeyframeGroup;
use crate::value::Color;

/// Opacity of the effect is stored on a 0–255 scale.
const EFFECT_OPACITY_MAX: f64 = 255.0;

/// The effect measures direction from straight up; canonical angles start a
/// quarter turn later.
const DIRECTION_OFFSET_DEGREES: f64 = 90.0;

/// Effect-style drop shadow as delivered by the document model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DropShadowEffect {
    pub color: Option<KeyframeGroup<Color>>,
    /// 0–255.
    pub opacity: Option<KeyframeGroup<f64>>,
    /// Degrees, 0 = up.
    pub direction: Option<KeyframeGroup<f64>>,
    pub distance: Option<KeyframeGroup<f64>>,
    pub softness: Option<KeyframeGroup<f64>>,
}

impl ShadowModel for DropShadowEffect {
    fn opacity(&self) -> Option<KeyframeGroup<f64>> {
        self.opacity
            .as_ref()
            .map(|opacity| opacity.map(|v| v / EFFECT_OPACITY_MAX * 100.0))
    }

    fn color(&self) -> Option<KeyframeGroup<Color>> {
        self.color.clone()
    }

    fn radius(&self) -> Option<KeyframeGroup<f64>> {
        self.softness
            .as_ref()
            .map(|softness| softness.map(|v| SOFTNESS_TO_RADIUS.apply(*v)))
    }

    fn angle(&self) -> Option<KeyframeGroup<f64>> {
        self.direction
            .as_ref()
            .map(|direction| direction.map(|v| v - DIRECTION_OFFSET_DEGREES))
    }

    fn distance(&self) -> Option<KeyframeGroup<f64>> {
        self.distance
            .as_ref()
            .map(|distance| distance.map(|v| DISTANCE_TO_OFFSET.apply(*v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(value: f64) -> Option<KeyframeGroup<f64>> {
        Some(KeyframeGroup::constant(value))
    }

    fn first(group: Option<KeyframeGroup<f64>>) -> f64 {
        group.unwrap().keyframes()[0].value
    }

    #[test]
    fn test_opacity_rescaled_to_percent() {
        let full = DropShadowEffect {
            opacity: constant(255.0),
            ..Default::default()
        };
        assert!((first(full.opacity()) - 100.0).abs() < 1e-9);

        let none = DropShadowEffect {
            opacity: constant(0.0),
            ..Default::default()
        };
        assert_eq!(first(none.opacity()), 0.0);
    }

    #[test]
    fn test_direction_rotated() {
        let effect = DropShadowEffect {
            direction: constant(90.0),
            ..Default::default()
        };
        assert_eq!(first(effect.angle()), 0.0);

        let effect = DropShadowEffect {
            direction: constant(225.0),
            ..Default::default()
        };
        assert_eq!(first(effect.angle()), 135.0);
    }

    #[test]
    fn test_softness_regression() {
        let effect = DropShadowEffect {
            softness: Some(KeyframeGroup::from_values([(0.0, 10.0), (20.0, 50.0)]).unwrap()),
            ..Default::default()
        };
        let radius = effect.radius().unwrap();
        assert!((radius.keyframes()[0].value - 2.5).abs() < 0.05);
        assert!((radius.keyframes()[1].value - 6.25).abs() < 0.5);
        assert_eq!(radius.keyframes()[1].time, 20.0);
    }

    #[test]
    fn test_distance_regression() {
        let effect = DropShadowEffect {
            distance: Some(KeyframeGroup::from_values([(0.0, 5.0), (10.0, 10.0)]).unwrap()),
            ..Default::default()
        };
        let distance = effect.distance().unwrap();
        assert!((distance.keyframes()[0].value - 4.0).abs() < 0.01);
        assert!((distance.keyframes()[1].value - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_absent_is_not_zero() {
        let effect = DropShadowEffect {
            color: Some(KeyframeGroup::constant(Color::BLACK)),
            ..Default::default()
        };
        assert!(effect.color().is_some());
        assert!(effect.opacity().is_none());
        assert!(effect.radius().is_none());
        assert!(effect.angle().is_none());
        assert!(effect.distance().is_none());
    }
}
