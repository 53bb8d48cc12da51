//! Interpolation of keyframe groups.
//!
//! This module provides the `Interpolate` trait for the value types that can
//! be keyed, and [`value_at`], the pure query that turns a group into a
//! continuous function of time.
//!
//! # Color Space Handling
//!
//! Colors are blended per channel on their stored straight sRGB components
//! (see [`crate::value`]). Conversion to linear premultiplied values is the
//! render target's concern and happens after interpolation.

use crate::keyframe::KeyframeGroup;
use crate::value::{Color, Vec2, Vec3};

/// Trait for types that can be interpolated between two values.
pub trait Interpolate: Clone {
    /// When t = 0.0, returns self. When t = 1.0, returns `to`.
    /// Values outside 0..1 extrapolate (bezier overshoot).
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

#[inline]
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        lerp(*self, *to, t)
    }
}

impl Interpolate for Vec2 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Vec2::new(lerp(self.x, to.x, t), lerp(self.y, to.y, t))
    }
}

impl Interpolate for Vec3 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Vec3::new(
            lerp(self.x, to.x, t),
            lerp(self.y, to.y, t),
            lerp(self.z, to.z, t),
        )
    }
}

impl Interpolate for Color {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Color::rgba(
            lerp(self.r, to.r, t),
            lerp(self.g, to.g, t),
            lerp(self.b, to.b, t),
            lerp(self.a, to.a, t),
        )
    }
}

/// Value of `group` at `time`.
///
/// Clamps to the first value before the first keyframe and to the last
/// value after the last one. At a keyframe's exact time the keyframe's own
/// value is returned untouched. Returns `None` only for an empty group.
pub fn value_at<T: Interpolate>(group: &KeyframeGroup<T>, time: f64) -> Option<T> {
    let keyframes = group.keyframes();
    let first = keyframes.first()?;
    let last = keyframes.last()?;

    if time.is_nan() || time <= first.time {
        return Some(first.value.clone());
    }
    if time >= last.time {
        return Some(last.value.clone());
    }

    // first.time < time < last.time, so 1 <= idx < len
    let idx = keyframes.partition_point(|keyframe| keyframe.time <= time);
    let from = &keyframes[idx - 1];
    let to = &keyframes[idx];

    if from.time == time {
        return Some(from.value.clone());
    }

    let progress = (time - from.time) / (to.time - from.time);
    let eased = from.easing_to(to).evaluate(progress);

    Some(from.value.interpolate(&to.value, eased))
}

/// Values of `group` at each of `times`.
pub fn sample<T, I>(group: &KeyframeGroup<T>, times: I) -> Vec<T>
where
    T: Interpolate,
    I: IntoIterator<Item = f64>,
{
    times
        .into_iter()
        .filter_map(|time| value_at(group, time))
        .collect()
}

impl<T: Interpolate> KeyframeGroup<T> {
    /// See [`value_at`].
    pub fn value_at(&self, time: f64) -> Option<T> {
        value_at(self, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframe::Keyframe;

    const EPSILON: f64 = 0.0001;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn ramp() -> KeyframeGroup<f64> {
        KeyframeGroup::from_values([(0.0, 0.0), (10.0, 100.0), (20.0, 50.0)]).unwrap()
    }

    #[test]
    fn test_f64_interpolation() {
        assert!(approx_eq(0.0_f64.interpolate(&100.0, 0.25), 25.0));
        assert!(approx_eq((-50.0_f64).interpolate(&50.0, 0.5), 0.0));
    }

    #[test]
    fn test_extrapolation() {
        assert!(approx_eq(0.0_f64.interpolate(&100.0, 1.5), 150.0));
        assert!(approx_eq(0.0_f64.interpolate(&100.0, -0.5), -50.0));
    }

    #[test]
    fn test_vec_interpolation() {
        let mid = Vec2::new(0.0, 10.0).interpolate(&Vec2::new(10.0, 30.0), 0.5);
        assert!(approx_eq(mid.x, 5.0));
        assert!(approx_eq(mid.y, 20.0));

        let mid = Vec3::new(0.0, 0.0, 0.0).interpolate(&Vec3::new(10.0, 20.0, 30.0), 0.5);
        assert!(approx_eq(mid.x, 5.0));
        assert!(approx_eq(mid.y, 10.0));
        assert!(approx_eq(mid.z, 15.0));
    }

    #[test]
    fn test_color_interpolation_is_per_channel_straight() {
        let red = Color::rgba(1.0, 0.0, 0.0, 1.0);
        let blue = Color::rgba(0.0, 0.0, 1.0, 0.0);

        let mid = red.interpolate(&blue, 0.5);
        assert!(approx_eq(mid.r, 0.5));
        assert!(approx_eq(mid.g, 0.0));
        assert!(approx_eq(mid.b, 0.5));
        // alpha blends independently, channels are not premultiplied
        assert!(approx_eq(mid.a, 0.5));
    }

    #[test]
    fn test_clamps_outside_range() {
        let group = ramp();
        assert_eq!(value_at(&group, -5.0), Some(0.0));
        assert_eq!(value_at(&group, 25.0), Some(50.0));
        assert_eq!(value_at(&group, f64::NEG_INFINITY), Some(0.0));
        assert_eq!(value_at(&group, f64::INFINITY), Some(50.0));
        assert_eq!(value_at(&group, f64::NAN), Some(0.0));
    }

    #[test]
    fn test_exact_at_keyframes() {
        let group = KeyframeGroup::from_values([(0.0, 0.1), (3.0, 0.7), (7.5, 0.3)]).unwrap();
        for keyframe in group.keyframes() {
            assert_eq!(value_at(&group, keyframe.time), Some(keyframe.value));
        }
    }

    #[test]
    fn test_linear_between_keyframes() {
        let group = ramp();
        assert!(approx_eq(value_at(&group, 5.0).unwrap(), 50.0));
        assert!(approx_eq(value_at(&group, 15.0).unwrap(), 75.0));
    }

    #[test]
    fn test_empty_group_has_no_value() {
        let group: KeyframeGroup<f64> = KeyframeGroup::empty();
        assert_eq!(value_at(&group, 0.0), None);
    }

    #[test]
    fn test_single_keyframe_is_constant() {
        let group = KeyframeGroup::constant(Color::WHITE);
        assert_eq!(value_at(&group, -1.0), Some(Color::WHITE));
        assert_eq!(value_at(&group, 100.0), Some(Color::WHITE));
    }

    #[test]
    fn test_hold_keyframe() {
        let group = KeyframeGroup::new(vec![
            Keyframe::new(0.0, 1.0).held(),
            Keyframe::new(10.0, 5.0),
        ])
        .unwrap();
        assert_eq!(value_at(&group, 9.99), Some(1.0));
        assert_eq!(value_at(&group, 10.0), Some(5.0));
    }

    #[test]
    fn test_bezier_segment() {
        let group = KeyframeGroup::new(vec![
            Keyframe::new(0.0, 0.0).with_out_tangent(Vec2::new(0.42, 0.0)),
            Keyframe::new(10.0, 100.0).with_in_tangent(Vec2::new(1.0, 1.0)),
        ])
        .unwrap();
        // ease-in: behind the linear ramp early on
        assert!(value_at(&group, 2.5).unwrap() < 25.0);
        assert!(approx_eq(value_at(&group, 10.0).unwrap(), 100.0));
    }

    #[test]
    fn test_sample() {
        let values = sample(&ramp(), [0.0, 5.0, 10.0]);
        assert_eq!(values.len(), 3);
        assert!(approx_eq(values[1], 50.0));
        assert_eq!(ramp().value_at(10.0), Some(100.0));
    }
}
