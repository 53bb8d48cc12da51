//! A recording render target.
//!
//! [`TrackRecorder`] implements [`PropertyAttachment`] by storing every
//! attached track in native values. It stands in for a platform target in
//! tests and tools, and shows how a target turns frame-keyed tracks into
//! the time base a platform animation expects via [`AnimationClock`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::easing::Easing;
use crate::emitter::{NativeValue, PropertyAttachment, RenderProperty};
use crate::error::AttachmentError;
use crate::keyframe::KeyframeGroup;

/// Frame range and rate of the animation a track belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationClock {
    pub start_frame: f64,
    pub end_frame: f64,
    pub frame_rate: f64,
}

impl AnimationClock {
    pub fn new(start_frame: f64, end_frame: f64, frame_rate: f64) -> Self {
        Self {
            start_frame,
            end_frame,
            frame_rate,
        }
    }

    /// Length of the animation in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.frame_rate <= 0.0 {
            return 0.0;
        }
        ((self.end_frame - self.start_frame) / self.frame_rate).max(0.0)
    }

    /// Seconds from the start of the animation to `frame`.
    pub fn seconds(&self, frame: f64) -> f64 {
        if self.frame_rate <= 0.0 {
            return 0.0;
        }
        (frame - self.start_frame) / self.frame_rate
    }

    /// `frame` as a fraction of the animation, clamped to 0..1.
    pub fn key_time(&self, frame: f64) -> f64 {
        let span = self.end_frame - self.start_frame;
        if span <= 0.0 {
            return 0.0;
        }
        ((frame - self.start_frame) / span).clamp(0.0, 1.0)
    }
}

/// How the platform should move between recorded values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// Blend between values using each segment's timing curve.
    Linear,
    /// Jump from value to value.
    Discrete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeKeyframe {
    pub frame: f64,
    pub value: NativeValue,
}

/// A finished track in native values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeTrack {
    pub property: RenderProperty,
    pub keyframes: Vec<NativeKeyframe>,
    /// Timing of each segment; one shorter than `keyframes`.
    pub timing: Vec<Easing>,
}

impl NativeTrack {
    fn from_group<T>(
        property: RenderProperty,
        group: &KeyframeGroup<T>,
        map: &dyn Fn(&T) -> NativeValue,
    ) -> Self {
        let keyframes = group
            .keyframes()
            .iter()
            .map(|keyframe| NativeKeyframe {
                frame: keyframe.time,
                value: map(&keyframe.value),
            })
            .collect();
        let timing = group
            .keyframes()
            .windows(2)
            .map(|pair| pair[0].easing_to(&pair[1]))
            .collect();

        Self {
            property,
            keyframes,
            timing,
        }
    }

    pub fn values(&self) -> Vec<NativeValue> {
        self.keyframes.iter().map(|keyframe| keyframe.value).collect()
    }

    pub fn key_times(&self, clock: &AnimationClock) -> Vec<f64> {
        self.keyframes
            .iter()
            .map(|keyframe| clock.key_time(keyframe.frame))
            .collect()
    }

    pub fn seconds(&self, clock: &AnimationClock) -> Vec<f64> {
        self.keyframes
            .iter()
            .map(|keyframe| clock.seconds(keyframe.frame))
            .collect()
    }

    /// `Discrete` when every segment holds.
    pub fn calculation_mode(&self) -> CalculationMode {
        if !self.timing.is_empty() && self.timing.iter().all(Easing::is_hold) {
            CalculationMode::Discrete
        } else {
            CalculationMode::Linear
        }
    }
}

/// Records attached tracks, optionally limited to a set of properties.
#[derive(Debug, Clone)]
pub struct TrackRecorder {
    target: String,
    supported: Option<BTreeSet<RenderProperty>>,
    tracks: Vec<NativeTrack>,
}

impl TrackRecorder {
    /// A recorder that accepts every property.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            supported: None,
            tracks: Vec::new(),
        }
    }

    /// A recorder that rejects properties outside `supported`.
    pub fn with_supported<I>(target: impl Into<String>, supported: I) -> Self
    where
        I: IntoIterator<Item = RenderProperty>,
    {
        Self {
            target: target.into(),
            supported: Some(supported.into_iter().collect()),
            tracks: Vec::new(),
        }
    }

    pub fn tracks(&self) -> &[NativeTrack] {
        &self.tracks
    }

    pub fn track(&self, property: RenderProperty) -> Option<&NativeTrack> {
        self.tracks.iter().find(|track| track.property == property)
    }

    pub fn into_tracks(self) -> Vec<NativeTrack> {
        self.tracks
    }
}

impl PropertyAttachment for TrackRecorder {
    fn target_name(&self) -> &str {
        &self.target
    }

    fn supports(&self, property: RenderProperty) -> bool {
        self.supported
            .as_ref()
            .is_none_or(|supported| supported.contains(&property))
    }

    fn attach<T>(
        &mut self,
        property: RenderProperty,
        track: KeyframeGroup<T>,
        map: &dyn Fn(&T) -> NativeValue,
    ) -> Result<(), AttachmentError> {
        if !self.supports(property) {
            return Err(AttachmentError::UnsupportedProperty {
                property,
                target: self.target.clone(),
            });
        }

        let native = NativeTrack::from_group(property, &track, map);
        debug!(target_name = %self.target, %property, keyframes = native.keyframes.len(), "recorded track");
        self.tracks.push(native);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::map_scalar;
    use crate::keyframe::Keyframe;

    #[test]
    fn test_clock() {
        let clock = AnimationClock::new(0.0, 60.0, 30.0);
        assert_eq!(clock.duration_seconds(), 2.0);
        assert_eq!(clock.seconds(15.0), 0.5);
        assert_eq!(clock.key_time(15.0), 0.25);
        assert_eq!(clock.key_time(90.0), 1.0);
        assert_eq!(clock.key_time(-10.0), 0.0);
    }

    #[test]
    fn test_degenerate_clock() {
        let clock = AnimationClock::new(10.0, 10.0, 0.0);
        assert_eq!(clock.duration_seconds(), 0.0);
        assert_eq!(clock.seconds(20.0), 0.0);
        assert_eq!(clock.key_time(20.0), 0.0);
    }

    #[test]
    fn test_records_native_values() {
        let mut recorder = TrackRecorder::new("layer");
        let group = KeyframeGroup::from_values([(0.0, 0.0), (30.0, 0.5)]).unwrap();
        recorder
            .attach(RenderProperty::Opacity, group, &map_scalar)
            .unwrap();

        let track = recorder.track(RenderProperty::Opacity).unwrap();
        assert_eq!(
            track.values(),
            vec![
                NativeValue::Float { value: 0.0 },
                NativeValue::Float { value: 0.5 }
            ]
        );
        assert_eq!(track.timing, vec![Easing::Linear]);
        assert_eq!(track.key_times(&AnimationClock::new(0.0, 60.0, 30.0)), vec![0.0, 0.5]);
        assert_eq!(track.seconds(&AnimationClock::new(0.0, 60.0, 30.0)), vec![0.0, 1.0]);
        assert_eq!(track.calculation_mode(), CalculationMode::Linear);
    }

    #[test]
    fn test_hold_track_is_discrete() {
        let mut recorder = TrackRecorder::new("layer");
        let group = KeyframeGroup::new(vec![
            Keyframe::new(0.0, 4.0).held(),
            Keyframe::new(10.0, 8.0).held(),
            Keyframe::new(20.0, 2.0),
        ])
        .unwrap();
        recorder
            .attach(RenderProperty::Radius, group, &map_scalar)
            .unwrap();
        assert_eq!(
            recorder.tracks()[0].calculation_mode(),
            CalculationMode::Discrete
        );
    }

    #[test]
    fn test_rejects_unsupported_property() {
        let mut recorder = TrackRecorder::with_supported("text-layer", [RenderProperty::Opacity]);
        assert!(recorder.supports(RenderProperty::Opacity));
        assert!(!recorder.supports(RenderProperty::Radius));

        let err = recorder
            .attach(RenderProperty::Radius, KeyframeGroup::constant(2.0), &map_scalar)
            .unwrap_err();
        assert_eq!(
            err,
            AttachmentError::UnsupportedProperty {
                property: RenderProperty::Radius,
                target: "text-layer".to_string()
            }
        );
        assert!(recorder.tracks().is_empty());
    }
}
