//! Keyframes and validated keyframe groups.
//!
//! A [`KeyframeGroup`] is one animated quantity over the full animation:
//! an ordered, immutable list of [`Keyframe`]s whose times strictly
//! increase. An empty group is the "not animated" sentinel.
//!
//! Segment timing follows the usual vector-animation convention: the
//! segment from keyframe `k` to `k + 1` is shaped by `k`'s outgoing tangent
//! and `k + 1`'s incoming tangent, or held flat when `k` is a hold keyframe.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::easing::Easing;
use crate::error::TimelineError;
use crate::value::Vec2;

/// One control point of an animated quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    /// Frame number on the animation's timeline.
    pub time: f64,
    pub value: T,
    /// Bezier control point for the segment arriving at this keyframe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_tangent: Option<Vec2>,
    /// Bezier control point for the segment leaving this keyframe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_tangent: Option<Vec2>,
    /// Keep `value` until the next keyframe instead of interpolating.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hold: bool,
}

impl<T> Keyframe<T> {
    /// Create a keyframe with linear timing.
    pub fn new(time: f64, value: T) -> Self {
        Self {
            time,
            value,
            in_tangent: None,
            out_tangent: None,
            hold: false,
        }
    }

    pub fn with_in_tangent(mut self, tangent: Vec2) -> Self {
        self.in_tangent = Some(tangent);
        self
    }

    pub fn with_out_tangent(mut self, tangent: Vec2) -> Self {
        self.out_tangent = Some(tangent);
        self
    }

    /// Mark this keyframe as a hold keyframe.
    pub fn held(mut self) -> Self {
        self.hold = true;
        self
    }

    /// Same timing metadata, different payload.
    pub fn with_value<U>(&self, value: U) -> Keyframe<U> {
        Keyframe {
            time: self.time,
            value,
            in_tangent: self.in_tangent,
            out_tangent: self.out_tangent,
            hold: self.hold,
        }
    }

    /// Easing of the segment from this keyframe to `next`.
    pub fn easing_to(&self, next: &Keyframe<T>) -> Easing {
        if self.hold {
            return Easing::Hold;
        }
        match (self.out_tangent, next.in_tangent) {
            (Some(out), Some(incoming)) => Easing::cubic_bezier(out.x, out.y, incoming.x, incoming.y),
            _ => Easing::Linear,
        }
    }
}

/// Ordered, immutable keyframes for one animated quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeGroup<T> {
    keyframes: Vec<Keyframe<T>>,
}

impl<T> KeyframeGroup<T> {
    /// Build a group, checking that keyframe times are finite and strictly
    /// increasing.
    pub fn new(keyframes: Vec<Keyframe<T>>) -> Result<Self, TimelineError> {
        let mut previous: Option<f64> = None;
        for (index, keyframe) in keyframes.iter().enumerate() {
            let time = keyframe.time;
            if !time.is_finite() {
                return Err(TimelineError::NonFiniteTime { index, time });
            }
            if let Some(previous) = previous {
                if time <= previous {
                    return Err(TimelineError::OutOfOrder {
                        index,
                        time,
                        previous,
                    });
                }
            }
            previous = Some(time);
        }
        Ok(Self { keyframes })
    }

    /// Build a linear group from `(time, value)` pairs.
    pub fn from_values<I>(values: I) -> Result<Self, TimelineError>
    where
        I: IntoIterator<Item = (f64, T)>,
    {
        Self::new(
            values
                .into_iter()
                .map(|(time, value)| Keyframe::new(time, value))
                .collect(),
        )
    }

    /// Keyframes already known to be ordered (derived from validated groups).
    pub(crate) fn from_ordered(keyframes: Vec<Keyframe<T>>) -> Self {
        debug_assert!(keyframes.windows(2).all(|w| w[0].time < w[1].time));
        Self { keyframes }
    }

    /// The "not animated" sentinel.
    pub fn empty() -> Self {
        Self {
            keyframes: Vec::new(),
        }
    }

    /// A single keyframe at time zero, for fields that never change.
    pub fn constant(value: T) -> Self {
        Self {
            keyframes: vec![Keyframe::new(0.0, value)],
        }
    }

    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// More than one keyframe, so the value changes over time.
    pub fn is_animated(&self) -> bool {
        self.keyframes.len() > 1
    }

    /// Keyframe times in order.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.keyframes.iter().map(|keyframe| keyframe.time)
    }

    pub fn first(&self) -> Option<&Keyframe<T>> {
        self.keyframes.first()
    }

    pub fn last(&self) -> Option<&Keyframe<T>> {
        self.keyframes.last()
    }

    /// Transform every value, keeping times and timing metadata.
    pub fn map<U, F>(&self, f: F) -> KeyframeGroup<U>
    where
        F: Fn(&T) -> U,
    {
        KeyframeGroup {
            keyframes: self
                .keyframes
                .iter()
                .map(|keyframe| keyframe.with_value(f(&keyframe.value)))
                .collect(),
        }
    }

    pub fn into_keyframes(self) -> Vec<Keyframe<T>> {
        self.keyframes
    }
}

impl<T> Default for KeyframeGroup<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> TryFrom<Vec<Keyframe<T>>> for KeyframeGroup<T> {
    type Error = TimelineError;

    fn try_from(keyframes: Vec<Keyframe<T>>) -> Result<Self, Self::Error> {
        Self::new(keyframes)
    }
}

// Serialized as a bare keyframe list; deserialization goes through `new`
// so the ordering invariant holds for data read from disk too.
impl<T: Serialize> Serialize for KeyframeGroup<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.keyframes.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for KeyframeGroup<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let keyframes = Vec::<Keyframe<T>>::deserialize(deserializer)?;
        Self::new(keyframes).map_err(serde::de::Error::custom)
    }
}
