//! Turning canonical shadows into render-property tracks.
//!
//! The emitter resolves a [`CanonicalShadow`] into [`RenderTrack`]s in render
//! units and hands each one to a [`PropertyAttachment`], together with the
//! value mapper that converts canonical values into a [`NativeValue`].
//!
//! # Usage
//!
//! ```
//! use flare_anim::{DropShadowEffect, KeyframeGroup, ShadowSource, TrackRecorder, emit_shadow};
//!
//! let source = ShadowSource::Effect(DropShadowEffect {
//!     opacity: Some(KeyframeGroup::constant(255.0)),
//!     ..Default::default()
//! });
//!
//! let mut recorder = TrackRecorder::new("shadow-layer");
//! let emitted = emit_shadow(&source.canonical(), &mut recorder).unwrap();
//! assert_eq!(emitted, 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::combine::combine;
use crate::error::{AttachmentError, EmitError, Result};
use crate::keyframe::KeyframeGroup;
use crate::shadow::{CanonicalShadow, ShadowSource};
use crate::value::{Color, Vec2};

/// Render properties a shadow can animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderProperty {
    Opacity,
    Color,
    Radius,
    Offset,
}

impl RenderProperty {
    pub const ALL: [RenderProperty; 4] = [
        RenderProperty::Opacity,
        RenderProperty::Color,
        RenderProperty::Radius,
        RenderProperty::Offset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::Color => "color",
            Self::Radius => "radius",
            Self::Offset => "offset",
        }
    }
}

impl fmt::Display for RenderProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value in the representation render targets consume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NativeValue {
    Float { value: f32 },
    /// Linear premultiplied RGBA.
    Color { rgba: [f32; 4] },
    Offset { x: f32, y: f32 },
}

/// Maps a unit-interval or linear scalar to a native float.
pub fn map_scalar(value: &f64) -> NativeValue {
    NativeValue::Float {
        value: *value as f32,
    }
}

/// Maps a straight sRGB color to linear premultiplied RGBA.
pub fn map_color(color: &Color) -> NativeValue {
    NativeValue::Color {
        rgba: color.to_lin_premul(),
    }
}

pub fn map_offset(offset: &Vec2) -> NativeValue {
    NativeValue::Offset {
        x: offset.x as f32,
        y: offset.y as f32,
    }
}

/// The downstream collaborator that binds finished tracks to a render target.
pub trait PropertyAttachment {
    /// Name of the render target, for error reports.
    fn target_name(&self) -> &str {
        "render target"
    }

    /// Whether the current render target has `property`. Asked for every
    /// track of an effect before any of them is attached.
    fn supports(&self, property: RenderProperty) -> bool;

    /// Take ownership of `track` for `property`. `map` converts each
    /// keyframe value into the target's native representation.
    fn attach<T>(
        &mut self,
        property: RenderProperty,
        track: KeyframeGroup<T>,
        map: &dyn Fn(&T) -> NativeValue,
    ) -> Result<(), AttachmentError>;
}

/// A resolved track in render units.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderTrack {
    /// 0.0–1.0.
    Opacity(KeyframeGroup<f64>),
    Color(KeyframeGroup<Color>),
    Radius(KeyframeGroup<f64>),
    /// (x, y) in render units.
    Offset(KeyframeGroup<Vec2>),
}

impl RenderTrack {
    pub fn property(&self) -> RenderProperty {
        match self {
            Self::Opacity(_) => RenderProperty::Opacity,
            Self::Color(_) => RenderProperty::Color,
            Self::Radius(_) => RenderProperty::Radius,
            Self::Offset(_) => RenderProperty::Offset,
        }
    }

    /// Number of keyframes in the track.
    pub fn len(&self) -> usize {
        match self {
            Self::Opacity(group) | Self::Radius(group) => group.len(),
            Self::Color(group) => group.len(),
            Self::Offset(group) => group.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn attach<A: PropertyAttachment>(self, target: &mut A) -> Result<(), AttachmentError> {
        let property = self.property();
        match self {
            Self::Opacity(group) | Self::Radius(group) => target.attach(property, group, &map_scalar),
            Self::Color(group) => target.attach(property, group, &map_color),
            Self::Offset(group) => target.attach(property, group, &map_offset),
        }
    }
}

/// Polar shadow parameters to a cartesian offset. `angle` is in degrees.
pub fn offset_from_polar(angle: f64, distance: f64) -> Vec2 {
    let radians = angle.to_radians();
    Vec2::new(distance * radians.cos(), distance * radians.sin())
}

/// Resolve every track the shadow animates, in emission order.
///
/// Empty groups are skipped. The offset track needs both angle and distance;
/// with only one of them no offset is produced.
pub fn resolve_tracks(shadow: &CanonicalShadow) -> Vec<RenderTrack> {
    let mut tracks = Vec::with_capacity(4);

    if let Some(opacity) = present(&shadow.opacity) {
        tracks.push(RenderTrack::Opacity(opacity.map(|v| v / 100.0)));
    }

    if let Some(color) = present(&shadow.color) {
        tracks.push(RenderTrack::Color(color.clone()));
    }

    if let Some(radius) = present(&shadow.radius) {
        tracks.push(RenderTrack::Radius(radius.clone()));
    }

    match (&shadow.angle, &shadow.distance) {
        (Some(angle), Some(distance)) => {
            let offset = combine(angle, distance, offset_from_polar);
            if !offset.is_empty() {
                tracks.push(RenderTrack::Offset(offset));
            }
        }
        (Some(_), None) | (None, Some(_)) => {
            debug!("shadow has only one of angle and distance, offset left inert");
        }
        (None, None) => {}
    }

    tracks
}

fn present<T>(group: &Option<KeyframeGroup<T>>) -> Option<&KeyframeGroup<T>> {
    group.as_ref().filter(|group| !group.is_empty())
}

/// Emit every track of one shadow to `target`.
///
/// All properties are checked against the target before anything is
/// attached, so an unsupported property leaves the effect fully inert and
/// fails with [`EmitError::Attachment`]. If the target still fails after
/// accepting some tracks, the remaining tracks are not attached and the
/// error is [`EmitError::PartiallyAttached`], naming what was attached.
/// Returns the number of tracks emitted.
pub fn emit_shadow<A: PropertyAttachment>(shadow: &CanonicalShadow, target: &mut A) -> Result<usize> {
    let tracks = resolve_tracks(shadow);

    if let Some(track) = tracks.iter().find(|track| !target.supports(track.property())) {
        return Err(AttachmentError::UnsupportedProperty {
            property: track.property(),
            target: target.target_name().to_string(),
        }
        .into());
    }

    let mut attached = Vec::with_capacity(tracks.len());
    for track in tracks {
        let property = track.property();
        debug!(%property, keyframes = track.len(), "emitting track");
        if let Err(source) = track.attach(target) {
            if attached.is_empty() {
                return Err(source.into());
            }
            return Err(EmitError::PartiallyAttached { attached, source });
        }
        attached.push(property);
    }

    Ok(attached.len())
}

/// What the layer pass does when one effect fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Leave the failing effect inert and continue with its siblings.
    #[default]
    SkipEffect,
    /// Stop building the layer at the first failing effect.
    AbortLayer,
}

/// An effect the target failed on after accepting some of its tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialEffect {
    pub index: usize,
    /// Properties that stayed attached, in emission order.
    pub attached: Vec<RenderProperty>,
    pub error: AttachmentError,
}

/// Outcome of emitting all effects of a layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerReport {
    /// Tracks attached, including those of partially attached effects.
    pub emitted_tracks: usize,
    /// Indices of effects left fully inert, with the reason.
    pub skipped: Vec<(usize, EmitError)>,
    pub partial: Vec<PartialEffect>,
}

impl LayerReport {
    pub fn skipped_indices(&self) -> Vec<usize> {
        self.skipped.iter().map(|(index, _)| *index).collect()
    }

    pub fn partial_indices(&self) -> Vec<usize> {
        self.partial.iter().map(|effect| effect.index).collect()
    }

    /// Every effect was emitted in full.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.partial.is_empty()
    }
}

/// Emit the shadows of one layer, applying `policy` to failing effects.
pub fn emit_layer<A: PropertyAttachment>(
    effects: &[ShadowSource],
    target: &mut A,
    policy: FailurePolicy,
) -> Result<LayerReport> {
    let mut report = LayerReport::default();

    for (index, effect) in effects.iter().enumerate() {
        let canonical = effect.canonical();
        match emit_shadow(&canonical, target) {
            Ok(count) => report.emitted_tracks += count,
            Err(error) if policy == FailurePolicy::AbortLayer => {
                warn!(?error, effect = index, kind = effect.kind(), "aborting layer");
                return Err(EmitError::LayerAborted {
                    index,
                    source: Box::new(error),
                });
            }
            Err(EmitError::PartiallyAttached { attached, source }) => {
                warn!(
                    error = ?source,
                    effect = index,
                    kind = effect.kind(),
                    attached = attached.len(),
                    "shadow effect partially attached"
                );
                report.emitted_tracks += attached.len();
                report.partial.push(PartialEffect {
                    index,
                    attached,
                    error: source,
                });
            }
            Err(error) => {
                warn!(?error, effect = index, kind = effect.kind(), "skipping shadow effect");
                report.skipped.push((index, error));
            }
        }
    }

    Ok(report)
}
