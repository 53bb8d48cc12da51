//! Keyframe animation engine for effect tracks.
//!
//! This crate turns time-keyed effect descriptions into render-property
//! tracks:
//! - **Keyframes**: validated, immutable [`KeyframeGroup`]s of scalars,
//!   vectors and colors
//! - **Interpolation**: [`value_at`] with per-segment easing
//! - **Combination**: [`combine`] merges two groups at the union of their
//!   breakpoints
//! - **Shadow mapping**: style and effect encodings of a drop shadow
//!   projected into a [`CanonicalShadow`]
//! - **Emission**: [`emit_shadow`] / [`emit_layer`] hand finished tracks to a
//!   [`PropertyAttachment`]
//!
//! # Architecture
//!
//! ```text
//! ShadowSource ──canonical()──> CanonicalShadow
//!                                   │ resolve_tracks (scale, combine)
//!                                   v
//!                              RenderTrack ──attach──> PropertyAttachment
//! ```
//!
//! Everything here is a pure function over immutable values, so tracks for
//! independent effects can be built on any thread.

pub mod combine;
pub mod easing;
pub mod emitter;
pub mod error;
pub mod interpolate;
pub mod keyframe;
pub mod recorder;
pub mod shadow;
pub mod value;

pub use combine::{breakpoints, combine};
pub use easing::Easing;
pub use emitter::{
    FailurePolicy, LayerReport, NativeValue, PartialEffect, PropertyAttachment, RenderProperty,
    RenderTrack, emit_layer, emit_shadow, map_color, map_offset, map_scalar, offset_from_polar, resolve_tracks,
};
pub use error::{AttachmentError, EmitError, Result, TimelineError};
pub use interpolate::{Interpolate, sample, value_at};
pub use keyframe::{Keyframe, KeyframeGroup};
pub use recorder::{AnimationClock, CalculationMode, NativeKeyframe, NativeTrack, TrackRecorder};
pub use shadow::{CanonicalShadow, DropShadowEffect, DropShadowStyle, ShadowModel, ShadowSource};
pub use value::{Color, Vec2, Vec3};
