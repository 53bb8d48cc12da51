//! Error types for building and emitting animation tracks.

use thiserror::Error;

use crate::emitter::RenderProperty;

/// Result type for emission operations.
pub type Result<T, E = EmitError> = std::result::Result<T, E>;

/// A keyframe sequence that violates the timeline invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// Keyframe times must strictly increase.
    #[error("keyframe {index} at time {time} does not follow the previous keyframe at time {previous}")]
    OutOfOrder { index: usize, time: f64, previous: f64 },

    /// NaN or infinite keyframe time.
    #[error("keyframe {index} has non-finite time {time}")]
    NonFiniteTime { index: usize, time: f64 },
}

/// Failures reported by a render target while attaching a track.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttachmentError {
    /// The render target has no such property.
    #[error("render target `{target}` does not support the `{property}` property")]
    UnsupportedProperty {
        property: RenderProperty,
        target: String,
    },

    /// The target accepted the property but refused this particular track.
    #[error("render target rejected the `{property}` track: {reason}")]
    Rejected {
        property: RenderProperty,
        reason: String,
    },
}

/// Errors surfaced by the emitter to the layer build pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmitError {
    /// Nothing of the effect was attached.
    #[error("attachment failed: {0}")]
    Attachment(#[from] AttachmentError),

    /// The target failed after accepting some of the effect's tracks.
    #[error("attachment failed after {} track(s) were attached: {source}", attached.len())]
    PartiallyAttached {
        attached: Vec<RenderProperty>,
        #[source]
        source: AttachmentError,
    },

    /// A failing effect aborted the whole layer.
    #[error("effect {index} aborted the layer: {source}")]
    LayerAborted {
        index: usize,
        #[source]
        source: Box<EmitError>,
    },
}
