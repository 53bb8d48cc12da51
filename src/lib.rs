//! Flare: keyframe tracks for vector animation effects.
//!
//! Re-exports the engine ([`anim`]) and configuration ([`config`]) crates
//! and wires them together for a layer build pass.
//!
//! ```ignore
//! let config = flare::config::FlareConfig::load();
//! flare::logging::init(&config.logging)?;
//!
//! let mut target = flare::anim::TrackRecorder::new("layer");
//! let report = flare::build_layer(&config, &effects, &mut target)?;
//! ```

pub mod logging;

pub use flare_anim as anim;
pub use flare_config as config;

use anyhow::Context;
use flare_anim::{AnimationClock, LayerReport, PropertyAttachment, ShadowSource};
use flare_config::FlareConfig;

/// Emit the shadows of one layer using the configured failure policy.
pub fn build_layer<A: PropertyAttachment>(
    config: &FlareConfig,
    effects: &[ShadowSource],
    target: &mut A,
) -> anyhow::Result<LayerReport> {
    let policy = config.emitter.failure_policy;
    tracing::debug!(effects = effects.len(), ?policy, "building layer effects");

    flare_anim::emit_layer(effects, target, policy)
        .with_context(|| format!("building {} layer effect(s)", effects.len()))
}

/// Clock for a frame range at the configured frame rate.
pub fn clock(config: &FlareConfig, start_frame: f64, end_frame: f64) -> AnimationClock {
    AnimationClock::new(start_frame, end_frame, config.playback.frame_rate)
}
