//! Timing curves for keyframe segments.
//!
//! A segment between two keyframes is shaped by one of:
//! - `Linear`: constant rate
//! - `Hold`: the starting value is kept until the next keyframe
//! - `CubicBezier`: a timing curve through `(0, 0)`, `(x1, y1)`, `(x2, y2)`,
//!   `(1, 1)`, built from the outgoing tangent of the first keyframe and the
//!   incoming tangent of the second
//!
//! # Usage
//!
//! ```
//! use flare_anim::Easing;
//!
//! let ease = Easing::cubic_bezier(0.33, 0.0, 0.67, 1.0);
//! let progress = ease.evaluate(0.5);
//! assert!((progress - 0.5).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

/// Easing curve applied to the normalized progress through a segment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation (no easing).
    #[default]
    Linear,

    /// Step: stay on the first value until the segment ends.
    Hold,

    /// Cubic bezier timing curve.
    /// x values are kept in [0, 1] so the curve stays a function of time.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// Evaluate the easing curve at the given progress.
    ///
    /// Input is clamped to `[0, 1]`. The output may leave that range for
    /// bezier curves with overshooting y control points.
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Hold => {
                if t >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(*x1, *y1, *x2, *y2, t),
        }
    }

    /// Create a cubic bezier timing curve.
    ///
    /// Exported tangents occasionally overshoot the unit interval on x by a
    /// rounding error; x values are clamped rather than rejected.
    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::CubicBezier {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    /// Whether the curve is a hold step.
    pub fn is_hold(&self) -> bool {
        matches!(self, Self::Hold)
    }
}

/// Evaluate a cubic bezier timing curve at `progress`.
///
/// Newton-Raphson finds the curve parameter whose x matches `progress`; if
/// it fails to converge (flat derivative near the ends) bisection takes over.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, progress: f64) -> f64 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    let t = solve_bezier_x(x1, x2, progress);
    bezier_component(y1, y2, t)
}

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 32;
const SOLVE_EPSILON: f64 = 1e-7;

fn solve_bezier_x(x1: f64, x2: f64, target_x: f64) -> f64 {
    let mut t = target_x;

    for _ in 0..NEWTON_ITERATIONS {
        let x = bezier_component(x1, x2, t) - target_x;
        if x.abs() < SOLVE_EPSILON {
            return t;
        }

        let dx = bezier_x_derivative(x1, x2, t);
        if dx.abs() < 1e-6 {
            break;
        }

        t = (t - x / dx).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    t = target_x;
    for _ in 0..BISECTION_ITERATIONS {
        let x = bezier_component(x1, x2, t);
        if (x - target_x).abs() < SOLVE_EPSILON {
            break;
        }
        if x < target_x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }

    t
}

/// One coordinate of the curve at parameter t.
/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_component(p1: f64, p2: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    3.0 * mt2 * t * p1 + 3.0 * mt * t2 * p2 + t3
}

/// dx/dt = 3(1-t)²·x1 + 6(1-t)t·(x2-x1) + 3t²·(1-x2)
#[inline]
fn bezier_x_derivative(x1: f64, x2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * x1 + 6.0 * mt * t * (x2 - x1) + 3.0 * t * t * (1.0 - x2)
}
