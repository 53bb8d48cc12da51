//! Empirical fits between authoring units and render units.
//!
//! Some authoring parameters have no closed-form render equivalent. These
//! quadratics were fitted against reference renders and must be kept as-is
//! so existing animations keep their look.

/// `a·x² + b·x`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticFit {
    pub a: f64,
    pub b: f64,
}

impl QuadraticFit {
    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x
    }
}

/// Shadow effect distance to render offset magnitude.
/// Reference pairs: 5 → ~4, 10 → ~5.
pub const DISTANCE_TO_OFFSET: QuadraticFit = QuadraticFit::new(-0.06, 1.1);

/// Shadow effect softness to render blur radius.
/// Reference pairs: 10 → ~2.5, 50 → ~6.25.
pub const SOFTNESS_TO_RADIUS: QuadraticFit = QuadraticFit::new(-0.003, 0.281);
