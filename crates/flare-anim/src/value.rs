//! Value types carried by keyframes.
//!
//! # Color channel space
//!
//! `Color` stores straight (un-premultiplied) sRGB-encoded components in
//! `0.0..=1.0`, the same encoding authoring tools write out. Interpolation
//! blends these components linearly, alpha included. Conversion to linear
//! premultiplied values only happens when a track is handed to a render
//! target (see [`Color::to_lin_premul`]).

use palette::{FromColor, LinSrgba, Srgba};
use serde::{Deserialize, Serialize};

/// 2D vector, used for offsets and bezier tangents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 3D vector (anchor points, positions with depth).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// RGBA color, straight sRGB components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to linear premultiplied RGBA, the layout render targets consume.
    pub fn to_lin_premul(&self) -> [f32; 4] {
        let s = Srgba::new(
            self.r.clamp(0.0, 1.0) as f32,
            self.g.clamp(0.0, 1.0) as f32,
            self.b.clamp(0.0, 1.0) as f32,
            self.a.clamp(0.0, 1.0) as f32,
        );
        let lin: LinSrgba = LinSrgba::from_color(s);
        [
            lin.red * lin.alpha,
            lin.green * lin.alpha,
            lin.blue * lin.alpha,
            lin.alpha,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
