//! RGBA color carried by color-valued control points
//!
//! The alpha channel doubles as the ordinate of a color transfer function,
//! so it is kept as a plain float rather than a packed byte.

use serde::{Deserialize, Serialize};

/// A color with normalized channels (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    /// Create a color, clamping every channel into 0.0..=1.0
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
            a: clamp_unit(a),
        }
    }

    /// Opaque color from three channels
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color from 8-bit channels
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Same color with a different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Component-wise linear interpolation (t = 0 gives `self`, t = 1 gives `other`)
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = clamp_unit(t);
        Rgba::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }
}

const fn clamp_unit(v: f32) -> f32 {
    // NaN collapses to 0
    if v >= 1.0 {
        1.0
    } else if v > 0.0 {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_are_clamped() {
        let c = Rgba::new(1.5, -0.2, 0.5, 2.0);
        assert_eq!(c, Rgba::new(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn test_from_rgba8() {
        let c = Rgba::from_rgba8(255, 0, 51, 191);
        assert!((c.b - 0.2).abs() < 1e-6);
        assert!((c.a - 0.749).abs() < 1e-3);
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = Rgba::TRANSPARENT.lerp(Rgba::WHITE, 0.5);
        assert!((mid.a - 0.5).abs() < 1e-6);
        assert!((mid.r - 0.5).abs() < 1e-6);
    }
}
