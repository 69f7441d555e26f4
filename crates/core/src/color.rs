//! Linear RGBA color value shared by every widget color slot.

use glam::Vec4;
use serde::{Deserialize, Serialize};

/// RGBA color with components in `[0, 1]`.
///
/// Serialized as a plain `[r, g, b, a]` array so theme files stay compact.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable,
)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Neutral mid grey, the fallback constant of a fresh [`crate::ColorReference`].
    pub const GREY: Self = Self::rgb(0.5, 0.5, 0.5);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Light grey used as the default widget body color.
    pub const DEFAULT_WIDGET: Self = Self::rgb(0.8, 0.8, 0.8);
    /// Dark grey used behind panels.
    pub const DEFAULT_BACKGROUND: Self = Self::rgb(0.2, 0.2, 0.2);
    /// Darker grey used for slider rails.
    pub const DEFAULT_SLIDER_RAIL: Self = Self::rgb(0.1, 0.1, 0.1);
    /// Lighter grey used for slider knobs.
    pub const DEFAULT_SLIDER_KNOB: Self = Self::rgb(0.9, 0.9, 0.9);

    /// Build a color from all four channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Return the same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Channels as an array, the layout material parameters expect.
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Component-wise linear interpolation.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Vec4::from(self).lerp(Vec4::from(other), t).into()
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::GREY
    }
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

impl From<Vec4> for Color {
    fn from(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Color> for Vec4 {
    fn from(c: Color) -> Self {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}
