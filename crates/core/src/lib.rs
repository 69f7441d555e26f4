#![warn(missing_docs)]
//! Core primitives shared across the widget workspace: colors, the theme
//! registry of shared color variables, and scoped guards.

mod color;
mod guard;
mod key;
mod theme;

use serde::{Deserialize, Serialize};

pub use color::Color;
pub use guard::{GuardHolder, OrderedGuard};
pub use key::{ColorKey, ColorKeyError, DEFAULT_NAMESPACE};
pub use theme::{keys, ColorReference, ColorVariable, Theme, ThemeError};

/// Frame counter of the cooperative update loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameTick(pub u64);

impl FrameTick {
    /// First frame.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` frames.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }

    /// The following frame.
    pub fn next(self) -> Self {
        self.advance(1)
    }
}
