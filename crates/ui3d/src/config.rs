//! Tunables for geometry subdivision, colliders and window docking.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;
use tracing::warn;

use crate::geometry::{DEFAULT_CORNER_SEGMENTS_FIXED, DEFAULT_CORNER_SEGMENTS_PER_UNIT};

/// Errors from strict configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for [`Ui3dConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value parsed but is outside its usable range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Dotted field path.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Corner subdivision used by widgets that build rounded shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Fixed part of the corner subdivision.
    pub corner_segments_fixed: u32,
    /// Corner subdivisions per unit of arc length.
    pub corner_segments_per_unit: u32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            corner_segments_fixed: DEFAULT_CORNER_SEGMENTS_FIXED,
            corner_segments_per_unit: DEFAULT_CORNER_SEGMENTS_PER_UNIT,
        }
    }
}

/// Minimum collider depths so flat widgets stay pickable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColliderConfig {
    /// Depth floor for ordinary widgets.
    pub min_depth_shallow: f32,
    /// Depth floor for widgets grabbed from the side, like slider rails.
    pub min_depth_deep: f32,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            min_depth_shallow: 0.03,
            min_depth_deep: 0.1,
        }
    }
}

/// Window docking feedback and proximity volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockingConfig {
    /// Scale change applied to candidate anchors each frame.
    pub pulse_step: f32,
    /// Scale excursion at which the pulse reverses.
    pub pulse_threshold: f32,
    /// Half extent of the anchor trigger cube.
    pub trigger_half_extent: f32,
}

impl Default for DockingConfig {
    fn default() -> Self {
        Self {
            pulse_step: 0.01,
            pulse_threshold: 0.08,
            trigger_half_extent: 0.02,
        }
    }
}

/// Root configuration of the widget runtime.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ui3dConfig {
    /// Mesh subdivision.
    pub geometry: GeometryConfig,
    /// Collider depth floors.
    pub collider: ColliderConfig,
    /// Docking behavior.
    pub docking: DockingConfig,
}

impl Ui3dConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a file.
    pub fn load_strict(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load a file, falling back to defaults on any error.
    pub fn load_from_path(path: &Path) -> Self {
        match Self::load_strict(path) {
            Ok(config) => config,
            Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!("UI config not found at {}. Using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                warn!("Failed to load {}: {err}. Using defaults", path.display());
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = |value: f32| value.is_finite() && value > 0.0;
        if !(self.collider.min_depth_shallow.is_finite() && self.collider.min_depth_shallow >= 0.0)
        {
            return Err(ConfigError::Invalid {
                field: "collider.min_depth_shallow",
                reason: "must be a finite non-negative number",
            });
        }
        if !(self.collider.min_depth_deep.is_finite() && self.collider.min_depth_deep >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "collider.min_depth_deep",
                reason: "must be a finite non-negative number",
            });
        }
        if !positive(self.docking.pulse_step) {
            return Err(ConfigError::Invalid {
                field: "docking.pulse_step",
                reason: "must be positive",
            });
        }
        if !positive(self.docking.pulse_threshold) {
            return Err(ConfigError::Invalid {
                field: "docking.pulse_threshold",
                reason: "must be positive",
            });
        }
        if !positive(self.docking.trigger_half_extent) {
            return Err(ConfigError::Invalid {
                field: "docking.trigger_half_extent",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}
