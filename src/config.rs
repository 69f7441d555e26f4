use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;
use vrwidgets_core::Theme;
use vrwidgets_ui3d::Ui3dConfig;

/// Script of the headless docking run.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Frames to simulate.
    pub frames: u64,
    /// Frames spent moving window A toward window B.
    pub approach_frames: u64,
    /// Frame at which the grip on window A is released.
    pub release_frame: u64,
    /// Where A's right anchor stops relative to B's left anchor.
    pub approach_offset: [f32; 3],
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            frames: 90,
            approach_frames: 30,
            release_frame: 40,
            approach_offset: [-0.01, 0.005, 0.0],
        }
    }
}

/// Everything the runner reads from its config file: the widget tunables
/// (`[geometry]`, `[collider]`, `[docking]`) plus `[scenario]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AppConfig {
    pub ui: Ui3dConfig,
    pub scenario: ScenarioConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScenarioSection {
    scenario: ScenarioConfig,
}

impl AppConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let ui = Ui3dConfig::from_toml_str(contents)?;
        let section: ScenarioSection =
            toml::from_str(contents).context("invalid [scenario] section")?;
        Ok(Self {
            ui,
            scenario: section.scenario,
        })
    }

    /// Load configuration, failing on any read or parse error.
    pub fn load_strict(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to load config {}", path.display()))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match Self::load_strict(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("{err:#}. Using defaults");
                Self::default()
            }
        }
    }
}

/// Load a theme, strictly or falling back to the builtin palette.
pub fn load_theme(path: Option<&Path>, strict: bool) -> Result<Theme> {
    match path {
        None => Ok(Theme::builtin()),
        Some(path) if strict => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read theme {}", path.display()))?;
            Theme::from_toml_str(&contents)
                .with_context(|| format!("failed to load theme {}", path.display()))
        }
        Some(path) => Ok(Theme::load_from_path(path)),
    }
}
