//! Shared color variables and the theme registry that owns them.
//!
//! A [`ColorReference`] either carries its own constant or points at a
//! [`ColorVariable`]. Variables are reference-counted handles, so editing one
//! through the [`Theme`] (or through any reference bound to it) is visible to
//! every widget slot that shares it. Themes are passed explicitly to whoever
//! builds widgets; there is no process-wide theme.

use crate::{Color, ColorKey, ColorKeyError};
use serde::Deserialize;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while building or loading a [`Theme`].
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The theme file could not be read.
    #[error("failed to read theme: {0}")]
    Io(#[from] std::io::Error),
    /// The theme file is not valid TOML or has the wrong shape.
    #[error("failed to parse theme: {0}")]
    Parse(#[from] toml::de::Error),
    /// A variable name failed validation.
    #[error("invalid color key: {0}")]
    InvalidKey(#[from] ColorKeyError),
    /// The theme has no variable with this key.
    #[error("unknown color variable {0}")]
    UnknownVariable(String),
}

/// Shared, mutable color value.
///
/// Cloning the handle shares the underlying cell.
#[derive(Clone)]
pub struct ColorVariable(Rc<Cell<Color>>);

impl ColorVariable {
    /// Create a fresh variable holding `value`.
    pub fn new(value: Color) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    /// Current value.
    pub fn get(&self) -> Color {
        self.0.get()
    }

    /// Overwrite the value for every holder of this handle.
    pub fn set(&self, value: Color) {
        self.0.set(value);
    }

    /// Whether both handles point at the same variable.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ColorVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ColorVariable").field(&self.get()).finish()
    }
}

/// A color slot resolving to a constant or to a shared [`ColorVariable`].
#[derive(Debug, Clone)]
pub struct ColorReference {
    /// Use `constant` even when a variable is bound.
    pub use_constant: bool,
    /// Literal value.
    pub constant: Color,
    reference: Option<ColorVariable>,
}

impl Default for ColorReference {
    fn default() -> Self {
        Self::constant(Color::GREY)
    }
}

impl ColorReference {
    /// A reference that always resolves to `color`.
    pub fn constant(color: Color) -> Self {
        Self {
            use_constant: true,
            constant: color,
            reference: None,
        }
    }

    /// A reference that follows `variable`.
    pub fn shared(variable: ColorVariable) -> Self {
        Self {
            use_constant: false,
            constant: Color::GREY,
            reference: Some(variable),
        }
    }

    /// Bind to `variable` and start following it.
    pub fn bind(&mut self, variable: ColorVariable) {
        self.reference = Some(variable);
        self.use_constant = false;
    }

    /// Drop the variable binding; the constant takes over.
    pub fn unbind(&mut self) {
        self.reference = None;
        self.use_constant = true;
    }

    /// The bound variable, if any.
    pub fn variable(&self) -> Option<&ColorVariable> {
        self.reference.as_ref()
    }

    /// Resolved color.
    pub fn value(&self) -> Color {
        match (&self.reference, self.use_constant) {
            (Some(var), false) => var.get(),
            _ => self.constant,
        }
    }

    /// Write `color` to whichever side currently resolves.
    ///
    /// With no bound variable the constant is written even if
    /// `use_constant` is false.
    pub fn set_value(&mut self, color: Color) {
        match (&self.reference, self.use_constant) {
            (Some(var), false) => var.set(color),
            _ => self.constant = color,
        }
    }
}

impl From<Color> for ColorReference {
    fn from(color: Color) -> Self {
        Self::constant(color)
    }
}

/// Well-known variable names used by the default theme and the widgets.
pub mod keys {
    /// Idle widget body.
    pub const BASE: &str = "ui:base";
    /// Label/text foreground.
    pub const TEXT: &str = "ui:text";
    /// Foreground of a disabled widget.
    pub const DISABLED_TEXT: &str = "ui:disabled_text";
    /// Body of a disabled widget.
    pub const DISABLED: &str = "ui:disabled";
    /// Body while the trigger is held on the widget.
    pub const PUSHED: &str = "ui:pushed";
    /// Body of a selected widget.
    pub const SELECTED: &str = "ui:selected";
    /// Body under the ray.
    pub const HOVERED: &str = "ui:hovered";
    /// Body of a checked toggle.
    pub const CHECKED: &str = "ui:checked";
    /// Panel background.
    pub const BACKGROUND: &str = "ui:background";
    /// Slider rail.
    pub const SLIDER_RAIL: &str = "ui:slider_rail";
    /// Slider knob.
    pub const SLIDER_KNOB: &str = "ui:slider_knob";
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThemeFile {
    colors: BTreeMap<String, Color>,
}

/// Registry of named color variables.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    variables: BTreeMap<ColorKey, ColorVariable>,
}

impl Theme {
    /// An empty theme.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in stylesheet.
    pub fn builtin() -> Self {
        let mut theme = Self::empty();
        let entries = [
            (keys::BASE, Color::DEFAULT_WIDGET),
            (keys::TEXT, Color::WHITE),
            (keys::DISABLED_TEXT, Color::rgb(0.5, 0.5, 0.5)),
            (keys::DISABLED, Color::rgb(0.35, 0.35, 0.35).with_alpha(0.5)),
            (keys::PUSHED, Color::rgb(0.6, 0.6, 1.0)),
            (keys::SELECTED, Color::rgb(0.3, 0.55, 0.9)),
            (keys::HOVERED, Color::rgb(1.0, 1.0, 0.6)),
            (keys::CHECKED, Color::rgb(0.45, 0.8, 0.45)),
            (keys::BACKGROUND, Color::DEFAULT_BACKGROUND),
            (keys::SLIDER_RAIL, Color::DEFAULT_SLIDER_RAIL),
            (keys::SLIDER_KNOB, Color::DEFAULT_SLIDER_KNOB),
        ];
        for (name, color) in entries {
            // Built-in names are static and valid.
            if let Ok(key) = ColorKey::parse(name) {
                theme.variables.insert(key, ColorVariable::new(color));
            }
        }
        theme
    }

    /// Define `name` with `value`.
    ///
    /// Redefining an existing variable updates it in place, so references
    /// already bound to it follow the new value.
    pub fn define(&mut self, name: &str, value: Color) -> Result<ColorVariable, ThemeError> {
        let key = ColorKey::parse(name)?;
        let var = self
            .variables
            .entry(key)
            .or_insert_with(|| ColorVariable::new(value))
            .clone();
        var.set(value);
        Ok(var)
    }

    /// Set an existing variable.
    pub fn set(&self, name: &str, value: Color) -> Result<(), ThemeError> {
        let var = self
            .get(name)
            .ok_or_else(|| ThemeError::UnknownVariable(name.to_string()))?;
        var.set(value);
        Ok(())
    }

    /// Look up a variable handle.
    pub fn get(&self, name: &str) -> Option<&ColorVariable> {
        let key = ColorKey::parse(name).ok()?;
        self.variables.get(&key)
    }

    /// A reference following `name`, or a constant grey reference when the
    /// theme has no such variable.
    pub fn reference(&self, name: &str) -> ColorReference {
        match self.get(name) {
            Some(var) => ColorReference::shared(var.clone()),
            None => {
                debug!("theme has no variable {name}; using constant fallback");
                ColorReference::default()
            }
        }
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the theme has no variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterate variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ColorKey, &ColorVariable)> {
        self.variables.iter()
    }

    /// Parse a TOML theme and layer it over [`Theme::builtin`].
    ///
    /// ```toml
    /// [colors]
    /// hovered = [1.0, 0.9, 0.4, 1.0]
    /// "studio:accent" = [0.2, 0.6, 1.0, 1.0]
    /// ```
    pub fn from_toml_str(input: &str) -> Result<Self, ThemeError> {
        let file: ThemeFile = toml::from_str(input)?;
        let mut theme = Self::builtin();
        for (name, color) in file.colors {
            theme.define(&name, color)?;
        }
        Ok(theme)
    }

    /// Load a theme file, falling back to [`Theme::builtin`] on any error.
    pub fn load_from_path(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!("Failed to read theme {}: {err}. Using builtin", path.display());
                return Self::builtin();
            }
        };
        match Self::from_toml_str(&contents) {
            Ok(theme) => theme,
            Err(err) => {
                warn!("Failed to load theme {}: {err}. Using builtin", path.display());
                Self::builtin()
            }
        }
    }
}
