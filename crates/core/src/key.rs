//! Namespaced color variable keys.
//!
//! Theme variables are addressed by stable string identifiers such as
//! `ui:hovered`. Keys are ordered and validated so theme files iterate
//! deterministically and typos surface at load time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default namespace used when a key omits an explicit namespace.
pub const DEFAULT_NAMESPACE: &str = "ui";

/// Error returned when parsing an invalid [`ColorKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorKeyError {
    message: String,
}

impl ColorKeyError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ColorKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ColorKeyError {}

/// A namespaced key of the form `namespace:name`.
///
/// Ordering is lexical by `(namespace, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorKey {
    namespace: String,
    name: String,
}

impl ColorKey {
    /// Parse a key, accepting `namespace:name` or a bare `name`
    /// (which lands in [`DEFAULT_NAMESPACE`]).
    pub fn parse(input: &str) -> Result<Self, ColorKeyError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ColorKeyError::new("ColorKey cannot be empty"));
        }

        let (namespace, name) = match input.split_once(':') {
            Some((ns, n)) => (ns.trim(), n.trim()),
            None => (DEFAULT_NAMESPACE, input),
        };

        validate_segment("namespace", namespace, 64)?;
        validate_segment("name", name, 128)?;

        Ok(Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }

    /// Key namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key name inside its namespace.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

impl FromStr for ColorKey {
    type Err = ColorKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ColorKey {
    type Error = ColorKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ColorKey> for String {
    fn from(key: ColorKey) -> Self {
        key.to_string()
    }
}

fn validate_segment(what: &str, segment: &str, max_len: usize) -> Result<(), ColorKeyError> {
    if segment.is_empty() {
        return Err(ColorKeyError::new(format!("ColorKey {what} cannot be empty")));
    }
    if segment.len() > max_len {
        return Err(ColorKeyError::new(format!(
            "ColorKey {what} too long (max {max_len})"
        )));
    }
    if !segment
        .chars()
        .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.' | '/'))
    {
        return Err(ColorKeyError::new(format!(
            "ColorKey {what} has invalid characters (allowed: a-z0-9_./-)"
        )));
    }
    Ok(())
}
