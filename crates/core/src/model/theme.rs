use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ThemeError {
    #[error("theme name is empty")]
    Empty,
}

/// Identifier of a visual theme, e.g. `dark`.
///
/// Any non-empty string is accepted verbatim; styling rules decide what a
/// name means.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThemeName(String);

impl ThemeName {
    /// # Errors
    ///
    /// Returns `ThemeError::Empty` for an empty name.
    pub fn new(name: impl Into<String>) -> Result<Self, ThemeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ThemeError::Empty);
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ThemeName({})", self.0)
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ThemeName {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ThemeName {
    type Error = ThemeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ThemeName> for String {
    fn from(value: ThemeName) -> Self {
        value.0
    }
}

/// The active theme, owned by whoever applies it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemePreference {
    current: Option<ThemeName>,
}

impl ThemePreference {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<&ThemeName> {
        self.current.as_ref()
    }

    /// Interpret a raw stored value. Empty values mean "nothing saved".
    #[must_use]
    pub fn from_stored(raw: Option<String>) -> Option<ThemeName> {
        raw.and_then(|raw| ThemeName::new(raw).ok())
    }

    pub fn select(&mut self, name: ThemeName) {
        self.current = Some(name);
    }
}
