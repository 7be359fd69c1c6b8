//! Dark/light color mode and its token form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Token persisted for dark mode.
pub const DARK_TOKEN: &str = "dark";

/// Token persisted for light mode.
pub const LIGHT_TOKEN: &str = "light";

/// The user's chosen color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Dark,
    Light,
}

impl ColorMode {
    /// Parses a stored token.
    ///
    /// Only the exact strings `"dark"` and `"light"` are recognized. Anything
    /// else, including different casing or surrounding whitespace, is `None`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use folio_theme::ColorMode;
    ///
    /// assert_eq!(ColorMode::from_token("light"), Some(ColorMode::Light));
    /// assert_eq!(ColorMode::from_token("Dark"), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            DARK_TOKEN => Some(ColorMode::Dark),
            LIGHT_TOKEN => Some(ColorMode::Light),
            _ => None,
        }
    }

    /// Returns the token written to storage.
    pub fn as_token(self) -> &'static str {
        match self {
            ColorMode::Dark => DARK_TOKEN,
            ColorMode::Light => LIGHT_TOKEN,
        }
    }

    /// Returns the opposite mode.
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Dark => ColorMode::Light,
            ColorMode::Light => ColorMode::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ColorMode::Dark
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}
