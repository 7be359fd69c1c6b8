//! Theme configuration: storage key, class names, durations and fallback.
//!
//! Every field has a default matching the site's markup, so a YAML file only
//! needs the fields it changes:
//!
//! ```yaml
//! storage_key: site-theme
//! changing_duration_ms: 400
//! fallback: follow_system
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::theme::DefaultMode;

/// Default storage key holding the `"dark"`/`"light"` token.
pub const DEFAULT_STORAGE_KEY: &str = "theme";
/// Default class present on the document root in light mode.
pub const DEFAULT_LIGHT_CLASS: &str = "light-mode";
/// Default class present on the document root while a swap is in flight.
pub const DEFAULT_CHANGING_CLASS: &str = "theme-changing";
/// Default attribute marking the toggle control element.
pub const DEFAULT_TOGGLE_MARKER: &str = "data-theme-toggle-btn";
/// Default lifetime of the changing class, in milliseconds.
pub const DEFAULT_CHANGING_DURATION_MS: u64 = 650;
/// Default duration of the control rotation cue, in milliseconds.
pub const DEFAULT_CUE_DURATION_MS: u64 = 600;

/// Fixed names and timings used by a [`ThemeController`](crate::ThemeController).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub light_class: String,
    pub changing_class: String,
    pub changing_duration_ms: u64,
    pub toggle_marker: String,
    pub cue_duration_ms: u64,
    pub fallback: DefaultMode,
}

impl ThemeConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ThemeConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    /// Checks that names are usable as storage keys, class names and attributes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("storage_key", &self.storage_key),
            ("light_class", &self.light_class),
            ("changing_class", &self.changing_class),
            ("toggle_marker", &self.toggle_marker),
        ];
        for (field, value) in names {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidName { field });
            }
        }
        if self.light_class == self.changing_class {
            return Err(ConfigError::ClassCollision(self.light_class.clone()));
        }
        Ok(())
    }

    /// How long the changing class stays on the document after a toggle.
    pub fn changing_duration(&self) -> Duration {
        Duration::from_millis(self.changing_duration_ms)
    }

    pub fn cue_duration(&self) -> Duration {
        Duration::from_millis(self.cue_duration_ms)
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            light_class: DEFAULT_LIGHT_CLASS.to_string(),
            changing_class: DEFAULT_CHANGING_CLASS.to_string(),
            changing_duration_ms: DEFAULT_CHANGING_DURATION_MS,
            toggle_marker: DEFAULT_TOGGLE_MARKER.to_string(),
            cue_duration_ms: DEFAULT_CUE_DURATION_MS,
            fallback: DefaultMode::Dark,
        }
    }
}
