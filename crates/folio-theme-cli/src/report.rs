//! Session snapshot printed after each command.

use console::style;
use folio_theme::{
    ColorMode, JsonFileStore, ManualClock, MemoryDocument, PreferenceStore, ThemeController,
};
use serde::Serialize;

pub type Session = ThemeController<JsonFileStore, MemoryDocument, ManualClock>;

/// What the page would look like at the end of the command.
#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub mode: ColorMode,
    /// Token read back from the store, `None` if absent or unreadable.
    pub stored: Option<String>,
    /// Whether the stored token matches the mode.
    pub persisted: bool,
    pub classes: Vec<String>,
    pub changing: bool,
    pub toggles: usize,
}

impl SessionReport {
    pub fn capture(session: &Session, toggles: usize) -> Option<Self> {
        let mode = session.mode()?;
        let stored = match session.store().read(&session.config().storage_key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("could not read back {}: {err}", session.store().path().display());
                None
            }
        };
        Some(Self {
            mode,
            persisted: stored.as_deref() == Some(mode.as_token()),
            stored,
            classes: session.document().classes().map(str::to_string).collect(),
            changing: session.is_changing(),
            toggles,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mode = match self.mode {
            ColorMode::Dark => style("dark").magenta().bold(),
            ColorMode::Light => style("light").yellow().bold(),
        };
        let stored = match (&self.stored, self.persisted) {
            (Some(token), true) => style(token.clone()).green(),
            (Some(token), false) => style(format!("{token} (stale)")).red(),
            (None, _) => style("not persisted".to_string()).red(),
        };
        let classes = if self.classes.is_empty() {
            style("(none)".to_string()).dim()
        } else {
            style(self.classes.join(" "))
        };
        let changing = if self.changing { "yes" } else { "no" };

        let mut out = String::new();
        out.push_str(&format!("{:<10}{}\n", "mode:", mode));
        out.push_str(&format!("{:<10}{}\n", "stored:", stored));
        out.push_str(&format!("{:<10}{}\n", "classes:", classes));
        out.push_str(&format!("{:<10}{}\n", "changing:", changing));
        if self.toggles > 0 {
            out.push_str(&format!("{:<10}{}\n", "toggles:", self.toggles));
        }
        out
    }
}
