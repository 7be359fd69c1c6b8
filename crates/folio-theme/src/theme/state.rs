//! Preference state as seen by consumers.

use super::mode::ColorMode;

/// The theme preference, including the "not yet determined" state.
///
/// Consumers distinguish [`ThemeState::Uninitialized`] from a resolved light
/// mode so they can avoid rendering a toggle icon before the stored
/// preference has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeState {
    #[default]
    Uninitialized,
    Resolved(ColorMode),
}

impl ThemeState {
    /// Returns the resolved mode, if any.
    pub fn mode(self) -> Option<ColorMode> {
        match self {
            ThemeState::Uninitialized => None,
            ThemeState::Resolved(mode) => Some(mode),
        }
    }

    /// `None` until initialized, then whether the mode is dark.
    pub fn is_dark(self) -> Option<bool> {
        self.mode().map(ColorMode::is_dark)
    }

    /// True while the preference has not been resolved.
    pub fn is_loading(self) -> bool {
        self == ThemeState::Uninitialized
    }
}

impl From<ColorMode> for ThemeState {
    fn from(mode: ColorMode) -> Self {
        ThemeState::Resolved(mode)
    }
}
