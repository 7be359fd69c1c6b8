//! Fallback resolution when no usable token is stored.

use serde::{Deserialize, Serialize};

use super::mode::ColorMode;

/// Mode resolved when storage holds no recognized token.
///
/// [`DefaultMode::Dark`] is the default and never consults the operating
/// system. [`DefaultMode::FollowSystem`] asks the controller's
/// [`SystemDetector`] and falls back to dark if it has no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultMode {
    #[default]
    Dark,
    FollowSystem,
}

impl DefaultMode {
    /// Resolves the fallback, consulting `detector` only for `FollowSystem`.
    pub fn resolve(self, detector: &dyn SystemDetector) -> ColorMode {
        match self {
            DefaultMode::Dark => ColorMode::Dark,
            DefaultMode::FollowSystem => detector.detect().unwrap_or(ColorMode::Dark),
        }
    }
}

/// Reports the operating system's preferred color scheme.
pub trait SystemDetector {
    /// Returns `None` when the scheme cannot be determined.
    fn detect(&self) -> Option<ColorMode>;
}

/// A detector that always answers the same thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedDetector(pub Option<ColorMode>);

impl SystemDetector for FixedDetector {
    fn detect(&self) -> Option<ColorMode> {
        self.0
    }
}

/// Detects the desktop color scheme via the `dark-light` crate.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct OsDetector;

#[cfg(not(target_arch = "wasm32"))]
impl SystemDetector for OsDetector {
    fn detect(&self) -> Option<ColorMode> {
        use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};

        #[allow(unreachable_patterns)]
        match detect_os_theme() {
            OsThemeMode::Dark => Some(ColorMode::Dark),
            OsThemeMode::Light => Some(ColorMode::Light),
            _ => None,
        }
    }
}

/// The detector a controller uses unless another is supplied.
pub fn default_detector() -> Box<dyn SystemDetector> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Box::new(crate::host::web::MediaQueryDetector)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        Box::new(FixedDetector(None))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(OsDetector)
    }
}
