//! Color mode primitives.
//!
//! This module provides:
//!
//! - [`ColorMode`]: Dark or light, with its persisted token form
//! - [`ThemeState`]: The preference before and after initialization
//! - [`DefaultMode`]: What to resolve when nothing usable is stored
//! - [`SystemDetector`]: Source of the operating system's color scheme

mod fallback;
mod mode;
mod state;

#[cfg(not(target_arch = "wasm32"))]
pub use fallback::OsDetector;
pub use fallback::{default_detector, DefaultMode, FixedDetector, SystemDetector};
pub use mode::{ColorMode, DARK_TOKEN, LIGHT_TOKEN};
pub use state::ThemeState;
