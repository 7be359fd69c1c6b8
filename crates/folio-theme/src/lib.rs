//! # Folio Theme - dark/light preference synchronization
//!
//! `folio-theme` keeps a site's dark/light preference consistent between
//! three places: durable key-value storage, the document's class list, and
//! the in-memory state the UI reads.
//!
//! ## Core Concepts
//!
//! - [`ThemeController`]: Owns the preference; [`initialize`](ThemeController::initialize)
//!   resolves it once, [`toggle`](ThemeController::toggle) flips it
//! - [`PreferenceStore`], [`Document`], [`Clock`]: Injected host collaborators
//! - [`ScheduledTheme`]: Wrapper that clears the changing class with a
//!   [`Timer`] instead of [`poll`](ThemeController::poll)
//! - [`ThemeConfig`]: Storage key, class names, durations and fallback
//! - [`boot_script`]: Inline `<head>` script that applies the stored theme
//!   before first paint
//!
//! ## Quick Start
//!
//! ```rust
//! use folio_theme::{Document, ManualClock, MemoryDocument, MemoryStore, ThemeConfig, ThemeController};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let mut theme = ThemeController::new(
//!     ThemeConfig::default(),
//!     MemoryStore::new(),
//!     MemoryDocument::new(),
//!     clock.clone(),
//! );
//!
//! // Nothing stored: resolves to dark.
//! assert_eq!(theme.is_dark(), None);
//! theme.initialize();
//! assert_eq!(theme.is_dark(), Some(true));
//!
//! // Toggling marks the document as changing for a short window.
//! theme.toggle();
//! assert!(theme.document().has_class("light-mode"));
//! assert!(theme.document().has_class("theme-changing"));
//!
//! clock.advance(Duration::from_millis(650));
//! theme.poll();
//! assert!(!theme.document().has_class("theme-changing"));
//! ```
//!
//! ## Failure Handling
//!
//! Storage is best-effort. Read failures resolve to the fallback mode and
//! write failures leave the preference session-only; both are logged at
//! debug level through the [`log`] facade and never returned to callers.
//!
//! ## Browser Use
//!
//! With the `web` feature, `host::web` provides `localStorage`,
//! `document.documentElement`, `performance.now()` and `setTimeout` bindings,
//! plus `host::web::page_theme` to wire them together.

mod config;
mod controller;
mod error;
pub mod host;
mod script;
mod theme;

pub use config::{
    ThemeConfig, DEFAULT_CHANGING_CLASS, DEFAULT_CHANGING_DURATION_MS, DEFAULT_CUE_DURATION_MS,
    DEFAULT_LIGHT_CLASS, DEFAULT_STORAGE_KEY, DEFAULT_TOGGLE_MARKER,
};
pub use controller::{ChangeListener, ChangingMarker, ScheduledTheme, ThemeController};
pub use error::{ConfigError, ScriptError, StorageError};
pub use host::{
    Clock, ControlCue, ControlElement, Document, JsonFileStore, ManualClock, ManualTimeout,
    ManualTimer, MemoryDocument, MemoryStore, PreferenceStore, SystemClock, Timer,
    UnavailableStore,
};
pub use script::{boot_script, boot_script_tag};
#[cfg(not(target_arch = "wasm32"))]
pub use theme::OsDetector;
pub use theme::{
    default_detector, ColorMode, DefaultMode, FixedDetector, SystemDetector, ThemeState,
    DARK_TOKEN, LIGHT_TOKEN,
};
