//! Host collaborators the controller is wired to.
//!
//! The controller never touches globals. Storage, the document and time are
//! supplied as trait objects so the same logic runs in a browser, in the CLI
//! against a JSON file, and in tests against in-memory fakes.
//!
//! - [`PreferenceStore`]: durable key-value storage
//! - [`Document`]: root class flags and the optional toggle control
//! - [`Clock`]: monotonic time for the changing-marker deadline
//! - [`Timer`]: one-shot callbacks that clear the marker without polling

mod file;
mod memory;
#[cfg(feature = "web")]
pub mod web;

use std::time::{Duration, Instant};

use crate::error::StorageError;

pub use file::JsonFileStore;
pub use memory::{
    ControlElement, ManualClock, ManualTimeout, ManualTimer, MemoryDocument, MemoryStore,
    UnavailableStore,
};

/// Durable key-value storage for the preference token.
pub trait PreferenceStore {
    /// Returns the stored value, or `None` if the key is absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// The document's visual state.
pub trait Document {
    /// Adds (`present == true`) or removes a class on the document root.
    fn set_class(&mut self, name: &str, present: bool);

    fn has_class(&self, name: &str) -> bool;

    /// Applies a cosmetic cue to the element carrying `marker`.
    ///
    /// Returns `false` if no such element exists.
    fn apply_control_cue(&mut self, marker: &str, cue: &ControlCue) -> bool;
}

/// Monotonic time with an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// One-shot timer fired from the host's event loop.
pub trait Timer {
    /// Dropping the handle cancels the callback if it has not run yet.
    type Handle;

    fn start(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Rotation applied to the toggle control on each swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlCue {
    /// Cumulative rotation, so successive toggles keep spinning forward.
    pub rotation_degrees: u32,
    pub duration: Duration,
}

/// Clock backed by [`std::time::Instant`].
///
/// Not usable on `wasm32-unknown-unknown`; use `host::web::WebClock` there.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
