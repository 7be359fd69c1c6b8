//! The theme preference controller, its changing-marker deadline, and the
//! timer-driven wrapper for hosts that do not poll.

#[allow(clippy::module_inception)]
mod controller;
mod marker;
mod scheduled;

pub use controller::{ChangeListener, ThemeController};
pub use marker::ChangingMarker;
pub use scheduled::ScheduledTheme;
