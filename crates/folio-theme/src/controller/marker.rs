//! Deadline for the transient "theme is changing" class.

use std::time::Duration;

/// At most one pending clear deadline. Arming again replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangingMarker {
    deadline: Option<Duration>,
}

impl ChangingMarker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules the clear for `now + lifetime`, dropping any earlier deadline.
    pub fn arm(&mut self, now: Duration, lifetime: Duration) {
        self.deadline = Some(now.saturating_add(lifetime));
    }

    /// Clears the deadline if it has been reached. Returns `true` if it fired.
    pub fn expire(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drops the pending deadline. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
