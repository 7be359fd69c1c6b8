//! In-memory collaborators for tests and simulations.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::{Clock, ControlCue, Document, PreferenceStore, Timer};
use crate::error::StorageError;

/// A `HashMap`-backed store that counts writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `value` under `key`.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self { entries, writes: 0 }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of successful writes since construction.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Storage that is switched off: every read and write fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl PreferenceStore for UnavailableStore {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

/// The toggle control inside a [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlElement {
    pub marker: String,
    pub last_cue: Option<ControlCue>,
    pub cues_applied: usize,
}

/// A document root reduced to its class list, plus an optional control.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    classes: BTreeSet<String>,
    control: Option<ControlElement>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a control element carrying `marker`.
    pub fn with_control(mut self, marker: &str) -> Self {
        self.control = Some(ControlElement {
            marker: marker.to_string(),
            last_cue: None,
            cues_applied: 0,
        });
        self
    }

    /// Classes currently on the root, in sorted order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn control(&self) -> Option<&ControlElement> {
        self.control.as_ref()
    }
}

impl Document for MemoryDocument {
    fn set_class(&mut self, name: &str, present: bool) {
        if present {
            self.classes.insert(name.to_string());
        } else {
            self.classes.remove(name);
        }
    }

    fn has_class(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    fn apply_control_cue(&mut self, marker: &str, cue: &ControlCue) -> bool {
        match self.control.as_mut() {
            Some(control) if control.marker == marker => {
                control.last_cue = Some(*cue);
                control.cues_applied += 1;
                true
            }
            _ => false,
        }
    }
}

/// A clock advanced by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

struct PendingCallback {
    due: Duration,
    alive: Weak<()>,
    callback: Box<dyn FnOnce()>,
}

/// A timer whose callbacks run when [`ManualTimer::run_due`] is called.
///
/// Due times are read from the shared [`ManualClock`]. Clones share the
/// same queue.
#[derive(Clone)]
pub struct ManualTimer {
    clock: ManualClock,
    queue: Rc<RefCell<Vec<PendingCallback>>>,
}

/// Handle returned by [`ManualTimer`]. Dropping it cancels the callback.
#[derive(Debug)]
pub struct ManualTimeout {
    _alive: Rc<()>,
}

impl ManualTimer {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            queue: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Callbacks neither run nor cancelled.
    pub fn pending(&self) -> usize {
        self.queue
            .borrow()
            .iter()
            .filter(|pending| pending.alive.strong_count() > 0)
            .count()
    }

    /// Runs every live callback whose due time has been reached.
    ///
    /// Returns how many ran. Callbacks may start new timers.
    pub fn run_due(&self) -> usize {
        let now = self.clock.now();
        let due: Vec<PendingCallback> = {
            let mut queue = self.queue.borrow_mut();
            queue.retain(|pending| pending.alive.strong_count() > 0);
            let (due, rest): (Vec<_>, Vec<_>) =
                queue.drain(..).partition(|pending| pending.due <= now);
            *queue = rest;
            due
        };
        let count = due.len();
        for pending in due {
            (pending.callback)();
        }
        count
    }
}

impl Timer for ManualTimer {
    type Handle = ManualTimeout;

    fn start(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> ManualTimeout {
        let alive = Rc::new(());
        self.queue.borrow_mut().push(PendingCallback {
            due: self.clock.now().saturating_add(delay),
            alive: Rc::downgrade(&alive),
            callback,
        });
        ManualTimeout { _alive: alive }
    }
}

impl fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualTimer")
            .field("now", &self.clock.now())
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read("theme").unwrap(), None);
        store.write("theme", "light").unwrap();
        store.write("theme", "dark").unwrap();
        assert_eq!(store.get("theme"), Some("dark"));
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn test_unavailable_store_fails_both_ways() {
        let mut store = UnavailableStore;
        assert!(matches!(store.read("theme"), Err(StorageError::Unavailable)));
        assert!(matches!(
            store.write("theme", "dark"),
            Err(StorageError::Unavailable)
        ));
    }

    #[test]
    fn test_memory_document_classes() {
        let mut doc = MemoryDocument::new();
        doc.set_class("light-mode", true);
        doc.set_class("theme-changing", true);
        doc.set_class("light-mode", false);
        assert!(!doc.has_class("light-mode"));
        assert_eq!(doc.classes().collect::<Vec<_>>(), vec!["theme-changing"]);
    }

    #[test]
    fn test_control_cue_requires_matching_marker() {
        let cue = ControlCue {
            rotation_degrees: 360,
            duration: Duration::from_millis(600),
        };
        let mut doc = MemoryDocument::new().with_control("data-theme-toggle-btn");
        assert!(!doc.apply_control_cue("data-other", &cue));
        assert!(doc.apply_control_cue("data-theme-toggle-btn", &cue));
        let control = doc.control().unwrap();
        assert_eq!(control.cues_applied, 1);
        assert_eq!(control.last_cue, Some(cue));
    }

    #[test]
    fn test_cue_without_control_is_tolerated() {
        let cue = ControlCue {
            rotation_degrees: 360,
            duration: Duration::ZERO,
        };
        assert!(!MemoryDocument::new().apply_control_cue("data-theme-toggle-btn", &cue));
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let view = clock.clone();
        clock.advance(Duration::from_millis(100));
        assert_eq!(view.now(), Duration::from_millis(100));
        view.set(Duration::from_secs(2));
        assert_eq!(clock.now(), Duration::from_secs(2));
    }

    #[test]
    fn test_manual_timer_runs_when_due() {
        let clock = ManualClock::new();
        let timer = ManualTimer::new(clock.clone());
        let fired = Rc::new(Cell::new(0));
        let count = Rc::clone(&fired);
        let _handle = timer.start(
            Duration::from_millis(650),
            Box::new(move || count.set(count.get() + 1)),
        );

        clock.advance(Duration::from_millis(649));
        assert_eq!(timer.run_due(), 0);
        assert_eq!(timer.pending(), 1);

        clock.advance(Duration::from_millis(1));
        assert_eq!(timer.run_due(), 1);
        assert_eq!(fired.get(), 1);
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn test_dropping_handle_cancels() {
        let clock = ManualClock::new();
        let timer = ManualTimer::new(clock.clone());
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let handle = timer.start(Duration::ZERO, Box::new(move || flag.set(true)));

        drop(handle);
        assert_eq!(timer.pending(), 0);
        assert_eq!(timer.run_due(), 0);
        assert!(!fired.get());
    }
}
