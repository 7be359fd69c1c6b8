//! Theme preference controller.

use std::fmt;

use super::marker::ChangingMarker;
use crate::config::ThemeConfig;
use crate::host::{Clock, ControlCue, Document, PreferenceStore, SystemClock};
use crate::theme::{default_detector, ColorMode, SystemDetector, ThemeState};

/// Callback invoked with the mode after each published change.
pub type ChangeListener = Box<dyn FnMut(ColorMode)>;

/// Degrees added to the control rotation per toggle.
const CUE_TURN_DEGREES: u32 = 360;

/// Keeps the theme preference consistent across storage, document and memory.
///
/// One controller is created per page session and passed by reference to
/// whatever needs to read or toggle the theme. After [`initialize`] or
/// [`toggle`] returns, the light class is on the document exactly when the
/// mode is light, and storage (when writable) holds the matching token.
///
/// # Example
///
/// ```rust
/// use folio_theme::{ColorMode, ManualClock, MemoryDocument, MemoryStore, ThemeConfig, ThemeController};
///
/// let mut theme = ThemeController::new(
///     ThemeConfig::default(),
///     MemoryStore::with_entry("theme", "light"),
///     MemoryDocument::new(),
///     ManualClock::new(),
/// );
///
/// assert!(theme.is_loading());
/// assert_eq!(theme.initialize(), ColorMode::Light);
/// assert_eq!(theme.toggle(), Some(ColorMode::Dark));
/// assert_eq!(theme.store().get("theme"), Some("dark"));
/// ```
///
/// [`initialize`]: ThemeController::initialize
/// [`toggle`]: ThemeController::toggle
pub struct ThemeController<S, D, C = SystemClock>
where
    S: PreferenceStore,
    D: Document,
    C: Clock,
{
    config: ThemeConfig,
    store: S,
    document: D,
    clock: C,
    detector: Box<dyn SystemDetector>,
    state: ThemeState,
    marker: ChangingMarker,
    rotation_degrees: u32,
    listeners: Vec<ChangeListener>,
}

impl<S, D, C> ThemeController<S, D, C>
where
    S: PreferenceStore,
    D: Document,
    C: Clock,
{
    /// Creates an uninitialized controller.
    pub fn new(config: ThemeConfig, store: S, document: D, clock: C) -> Self {
        Self {
            config,
            store,
            document,
            clock,
            detector: default_detector(),
            state: ThemeState::Uninitialized,
            marker: ChangingMarker::new(),
            rotation_degrees: 0,
            listeners: Vec::new(),
        }
    }

    /// Replaces the detector consulted by [`DefaultMode::FollowSystem`](crate::DefaultMode::FollowSystem).
    pub fn with_detector(mut self, detector: impl SystemDetector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn state(&self) -> ThemeState {
        self.state
    }

    pub fn mode(&self) -> Option<ColorMode> {
        self.state.mode()
    }

    /// `None` until [`initialize`](Self::initialize) has run.
    pub fn is_dark(&self) -> Option<bool> {
        self.state.is_dark()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Whether a clear deadline is pending.
    ///
    /// Tracks the changing class exactly: both are set by a toggle and both
    /// go away together in [`poll`](Self::poll), [`clear_changing`](Self::clear_changing)
    /// or [`teardown`](Self::teardown). A deadline that has passed but has
    /// not been polled yet still counts as pending.
    pub fn is_changing(&self) -> bool {
        self.marker.is_pending()
    }

    /// Registers a listener called after every published mode change.
    pub fn on_change(&mut self, listener: impl FnMut(ColorMode) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Resolves the stored preference and applies it. Runs once.
    ///
    /// The document class and storage are written before the in-memory
    /// state is published. Later calls return the current mode untouched.
    pub fn initialize(&mut self) -> ColorMode {
        if let Some(mode) = self.state.mode() {
            return mode;
        }

        let stored = match self.store.read(&self.config.storage_key) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("theme preference unreadable, using fallback: {err}");
                None
            }
        };
        let mode = stored
            .as_deref()
            .and_then(ColorMode::from_token)
            .unwrap_or_else(|| self.config.fallback.resolve(self.detector.as_ref()));

        self.apply(mode);
        self.publish(mode);
        log::trace!("theme initialized to {mode} (stored: {stored:?})");
        mode
    }

    /// Flips the mode. Returns `None` without side effects while uninitialized.
    pub fn toggle(&mut self) -> Option<ColorMode> {
        let next = self.state.mode()?.toggled();

        self.state = ThemeState::from(next);
        self.mark_changing();
        self.spin_control();
        self.apply(next);
        self.notify(next);
        log::trace!("theme toggled to {next}");
        Some(next)
    }

    /// Selects `mode` explicitly, toggling only if it differs from the current one.
    pub fn set_mode(&mut self, mode: ColorMode) -> Option<ColorMode> {
        match self.state.mode()? {
            current if current == mode => Some(current),
            _ => self.toggle(),
        }
    }

    /// Clears the changing class once its deadline has passed.
    ///
    /// Call this from the host's event loop. Returns `true` when the class
    /// was removed on this call.
    pub fn poll(&mut self) -> bool {
        if self.marker.expire(self.clock.now()) {
            self.document.set_class(&self.config.changing_class, false);
            true
        } else {
            false
        }
    }

    /// Ends the changing window now, whatever the deadline says.
    ///
    /// Used by timer-driven hosts whose one-shot timer is the deadline.
    /// Returns `true` if a window was open.
    pub fn clear_changing(&mut self) -> bool {
        let was_pending = self.marker.cancel();
        self.document.set_class(&self.config.changing_class, false);
        was_pending
    }

    /// Cancels the pending deadline and removes the changing class.
    pub fn teardown(&mut self) {
        self.clear_changing();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn apply(&mut self, mode: ColorMode) {
        self.document
            .set_class(&self.config.light_class, mode == ColorMode::Light);
        if let Err(err) = self.store.write(&self.config.storage_key, mode.as_token()) {
            log::debug!("theme preference not persisted: {err}");
        }
    }

    fn publish(&mut self, mode: ColorMode) {
        self.state = ThemeState::from(mode);
        self.notify(mode);
    }

    fn notify(&mut self, mode: ColorMode) {
        for listener in &mut self.listeners {
            listener(mode);
        }
    }

    fn mark_changing(&mut self) {
        self.document.set_class(&self.config.changing_class, true);
        self.marker
            .arm(self.clock.now(), self.config.changing_duration());
    }

    fn spin_control(&mut self) {
        let cue = ControlCue {
            rotation_degrees: self.rotation_degrees.wrapping_add(CUE_TURN_DEGREES),
            duration: self.config.cue_duration(),
        };
        if self
            .document
            .apply_control_cue(&self.config.toggle_marker, &cue)
        {
            self.rotation_degrees = cue.rotation_degrees;
        }
    }
}

impl<S, D, C> Drop for ThemeController<S, D, C>
where
    S: PreferenceStore,
    D: Document,
    C: Clock,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<S, D, C> fmt::Debug for ThemeController<S, D, C>
where
    S: PreferenceStore,
    D: Document,
    C: Clock,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("marker", &self.marker)
            .field("rotation_degrees", &self.rotation_degrees)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ManualClock, MemoryDocument, MemoryStore, UnavailableStore};
    use crate::theme::{DefaultMode, FixedDetector};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn controller(store: MemoryStore) -> ThemeController<MemoryStore, MemoryDocument, ManualClock> {
        ThemeController::new(
            ThemeConfig::default(),
            store,
            MemoryDocument::new().with_control("data-theme-toggle-btn"),
            ManualClock::new(),
        )
    }

    #[test]
    fn test_initialize_without_token_defaults_to_dark() {
        let mut theme = controller(MemoryStore::new());
        assert_eq!(theme.initialize(), ColorMode::Dark);
        assert_eq!(theme.is_dark(), Some(true));
        assert_eq!(theme.store().get("theme"), Some("dark"));
        assert!(!theme.document().has_class("light-mode"));
    }

    #[test]
    fn test_initialize_with_light_token() {
        let mut theme = controller(MemoryStore::with_entry("theme", "light"));
        assert_eq!(theme.initialize(), ColorMode::Light);
        assert_eq!(theme.is_dark(), Some(false));
        assert!(theme.document().has_class("light-mode"));
    }

    #[test]
    fn test_initialize_with_unrecognized_token() {
        let mut theme = controller(MemoryStore::with_entry("theme", "Light"));
        assert_eq!(theme.initialize(), ColorMode::Dark);
        assert_eq!(theme.store().get("theme"), Some("dark"));
    }

    #[test]
    fn test_initialize_runs_once() {
        let mut theme = controller(MemoryStore::with_entry("theme", "light"));
        theme.initialize();
        assert_eq!(theme.store().writes(), 1);
        assert_eq!(theme.initialize(), ColorMode::Light);
        assert_eq!(theme.store().writes(), 1);
    }

    #[test]
    fn test_follow_system_fallback() {
        let mut config = ThemeConfig::default();
        config.fallback = DefaultMode::FollowSystem;
        let mut theme = ThemeController::new(
            config,
            MemoryStore::new(),
            MemoryDocument::new(),
            ManualClock::new(),
        )
        .with_detector(FixedDetector(Some(ColorMode::Light)));
        assert_eq!(theme.initialize(), ColorMode::Light);
    }

    #[test]
    fn test_stored_token_beats_system() {
        let mut config = ThemeConfig::default();
        config.fallback = DefaultMode::FollowSystem;
        let mut theme = ThemeController::new(
            config,
            MemoryStore::with_entry("theme", "dark"),
            MemoryDocument::new(),
            ManualClock::new(),
        )
        .with_detector(FixedDetector(Some(ColorMode::Light)));
        assert_eq!(theme.initialize(), ColorMode::Dark);
    }

    #[test]
    fn test_toggle_before_initialize_is_noop() {
        let mut theme = controller(MemoryStore::with_entry("theme", "light"));
        assert_eq!(theme.toggle(), None);
        assert!(theme.is_loading());
        assert_eq!(theme.store().writes(), 0);
        assert_eq!(theme.document().classes().count(), 0);
        assert_eq!(theme.document().control().unwrap().cues_applied, 0);
    }

    #[test]
    fn test_toggle_flips_all_three() {
        let mut theme = controller(MemoryStore::new());
        theme.initialize();
        assert_eq!(theme.toggle(), Some(ColorMode::Light));
        assert_eq!(theme.is_dark(), Some(false));
        assert_eq!(theme.store().get("theme"), Some("light"));
        assert!(theme.document().has_class("light-mode"));
    }

    #[test]
    fn test_changing_marker_lifecycle() {
        let mut theme = controller(MemoryStore::new());
        theme.initialize();
        theme.toggle();
        assert!(theme.is_changing());
        assert!(theme.document().has_class("theme-changing"));

        theme.clock().advance(Duration::from_millis(649));
        assert!(!theme.poll());
        assert!(theme.document().has_class("theme-changing"));

        theme.clock().advance(Duration::from_millis(1));
        assert!(theme.poll());
        assert!(!theme.is_changing());
        assert!(!theme.document().has_class("theme-changing"));
    }

    #[test]
    fn test_changing_matches_class_until_polled() {
        let mut theme = controller(MemoryStore::new());
        theme.initialize();
        theme.toggle();

        theme.clock().advance(Duration::from_millis(650));
        assert!(theme.is_changing());
        assert_eq!(
            theme.is_changing(),
            theme.document().has_class("theme-changing")
        );

        theme.clock().advance(Duration::from_secs(3600));
        assert_eq!(
            theme.is_changing(),
            theme.document().has_class("theme-changing")
        );

        assert!(theme.poll());
        assert!(!theme.is_changing());
        assert!(!theme.document().has_class("theme-changing"));
    }

    #[test]
    fn test_clear_changing_ignores_deadline() {
        let mut theme = controller(MemoryStore::new());
        theme.initialize();
        assert!(!theme.clear_changing());

        theme.toggle();
        assert!(theme.clear_changing());
        assert!(!theme.is_changing());
        assert!(!theme.document().has_class("theme-changing"));
        assert!(!theme.poll());
    }

    #[test]
    fn test_second_toggle_resets_deadline() {
        let mut theme = controller(MemoryStore::new());
        theme.initialize();
        theme.toggle();
        theme.clock().advance(Duration::from_millis(500));
        theme.toggle();

        theme.clock().advance(Duration::from_millis(200));
        assert!(!theme.poll());
        assert!(theme.document().has_class("theme-changing"));

        theme.clock().advance(Duration::from_millis(450));
        assert!(theme.poll());
        assert!(!theme.document().has_class("theme-changing"));
    }

    #[test]
    fn test_control_rotation_accumulates() {
        let mut theme = controller(MemoryStore::new());
        theme.initialize();
        theme.toggle();
        theme.toggle();
        let control = theme.document().control().unwrap();
        assert_eq!(control.cues_applied, 2);
        assert_eq!(
            control.last_cue,
            Some(ControlCue {
                rotation_degrees: 720,
                duration: Duration::from_millis(600),
            })
        );
    }

    #[test]
    fn test_missing_control_is_tolerated() {
        let mut theme = ThemeController::new(
            ThemeConfig::default(),
            MemoryStore::new(),
            MemoryDocument::new(),
            ManualClock::new(),
        );
        theme.initialize();
        assert_eq!(theme.toggle(), Some(ColorMode::Light));
    }

    #[test]
    fn test_unavailable_storage_still_works_in_session() {
        let mut theme = ThemeController::new(
            ThemeConfig::default(),
            UnavailableStore,
            MemoryDocument::new(),
            ManualClock::new(),
        );
        assert_eq!(theme.initialize(), ColorMode::Dark);
        assert_eq!(theme.toggle(), Some(ColorMode::Light));
        assert!(theme.document().has_class("light-mode"));
    }

    #[test]
    fn test_set_mode() {
        let mut theme = controller(MemoryStore::new());
        assert_eq!(theme.set_mode(ColorMode::Light), None);
        theme.initialize();
        assert_eq!(theme.set_mode(ColorMode::Dark), Some(ColorMode::Dark));
        assert!(!theme.is_changing());
        assert_eq!(theme.set_mode(ColorMode::Light), Some(ColorMode::Light));
        assert!(theme.is_changing());
    }

    #[test]
    fn test_listeners_see_every_publication() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut theme = controller(MemoryStore::new());
        let sink = Rc::clone(&seen);
        theme.on_change(move |mode| sink.borrow_mut().push(mode));

        theme.initialize();
        theme.toggle();
        theme.toggle();
        assert_eq!(
            *seen.borrow(),
            vec![ColorMode::Dark, ColorMode::Light, ColorMode::Dark]
        );
    }

    #[test]
    fn test_teardown_clears_marker() {
        let mut theme = controller(MemoryStore::new());
        theme.initialize();
        theme.toggle();
        theme.teardown();
        assert!(!theme.is_changing());
        assert!(!theme.document().has_class("theme-changing"));
        assert!(!theme.poll());
    }

    #[test]
    fn test_teardown_twice_is_harmless() {
        let mut theme = controller(MemoryStore::new());
        theme.initialize();
        theme.toggle();
        theme.teardown();
        theme.teardown();
        assert!(!theme.is_changing());
        assert!(!theme.document().has_class("theme-changing"));
        assert_eq!(theme.mode(), Some(ColorMode::Light));
        assert!(theme.document().has_class("light-mode"));
    }

    #[test]
    fn test_teardown_before_initialize() {
        let mut theme = controller(MemoryStore::with_entry("theme", "light"));
        theme.teardown();
        assert!(theme.is_loading());
        assert!(!theme.is_changing());
        assert_eq!(theme.store().writes(), 0);
        assert_eq!(theme.document().classes().count(), 0);
        assert_eq!(theme.initialize(), ColorMode::Light);
    }

    /// Control that rejects the first cue, as a browser may when the inline
    /// style write fails.
    struct RejectFirstCue {
        inner: MemoryDocument,
        rejected: bool,
    }

    impl Document for RejectFirstCue {
        fn set_class(&mut self, name: &str, present: bool) {
            self.inner.set_class(name, present);
        }

        fn has_class(&self, name: &str) -> bool {
            self.inner.has_class(name)
        }

        fn apply_control_cue(&mut self, marker: &str, cue: &ControlCue) -> bool {
            if !self.rejected {
                self.rejected = true;
                return false;
            }
            self.inner.apply_control_cue(marker, cue)
        }
    }

    #[test]
    fn test_rotation_advances_only_when_cue_applies() {
        let document = RejectFirstCue {
            inner: MemoryDocument::new().with_control("data-theme-toggle-btn"),
            rejected: false,
        };
        let mut theme = ThemeController::new(
            ThemeConfig::default(),
            MemoryStore::new(),
            document,
            ManualClock::new(),
        );
        theme.initialize();
        assert_eq!(theme.toggle(), Some(ColorMode::Light));
        assert_eq!(theme.toggle(), Some(ColorMode::Dark));

        let control = theme.document().inner.control().unwrap();
        assert_eq!(control.cues_applied, 1);
        assert_eq!(control.last_cue.map(|cue| cue.rotation_degrees), Some(360));
    }
}
