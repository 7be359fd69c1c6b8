//! Controller whose changing window is closed by a one-shot timer.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use super::controller::ThemeController;
use crate::host::{Clock, Document, PreferenceStore, Timer};
use crate::theme::ColorMode;

/// A [`ThemeController`] that clears the changing class on its own.
///
/// Hosts without a frame loop to call [`ThemeController::poll`] from (a
/// browser page, for instance) wrap the controller in this type. Each toggle
/// starts a timer for the changing duration. At most one timer is alive:
/// a new toggle drops the previous handle, which cancels it.
///
/// # Example
///
/// ```rust
/// use folio_theme::{
///     Document, ManualClock, ManualTimer, MemoryDocument, MemoryStore, ScheduledTheme,
///     ThemeConfig, ThemeController,
/// };
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let timer = ManualTimer::new(clock.clone());
/// let mut theme = ScheduledTheme::new(
///     ThemeController::new(
///         ThemeConfig::default(),
///         MemoryStore::new(),
///         MemoryDocument::new(),
///         clock.clone(),
///     ),
///     timer.clone(),
/// );
///
/// theme.initialize();
/// theme.toggle();
/// clock.advance(Duration::from_millis(650));
/// timer.run_due();
/// assert!(!theme.controller().document().has_class("theme-changing"));
/// ```
pub struct ScheduledTheme<S, D, C, T>
where
    S: PreferenceStore + 'static,
    D: Document + 'static,
    C: Clock + 'static,
    T: Timer,
{
    // Dropped before `controller`.
    pending: Option<T::Handle>,
    timer: T,
    controller: Rc<RefCell<ThemeController<S, D, C>>>,
}

impl<S, D, C, T> ScheduledTheme<S, D, C, T>
where
    S: PreferenceStore + 'static,
    D: Document + 'static,
    C: Clock + 'static,
    T: Timer,
{
    pub fn new(controller: ThemeController<S, D, C>, timer: T) -> Self {
        Self {
            pending: None,
            timer,
            controller: Rc::new(RefCell::new(controller)),
        }
    }

    pub fn controller(&self) -> Ref<'_, ThemeController<S, D, C>> {
        self.controller.borrow()
    }

    /// Mutable access, e.g. for [`ThemeController::on_change`].
    ///
    /// Toggling through this bypasses the timer; use [`toggle`](Self::toggle).
    pub fn controller_mut(&self) -> RefMut<'_, ThemeController<S, D, C>> {
        self.controller.borrow_mut()
    }

    pub fn is_dark(&self) -> Option<bool> {
        self.controller.borrow().is_dark()
    }

    pub fn is_changing(&self) -> bool {
        self.controller.borrow().is_changing()
    }

    pub fn initialize(&mut self) -> ColorMode {
        self.controller.borrow_mut().initialize()
    }

    /// Toggles and starts the clear timer. `None` while uninitialized.
    pub fn toggle(&mut self) -> Option<ColorMode> {
        let mode = self.controller.borrow_mut().toggle()?;
        self.arm_clear();
        Some(mode)
    }

    /// Selects `mode`, starting the clear timer only if the mode changed.
    pub fn set_mode(&mut self, mode: ColorMode) -> Option<ColorMode> {
        let before = self.controller.borrow().mode();
        let after = self.controller.borrow_mut().set_mode(mode)?;
        if before != Some(after) {
            self.arm_clear();
        }
        Some(after)
    }

    /// Cancels the pending timer and removes the changing class.
    pub fn teardown(&mut self) {
        self.pending = None;
        self.controller.borrow_mut().teardown();
    }

    fn arm_clear(&mut self) {
        let delay = self.controller.borrow().config().changing_duration();
        let controller = Rc::downgrade(&self.controller);
        let handle = self.timer.start(
            delay,
            Box::new(move || {
                if let Some(controller) = controller.upgrade() {
                    controller.borrow_mut().clear_changing();
                }
            }),
        );
        // Replacing the old handle cancels its callback.
        self.pending = Some(handle);
    }
}

impl<S, D, C, T> fmt::Debug for ScheduledTheme<S, D, C, T>
where
    S: PreferenceStore + 'static,
    D: Document + 'static,
    C: Clock + 'static,
    T: Timer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTheme")
            .field("controller", &*self.controller.borrow())
            .field("timer_pending", &self.pending.is_some())
            .finish()
    }
}
