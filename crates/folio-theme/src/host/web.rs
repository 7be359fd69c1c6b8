//! Browser bindings: `localStorage`, `document.documentElement`,
//! `performance.now()`, `setTimeout` and `prefers-color-scheme`.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};

use super::{Clock, ControlCue, Document, PreferenceStore, Timer};
use crate::config::ThemeConfig;
use crate::controller::{ScheduledTheme, ThemeController};
use crate::error::StorageError;
use crate::theme::{ColorMode, SystemDetector};

/// Easing close to the site's `expo.out` rotation.
const CUE_EASING: &str = "cubic-bezier(0.16, 1, 0.3, 1)";

/// `window.localStorage`.
///
/// The storage handle is looked up on each call; browsers may deny access
/// at any time (private mode, cleared site data, policy).
#[derive(Debug, Clone, Copy, Default)]
pub struct WebStorage;

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or(StorageError::Unavailable)?
        .local_storage()
        .map_err(|_| StorageError::Unavailable)?
        .ok_or(StorageError::Unavailable)
}

fn rejected(value: JsValue) -> StorageError {
    StorageError::Rejected(format!("{value:?}"))
}

impl PreferenceStore for WebStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?.get_item(key).map_err(rejected)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?.set_item(key, value).map_err(rejected)
    }
}

/// The page's root element and the toggle control lookup.
pub struct WebDocument {
    document: web_sys::Document,
    root: web_sys::Element,
}

impl WebDocument {
    /// Returns `None` outside a window with a document element.
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let root = document.document_element()?;
        Some(Self { document, root })
    }
}

impl Document for WebDocument {
    fn set_class(&mut self, name: &str, present: bool) {
        let list = self.root.class_list();
        let result = if present {
            list.add_1(name)
        } else {
            list.remove_1(name)
        };
        if let Err(err) = result {
            log::debug!("could not update class '{name}': {err:?}");
        }
    }

    fn has_class(&self, name: &str) -> bool {
        self.root.class_list().contains(name)
    }

    fn apply_control_cue(&mut self, marker: &str, cue: &ControlCue) -> bool {
        let element = match self.document.query_selector(&format!("[{marker}]")) {
            Ok(Some(element)) => element,
            _ => return false,
        };
        let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
            return false;
        };
        let style = element.style();
        let (transition, transform) = cue_declarations(cue);
        if let Err(err) = style.set_property("transition", &transition) {
            log::debug!("could not set control transition: {err:?}");
        }
        match style.set_property("transform", &transform) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("could not rotate toggle control: {err:?}");
                false
            }
        }
    }
}

/// Inline `transition` and `transform` values for a cue.
fn cue_declarations(cue: &ControlCue) -> (String, String) {
    (
        format!("transform {}ms {CUE_EASING}", cue.duration.as_millis()),
        format!("rotate({}deg)", cue.rotation_degrees),
    )
}

/// `performance.now()`.
pub struct WebClock {
    performance: web_sys::Performance,
}

impl WebClock {
    pub fn new() -> Option<Self> {
        let performance = web_sys::window()?.performance()?;
        Some(Self { performance })
    }
}

impl Clock for WebClock {
    fn now(&self) -> Duration {
        Duration::from_secs_f64(self.performance.now().max(0.0) / 1000.0)
    }
}

/// `matchMedia('(prefers-color-scheme: light)')`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaQueryDetector;

impl SystemDetector for MediaQueryDetector {
    fn detect(&self) -> Option<ColorMode> {
        let query = web_sys::window()?
            .match_media("(prefers-color-scheme: light)")
            .ok()??;
        Some(if query.matches() {
            ColorMode::Light
        } else {
            ColorMode::Dark
        })
    }
}

/// `setTimeout` through `gloo-timers`. Dropping the handle clears the timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    type Handle = Timeout;

    fn start(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(timeout_millis(delay), callback)
    }
}

fn timeout_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

/// Theme wiring for a browser page.
pub type PageTheme = ScheduledTheme<WebStorage, WebDocument, WebClock, GlooTimer>;

/// A theme wired to the current page, with the changing class cleared by
/// `setTimeout`.
///
/// Returns `None` outside a browser window. The caller owns the result for
/// the page session; dropping it cancels any pending timeout and removes the
/// changing class.
pub fn page_theme(config: ThemeConfig) -> Option<PageTheme> {
    let controller = ThemeController::new(
        config,
        WebStorage,
        WebDocument::new()?,
        WebClock::new()?,
    );
    Some(ScheduledTheme::new(controller, GlooTimer))
}
