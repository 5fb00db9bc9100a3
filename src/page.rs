//! The page surface the gate drives.
//!
//! Browser hosts implement [`Page`] over the live DOM: visibility maps to
//! `document.documentElement.style.visibility`, readiness to
//! `DOMContentLoaded`, and the overlay operations to the elements rendered
//! by [`crate::render::overlay`]. Methods take `&self` because DOM handles
//! are shared; implementations use interior mutability.

use crate::render::overlay::Overlay;
use crate::GateError;
use std::future::Future;
use std::sync::Arc;

/// Visual state of the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Content is in the DOM but not rendered.
    Hidden,
    /// Content is rendered.
    Visible,
}

/// DOM operations used by the gate.
pub trait Page: Send + Sync {
    /// Set the visibility of the document root.
    fn set_visibility(&self, visibility: Visibility) -> Result<(), GateError>;

    /// Current visibility of the document root.
    fn visibility(&self) -> Visibility;

    /// Resolve once the document has been parsed and the body exists.
    fn when_ready(&self) -> impl Future<Output = Result<(), GateError>> + Send;

    /// Read an attribute of the root element.
    fn root_attribute(&self, name: &str) -> Option<String>;

    /// Append the overlay markup to the body and its rules to the head.
    fn mount_overlay(&self, overlay: &Overlay) -> Result<(), GateError>;

    /// Reveal the error indicator with the given text.
    fn show_error(&self, text: &str) -> Result<(), GateError>;

    /// Clear the password field.
    fn clear_input(&self) -> Result<(), GateError>;

    /// Move keyboard focus to the password field.
    fn focus_input(&self) -> Result<(), GateError>;

    /// Add a class to the overlay root.
    fn add_overlay_class(&self, class: &str) -> Result<(), GateError>;

    /// Remove a class from the overlay root.
    fn remove_overlay_class(&self, class: &str) -> Result<(), GateError>;

    /// Start the overlay fade (opacity to zero).
    fn fade_overlay(&self) -> Result<(), GateError>;

    /// Remove the overlay from the document.
    fn remove_overlay(&self) -> Result<(), GateError>;
}

impl<P: Page + ?Sized> Page for Arc<P> {
    fn set_visibility(&self, visibility: Visibility) -> Result<(), GateError> {
        (**self).set_visibility(visibility)
    }

    fn visibility(&self) -> Visibility {
        (**self).visibility()
    }

    fn when_ready(&self) -> impl Future<Output = Result<(), GateError>> + Send {
        (**self).when_ready()
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        (**self).root_attribute(name)
    }

    fn mount_overlay(&self, overlay: &Overlay) -> Result<(), GateError> {
        (**self).mount_overlay(overlay)
    }

    fn show_error(&self, text: &str) -> Result<(), GateError> {
        (**self).show_error(text)
    }

    fn clear_input(&self) -> Result<(), GateError> {
        (**self).clear_input()
    }

    fn focus_input(&self) -> Result<(), GateError> {
        (**self).focus_input()
    }

    fn add_overlay_class(&self, class: &str) -> Result<(), GateError> {
        (**self).add_overlay_class(class)
    }

    fn remove_overlay_class(&self, class: &str) -> Result<(), GateError> {
        (**self).remove_overlay_class(class)
    }

    fn fade_overlay(&self) -> Result<(), GateError> {
        (**self).fade_overlay()
    }

    fn remove_overlay(&self) -> Result<(), GateError> {
        (**self).remove_overlay()
    }
}

/// Snapshot of a [`MockPage`].
#[cfg(any(test, feature = "test-seams"))]
#[derive(Debug, Clone, PartialEq)]
pub struct PageSnapshot {
    /// Document visibility.
    pub visibility: Visibility,
    /// Whether the document reported ready.
    pub ready: bool,
    /// Overlays currently in the document.
    pub overlays: Vec<Overlay>,
    /// Every stylesheet injected so far.
    pub stylesheets: Vec<String>,
    /// Visible error text, if revealed.
    pub error: Option<String>,
    /// Password field contents.
    pub input: String,
    /// Whether the password field has focus.
    pub input_focused: bool,
    /// Classes on the overlay root.
    pub overlay_classes: Vec<String>,
    /// Whether the overlay fade started.
    pub overlay_faded: bool,
}

/// In-memory page for deterministic testing.
#[cfg(any(test, feature = "test-seams"))]
pub struct MockPage {
    state: std::sync::Mutex<PageSnapshot>,
    attributes: std::sync::Mutex<std::collections::HashMap<String, String>>,
    ready_signal: tokio::sync::Notify,
    error_indicator_missing: std::sync::atomic::AtomicBool,
}

#[cfg(any(test, feature = "test-seams"))]
impl MockPage {
    /// A visible, already parsed page.
    pub fn new() -> Self {
        Self::with_ready(true)
    }

    /// A page still loading; call [`MockPage::finish_loading`] to make it ready.
    pub fn loading() -> Self {
        Self::with_ready(false)
    }

    fn with_ready(ready: bool) -> Self {
        Self {
            state: std::sync::Mutex::new(PageSnapshot {
                visibility: Visibility::Visible,
                ready,
                overlays: Vec::new(),
                stylesheets: Vec::new(),
                error: None,
                input: String::new(),
                input_focused: false,
                overlay_classes: Vec::new(),
                overlay_faded: false,
            }),
            attributes: std::sync::Mutex::new(std::collections::HashMap::new()),
            ready_signal: tokio::sync::Notify::new(),
            error_indicator_missing: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Mark the document ready, waking anything waiting on it.
    pub fn finish_loading(&self) {
        self.state.lock().expect("mock page lock").ready = true;
        self.ready_signal.notify_waiters();
    }

    /// Make the error indicator unreachable, as if stripped from the overlay.
    pub fn remove_error_indicator(&self) {
        self.error_indicator_missing
            .store(true, std::sync::atomic::Ordering::SeqCst);
    }

    /// Set a root element attribute.
    pub fn set_root_attribute(&self, name: &str, value: &str) {
        self.attributes
            .lock()
            .expect("mock page lock")
            .insert(name.to_string(), value.to_string());
    }

    /// Type into the password field.
    pub fn type_input(&self, text: &str) {
        self.state.lock().expect("mock page lock").input = text.to_string();
    }

    /// Current state of the page.
    pub fn snapshot(&self) -> PageSnapshot {
        self.state.lock().expect("mock page lock").clone()
    }

    fn with_overlay<F>(&self, op: &str, f: F) -> Result<(), GateError>
    where
        F: FnOnce(&mut PageSnapshot),
    {
        let mut state = self
            .state
            .lock()
            .map_err(|e| GateError::PageError(format!("Mock page poisoned: {}", e)))?;
        if state.overlays.is_empty() {
            return Err(GateError::PageError(format!("{}: no overlay mounted", op)));
        }
        f(&mut state);
        Ok(())
    }
}

#[cfg(any(test, feature = "test-seams"))]
impl Default for MockPage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-seams"))]
impl Page for MockPage {
    fn set_visibility(&self, visibility: Visibility) -> Result<(), GateError> {
        self.state
            .lock()
            .map_err(|e| GateError::PageError(format!("Mock page poisoned: {}", e)))?
            .visibility = visibility;
        Ok(())
    }

    fn visibility(&self) -> Visibility {
        self.state
            .lock()
            .map(|state| state.visibility)
            .unwrap_or(Visibility::Hidden)
    }

    async fn when_ready(&self) -> Result<(), GateError> {
        loop {
            let notified = self.ready_signal.notified();
            let ready = self
                .state
                .lock()
                .map_err(|e| GateError::PageError(format!("Mock page poisoned: {}", e)))?
                .ready;
            if ready {
                return Ok(());
            }
            notified.await;
        }
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.attributes.lock().ok()?.get(name).cloned()
    }

    fn mount_overlay(&self, overlay: &Overlay) -> Result<(), GateError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| GateError::PageError(format!("Mock page poisoned: {}", e)))?;
        if !state.ready {
            return Err(GateError::PageError(
                "mount_overlay: document body not ready".to_string(),
            ));
        }
        state.overlays.push(overlay.clone());
        state.stylesheets.push(overlay.stylesheet.clone());
        state.input_focused = true; // autofocus
        Ok(())
    }

    fn show_error(&self, text: &str) -> Result<(), GateError> {
        if self
            .error_indicator_missing
            .load(std::sync::atomic::Ordering::SeqCst)
        {
            return Err(GateError::PageError(
                "show_error: error indicator not found".to_string(),
            ));
        }
        self.with_overlay("show_error", |state| state.error = Some(text.to_string()))
    }

    fn clear_input(&self) -> Result<(), GateError> {
        self.with_overlay("clear_input", |state| state.input.clear())
    }

    fn focus_input(&self) -> Result<(), GateError> {
        self.with_overlay("focus_input", |state| state.input_focused = true)
    }

    fn add_overlay_class(&self, class: &str) -> Result<(), GateError> {
        self.with_overlay("add_overlay_class", |state| {
            if !state.overlay_classes.iter().any(|c| c == class) {
                state.overlay_classes.push(class.to_string());
            }
        })
    }

    fn remove_overlay_class(&self, class: &str) -> Result<(), GateError> {
        self.with_overlay("remove_overlay_class", |state| {
            state.overlay_classes.retain(|c| c != class)
        })
    }

    fn fade_overlay(&self) -> Result<(), GateError> {
        self.with_overlay("fade_overlay", |state| state.overlay_faded = true)
    }

    fn remove_overlay(&self) -> Result<(), GateError> {
        self.with_overlay("remove_overlay", |state| {
            state.overlays.clear();
            state.overlay_classes.clear();
            state.error = None;
            state.input.clear();
            state.input_focused = false;
        })
    }
}
