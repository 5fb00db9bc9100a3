//! Access gate - the main public API for Docgate.
//!
//! The `AccessGate` hides a page until the visitor proves they know the
//! password, then remembers that for the rest of the browsing session:
//! - `initialize` runs once on page load
//! - `attempt_unlock` runs on every submit (button or Enter)
//!
//! Every failure path leaves the gate locked and the document hidden.

use crate::config::GateConfig;
use crate::crypto::digest::{Digester, Sha256Digester};
use crate::page::{Page, Visibility};
use crate::render::overlay::{Overlay, SHAKE_CLASS};
use crate::session::store::{is_unlocked, mark_unlocked, SessionStore};
use crate::timer::Timer;
use crate::GateError;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Key that submits from the password field.
pub const SUBMIT_KEY: &str = "Enter";

/// Where the gate is in its session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    /// Prompt shown (or about to be), content hidden.
    #[default]
    Locked,
    /// An attempt is waiting on its digest.
    Unlocking,
    /// Content visible for the rest of the session.
    Unlocked,
}

/// Result of a single unlock attempt.
#[derive(Debug)]
pub enum UnlockOutcome {
    /// The attempt matched; the overlay is fading out.
    Unlocked,
    /// The attempt did not match; error feedback shown.
    Rejected,
    /// The session was already unlocked; nothing happened.
    AlreadyUnlocked,
    /// The attempt could not be checked; the gate stays locked.
    Failed(GateError),
}

impl UnlockOutcome {
    /// Whether the gate is open after this attempt.
    pub fn is_unlocked(&self) -> bool {
        matches!(self, UnlockOutcome::Unlocked | UnlockOutcome::AlreadyUnlocked)
    }
}

/// Password gate for a single page load.
///
/// Create one per page load and route every submit through it.
pub struct AccessGate<S, P, T, D = Sha256Digester> {
    config: GateConfig,
    store: S,
    page: Arc<P>,
    timer: T,
    digester: D,
    state: GateState,
    mounted: bool,
}

impl<S, P, T> AccessGate<S, P, T, Sha256Digester>
where
    S: SessionStore,
    P: Page + 'static,
    T: Timer,
{
    /// Create a gate using the in-process SHA-256 digester.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration fails validation.
    pub fn new(config: GateConfig, store: S, page: Arc<P>, timer: T) -> Result<Self, GateError> {
        Self::with_digester(config, store, page, timer, Sha256Digester)
    }
}

impl<S, P, T, D> AccessGate<S, P, T, D>
where
    S: SessionStore,
    P: Page + 'static,
    T: Timer,
    D: Digester,
{
    /// Create a gate with a host-provided digest primitive.
    pub fn with_digester(
        config: GateConfig,
        store: S,
        page: Arc<P>,
        timer: T,
        digester: D,
    ) -> Result<Self, GateError> {
        config.validate()?;

        Ok(Self {
            config,
            store,
            page,
            timer,
            digester,
            state: GateState::Locked,
            mounted: false,
        })
    }

    /// Check the session and put up the prompt if it is still locked.
    ///
    /// On an unlocked session this touches nothing and returns `Unlocked`.
    /// Otherwise the document is hidden immediately and the overlay is
    /// mounted once the document is ready. Calling it again on a locked
    /// page does not mount a second overlay. Once unlocked, it returns
    /// `Unlocked` without touching the page.
    ///
    /// # Errors
    /// Page errors propagate; the document stays hidden when they do.
    pub async fn initialize(&mut self) -> Result<GateState, GateError> {
        // Unlocked is terminal for this page, whatever the store says now
        if self.state == GateState::Unlocked {
            return Ok(self.state);
        }

        let unlocked = match is_unlocked(&self.store, self.config.storage_key) {
            Ok(unlocked) => unlocked,
            Err(e) => {
                warn!(error = %e, "Session store unreadable, treating session as locked");
                false
            }
        };

        if unlocked {
            debug!(storage_key = self.config.storage_key, "Session already unlocked");
            self.state = GateState::Unlocked;
            return Ok(self.state);
        }

        self.state = GateState::Locked;
        self.page.set_visibility(Visibility::Hidden)?;
        self.page.when_ready().await?;

        if !self.mounted {
            let overlay = Overlay::render(
                &self.config.copy,
                self.config.theme_attribute,
                self.config.dark_scheme,
            );
            self.page.mount_overlay(&overlay)?;
            self.mounted = true;
            debug!(mode = ?self.config.credential.mode(), "Access prompt mounted");
        }

        Ok(self.state)
    }

    /// Check one submitted password.
    ///
    /// The digest is awaited before anything on the page changes. On a
    /// match the unlock flag is persisted, the overlay fades, and after
    /// `unlock_fade` it is removed and the document shown. On a mismatch the
    /// error is revealed, the field cleared and refocused, and the overlay
    /// shakes for `shake_duration`. There is no attempt limit.
    pub async fn attempt_unlock(&mut self, attempt: &str) -> UnlockOutcome {
        if self.state == GateState::Unlocked {
            return UnlockOutcome::AlreadyUnlocked;
        }
        if !self.mounted {
            return UnlockOutcome::Failed(GateError::PageError(
                "unlock attempted before the prompt was mounted".to_string(),
            ));
        }

        self.state = GateState::Unlocking;

        match self.verify_and_persist(attempt).await {
            Ok(()) => {
                self.state = GateState::Unlocked;
                info!(storage_key = self.config.storage_key, "Access gate unlocked");
                self.reveal();
                self.mounted = false;
                UnlockOutcome::Unlocked
            }
            Err(GateError::CredentialMismatch) => {
                self.state = GateState::Locked;
                debug!("Access attempt rejected");
                match self.reject(&self.config.copy.error_text) {
                    Ok(()) => UnlockOutcome::Rejected,
                    Err(e) => UnlockOutcome::Failed(e),
                }
            }
            Err(e) => {
                self.state = GateState::Locked;
                warn!(error = %e, "Access attempt could not be checked, staying locked");
                if let Err(feedback) = self.reject(&self.config.copy.failure_text) {
                    warn!(error = %feedback, "Failure could not be shown");
                }
                UnlockOutcome::Failed(e)
            }
        }
    }

    /// Key press in the password field. Only Enter submits.
    pub async fn handle_key(&mut self, key: &str, attempt: &str) -> Option<UnlockOutcome> {
        if key == SUBMIT_KEY {
            Some(self.attempt_unlock(attempt).await)
        } else {
            None
        }
    }

    /// Current gate state.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    async fn verify_and_persist(&self, attempt: &str) -> Result<(), GateError> {
        let attempt_digest = self.digester.digest(attempt).await?;
        self.config.credential.check(attempt, &attempt_digest)?;
        mark_unlocked(&self.store, self.config.storage_key)
    }

    fn reveal(&self) {
        if let Err(e) = self.page.fade_overlay() {
            warn!(error = %e, "Overlay fade failed");
        }

        let page = Arc::clone(&self.page);
        let finish = Box::new(move || finish_unlock(page.as_ref()));
        if let Err(e) = self.timer.defer(self.config.unlock_fade, finish) {
            warn!(error = %e, "Unlock delay unavailable, revealing immediately");
            finish_unlock(self.page.as_ref());
        }
    }

    /// Show failure feedback. Errs when the error indicator could not be shown.
    fn reject(&self, text: &str) -> Result<(), GateError> {
        let shown = self.page.show_error(text);
        let feedback = [
            self.page.clear_input(),
            self.page.focus_input(),
            self.page.add_overlay_class(SHAKE_CLASS),
        ];
        for result in feedback {
            if let Err(e) = result {
                warn!(error = %e, "Failure feedback incomplete");
            }
        }

        let page = Arc::clone(&self.page);
        let settle = Box::new(move || end_shake(page.as_ref()));
        if let Err(e) = self.timer.defer(self.config.shake_duration, settle) {
            warn!(error = %e, "Shake delay unavailable, ending shake immediately");
            end_shake(self.page.as_ref());
        }

        shown
    }
}

fn finish_unlock<P: Page + ?Sized>(page: &P) {
    if let Err(e) = page.remove_overlay() {
        warn!(error = %e, "Overlay removal failed");
    }
    if let Err(e) = page.set_visibility(Visibility::Visible) {
        warn!(error = %e, "Document could not be made visible");
    }
}

fn end_shake<P: Page + ?Sized>(page: &P) {
    if let Err(e) = page.remove_overlay_class(SHAKE_CLASS) {
        warn!(error = %e, "Shake class removal failed");
    }
}
