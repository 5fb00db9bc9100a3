//! Docgate error types.

use thiserror::Error;

/// Errors that can occur while gating a page.
#[derive(Debug, Error)]
pub enum GateError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Submitted password does not match the credential.
    #[error("Incorrect password")]
    CredentialMismatch,

    /// The digest primitive failed or is not available (fail-closed).
    #[error("Digest computation unavailable: {0}")]
    DigestUnavailable(String),

    /// Session store read or write failed.
    #[error("Session store error: {0}")]
    StoreIO(String),

    /// The page surface rejected an operation.
    #[error("Page error: {0}")]
    PageError(String),

    /// No runtime is available to schedule a delayed effect.
    #[error("Timer unavailable: {0}")]
    TimerUnavailable(String),

    /// Overlay copy could not be parsed.
    #[error("Overlay copy parse error: {0}")]
    CopyParse(String),
}

impl GateError {
    /// Whether the visitor can simply try again.
    ///
    /// Only a wrong password is recoverable by the visitor; everything else
    /// keeps the gate locked until the page is reloaded in a working context.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GateError::CredentialMismatch)
    }
}
