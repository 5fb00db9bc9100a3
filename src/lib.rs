//! # Docgate
//!
//! **Session-scoped password gate for statically served documentation.**
//!
//! Docgate hides a page until the visitor enters the site password, then
//! remembers the unlock in session storage so the rest of the visit is not
//! interrupted again. Every piece of the environment is injected: the
//! session store, the page surface, the timer, and the digest primitive.
//!
//! ## Features
//!
//! - **Full-page modal**: the document stays hidden behind an overlay with no dismiss path
//! - **SHA-256 credentials**: compare attempt digests, or plaintext if configured
//! - **Session memory**: one unlock per browsing session, never re-prompted
//! - **Fail-closed**: digest, store, or page failures never reveal content
//! - **Dark-mode aware**: palette follows the site's theme attribute
//!
//! ## Quickstart
//!
//! ```no_run
//! use docgate::{AccessGate, GateConfig, MemorySessionStore, TokioTimer};
//! # use docgate::{GateError, Overlay, Page, Visibility};
//! # struct DomPage;
//! # impl Page for DomPage {
//! #     fn set_visibility(&self, _: Visibility) -> Result<(), GateError> { Ok(()) }
//! #     fn visibility(&self) -> Visibility { Visibility::Visible }
//! #     async fn when_ready(&self) -> Result<(), GateError> { Ok(()) }
//! #     fn root_attribute(&self, _: &str) -> Option<String> { None }
//! #     fn mount_overlay(&self, _: &Overlay) -> Result<(), GateError> { Ok(()) }
//! #     fn show_error(&self, _: &str) -> Result<(), GateError> { Ok(()) }
//! #     fn clear_input(&self) -> Result<(), GateError> { Ok(()) }
//! #     fn focus_input(&self) -> Result<(), GateError> { Ok(()) }
//! #     fn add_overlay_class(&self, _: &str) -> Result<(), GateError> { Ok(()) }
//! #     fn remove_overlay_class(&self, _: &str) -> Result<(), GateError> { Ok(()) }
//! #     fn fade_overlay(&self) -> Result<(), GateError> { Ok(()) }
//! #     fn remove_overlay(&self) -> Result<(), GateError> { Ok(()) }
//! # }
//! use std::sync::Arc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), docgate::GateError> {
//!     let mut gate = AccessGate::new(
//!         GateConfig::default(),
//!         MemorySessionStore::new(),
//!         Arc::new(DomPage),
//!         TokioTimer::current()?,
//!     )?;
//!
//!     gate.initialize().await?;
//!
//!     // Wire this to the submit button and the Enter key
//!     let outcome = gate.attempt_unlock("gee2026").await;
//!     println!("unlocked: {}", outcome.is_unlocked());
//!     Ok(())
//! }
//! ```
//!
//! ## Threat Model
//!
//! Docgate deters casual visitors. It does **not** protect content: the
//! page is delivered in full, and the credential (or its digest) ships in
//! the same artifact. Anyone who opens the page source or the console can
//! read the content or bypass the gate. There is no server-side check, no
//! lockout, and no rate limiting.
//!
//! ## Configuration
//!
//! - `storage_key`: session store key for the unlock flag
//! - `credential`: `Credential::Sha256Hex` or `Credential::Plaintext`
//! - `theme_attribute` / `dark_scheme`: which root attribute value means dark mode
//! - `unlock_fade` / `shake_duration`: timings of the visual feedback
//!
//! See [`GateConfig`] for full documentation.

#![deny(missing_docs)]

// Core modules
pub mod config;
pub mod errors;
pub mod timer;

// Crypto layer
pub mod crypto;

// Policy layer
pub mod policy;

// Session layer
pub mod session;

// Presentation layer
pub mod page;
pub mod render;

// Gate (main public API)
pub mod gate;

// Optional integrations
pub mod integrations;

// Re-exports for public API
pub use config::GateConfig;
pub use crypto::digest::{sha256_hex, Digester, Sha256Digester};
pub use errors::GateError;
pub use gate::{AccessGate, GateState, UnlockOutcome};
pub use page::{Page, Visibility};
pub use policy::credential::{ComparisonMode, Credential};
pub use render::overlay::{Overlay, OverlayCopy};
pub use render::theme::Theme;
pub use session::store::{MemorySessionStore, SessionStore};
pub use timer::{Timer, TokioTimer};

#[cfg(any(test, feature = "test-seams"))]
pub use page::MockPage;
#[cfg(any(test, feature = "test-seams"))]
pub use timer::MockTimer;
