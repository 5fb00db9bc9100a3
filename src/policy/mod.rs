//! Access policy applied to unlock attempts.

pub mod credential;
