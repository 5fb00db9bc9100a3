//! Cryptographic primitives for credential checks.

pub mod digest;
