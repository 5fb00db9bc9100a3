//! SHA-256 digest computation.

use crate::GateError;
use sha2::{Digest, Sha256};
use std::future::Future;

/// Length of a SHA-256 digest rendered as hex.
pub const SHA256_HEX_LEN: usize = 64;

/// Compute the SHA-256 digest of the UTF-8 bytes of `input` as lowercase hex.
pub fn sha256_hex(input: &str) -> String {
    let hash = Sha256::digest(input.as_bytes());
    hex::encode(hash)
}

/// Check that a string is a well-formed SHA-256 hex digest (either case).
pub fn is_sha256_hex(value: &str) -> bool {
    value.len() == SHA256_HEX_LEN && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Asynchronous one-way digest of an attempt.
///
/// Browser hosts back this with the platform's subtle crypto, which resolves
/// on a later turn of the event loop. The gate awaits the digest before it
/// branches, so this is the only suspension point of an unlock attempt.
pub trait Digester: Send + Sync {
    /// Digest `input`, returning lowercase hex.
    fn digest(&self, input: &str) -> impl Future<Output = Result<String, GateError>> + Send;
}

/// In-process SHA-256 digester.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digester;

impl Digester for Sha256Digester {
    async fn digest(&self, input: &str) -> Result<String, GateError> {
        Ok(sha256_hex(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_empty_input() {
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_known_password() {
        assert_eq!(
            sha256_hex("gee2026"),
            "12a1259ca6fbc174c9bdb4769b47933198c838e216250592842b04424389d896"
        );
    }

    #[test]
    fn test_sha256_is_deterministic_and_distinct() {
        let first = sha256_hex("wrong");
        let second = sha256_hex("wrong");
        assert_eq!(first, second);
        assert_eq!(
            first,
            "8810ad581e59f2bc3928b261707a71308f7e139eb04820366dc4d5c18d980225"
        );
        assert_ne!(first, sha256_hex("Wrong"));
    }

    #[test]
    fn test_sha256_output_is_lowercase_hex() {
        let digest = sha256_hex("Zürich ☃");
        assert_eq!(digest.len(), SHA256_HEX_LEN);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_is_sha256_hex() {
        assert!(is_sha256_hex(&sha256_hex("x")));
        assert!(is_sha256_hex(&sha256_hex("x").to_uppercase()));
        assert!(!is_sha256_hex("abc"));
        assert!(!is_sha256_hex(&"g".repeat(64)));
    }

    #[tokio::test]
    async fn test_digester_matches_sync_digest() {
        let digest = Sha256Digester.digest("gee2026").await.unwrap();
        assert_eq!(digest, sha256_hex("gee2026"));
    }
}
