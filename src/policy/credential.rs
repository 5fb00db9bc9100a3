//! Credential comparison policy.
//!
//! A gate compares each attempt against exactly one credential, using
//! exactly one comparison mode:
//! - `Plaintext` compares the raw attempt with the embedded password
//! - `Sha256Hex` compares the attempt's digest with the embedded digest
//!
//! The digest of the attempt is always computed first, in both modes, so a
//! host without a working digest primitive fails closed either way.

use crate::crypto::digest::is_sha256_hex;
use crate::GateError;
use std::fmt;

/// How attempts are compared against the credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    /// Raw string equality with the embedded password.
    Plaintext,
    /// Equality of SHA-256 hex digests.
    Digest,
}

/// The fixed secret embedded in the deployed artifact.
///
/// SECURITY: anything embedded in a client-delivered page is readable by the
/// visitor. A digest credential only keeps the password out of casual view.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    /// Compare attempts with this password as-is.
    Plaintext(&'static str),
    /// Compare attempt digests with this SHA-256 hex digest.
    Sha256Hex(&'static str),
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Plaintext(_) => f.write_str("Credential::Plaintext(<redacted>)"),
            Credential::Sha256Hex(hex) => write!(f, "Credential::Sha256Hex({})", hex),
        }
    }
}

impl Credential {
    /// The comparison mode this credential selects.
    pub fn mode(&self) -> ComparisonMode {
        match self {
            Credential::Plaintext(_) => ComparisonMode::Plaintext,
            Credential::Sha256Hex(_) => ComparisonMode::Digest,
        }
    }

    /// Validate the credential for obvious errors.
    pub fn validate(&self) -> Result<(), GateError> {
        match self {
            Credential::Plaintext(secret) if secret.is_empty() => Err(GateError::ConfigError(
                "plaintext credential cannot be empty".to_string(),
            )),
            Credential::Sha256Hex(hex) if !is_sha256_hex(hex) => {
                Err(GateError::ConfigError(format!(
                    "digest credential must be 64 hex characters, got {:?}",
                    hex
                )))
            }
            _ => Ok(()),
        }
    }

    /// Check an attempt against the credential.
    ///
    /// # Arguments
    /// * `attempt` - The raw text submitted by the visitor
    /// * `attempt_digest` - Lowercase hex SHA-256 of `attempt`
    ///
    /// # Returns
    /// * `Ok(())` - The attempt matches
    /// * `Err(CredentialMismatch)` - It does not
    pub fn check(&self, attempt: &str, attempt_digest: &str) -> Result<(), GateError> {
        let matched = match self {
            Credential::Plaintext(secret) => attempt == *secret,
            Credential::Sha256Hex(expected) => attempt_digest.eq_ignore_ascii_case(expected),
        };

        if matched {
            Ok(())
        } else {
            Err(GateError::CredentialMismatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::digest::sha256_hex;

    const GEE_DIGEST: &str = "12a1259ca6fbc174c9bdb4769b47933198c838e216250592842b04424389d896";

    #[test]
    fn test_plaintext_match() {
        let credential = Credential::Plaintext("gee2026");
        assert!(credential.check("gee2026", &sha256_hex("gee2026")).is_ok());
    }

    #[test]
    fn test_plaintext_ignores_digest() {
        let credential = Credential::Plaintext("gee2026");
        // A matching digest alone never satisfies plaintext mode
        let result = credential.check("other", GEE_DIGEST);
        assert!(matches!(result, Err(GateError::CredentialMismatch)));
    }

    #[test]
    fn test_plaintext_is_case_sensitive() {
        let credential = Credential::Plaintext("gee2026");
        let result = credential.check("GEE2026", &sha256_hex("GEE2026"));
        assert!(matches!(result, Err(GateError::CredentialMismatch)));
    }

    #[test]
    fn test_digest_match() {
        let credential = Credential::Sha256Hex(GEE_DIGEST);
        assert!(credential.check("gee2026", &sha256_hex("gee2026")).is_ok());
    }

    #[test]
    fn test_digest_accepts_uppercase_credential() {
        let upper: &'static str = Box::leak(GEE_DIGEST.to_uppercase().into_boxed_str());
        let credential = Credential::Sha256Hex(upper);
        assert!(credential.validate().is_ok());
        assert!(credential.check("gee2026", &sha256_hex("gee2026")).is_ok());
    }

    #[test]
    fn test_digest_mismatch() {
        let credential = Credential::Sha256Hex(GEE_DIGEST);
        let result = credential.check("wrong", &sha256_hex("wrong"));
        assert!(matches!(result, Err(GateError::CredentialMismatch)));
    }

    #[test]
    fn test_digest_mode_ignores_raw_attempt() {
        // Submitting the digest itself as the password must not unlock
        let credential = Credential::Sha256Hex(GEE_DIGEST);
        let result = credential.check(GEE_DIGEST, &sha256_hex(GEE_DIGEST));
        assert!(matches!(result, Err(GateError::CredentialMismatch)));
    }

    #[test]
    fn test_mode() {
        assert_eq!(Credential::Plaintext("x").mode(), ComparisonMode::Plaintext);
        assert_eq!(Credential::Sha256Hex(GEE_DIGEST).mode(), ComparisonMode::Digest);
    }

    #[test]
    fn test_validate_rejects_empty_plaintext() {
        let result = Credential::Plaintext("").validate();
        assert!(matches!(result, Err(GateError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_short_digest() {
        let result = Credential::Sha256Hex("abc123").validate();
        assert!(matches!(result, Err(GateError::ConfigError(_))));
    }

    #[test]
    fn test_debug_redacts_plaintext() {
        let rendered = format!("{:?}", Credential::Plaintext("gee2026"));
        assert!(!rendered.contains("gee2026"));
    }
}
