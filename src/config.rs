//! Docgate configuration.

use crate::policy::credential::Credential;
use crate::render::overlay::OverlayCopy;
use crate::render::theme::{DEFAULT_DARK_SCHEME, DEFAULT_THEME_ATTRIBUTE};
use crate::GateError;
use std::time::Duration;

/// Session store key for the unlock flag.
pub const DEFAULT_STORAGE_KEY: &str = "auth_token_gee";

/// SHA-256 of the default password.
pub const DEFAULT_CREDENTIAL_SHA256: &str =
    "12a1259ca6fbc174c9bdb4769b47933198c838e216250592842b04424389d896";

/// Delay between the overlay fade starting and its removal.
pub const DEFAULT_UNLOCK_FADE: Duration = Duration::from_millis(300);

/// How long the shake class stays on the overlay after a failure.
pub const DEFAULT_SHAKE_DURATION: Duration = Duration::from_millis(500);

/// Configuration for a gate.
///
/// These values are baked into the site build.
/// SECURITY: the credential ships to every visitor; it deters, it does not protect.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Session store key holding the unlock flag.
    pub storage_key: &'static str,

    /// The expected credential, which also selects the comparison mode.
    pub credential: Credential,

    /// Root element attribute read for light/dark presentation.
    pub theme_attribute: &'static str,

    /// Value of `theme_attribute` that selects the dark palette.
    pub dark_scheme: &'static str,

    /// Delay before the faded overlay is removed and the document shown.
    pub unlock_fade: Duration,

    /// Duration of the shake feedback on failure.
    pub shake_duration: Duration,

    /// Prompt wording.
    pub copy: OverlayCopy,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY,
            credential: Credential::Sha256Hex(DEFAULT_CREDENTIAL_SHA256),
            theme_attribute: DEFAULT_THEME_ATTRIBUTE,
            dark_scheme: DEFAULT_DARK_SCHEME,
            unlock_fade: DEFAULT_UNLOCK_FADE,
            shake_duration: DEFAULT_SHAKE_DURATION,
            copy: OverlayCopy::default(),
        }
    }
}

impl GateConfig {
    /// Default configuration guarding with the given credential.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential,
            ..Self::default()
        }
    }

    /// Validate configuration for obvious errors.
    pub fn validate(&self) -> Result<(), GateError> {
        if self.storage_key.is_empty() {
            return Err(GateError::ConfigError(
                "storage_key cannot be empty".to_string(),
            ));
        }
        self.credential.validate()?;
        if !is_attribute_name(self.theme_attribute) {
            return Err(GateError::ConfigError(format!(
                "theme_attribute is not a valid attribute name: {:?}",
                self.theme_attribute
            )));
        }
        if self.dark_scheme.is_empty() || self.dark_scheme.contains(['"', '\\', ']']) {
            return Err(GateError::ConfigError(format!(
                "dark_scheme must be a non-empty plain value, got {:?}",
                self.dark_scheme
            )));
        }
        if self.unlock_fade.is_zero() {
            return Err(GateError::ConfigError(
                "unlock_fade must be greater than zero".to_string(),
            ));
        }
        if self.shake_duration.is_zero() {
            return Err(GateError::ConfigError(
                "shake_duration must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::digest::sha256_hex;
    use crate::policy::credential::ComparisonMode;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GateConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_credential_is_digest_of_password() {
        let config = GateConfig::default();
        assert_eq!(config.credential.mode(), ComparisonMode::Digest);
        assert_eq!(DEFAULT_CREDENTIAL_SHA256, sha256_hex("gee2026"));
    }

    #[test]
    fn test_default_timings() {
        let config = GateConfig::default();
        assert_eq!(config.unlock_fade, Duration::from_millis(300));
        assert_eq!(config.shake_duration, Duration::from_millis(500));
    }

    #[test]
    fn test_with_credential() {
        let config = GateConfig::with_credential(Credential::Plaintext("gee2026"));
        assert_eq!(config.credential.mode(), ComparisonMode::Plaintext);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_empty_storage_key_rejected() {
        let config = GateConfig {
            storage_key: "",
            ..GateConfig::default()
        };
        assert!(matches!(config.validate(), Err(GateError::ConfigError(_))));
    }

    #[test]
    fn test_malformed_credential_rejected() {
        let config = GateConfig::with_credential(Credential::Sha256Hex("not-a-digest"));
        assert!(matches!(config.validate(), Err(GateError::ConfigError(_))));
    }

    #[test]
    fn test_bad_theme_attribute_rejected() {
        let config = GateConfig {
            theme_attribute: "data scheme]",
            ..GateConfig::default()
        };
        assert!(matches!(config.validate(), Err(GateError::ConfigError(_))));
    }

    #[test]
    fn test_quoted_dark_scheme_rejected() {
        let config = GateConfig {
            dark_scheme: "sl\"ate",
            ..GateConfig::default()
        };
        assert!(matches!(config.validate(), Err(GateError::ConfigError(_))));
    }

    #[test]
    fn test_zero_timings_rejected() {
        let config = GateConfig {
            unlock_fade: Duration::ZERO,
            ..GateConfig::default()
        };
        assert!(matches!(config.validate(), Err(GateError::ConfigError(_))));

        let config = GateConfig {
            shake_duration: Duration::ZERO,
            ..GateConfig::default()
        };
        assert!(matches!(config.validate(), Err(GateError::ConfigError(_))));
    }
}
