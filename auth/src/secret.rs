use std::fmt;

use thiserror::Error;

/// Fatal configuration problems. Returned only while the process starts,
/// never per request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Signing secret is not set ({0})")]
    MissingSecret(String),

    #[error("Signing secret is empty")]
    EmptySecret,

    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },
}

/// Process-wide token signing secret.
///
/// Read once at startup and shared read-only afterwards. The bytes never
/// appear in `Debug` output.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wrap a configured secret.
    ///
    /// # Errors
    /// * `EmptySecret` - The secret is empty or whitespace only
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigurationError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigurationError::EmptySecret);
        }

        Ok(Self(secret.into_bytes()))
    }

    /// Wrap an optional configured secret, treating absence as fatal.
    ///
    /// # Arguments
    /// * `secret` - Value read from configuration, if any
    /// * `source` - Where the value was expected, used in the error message
    ///
    /// # Errors
    /// * `MissingSecret` - No value was configured
    /// * `EmptySecret` - The value is empty
    pub fn from_setting(secret: Option<String>, source: &str) -> Result<Self, ConfigurationError> {
        match secret {
            Some(secret) => Self::new(secret),
            None => Err(ConfigurationError::MissingSecret(source.to_string())),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_is_rejected() {
        assert_eq!(
            SigningSecret::new("").unwrap_err(),
            ConfigurationError::EmptySecret
        );
        assert_eq!(
            SigningSecret::new("   ").unwrap_err(),
            ConfigurationError::EmptySecret
        );
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let result = SigningSecret::from_setting(None, "JWT__SECRET");
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::MissingSecret("JWT__SECRET".to_string())
        );
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let secret = SigningSecret::new("super-secret-value").unwrap();

        assert_eq!(secret.as_bytes(), b"super-secret-value");
        assert!(!format!("{:?}", secret).contains("super-secret-value"));
    }
}
