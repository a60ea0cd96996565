//! Secure credential handling using the secrecy crate
//!
//! Sensitive values such as webhook auth tokens are wrapped in
//! [`SecretString`] so they are zeroed on drop and never appear in
//! `Debug` output. The value must be accessed explicitly through
//! `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use medvault::config::{SecretString, SecretValue};
//! use secrecy::{ExposeSecret, Secret};
//!
//! let token: SecretString = Secret::new(SecretValue::from("bearer-token".to_string()));
//! assert_eq!(token.expose_secret(), "bearer-token");
//!
//! // Debug output is redacted
//! assert!(!format!("{token:?}").contains("bearer-token"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl From<SecretValue> for String {
    fn from(mut s: SecretValue) -> Self {
        std::mem::take(&mut s.0)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl std::fmt::Display for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Type alias for a secret string
///
/// Wraps a [`SecretValue`] in a `Secret` container that zeros the memory
/// when dropped, redacts `Debug` output, and requires an explicit
/// `expose_secret()` call to read.
pub type SecretString = Secret<SecretValue>;

/// Creates a SecretString from a String
///
/// # Example
///
/// ```rust
/// use medvault::config::secret_string;
///
/// let token = secret_string("my-token".to_string());
/// ```
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Creates an optional SecretString from an optional String
///
/// # Example
///
/// ```rust
/// use medvault::config::secret_string_opt;
///
/// let token = secret_string_opt(Some("my-token".to_string()));
/// assert!(token.is_some());
///
/// let none = secret_string_opt(None);
/// assert!(none.is_none());
/// ```
#[inline]
pub fn secret_string_opt(value: Option<String>) -> Option<SecretString> {
    value.map(|s| Secret::new(SecretValue::from(s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("test-token".to_string());
        assert_eq!(secret.expose_secret(), "test-token");
    }

    #[test]
    fn test_secret_string_opt() {
        let secret = secret_string_opt(Some("test-token".to_string()));
        assert!(secret.is_some());
        assert_eq!(secret.unwrap().expose_secret(), "test-token");

        assert!(secret_string_opt(None).is_none());
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-data".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("sensitive-data"));
        assert!(debug_output.contains("REDACTED") || debug_output.contains("Secret"));
    }

    #[test]
    fn test_secret_serde() {
        use serde::{Deserialize, Serialize};

        #[derive(Serialize, Deserialize)]
        struct TestConfig {
            auth_token: SecretString,
        }

        let config = TestConfig {
            auth_token: secret_string("token123".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("token123"));

        let deserialized: TestConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.auth_token.expose_secret(), "token123");
    }
}
