//! Secure credential handling using the secrecy crate
//!
//! Database credentials are held in a [`SecretString`], which zeros its memory
//! on drop and redacts itself in `Debug` output. Rendering a snapshot goes
//! through [`serialize_redacted`], so a password never reaches the console.
//!
//! # Example
//!
//! ```rust
//! use dbapi::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let password = secret_string("my-password".to_string());
//! assert_eq!(password.expose_secret().as_ref(), "my-password");
//! assert!(!format!("{password:?}").contains("my-password"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serializer};
use zeroize::Zeroize;

/// Placeholder written in place of a secret when rendering configuration
pub const REDACTED: &str = "******";

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Default, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
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

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Type alias for a secret string
pub type SecretString = Secret<SecretValue>;

/// Helper function to create a SecretString from a String
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Serializes a secret as [`REDACTED`], or as an empty string when unset
pub fn serialize_redacted<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if secret.expose_secret().is_empty() {
        serializer.serialize_str("")
    } else {
        serializer.serialize_str(REDACTED)
    }
}

/// Default value for a secret field absent from every layer
pub fn empty_secret() -> SecretString {
    secret_string(String::new())
}
