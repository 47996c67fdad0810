//! API key handling.
//!
//! Uses the `secrecy` crate so the key never shows up in logs or debug output.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// An API key that won't be logged or displayed.
pub struct ApiKey(SecretBox<str>);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the key for use in a request header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_in_debug() {
        let key = ApiKey::new("sk-super-secret-key");
        let debug = format!("{:?}", key);
        assert!(!debug.contains("sk-super"));
        assert_eq!(debug, "[REDACTED]");
    }

    #[test]
    fn test_expose_and_clone() {
        let key = ApiKey::from("sk-abc");
        let copy = key.clone();
        assert_eq!(copy.expose(), "sk-abc");
        assert_eq!(key.expose(), "sk-abc");
    }
}
