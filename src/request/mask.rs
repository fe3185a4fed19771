//! Secret masking for display
//!
//! Stored secrets are kept verbatim. Only the display copy is masked; the
//! clipboard payload always carries the real value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder that replaces the middle of a masked secret
pub const MASK_FILL: &str = "...";

/// Placeholder for secrets too short to reveal any characters
pub const MASK_SHORT: &str = "****";

/// Mask a secret for display: first 4 + `...` + last 4 when longer than 8
/// characters, otherwise `****`. Empty input stays empty.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    if chars.len() <= 8 {
        return MASK_SHORT.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, MASK_FILL, tail)
}

/// A string that redacts its value in Debug and Display output
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        SecretString(value.into())
    }

    /// The unmasked value, for clipboard copy and request execution
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// The display copy
    pub fn masked(&self) -> String {
        mask_secret(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "SecretString(\"\")")
        } else {
            write!(f, "SecretString(\"[REDACTED]\")")
        }
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        SecretString(s.to_string())
    }
}

impl std::str::FromStr for SecretString {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SecretString(s.to_string()))
    }
}
