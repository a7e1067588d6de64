//! Redacting wrapper for the Vault client token.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Vault token that never shows up in Debug, Display or serialized output.
///
/// The token is only reachable through [`VaultToken::expose`], and its memory
/// is zeroed when the value is dropped. Deserialization accepts the real value
/// so tokens can be read from settings files and environment variables.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct VaultToken(String);

impl VaultToken {
    /// Wrap a raw token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for the `X-Vault-Token` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for VaultToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str("[REDACTED]")
    }
}

impl<'de> Deserialize<'de> for VaultToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(VaultToken(value))
    }
}

impl fmt::Debug for VaultToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VaultToken([REDACTED])")
    }
}

impl fmt::Display for VaultToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl PartialEq for VaultToken {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for VaultToken {}

impl From<String> for VaultToken {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for VaultToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
