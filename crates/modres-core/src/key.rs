//! Opaque module identifiers.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validated module identifier.
///
/// Keys are compared, ordered and hashed as plain strings. Namespaced names
/// such as `App\Modules\Auth` are accepted; empty keys and keys containing
/// whitespace or control characters are not.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleKey(String);

/// Why a string was rejected as a [`ModuleKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("module key is empty")]
    Empty,
    #[error("module key `{key}` contains invalid character {ch:?}")]
    InvalidChar { key: String, ch: char },
}

impl ModuleKey {
    pub fn new(key: impl Into<String>) -> Result<Self, KeyError> {
        let key = key.into();
        if key.is_empty() {
            return Err(KeyError::Empty);
        }
        if let Some(ch) = key.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(KeyError::InvalidChar { key, ch });
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ModuleKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for ModuleKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ModuleKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ModuleKey {
    type Error = KeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModuleKey> for String {
    fn from(key: ModuleKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn accepts_namespaced_keys() {
        let key = ModuleKey::new(r"App\Modules\Auth").unwrap();
        assert_eq!(key.as_str(), r"App\Modules\Auth");
        assert_eq!(key.to_string(), r"App\Modules\Auth");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(ModuleKey::new(""), Err(KeyError::Empty));
    }

    #[test]
    fn rejects_whitespace() {
        let err = ModuleKey::new("Core Module").unwrap_err();
        assert_eq!(
            err,
            KeyError::InvalidChar {
                key: "Core Module".into(),
                ch: ' '
            }
        );
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(ModuleKey::new("Core").unwrap(), 1);
        assert_eq!(map.get("Core"), Some(&1));
    }
}
