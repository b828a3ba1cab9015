//! Scenario identifiers
//!
//! Keys are normalised to upper case so that `base`, `Base` and `BASE` all
//! address the same catalog entry.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical (upper-case, trimmed) name of a scenario in the catalog
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ScenarioKey(String);

impl ScenarioKey {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self(key.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ScenarioKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScenarioKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ScenarioKey {
    fn from(key: String) -> Self {
        Self::new(&key)
    }
}

impl From<ScenarioKey> for String {
    fn from(key: ScenarioKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_normalise_case_and_whitespace() {
        assert_eq!(ScenarioKey::new(" base "), ScenarioKey::new("BASE"));
        assert_eq!(ScenarioKey::from("Aggressive").as_str(), "AGGRESSIVE");
    }

    #[test]
    fn test_blank_key_is_empty() {
        assert!(ScenarioKey::new("   ").is_empty());
    }
}
