//! Scenario configuration
//!
//! The `ScenarioCatalog` is the immutable registry the engine reads scenarios
//! from. It is built once, validated on construction, and then passed by
//! reference; nothing can register or alter an entry afterwards.
//!
//! ```ignore
//! use growthplan_core::config::{ScenarioBuilder, ScenarioCatalog};
//!
//! // The built-in CONSERVATIVE / BASE / AGGRESSIVE set
//! let catalog = ScenarioCatalog::reference();
//!
//! // Or an ad hoc set for experiments and tests
//! let catalog = ScenarioCatalog::from_builders([
//!     ScenarioBuilder::base().churn(0.05),
//!     ScenarioBuilder::new("FLAT").label("Flat").arpu(100.0).initial_users(50.0),
//! ])?;
//! ```

use rustc_hash::FxHashMap;

use crate::error::{ConfigurationError, ValidationError};
use crate::model::{ScenarioConfig, ScenarioKey};

mod builder;

pub use builder::ScenarioBuilder;

/// Read-only registry of named scenarios
#[derive(Debug, Clone, Default)]
pub struct ScenarioCatalog {
    /// Keys in registration order
    order: Vec<ScenarioKey>,
    scenarios: FxHashMap<ScenarioKey, ScenarioConfig>,
}

impl ScenarioCatalog {
    /// The reference CONSERVATIVE, BASE and AGGRESSIVE scenarios
    #[must_use]
    pub fn reference() -> Self {
        let mut catalog = Self::default();
        for builder in [
            ScenarioBuilder::conservative(),
            ScenarioBuilder::base(),
            ScenarioBuilder::aggressive(),
        ] {
            catalog.order.push(builder.key.clone());
            catalog.scenarios.insert(builder.key, builder.config);
        }
        catalog
    }

    /// Build a catalog from explicit entries, validating each one.
    pub fn from_scenarios<I, K>(entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, ScenarioConfig)>,
        K: Into<ScenarioKey>,
    {
        let mut catalog = Self::default();
        for (key, config) in entries {
            let key = key.into();
            if key.is_empty() {
                return Err(ValidationError::scenario("", "scenario key must not be empty"));
            }
            config.validate(key.as_str())?;
            if catalog.scenarios.contains_key(&key) {
                return Err(ValidationError::DuplicateScenario(key.to_string()));
            }
            catalog.order.push(key.clone());
            catalog.scenarios.insert(key, config);
        }
        Ok(catalog)
    }

    /// Build a catalog from scenario builders, validating each one.
    pub fn from_builders(
        builders: impl IntoIterator<Item = ScenarioBuilder>,
    ) -> Result<Self, ValidationError> {
        Self::from_scenarios(
            builders
                .into_iter()
                .map(|builder| (builder.key, builder.config)),
        )
    }

    /// Look up a scenario by key (case-insensitive)
    pub fn lookup(&self, key: &str) -> Result<&ScenarioConfig, ConfigurationError> {
        self.get(key)
            .ok_or_else(|| ConfigurationError::UnknownScenario(key.to_string()))
    }

    pub fn get(&self, key: &str) -> Option<&ScenarioConfig> {
        let key = ScenarioKey::new(key);
        self.scenarios.get(key.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in registration order
    pub fn keys(&self) -> impl Iterator<Item = &ScenarioKey> {
        self.order.iter()
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&ScenarioKey, &ScenarioConfig)> {
        self.order
            .iter()
            .filter_map(|key| self.scenarios.get(key).map(|config| (key, config)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_catalog_contents() {
        let catalog = ScenarioCatalog::reference();
        let keys: Vec<&str> = catalog.keys().map(ScenarioKey::as_str).collect();
        assert_eq!(keys, ["CONSERVATIVE", "BASE", "AGGRESSIVE"]);

        let base = catalog.lookup("BASE").unwrap();
        assert_eq!(base.label, "Base Case");
        assert_eq!(base.arpu, 450.0);
        assert_eq!(base.initial_users, 12.0);

        let aggressive = catalog.lookup("AGGRESSIVE").unwrap();
        assert_eq!(aggressive.initial_users, 100.0);
        assert_eq!(aggressive.dampening.len(), 3);
    }

    #[test]
    fn test_reference_catalog_validates() {
        for (key, config) in ScenarioCatalog::reference().iter() {
            assert!(config.validate(key.as_str()).is_ok(), "{key} is invalid");
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = ScenarioCatalog::reference();
        assert_eq!(
            catalog.lookup("conservative").unwrap().label,
            "Conservative"
        );
        assert!(catalog.contains(" Aggressive "));
    }

    #[test]
    fn test_unknown_key_is_configuration_error() {
        let catalog = ScenarioCatalog::reference();
        assert_eq!(
            catalog.lookup("MOONSHOT"),
            Err(ConfigurationError::UnknownScenario("MOONSHOT".into()))
        );
    }

    #[test]
    fn test_from_builders_rejects_duplicates() {
        let result =
            ScenarioCatalog::from_builders([ScenarioBuilder::base(), ScenarioBuilder::base()]);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::DuplicateScenario("BASE".into())
        );
    }

    #[test]
    fn test_from_builders_rejects_invalid_entries() {
        let result = ScenarioCatalog::from_builders([
            ScenarioBuilder::base(),
            ScenarioBuilder::new("BROKEN").label("Broken").arpu(-5.0),
        ]);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidScenario { ref key, .. }) if key == "BROKEN"
        ));
    }

    #[test]
    fn test_ad_hoc_catalog_preserves_order() {
        let catalog = ScenarioCatalog::from_builders([
            ScenarioBuilder::new("zeta").label("Zeta").arpu(10.0),
            ScenarioBuilder::new("alpha").label("Alpha").arpu(20.0),
        ])
        .unwrap();
        let keys: Vec<String> = catalog.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["ZETA", "ALPHA"]);
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
    }
}
