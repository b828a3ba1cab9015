//! Scenario Builder
//!
//! Fluent API for defining scenarios, with presets for the reference set.
//!
//! # Example
//!
//! ```ignore
//! use growthplan_core::config::{ScenarioBuilder, ScenarioCatalog};
//!
//! let catalog = ScenarioCatalog::from_builders([
//!     ScenarioBuilder::base(),
//!     ScenarioBuilder::new("ENTERPRISE")
//!         .label("Enterprise Push")
//!         .growth_rate(0.06)
//!         .arpu(2_000.0)
//!         .churn(0.01)
//!         .service_attach_rate(0.8)
//!         .initial_users(4.0),
//! ])?;
//! ```

use crate::error::ValidationError;
use crate::model::{DampeningStage, ScenarioConfig, ScenarioKey};

/// Builder for a single catalog entry
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    pub(crate) key: ScenarioKey,
    pub(crate) config: ScenarioConfig,
}

impl ScenarioBuilder {
    /// Start a scenario with the given key. The label defaults to the key and
    /// every rate to zero; users start at zero.
    #[must_use]
    pub fn new(key: &str) -> Self {
        let key = ScenarioKey::new(key);
        Self {
            config: ScenarioConfig {
                label: key.to_string(),
                base_growth_rate: 0.0,
                arpu: 0.0,
                churn_rate: 0.0,
                service_attach_rate: 0.0,
                initial_users: 0.0,
                dampening: Vec::new(),
            },
            key,
        }
    }

    // =========================================================================
    // Reference Scenarios
    // =========================================================================

    /// Discounted early-access pricing with slower growth and higher churn
    #[must_use]
    pub fn conservative() -> Self {
        Self::new("CONSERVATIVE")
            .label("Conservative")
            .growth_rate(0.08)
            .arpu(250.0)
            .churn(0.05)
            .service_attach_rate(0.20)
            .initial_users(12.0)
    }

    /// Standard enterprise pricing and 15% month-over-month growth
    #[must_use]
    pub fn base() -> Self {
        Self::new("BASE")
            .label("Base Case")
            .growth_rate(0.15)
            .arpu(450.0)
            .churn(0.03)
            .service_attach_rate(0.35)
            .initial_users(12.0)
    }

    /// Viral adoption at a low price point, throttled as the base scales
    #[must_use]
    pub fn aggressive() -> Self {
        Self::new("AGGRESSIVE")
            .label("Viral / Blitzscale")
            .growth_rate(1.15)
            .arpu(150.0)
            .churn(0.08)
            .service_attach_rate(0.05)
            .initial_users(100.0)
            .dampen_from(1_000.0, 0.40)
            .dampen_from(5_000.0, 0.20)
            .dampen_from(10_000.0, 0.10)
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = label.into();
        self
    }

    /// Month-over-month growth before any dampening
    #[must_use]
    pub fn growth_rate(mut self, rate: f64) -> Self {
        self.config.base_growth_rate = rate;
        self
    }

    #[must_use]
    pub fn arpu(mut self, arpu: f64) -> Self {
        self.config.arpu = arpu;
        self
    }

    #[must_use]
    pub fn churn(mut self, rate: f64) -> Self {
        self.config.churn_rate = rate;
        self
    }

    #[must_use]
    pub fn service_attach_rate(mut self, rate: f64) -> Self {
        self.config.service_attach_rate = rate;
        self
    }

    #[must_use]
    pub fn initial_users(mut self, users: f64) -> Self {
        self.config.initial_users = users;
        self
    }

    /// Cap growth at `capped_rate` once the population reaches `threshold`.
    /// Call in ascending threshold order.
    #[must_use]
    pub fn dampen_from(mut self, threshold: f64, capped_rate: f64) -> Self {
        self.config
            .dampening
            .push(DampeningStage::new(threshold, capped_rate));
        self
    }

    pub fn key(&self) -> &ScenarioKey {
        &self.key
    }

    /// Return the config without validating it
    #[must_use]
    pub fn build_config(self) -> ScenarioConfig {
        self.config
    }

    /// Validate and return the catalog entry
    pub fn build(self) -> Result<(ScenarioKey, ScenarioConfig), ValidationError> {
        if self.key.is_empty() {
            return Err(ValidationError::scenario("", "scenario key must not be empty"));
        }
        self.config.validate(self.key.as_str())?;
        Ok((self.key, self.config))
    }
}
