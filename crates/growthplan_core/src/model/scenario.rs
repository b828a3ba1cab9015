//! Scenario parameter sets
//!
//! A `ScenarioConfig` bundles the growth, pricing and retention assumptions
//! for one projection. Configs are checked by `validate` before they can be
//! registered in a `ScenarioCatalog`, after which they are only ever handed
//! out by shared reference.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One step of a staged growth cap.
///
/// Once the active population reaches `threshold`, the monthly growth rate is
/// limited to `capped_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DampeningStage {
    pub threshold: f64,
    pub capped_rate: f64,
}

impl DampeningStage {
    #[must_use]
    pub const fn new(threshold: f64, capped_rate: f64) -> Self {
        Self {
            threshold,
            capped_rate,
        }
    }
}

/// Growth, pricing and retention assumptions for a single scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioConfig {
    /// Human-readable name, reported as `scenario` in projection output
    pub label: String,
    /// Month-over-month growth as a fraction of the active population
    pub base_growth_rate: f64,
    /// Average subscription revenue per user per month
    pub arpu: f64,
    /// Fraction of the existing base lost each month, `0 <= churn < 1`
    pub churn_rate: f64,
    /// Fraction of new users who buy an implementation package
    pub service_attach_rate: f64,
    /// Active population at month zero
    pub initial_users: f64,
    /// Growth caps in ascending threshold order. Empty for scenarios that grow
    /// at their base rate throughout.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dampening: Vec<DampeningStage>,
}

impl ScenarioConfig {
    /// Scenarios with a dampening schedule are treated as high-growth.
    pub fn is_high_growth(&self) -> bool {
        !self.dampening.is_empty()
    }

    /// Check every field against the model's domain.
    ///
    /// `key` is only used to label the error.
    pub fn validate(&self, key: &str) -> Result<(), ValidationError> {
        let fail = |reason: String| Err(ValidationError::scenario(key, reason));

        if self.label.trim().is_empty() {
            return fail("label must not be empty".into());
        }

        let fields = [
            ("baseGrowthRate", self.base_growth_rate),
            ("arpu", self.arpu),
            ("churnRate", self.churn_rate),
            ("serviceAttachRate", self.service_attach_rate),
            ("initialUsers", self.initial_users),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return fail(format!("{name} must be finite, got {value}"));
            }
            if value < 0.0 {
                return fail(format!("{name} must not be negative, got {value}"));
            }
        }

        if self.churn_rate >= 1.0 {
            return fail(format!(
                "churnRate must be below 1, got {}",
                self.churn_rate
            ));
        }
        if self.service_attach_rate > 1.0 {
            return fail(format!(
                "serviceAttachRate must be at most 1, got {}",
                self.service_attach_rate
            ));
        }

        self.validate_dampening(key)
    }

    fn validate_dampening(&self, key: &str) -> Result<(), ValidationError> {
        let mut previous: Option<&DampeningStage> = None;
        for stage in &self.dampening {
            if !stage.threshold.is_finite() || !stage.capped_rate.is_finite() {
                return Err(ValidationError::scenario(
                    key,
                    "dampening stages must be finite",
                ));
            }
            if stage.threshold < 0.0 || stage.capped_rate < 0.0 {
                return Err(ValidationError::scenario(
                    key,
                    "dampening thresholds and caps must not be negative",
                ));
            }
            if stage.capped_rate > self.base_growth_rate {
                return Err(ValidationError::scenario(
                    key,
                    format!(
                        "dampening cap {} exceeds the base growth rate {}",
                        stage.capped_rate, self.base_growth_rate
                    ),
                ));
            }
            if let Some(prev) = previous {
                if stage.threshold <= prev.threshold {
                    return Err(ValidationError::scenario(
                        key,
                        "dampening thresholds must be strictly increasing",
                    ));
                }
                if stage.capped_rate > prev.capped_rate {
                    return Err(ValidationError::scenario(
                        key,
                        "dampening caps must not increase with population",
                    ));
                }
            }
            previous = Some(stage);
        }
        Ok(())
    }
}
