//! Growth policy
//!
//! Approximates logistic saturation with a small ordered rule table: a
//! high-growth scenario grows at its base rate until the population reaches
//! the first dampening threshold, then at progressively lower capped rates.
//!
//! The policy is stateless. The rate is derived from the current population
//! alone, so if churn pulls the population back under a threshold that was
//! crossed earlier, the cap relaxes again.

use crate::model::ScenarioConfig;

/// Monthly growth rate for a population of `active_users`.
///
/// Returns the cap of the highest dampening threshold that `active_users` has
/// met or exceeded, or the base rate when no threshold applies. Relies on the
/// thresholds being sorted ascending, which `ScenarioConfig::validate`
/// enforces.
pub fn effective_rate(config: &ScenarioConfig, active_users: f64) -> f64 {
    config
        .dampening
        .iter()
        .rev()
        .find(|stage| active_users >= stage.threshold)
        .map_or(config.base_growth_rate, |stage| stage.capped_rate)
}
