//! Revenue composition
//!
//! Each period earns three streams:
//! - subscription revenue from every active user,
//! - one-time implementation fees from the expected share of new users who
//!   buy onboarding help,
//! - expansion revenue from the slice of the existing base that grows its
//!   annual spend, apportioned monthly.
//!
//! Revenue is not capped; it scales with the population.

use crate::model::{RevenueBreakdown, ScenarioConfig};

/// One-time onboarding charge per new user who attaches a service package
pub const IMPLEMENTATION_FEE: f64 = 5_000.0;

/// Share of the existing base that expands its spend
pub const EXPANSION_ELIGIBLE_FRACTION: f64 = 0.10;

/// Annual spend uplift for expanding users
pub const EXPANSION_UPLIFT_RATE: f64 = 0.20;

/// Revenue for a period billed to `active_users` in which `net_new_users`
/// joined.
pub fn compose(active_users: f64, net_new_users: f64, config: &ScenarioConfig) -> RevenueBreakdown {
    let subscription = active_users * config.arpu;
    let service = net_new_users * config.service_attach_rate * IMPLEMENTATION_FEE;
    let expansion = (active_users * EXPANSION_ELIGIBLE_FRACTION)
        * (config.arpu * EXPANSION_UPLIFT_RATE / 12.0);

    RevenueBreakdown {
        subscription,
        service,
        expansion,
        total: subscription + service + expansion,
    }
}
