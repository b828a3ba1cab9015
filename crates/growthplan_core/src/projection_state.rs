//! Per-period state carried through a projection run.
//!
//! A run is a fold over `PeriodState`: each call to `advance` consumes the
//! current state and returns the next one together with the full-precision
//! record of the period that was just billed. The state is never rounded.

use crate::error::ArithmeticGuardError;
use crate::growth::effective_rate;
use crate::model::{PeriodBreakdown, ScenarioConfig};
use crate::revenue::compose;

/// Working values threaded from one month to the next
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodState {
    pub active_users: f64,
    pub cumulative_revenue: f64,
}

impl PeriodState {
    /// State at month zero: the scenario's initial users and no revenue yet
    #[must_use]
    pub fn initial(config: &ScenarioConfig) -> Self {
        Self {
            active_users: config.initial_users,
            cumulative_revenue: 0.0,
        }
    }

    /// Bill month `month_index`, then apply growth and churn.
    ///
    /// Revenue and the growth rate are both derived from the population as it
    /// stands before this month's changes. At least one user joins every month.
    /// Churn applies to the existing base only; users who join this month are
    /// not churned until the next.
    pub fn advance(
        self,
        config: &ScenarioConfig,
        month_index: u32,
    ) -> Result<(PeriodBreakdown, PeriodState), ArithmeticGuardError> {
        let active_users = self.active_users;
        let effective_growth_rate = effective_rate(config, active_users);
        let net_new_users = (active_users * effective_growth_rate).max(1.0);
        let revenue = compose(active_users, net_new_users, config);
        let churned_users = active_users * config.churn_rate;
        let next_active_users = active_users + net_new_users - churned_users;
        let cumulative_revenue = self.cumulative_revenue + revenue.total;

        for (quantity, value) in [
            ("active users", next_active_users),
            ("total revenue", revenue.total),
            ("cumulative revenue", cumulative_revenue),
        ] {
            if !value.is_finite() {
                return Err(ArithmeticGuardError::NonFinite {
                    month_index,
                    quantity,
                });
            }
        }
        if next_active_users < 0.0 {
            return Err(ArithmeticGuardError::NegativePopulation {
                month_index,
                active_users: next_active_users,
            });
        }

        let breakdown = PeriodBreakdown {
            month_index,
            active_users,
            effective_growth_rate,
            net_new_users,
            churned_users,
            revenue,
            cumulative_revenue,
            next_active_users,
        };
        let next = PeriodState {
            active_users: next_active_users,
            cumulative_revenue,
        };
        Ok((breakdown, next))
    }
}
