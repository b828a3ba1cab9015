//! Projection results
//!
//! Two representations of every period coexist:
//! - `PeriodBreakdown` keeps the full-precision figures the engine carries
//!   from one month to the next.
//! - `PeriodMetrics` holds the floored integers shown to readers.
//!
//! Display values are always derived from the full-precision breakdown, never
//! from a previous display value, so rounding never compounds.

use serde::{Deserialize, Serialize};

/// Distance from an integer, in units of that integer's magnitude times
/// `f64::EPSILON`, under which a value is treated as that integer before
/// flooring. A few ULPs absorb residue such as `3149.9999999999995` for an
/// exact `3150` without rounding genuine fractions up at any magnitude.
pub const DISPLAY_TOLERANCE_ULPS: f64 = 16.0;

/// Revenue earned in one period, split by stream
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueBreakdown {
    pub subscription: f64,
    pub service: f64,
    pub expansion: f64,
    pub total: f64,
}

impl RevenueBreakdown {
    /// Recurring revenue for the month (subscription plus expansion), the
    /// basis of MRR and ARR
    pub fn recurring(&self) -> f64 {
        self.subscription + self.expansion
    }
}

/// Full-precision record of one period of a projection run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBreakdown {
    pub month_index: u32,
    /// Population billed this period (before growth and churn)
    pub active_users: f64,
    pub effective_growth_rate: f64,
    pub net_new_users: f64,
    pub churned_users: f64,
    pub revenue: RevenueBreakdown,
    /// Running total including this period's revenue
    pub cumulative_revenue: f64,
    /// Population carried into the next period
    pub next_active_users: f64,
}

/// Display figures for one month, floored to whole units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFigures {
    pub active_users: u64,
    pub mrr: u64,
    pub arr: u64,
    pub service_revenue: u64,
    pub expansion_revenue: u64,
    pub total_revenue: u64,
    pub cumulative_revenue: u64,
}

/// One labelled month of a projection timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodMetrics {
    pub month_index: u32,
    pub label: String,
    pub metrics: MonthlyFigures,
}

impl PeriodMetrics {
    /// Floor a full-precision breakdown into display figures.
    #[must_use]
    pub fn from_breakdown(breakdown: &PeriodBreakdown, label: String) -> Self {
        let recurring = breakdown.revenue.recurring();
        Self {
            month_index: breakdown.month_index,
            label,
            metrics: MonthlyFigures {
                active_users: floor_for_display(breakdown.active_users),
                mrr: floor_for_display(recurring),
                arr: floor_for_display(recurring * 12.0),
                service_revenue: floor_for_display(breakdown.revenue.service),
                expansion_revenue: floor_for_display(breakdown.revenue.expansion),
                total_revenue: floor_for_display(breakdown.revenue.total),
                cumulative_revenue: floor_for_display(breakdown.cumulative_revenue),
            },
        }
    }
}

/// Complete output of one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    /// Label of the scenario that was projected
    #[serde(rename = "scenario")]
    pub scenario_label: String,
    pub arpu_used: f64,
    /// One entry per projected month, in order
    pub timeline: Vec<PeriodMetrics>,
}

impl ProjectionResult {
    pub fn months(&self) -> usize {
        self.timeline.len()
    }

    pub fn last(&self) -> Option<&PeriodMetrics> {
        self.timeline.last()
    }

    /// Find the period with the given label
    pub fn period(&self, label: &str) -> Option<&PeriodMetrics> {
        self.timeline.iter().find(|p| p.label == label)
    }
}

/// Floor a non-negative amount for display.
///
/// Values within `DISPLAY_TOLERANCE_ULPS` of an integer snap to that integer
/// first; anything else is floored. Negative and NaN inputs map to 0.
pub fn floor_for_display(value: f64) -> u64 {
    let nearest = value.round();
    let tolerance = DISPLAY_TOLERANCE_ULPS * f64::EPSILON * nearest.abs().max(1.0);
    let snapped = if (value - nearest).abs() <= tolerance {
        nearest
    } else {
        value.floor()
    };
    // `as` saturates at u64::MAX and maps NaN to 0
    snapped.max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_for_display_floors_fractions() {
        assert_eq!(floor_for_display(13.44), 13);
        assert_eq!(floor_for_display(0.99), 0);
        assert_eq!(floor_for_display(5409.5), 5409);
    }

    #[test]
    fn test_floor_for_display_absorbs_float_residue() {
        assert_eq!(floor_for_display(3149.9999999999995), 3150);
        assert_eq!(floor_for_display(9.000000000000002), 9);
    }

    #[test]
    fn test_floor_for_display_floors_large_fractions() {
        assert_eq!(floor_for_display(600_000_000.7), 600_000_000);
        assert_eq!(floor_for_display(50_965_904.975), 50_965_904);
        assert_eq!(floor_for_display(177_464_230.99), 177_464_230);
        assert_eq!(floor_for_display(57_465_072_863.77), 57_465_072_863);
    }

    #[test]
    fn test_floor_for_display_clamps_invalid_values() {
        assert_eq!(floor_for_display(-4.0), 0);
        assert_eq!(floor_for_display(f64::NAN), 0);
        assert_eq!(floor_for_display(f64::INFINITY), u64::MAX);
    }

    #[test]
    fn test_metrics_from_breakdown() {
        let breakdown = PeriodBreakdown {
            month_index: 3,
            active_users: 20.7,
            effective_growth_rate: 0.1,
            net_new_users: 2.07,
            churned_users: 0.5,
            revenue: RevenueBreakdown {
                subscription: 1000.4,
                service: 250.9,
                expansion: 10.3,
                total: 1261.6,
            },
            cumulative_revenue: 5000.2,
            next_active_users: 22.27,
        };

        let period = PeriodMetrics::from_breakdown(&breakdown, "Apr'26".into());

        assert_eq!(period.month_index, 3);
        assert_eq!(period.label, "Apr'26");
        assert_eq!(period.metrics.active_users, 20);
        assert_eq!(period.metrics.mrr, 1010);
        assert_eq!(period.metrics.arr, 12128);
        assert_eq!(period.metrics.service_revenue, 250);
        assert_eq!(period.metrics.expansion_revenue, 10);
        assert_eq!(period.metrics.total_revenue, 1261);
        assert_eq!(period.metrics.cumulative_revenue, 5000);
    }
}
