//! Headline figures for a finished projection.

use serde::{Deserialize, Serialize};

use crate::model::ProjectionResult;

/// Condensed view of a `ProjectionResult`, used for side-by-side scenario
/// comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub scenario: String,
    pub months: usize,
    /// Label of the last projected month
    pub final_label: String,
    pub final_active_users: u64,
    pub final_mrr: u64,
    pub final_arr: u64,
    pub cumulative_revenue: u64,
    pub peak_monthly_revenue: u64,
    /// Label of the month with the highest total revenue (earliest on ties)
    pub peak_label: String,
    pub total_service_revenue: u64,
}

impl ProjectionSummary {
    /// Summarise a result. Returns `None` for an empty timeline.
    pub fn from_result(result: &ProjectionResult) -> Option<Self> {
        let last = result.last()?;
        let peak = result.timeline.iter().reduce(|best, period| {
            if period.metrics.total_revenue > best.metrics.total_revenue {
                period
            } else {
                best
            }
        })?;
        let total_service_revenue = result
            .timeline
            .iter()
            .map(|p| p.metrics.service_revenue)
            .fold(0u64, u64::saturating_add);

        Some(Self {
            scenario: result.scenario_label.clone(),
            months: result.months(),
            final_label: last.label.clone(),
            final_active_users: last.metrics.active_users,
            final_mrr: last.metrics.mrr,
            final_arr: last.metrics.arr,
            cumulative_revenue: last.metrics.cumulative_revenue,
            peak_monthly_revenue: peak.metrics.total_revenue,
            peak_label: peak.label.clone(),
            total_service_revenue,
        })
    }
}

/// Label of the first month whose ARR reaches `target`, if any
pub fn first_month_reaching_arr(result: &ProjectionResult, target: u64) -> Option<&str> {
    result
        .timeline
        .iter()
        .find(|p| p.metrics.arr >= target)
        .map(|p| p.label.as_str())
}
