//! Properties that hold for every valid scenario and horizon
//!
//! These verify:
//! - The timeline has exactly one entry per requested month
//! - The carried population never goes negative
//! - Cumulative revenue never decreases
//! - At least one user joins every month
//! - Identical requests produce identical results
//! - Every display figure is the floor of its full-precision value

use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

use crate::config::{ScenarioBuilder, ScenarioCatalog};
use crate::model::{
    DISPLAY_TOLERANCE_ULPS, PeriodBreakdown, PeriodMetrics, ProjectionRequest, ProjectionResult,
};
use crate::projection::ProjectionEngine;

/// `display` is `value` floored, or the next integer when `value` is only
/// floating-point residue short of it
fn is_display_floor(display: u64, value: f64) -> bool {
    let floor = value.floor().max(0.0) as u64;
    if display == floor {
        return true;
    }
    let residue = display as f64 - value;
    display == floor.saturating_add(1)
        && residue <= DISPLAY_TOLERANCE_ULPS * f64::EPSILON * (display as f64)
}

/// Name of the first display figure that is not the floor of its source
fn mismatched_figure(period: &PeriodBreakdown, metrics: &PeriodMetrics) -> Option<&'static str> {
    let recurring = period.revenue.recurring();
    let figures = &metrics.metrics;
    [
        ("activeUsers", figures.active_users, period.active_users),
        ("mrr", figures.mrr, recurring),
        ("arr", figures.arr, recurring * 12.0),
        ("serviceRevenue", figures.service_revenue, period.revenue.service),
        ("expansionRevenue", figures.expansion_revenue, period.revenue.expansion),
        ("totalRevenue", figures.total_revenue, period.revenue.total),
        ("cumulativeRevenue", figures.cumulative_revenue, period.cumulative_revenue),
    ]
    .into_iter()
    .find(|&(_, display, value)| !is_display_floor(display, value))
    .map(|(name, _, _)| name)
}

fn check_trace(result: &ProjectionResult, trace: &[PeriodBreakdown], horizon: u32) {
    assert_eq!(result.timeline.len(), horizon as usize);
    assert_eq!(trace.len(), horizon as usize);

    let mut previous_cumulative = 0.0;
    for (index, (period, metrics)) in trace.iter().zip(&result.timeline).enumerate() {
        assert_eq!(metrics.month_index as usize, index);
        assert!(period.active_users >= 0.0, "negative population at {index}");
        assert!(period.next_active_users >= 0.0, "negative carry at {index}");
        assert!(period.net_new_users >= 1.0, "fewer than one new user at {index}");
        assert!(
            period.cumulative_revenue >= previous_cumulative,
            "cumulative revenue fell at {index}"
        );
        if let Some(name) = mismatched_figure(period, metrics) {
            panic!("{name} at month {index} is not the floor of {period:?}: {metrics:?}");
        }
        previous_cumulative = period.cumulative_revenue;
    }

    for pair in result.timeline.windows(2) {
        assert!(pair[1].metrics.cumulative_revenue >= pair[0].metrics.cumulative_revenue);
    }
}

#[test]
fn test_reference_scenarios_hold_invariants() {
    let catalog = ScenarioCatalog::reference();
    let engine = ProjectionEngine::new(&catalog);

    for key in catalog.keys() {
        for horizon in [1, 2, 12, 24, 60, 120, 180] {
            let (result, trace) = engine
                .project_traced(&ProjectionRequest::new(key.as_str(), horizon))
                .unwrap();
            check_trace(&result, &trace, horizon);
        }
    }
}

#[test]
fn test_repeated_projection_is_identical() {
    let catalog = ScenarioCatalog::reference();
    let engine = ProjectionEngine::new(&catalog);

    for key in catalog.keys() {
        let request = ProjectionRequest::new(key.as_str(), 48).starting("Mar'26");
        let first = engine.project(&request).unwrap();
        let second = engine.project(&request).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_independent_catalogs_agree() {
    let first = ScenarioCatalog::reference();
    let second = ScenarioCatalog::reference();
    let request = ProjectionRequest::new("AGGRESSIVE", 36);

    assert_eq!(
        ProjectionEngine::new(&first).project(&request).unwrap(),
        ProjectionEngine::new(&second).project(&request).unwrap()
    );
}

#[test]
fn test_large_figures_are_floored_not_rounded() {
    let catalog = ScenarioCatalog::reference();
    let (result, trace) = ProjectionEngine::new(&catalog)
        .project_traced(&ProjectionRequest::new("BASE", 120))
        .unwrap();

    assert!(trace[119].cumulative_revenue > 5e8);
    for (period, metrics) in trace.iter().zip(&result.timeline) {
        assert_eq!(
            metrics.metrics.cumulative_revenue,
            period.cumulative_revenue.floor() as u64,
            "month {}",
            period.month_index
        );
    }
}

#[test]
fn test_rounding_does_not_compound() {
    // A population that always sits just below a whole number would drift if
    // the floored value were carried forward.
    let catalog = ScenarioCatalog::from_builders([ScenarioBuilder::new("DRIFT")
        .label("Drift")
        .arpu(100.0)
        .churn(0.0)
        .initial_users(0.9)])
    .unwrap();
    let (result, trace) = ProjectionEngine::new(&catalog)
        .project_traced(&ProjectionRequest::new("DRIFT", 5))
        .unwrap();

    // 0.9, 1.9, 2.9, ... one new user each month on top of the carried value
    let users: Vec<u64> = result
        .timeline
        .iter()
        .map(|p| p.metrics.active_users)
        .collect();
    assert_eq!(users, [0, 1, 2, 3, 4]);
    assert!((trace[4].active_users - 4.9).abs() < 1e-9);
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_projection_invariants_hold(
        growth_bp in 0u32..20_000,
        arpu in 0u32..5_000,
        churn_bp in 0u32..9_999,
        attach_bp in 0u32..=10_000,
        initial_users in 0u32..50_000,
        horizon in 1u32..=180,
        damp_at in 1u32..100_000,
    ) {
        let growth = f64::from(growth_bp) / 10_000.0;
        let mut builder = ScenarioBuilder::new("PROP")
            .label("Property")
            .growth_rate(growth)
            .arpu(f64::from(arpu))
            .churn(f64::from(churn_bp) / 10_000.0)
            .service_attach_rate(f64::from(attach_bp) / 10_000.0)
            .initial_users(f64::from(initial_users));
        if growth_bp % 2 == 0 {
            builder = builder
                .dampen_from(f64::from(damp_at), growth / 2.0)
                .dampen_from(f64::from(damp_at) * 4.0, growth / 4.0);
        }
        let catalog = ScenarioCatalog::from_builders([builder]).unwrap();
        let engine = ProjectionEngine::new(&catalog);
        let request = ProjectionRequest::new("PROP", horizon);

        let (result, trace) = engine.project_traced(&request).unwrap();
        prop_assert_eq!(result.timeline.len(), horizon as usize);

        let mut previous = 0.0;
        for (period, metrics) in trace.iter().zip(&result.timeline) {
            prop_assert_eq!(mismatched_figure(period, metrics), None);
            prop_assert!(period.active_users >= 0.0);
            prop_assert!(period.next_active_users >= 0.0);
            prop_assert!(period.net_new_users >= 1.0);
            prop_assert!(period.cumulative_revenue >= previous);
            previous = period.cumulative_revenue;
        }

        let again = engine.project(&request).unwrap();
        prop_assert_eq!(result, again);
    }
}
