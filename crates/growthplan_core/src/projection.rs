use crate::config::ScenarioCatalog;
use crate::error::{Result, ValidationError};
use crate::labels::PeriodLabeler;
use crate::model::{PeriodBreakdown, PeriodMetrics, ProjectionRequest, ProjectionResult, ScenarioConfig};
use crate::projection_state::PeriodState;

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// Runs projections against a borrowed scenario catalog.
///
/// The engine holds no mutable state, so a single instance can serve any
/// number of concurrent callers.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionEngine<'a> {
    catalog: &'a ScenarioCatalog,
}

impl<'a> ProjectionEngine<'a> {
    #[must_use]
    pub fn new(catalog: &'a ScenarioCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a ScenarioCatalog {
        self.catalog
    }

    /// Project the requested scenario month by month.
    ///
    /// Every input is validated before the first period is computed; a failed
    /// call never yields a partial timeline.
    pub fn project(&self, request: &ProjectionRequest) -> Result<ProjectionResult> {
        self.project_traced(request).map(|(result, _)| result)
    }

    /// Like `project`, but also returns the full-precision record of every
    /// period.
    pub fn project_traced(
        &self,
        request: &ProjectionRequest,
    ) -> Result<(ProjectionResult, Vec<PeriodBreakdown>)> {
        if request.horizon_months == 0 {
            return Err(ValidationError::InvalidHorizon(request.horizon_months).into());
        }
        let config = self.catalog.lookup(&request.scenario_key)?;
        let labeler = PeriodLabeler::parse(&request.start_label)?;

        tracing::debug!(
            scenario = %request.scenario_key,
            horizon_months = request.horizon_months,
            start = %labeler,
            "running projection"
        );

        project_scenario(config, request.horizon_months, &labeler)
    }

    /// Project several scenarios over the same horizon.
    ///
    /// Results come back in the order of `scenario_keys`. With the `parallel`
    /// feature the runs are spread across the rayon thread pool. If any run
    /// fails, the error of the earliest failing key in `scenario_keys` is
    /// returned.
    pub fn compare<K: AsRef<str>>(
        &self,
        scenario_keys: &[K],
        horizon_months: u32,
        start_label: &str,
    ) -> Result<Vec<ProjectionResult>> {
        let requests: Vec<ProjectionRequest> = scenario_keys
            .iter()
            .map(|key| ProjectionRequest::new(key.as_ref(), horizon_months).starting(start_label))
            .collect();

        // Collect every outcome first so the reported error follows request order
        #[cfg(feature = "parallel")]
        let outcomes: Vec<Result<ProjectionResult>> = requests
            .par_iter()
            .map(|request| self.project(request))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<Result<ProjectionResult>> = requests
            .iter()
            .map(|request| self.project(request))
            .collect();

        outcomes.into_iter().collect()
    }

    /// Project every scenario in the catalog, in registration order
    pub fn compare_all(&self, horizon_months: u32, start_label: &str) -> Result<Vec<ProjectionResult>> {
        let keys: Vec<&str> = self.catalog.keys().map(|key| key.as_str()).collect();
        self.compare(&keys, horizon_months, start_label)
    }
}

/// Project a single scenario that is not necessarily registered in a catalog.
///
/// The config is validated first, so ad hoc scenarios get the same checks as
/// catalog entries.
pub fn project_scenario(
    config: &ScenarioConfig,
    horizon_months: u32,
    labeler: &PeriodLabeler,
) -> Result<(ProjectionResult, Vec<PeriodBreakdown>)> {
    if horizon_months == 0 {
        return Err(ValidationError::InvalidHorizon(horizon_months).into());
    }
    config.validate(&config.label)?;

    let capacity = horizon_months as usize;
    let mut timeline = Vec::with_capacity(capacity);
    let mut trace = Vec::with_capacity(capacity);

    let mut state = PeriodState::initial(config);
    for month_index in 0..horizon_months {
        let (period, next) = state.advance(config, month_index)?;
        tracing::trace!(
            month_index,
            active_users = period.active_users,
            effective_growth_rate = period.effective_growth_rate,
            total_revenue = period.revenue.total,
            "projected period"
        );
        timeline.push(PeriodMetrics::from_breakdown(&period, labeler.label(month_index)));
        trace.push(period);
        state = next;
    }

    let result = ProjectionResult {
        scenario_label: config.label.clone(),
        arpu_used: config.arpu,
        timeline,
    };
    Ok((result, trace))
}
