mod ids;
mod request;
mod results;
mod scenario;

pub use ids::ScenarioKey;
pub use request::{
    DEFAULT_HORIZON_MONTHS, DEFAULT_SCENARIO_KEY, DEFAULT_START_LABEL, ProjectionRequest,
};
pub use results::{
    DISPLAY_TOLERANCE_ULPS, MonthlyFigures, PeriodBreakdown, PeriodMetrics, ProjectionResult,
    RevenueBreakdown, floor_for_display,
};
pub use scenario::{DampeningStage, ScenarioConfig};
