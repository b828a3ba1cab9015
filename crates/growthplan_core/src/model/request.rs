use serde::{Deserialize, Serialize};

/// Two-year lookahead
pub const DEFAULT_HORIZON_MONTHS: u32 = 24;

/// Calendar anchor used when a request does not name one
pub const DEFAULT_START_LABEL: &str = "Jan'26";

/// Scenario used when a request does not name one
pub const DEFAULT_SCENARIO_KEY: &str = "BASE";

/// A single projection call: which scenario, how far ahead, and where the
/// month labels start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    pub scenario_key: String,
    pub horizon_months: u32,
    pub start_label: String,
}

impl ProjectionRequest {
    #[must_use]
    pub fn new(scenario_key: impl Into<String>, horizon_months: u32) -> Self {
        Self {
            scenario_key: scenario_key.into(),
            horizon_months,
            start_label: DEFAULT_START_LABEL.to_string(),
        }
    }

    /// Anchor the month labels at `start_label` (e.g. `"Jul'27"`)
    #[must_use]
    pub fn starting(mut self, start_label: impl Into<String>) -> Self {
        self.start_label = start_label.into();
        self
    }
}

impl Default for ProjectionRequest {
    fn default() -> Self {
        Self::new(DEFAULT_SCENARIO_KEY, DEFAULT_HORIZON_MONTHS)
    }
}
