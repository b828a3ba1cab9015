use thiserror::Error;

/// The requested scenario is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("unknown scenario {0:?}")]
    UnknownScenario(String),
}

/// Input or registered configuration is outside the model's domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("horizon must be a positive number of months, got {0}")]
    InvalidHorizon(u32),
    #[error("scenario {key}: {reason}")]
    InvalidScenario { key: String, reason: String },
    #[error("scenario {0} is registered more than once")]
    DuplicateScenario(String),
    #[error("cannot parse start label {0:?} (expected a month and year such as \"Jan'26\")")]
    InvalidStartLabel(String),
}

impl ValidationError {
    pub(crate) fn scenario(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidScenario {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// A numeric invariant of the projection was violated mid-run.
///
/// Validated scenarios never produce a negative population, so these only
/// fire when a run overflows to a non-finite value or a scenario bypassed
/// validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArithmeticGuardError {
    #[error("active users fell to {active_users} after month {month_index}")]
    NegativePopulation { month_index: u32, active_users: f64 },
    #[error("{quantity} is not finite in month {month_index}")]
    NonFinite {
        month_index: u32,
        quantity: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    ArithmeticGuard(#[from] ArithmeticGuardError),
}

pub type Result<T, E = ProjectionError> = std::result::Result<T, E>;
