//! Scenario-driven revenue projection library
//!
//! This crate computes deterministic month-by-month trajectories of active
//! users and revenue for a named growth scenario. It supports:
//! - An immutable, validated catalog of scenarios (CONSERVATIVE, BASE,
//!   AGGRESSIVE out of the box, or any ad hoc set)
//! - Staged growth dampening for high-growth scenarios
//! - Subscription, implementation-service and expansion revenue streams
//! - Calendar month labels anchored at any start month
//! - Parallel side-by-side comparison of scenarios
//!
//! # Example
//!
//! ```ignore
//! use growthplan_core::{ProjectionEngine, ProjectionRequest, ScenarioCatalog};
//!
//! let catalog = ScenarioCatalog::reference();
//! let engine = ProjectionEngine::new(&catalog);
//!
//! let result = engine.project(&ProjectionRequest::new("BASE", 24).starting("Jan'26"))?;
//! for period in &result.timeline {
//!     println!("{} {}", period.label, period.metrics.mrr);
//! }
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod cache;
pub mod error;
pub mod growth;
pub mod labels;
pub mod projection;
pub mod projection_state;
pub mod revenue;
pub mod summary;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use cache::ProjectionCache;
pub use config::{ScenarioBuilder, ScenarioCatalog};
pub use error::{ArithmeticGuardError, ConfigurationError, ProjectionError, ValidationError};
pub use labels::PeriodLabeler;
pub use model::{
    PeriodBreakdown, PeriodMetrics, ProjectionRequest, ProjectionResult, ScenarioConfig,
    ScenarioKey,
};
pub use projection::{ProjectionEngine, project_scenario};
pub use summary::{ProjectionSummary, first_month_reaching_arr};
