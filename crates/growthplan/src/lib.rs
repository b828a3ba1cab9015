//! Command-line front-end for the growthplan projection engine
//!
//! Loads a scenario catalog (a YAML file or the built-in reference set), runs
//! projections with `growthplan_core`, and renders them as tables, JSON or
//! YAML.

pub mod catalog_file;
pub mod cli;
pub mod logging;
pub mod report;

pub use cli::{Args, run};
pub use logging::init_logging;
