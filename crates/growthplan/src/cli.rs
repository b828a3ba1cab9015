use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use growthplan_core::config::ScenarioCatalog;
use growthplan_core::model::{DEFAULT_HORIZON_MONTHS, DEFAULT_SCENARIO_KEY, DEFAULT_START_LABEL};
use growthplan_core::{ConfigurationError, ProjectionEngine, ProjectionError, ProjectionRequest};

use crate::catalog_file::{resolve_catalog, save_catalog};
use crate::report::{OutputFormat, render_comparison, render_projection, render_scenarios};

#[derive(Parser, Debug)]
#[command(name = "growthplan")]
#[command(about = "Month-by-month user and revenue projections for growth scenarios")]
pub struct Args {
    /// Scenario catalog file (default: ~/.growthplan/scenarios.yaml if present)
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Project a single scenario
    Project {
        /// Scenario key
        #[arg(short, long, default_value = DEFAULT_SCENARIO_KEY)]
        scenario: String,

        #[command(flatten)]
        horizon: HorizonArgs,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Project several scenarios side by side
    Compare {
        /// Scenario keys (default: every scenario in the catalog)
        scenarios: Vec<String>,

        #[command(flatten)]
        horizon: HorizonArgs,

        /// Also report the first month each scenario reaches this ARR
        #[arg(long)]
        arr_target: Option<u64>,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// List the scenarios in the catalog
    Scenarios {
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Write the catalog to this file as YAML, e.g. to start a custom one
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct HorizonArgs {
    /// Number of months to project
    #[arg(short, long, default_value_t = DEFAULT_HORIZON_MONTHS)]
    pub months: u32,

    /// First month label, e.g. "Jan'26"
    #[arg(long, default_value = DEFAULT_START_LABEL)]
    pub start: String,
}

/// Execute `args` and return the text to print
pub fn run(args: &Args) -> color_eyre::Result<String> {
    let catalog =
        resolve_catalog(args.catalog.as_deref()).wrap_err("could not load scenario catalog")?;
    let engine = ProjectionEngine::new(&catalog);

    match &args.command {
        Command::Project {
            scenario,
            horizon,
            format,
        } => {
            let request = ProjectionRequest::new(scenario.as_str(), horizon.months)
                .starting(horizon.start.as_str());
            let result = project_with_fallback(&engine, request)?;
            render_projection(&result, *format)
        }
        Command::Compare {
            scenarios,
            horizon,
            arr_target,
            format,
        } => {
            let results = if scenarios.is_empty() {
                engine.compare_all(horizon.months, &horizon.start)
            } else {
                engine.compare(scenarios.as_slice(), horizon.months, &horizon.start)
            }
            .wrap_err("comparison failed")?;
            render_comparison(&results, *arr_target, *format)
        }
        Command::Scenarios { format, export } => {
            if let Some(path) = export {
                save_catalog(&catalog, path)
                    .wrap_err_with(|| format!("could not export catalog to {}", path.display()))?;
                tracing::info!(path = %path.display(), "exported scenario catalog");
            }
            render_scenarios(&catalog, *format)
        }
    }
}

/// Project `request`, falling back to the default scenario when the requested
/// key is not in the catalog. Any other failure is returned as is.
fn project_with_fallback(
    engine: &ProjectionEngine<'_>,
    request: ProjectionRequest,
) -> color_eyre::Result<growthplan_core::ProjectionResult> {
    match engine.project(&request) {
        Ok(result) => Ok(result),
        Err(ProjectionError::Configuration(ConfigurationError::UnknownScenario(key)))
            if fallback_available(engine.catalog(), &key) =>
        {
            tracing::warn!(
                requested = %key,
                fallback = DEFAULT_SCENARIO_KEY,
                "unknown scenario, using fallback"
            );
            eprintln!("Unknown scenario {key:?}; showing {DEFAULT_SCENARIO_KEY} instead.");
            let fallback = ProjectionRequest {
                scenario_key: DEFAULT_SCENARIO_KEY.to_string(),
                ..request
            };
            engine
                .project(&fallback)
                .wrap_err("fallback projection failed")
        }
        Err(err) => {
            Err(err).wrap_err_with(|| format!("could not project {}", request.scenario_key))
        }
    }
}

fn fallback_available(catalog: &ScenarioCatalog, requested: &str) -> bool {
    catalog.contains(DEFAULT_SCENARIO_KEY) && !requested.eq_ignore_ascii_case(DEFAULT_SCENARIO_KEY)
}
