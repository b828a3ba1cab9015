//! Text rendering of projections and scenario listings.

use std::fmt::{self, Write};

use clap::ValueEnum;
use growthplan_core::config::ScenarioCatalog;
use growthplan_core::{ProjectionResult, ProjectionSummary, first_month_reaching_arr};

use crate::catalog_file::CatalogFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// Group digits in thousands: `1234567` -> `1,234,567`
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

pub fn projection_table(result: &ProjectionResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "{} (ARPU ${})",
        result.scenario_label,
        thousands(result.arpu_used.max(0.0).round() as u64)
    )?;
    writeln!(
        out,
        "{:<7} {:>10} {:>12} {:>14} {:>12} {:>10} {:>12} {:>14}",
        "Month", "Users", "MRR", "ARR", "Service", "Expansion", "Total", "Cumulative"
    )?;
    for period in &result.timeline {
        let m = &period.metrics;
        writeln!(
            out,
            "{:<7} {:>10} {:>12} {:>14} {:>12} {:>10} {:>12} {:>14}",
            period.label,
            thousands(m.active_users),
            thousands(m.mrr),
            thousands(m.arr),
            thousands(m.service_revenue),
            thousands(m.expansion_revenue),
            thousands(m.total_revenue),
            thousands(m.cumulative_revenue),
        )?;
    }
    Ok(out)
}

/// One row per scenario. With `arr_target`, adds the month each scenario
/// first reaches that ARR.
pub fn comparison_table(
    results: &[ProjectionResult],
    arr_target: Option<u64>,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let mut header = format!(
        "{:<22} {:>10} {:>12} {:>14} {:>14} {:>8}",
        "Scenario", "Users", "Final MRR", "Final ARR", "Cumulative", "Peak"
    );
    if let Some(target) = arr_target {
        write!(header, " {:>10}", format!("ARR {}", thousands(target)))?;
    }
    writeln!(out, "{header}")?;

    for result in results {
        let Some(summary) = ProjectionSummary::from_result(result) else {
            continue;
        };
        write!(
            out,
            "{:<22} {:>10} {:>12} {:>14} {:>14} {:>8}",
            summary.scenario,
            thousands(summary.final_active_users),
            thousands(summary.final_mrr),
            thousands(summary.final_arr),
            thousands(summary.cumulative_revenue),
            summary.peak_label,
        )?;
        if let Some(target) = arr_target {
            let reached = first_month_reaching_arr(result, target).unwrap_or("-");
            write!(out, " {reached:>10}")?;
        }
        out.push('\n');
    }
    Ok(out)
}

pub fn scenario_table(catalog: &ScenarioCatalog) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "{:<14} {:<22} {:>8} {:>8} {:>7} {:>7} {:>8}  Dampening",
        "Key", "Label", "Growth", "ARPU", "Churn", "Attach", "Users"
    )?;
    for (key, config) in catalog.iter() {
        let dampening = if config.is_high_growth() {
            config
                .dampening
                .iter()
                .map(|s| format!("{}+ -> {}", thousands(s.threshold.max(0.0) as u64), percent(s.capped_rate)))
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            "-".to_string()
        };
        writeln!(
            out,
            "{:<14} {:<22} {:>8} {:>8} {:>7} {:>7} {:>8}  {}",
            key.as_str(),
            config.label,
            percent(config.base_growth_rate),
            config.arpu,
            percent(config.churn_rate),
            percent(config.service_attach_rate),
            config.initial_users,
            dampening,
        )?;
    }
    Ok(out)
}

pub fn render_projection(result: &ProjectionResult, format: OutputFormat) -> color_eyre::Result<String> {
    Ok(match format {
        OutputFormat::Table => projection_table(result)?,
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Yaml => serde_saphyr::to_string(result)?,
    })
}

pub fn render_comparison(
    results: &[ProjectionResult],
    arr_target: Option<u64>,
    format: OutputFormat,
) -> color_eyre::Result<String> {
    let summaries: Vec<ProjectionSummary> = results
        .iter()
        .filter_map(ProjectionSummary::from_result)
        .collect();
    Ok(match format {
        OutputFormat::Table => comparison_table(results, arr_target)?,
        OutputFormat::Json => serde_json::to_string_pretty(&summaries)?,
        OutputFormat::Yaml => serde_saphyr::to_string(&summaries)?,
    })
}

pub fn render_scenarios(catalog: &ScenarioCatalog, format: OutputFormat) -> color_eyre::Result<String> {
    let file = CatalogFile::from_catalog(catalog);
    Ok(match format {
        OutputFormat::Table => scenario_table(catalog)?,
        OutputFormat::Json => serde_json::to_string_pretty(&file)?,
        OutputFormat::Yaml => file.to_yaml()?,
    })
}
