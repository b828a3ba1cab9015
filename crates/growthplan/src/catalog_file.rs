//! Scenario catalog files
//!
//! A catalog file replaces the built-in scenarios with a user-defined set:
//!
//! ```yaml
//! scenarios:
//!   - key: BASE
//!     label: Base Case
//!     baseGrowthRate: 0.15
//!     arpu: 450
//!     churnRate: 0.03
//!     serviceAttachRate: 0.35
//!     initialUsers: 12
//!   - key: AGGRESSIVE
//!     label: Viral / Blitzscale
//!     # ...
//!     dampening:
//!       - threshold: 1000
//!         cappedRate: 0.4
//! ```
//!
//! Without `--catalog`, `~/.growthplan/scenarios.yaml` is used when present,
//! otherwise the reference catalog.

use std::fs;
use std::path::{Path, PathBuf};

use growthplan_core::ValidationError;
use growthplan_core::config::ScenarioCatalog;
use growthplan_core::model::{DampeningStage, ScenarioConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for catalog file operations
#[derive(Debug, Error)]
pub enum CatalogFileError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// One scenario as written in a catalog file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioEntry {
    pub key: String,
    pub label: String,
    pub base_growth_rate: f64,
    pub arpu: f64,
    pub churn_rate: f64,
    pub service_attach_rate: f64,
    pub initial_users: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dampening: Vec<DampeningStage>,
}

impl From<ScenarioEntry> for (String, ScenarioConfig) {
    fn from(entry: ScenarioEntry) -> Self {
        (
            entry.key,
            ScenarioConfig {
                label: entry.label,
                base_growth_rate: entry.base_growth_rate,
                arpu: entry.arpu,
                churn_rate: entry.churn_rate,
                service_attach_rate: entry.service_attach_rate,
                initial_users: entry.initial_users,
                dampening: entry.dampening,
            },
        )
    }
}

/// Top-level layout of a catalog file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub scenarios: Vec<ScenarioEntry>,
}

impl CatalogFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }

    /// Describe an existing catalog, e.g. to seed a file from the reference set
    pub fn from_catalog(catalog: &ScenarioCatalog) -> Self {
        let scenarios = catalog
            .iter()
            .map(|(key, config)| ScenarioEntry {
                key: key.to_string(),
                label: config.label.clone(),
                base_growth_rate: config.base_growth_rate,
                arpu: config.arpu,
                churn_rate: config.churn_rate,
                service_attach_rate: config.service_attach_rate,
                initial_users: config.initial_users,
                dampening: config.dampening.clone(),
            })
            .collect();
        Self { scenarios }
    }

    /// Validate every entry and build the catalog
    pub fn into_catalog(self) -> Result<ScenarioCatalog, ValidationError> {
        ScenarioCatalog::from_scenarios(self.scenarios.into_iter().map(<(String, ScenarioConfig)>::from))
    }
}

/// Default catalog location (~/.growthplan/scenarios.yaml)
pub fn default_catalog_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".growthplan")
        .join("scenarios.yaml")
}

/// Read and validate a catalog file
pub fn load_catalog(path: &Path) -> Result<ScenarioCatalog, CatalogFileError> {
    let content = fs::read_to_string(path).map_err(|e| {
        CatalogFileError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let file = CatalogFile::from_yaml(&content).map_err(|e| {
        CatalogFileError::Parse(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    let catalog = file.into_catalog()?;
    tracing::info!(
        path = %path.display(),
        scenarios = catalog.len(),
        "loaded scenario catalog"
    );
    Ok(catalog)
}

/// Resolve the catalog to use: an explicit path must load, the default path
/// is used only if it exists, and the reference set covers everything else.
pub fn resolve_catalog(explicit: Option<&Path>) -> Result<ScenarioCatalog, CatalogFileError> {
    if let Some(path) = explicit {
        return load_catalog(path);
    }

    let default_path = default_catalog_path();
    if default_path.exists() {
        return load_catalog(&default_path);
    }

    tracing::debug!("using reference scenario catalog");
    Ok(ScenarioCatalog::reference())
}

/// Write `catalog` as YAML to `path`, creating parent directories
pub fn save_catalog(catalog: &ScenarioCatalog, path: &Path) -> Result<(), CatalogFileError> {
    let yaml = CatalogFile::from_catalog(catalog)
        .to_yaml()
        .map_err(|e| CatalogFileError::Serialize(format!("Failed to serialize catalog: {e}")))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CatalogFileError::Io(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    fs::write(path, yaml)
        .map_err(|e| CatalogFileError::Io(format!("Failed to write {}: {}", path.display(), e)))
}
