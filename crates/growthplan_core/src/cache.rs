//! Caller-side memoization of projection results.
//!
//! A projection is a pure function of its request, so repeated calls with an
//! unchanged `(scenario, horizon, start)` triple can reuse an earlier result.
//! Failed projections are not cached.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::model::{ProjectionRequest, ProjectionResult, ScenarioKey};
use crate::projection::ProjectionEngine;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    scenario: ScenarioKey,
    horizon_months: u32,
    start_label: String,
}

impl From<&ProjectionRequest> for CacheKey {
    fn from(request: &ProjectionRequest) -> Self {
        Self {
            scenario: ScenarioKey::new(&request.scenario_key),
            horizon_months: request.horizon_months,
            start_label: request.start_label.trim().to_string(),
        }
    }
}

/// Memo of projection results for a single catalog
#[derive(Debug, Default)]
pub struct ProjectionCache {
    entries: FxHashMap<CacheKey, Arc<ProjectionResult>>,
}

impl ProjectionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached result for `request`, projecting it on first use.
    ///
    /// The cache does not know which catalog produced an entry; use one cache
    /// per catalog.
    pub fn get_or_project(
        &mut self,
        engine: &ProjectionEngine<'_>,
        request: &ProjectionRequest,
    ) -> Result<Arc<ProjectionResult>> {
        let key = CacheKey::from(request);
        if let Some(hit) = self.entries.get(&key) {
            tracing::trace!(scenario = %key.scenario, "projection cache hit");
            return Ok(Arc::clone(hit));
        }

        let result = Arc::new(engine.project(request)?);
        self.entries.insert(key, Arc::clone(&result));
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
