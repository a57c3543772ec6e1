//! Caller-selected options for an analysis run.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which implementation of the matching capability to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingBackend {
    /// Degree-ranking heuristic. Always available, not guaranteed maximum.
    #[default]
    Ranking,
    /// Maximum-cardinality matching over the reduced graph.
    Exact,
    /// A solver registered through `Analyzer::with_external_solver`.
    External,
}

/// Safety valves for redundancy-relation enumeration.
///
/// Simple-path enumeration is worst-case exponential in the size of the
/// orientation graph. Both bounds default to `None`, which enumerates every
/// path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathLimits {
    /// Longest path accepted, counted in nodes (endpoints included).
    pub max_path_nodes: Option<usize>,
    /// Stop after this many relations in total.
    pub max_relations: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub matching: MatchingBackend,
    pub paths: PathLimits,
}

impl AnalysisConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| AnalysisError::Document(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    pub fn with_matching(mut self, backend: MatchingBackend) -> Self {
        self.matching = backend;
        self
    }

    pub fn with_path_limits(mut self, paths: PathLimits) -> Self {
        self.paths = paths;
        self
    }
}
