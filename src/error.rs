//! Defines the error types for the structural analysis engine.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Every failure the engine can report.
///
/// All validation happens while building a `StructuralModel`; the matching,
/// orientation and redundancy stages only fail when a matching backend is
/// requested that cannot be served.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The input is not a bipartite variable/constraint graph.
    #[error("Invalid graph: {reason}")]
    InvalidGraph { reason: String },
    /// A variable lacks a known/unknown tag, or carries an unrecognized one.
    #[error("Variable '{node}' has missing or invalid type {value:?}; expected 'known' or 'unknown'")]
    MissingOrInvalidType { node: String, value: Option<String> },
    /// An explicitly requested matching backend is not available.
    #[error("Matching backend unavailable: {0}")]
    UnsupportedMatchingBackend(String),
    /// A graph document or configuration file could not be read or parsed.
    #[error("Document error: {0}")]
    Document(String),
}

impl AnalysisError {
    pub(crate) fn invalid_graph(reason: impl Into<String>) -> Self {
        Self::InvalidGraph { reason: reason.into() }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(e: serde_json::Error) -> Self {
        Self::Document(e.to_string())
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(e: std::io::Error) -> Self {
        Self::Document(e.to_string())
    }
}
