//! Name-resolved snapshot of an analysis, for renderers and JSON export.

use crate::analysis::{Analysis, StructuralModel};
use crate::store::NodeId;
use serde::Serialize;

/// Everything a visualization front-end reads, with node ids replaced by names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub name: String,
    pub variables: Vec<String>,
    pub constraints: Vec<String>,
    pub known: Vec<String>,
    pub unknown: Vec<String>,
    pub reduced_constraints: Vec<String>,
    /// (constraint, variable) pairs.
    pub matching: Vec<(String, String)>,
    pub unmatched_constraints: Vec<String>,
    pub unmatched_unknowns: Vec<String>,
    /// Directed (from, to) edges.
    pub orientation: Vec<(String, String)>,
    pub relations: Vec<Vec<String>>,
    pub detectable: Vec<String>,
    pub isolable: Vec<String>,
}

impl AnalysisReport {
    pub fn new(analysis: &Analysis) -> Self {
        let model = &analysis.model;
        let pair = |(a, b): (NodeId, NodeId)| (model.name_of(a).to_string(), model.name_of(b).to_string());

        Self {
            name: model.name.clone(),
            variables: names(model, &model.variables),
            constraints: names(model, &model.constraints),
            known: names(model, &model.known),
            unknown: names(model, &model.unknown),
            reduced_constraints: names(model, &model.reduced_constraints),
            matching: analysis.matching.pairs().map(pair).collect(),
            unmatched_constraints: names(model, &analysis.orientation.unmatched_constraints),
            unmatched_unknowns: names(model, &analysis.matching.unmatched_unknowns(model)),
            orientation: analysis.orientation.edges().iter().copied().map(pair).collect(),
            relations: analysis.relations.iter().map(|r| names(model, r.nodes())).collect(),
            detectable: names(model, &analysis.detectable),
            isolable: names(model, &analysis.isolable),
        }
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn names(model: &StructuralModel, ids: &[NodeId]) -> Vec<String> {
    ids.iter().map(|&id| model.name_of(id).to_string()).collect()
}

impl Analysis {
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport::new(self)
    }
}
