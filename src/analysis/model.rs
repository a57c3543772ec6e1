//! model.rs
//! Validated, immutable view of a system graph plus the reduced graph used for matching.

use super::partition::bipartite_sets;
use crate::error::{AnalysisError, Result};
use crate::store::{EdgeData, NodeData, NodeId, SystemGraph, VariableKind};
use petgraph::stable_graph::StableUnGraph;
use std::collections::HashSet;

/// The validated structural model of a system.
///
/// Built once from a `SystemGraph` and never mutated afterwards. Every id
/// list is in ascending id order, which is the enumeration order all later
/// stages rely on.
#[derive(Debug, Clone)]
pub struct StructuralModel {
    pub name: String,
    full: StableUnGraph<NodeData, EdgeData>,
    reduced: StableUnGraph<NodeData, EdgeData>,
    pub variables: Vec<NodeId>,
    pub constraints: Vec<NodeId>,
    pub known: Vec<NodeId>,
    pub unknown: Vec<NodeId>,
    /// Constraints that still have a neighbour in the reduced graph.
    pub reduced_constraints: Vec<NodeId>,
}

impl StructuralModel {
    /// Validates `graph` and derives the reduced graph.
    ///
    /// # Errors
    /// - `InvalidGraph` if the graph is not bipartite along its declared classes.
    /// - `MissingOrInvalidType` if a variable has no `known`/`unknown` tag.
    pub fn build(graph: &SystemGraph) -> Result<Self> {
        log::info!(
            "Building structural model '{}' ({} nodes, {} edges)",
            graph.name,
            graph.node_count(),
            graph.edge_count()
        );

        // 1. Partition
        let partition = bipartite_sets(graph)?;

        // 2. Classify variables
        let mut known = Vec::new();
        let mut unknown = Vec::new();
        for &v in &partition.variables {
            match classify(graph, v)? {
                VariableKind::Known => known.push(v),
                VariableKind::Unknown => unknown.push(v),
            }
        }

        // 3. Reduce
        let full = graph.graph.clone();
        let (reduced, reduced_constraints) = reduce(&full, &known, &partition.constraints);

        log::debug!(
            "Reduced graph keeps {} of {} constraints and {} edges",
            reduced_constraints.len(),
            partition.constraints.len(),
            reduced.edge_count()
        );

        Ok(Self {
            name: graph.name.clone(),
            full,
            reduced,
            variables: partition.variables,
            constraints: partition.constraints,
            known,
            unknown,
            reduced_constraints,
        })
    }

    // --- Accessors ---

    pub fn name_of(&self, id: NodeId) -> &str {
        self.full.node_weight(id).map_or("?", |n| n.name.as_str())
    }

    pub fn node_count(&self) -> usize { self.full.node_count() }

    pub fn is_constraint(&self, id: NodeId) -> bool {
        self.constraints.binary_search(&id).is_ok()
    }

    pub fn is_known(&self, id: NodeId) -> bool {
        self.known.binary_search(&id).is_ok()
    }

    /// Neighbours in the original graph (known variables and restricted edges included),
    /// in ascending id order.
    pub fn full_neighbors(&self, id: NodeId) -> Vec<NodeId> {
        sorted_neighbors(&self.full, id)
    }

    /// Neighbours in the reduced graph, in ascending id order. Empty for
    /// nodes that were removed by the reduction.
    pub fn reduced_neighbors(&self, id: NodeId) -> Vec<NodeId> {
        if !self.reduced.contains_node(id) {
            return Vec::new();
        }
        sorted_neighbors(&self.reduced, id)
    }

    pub fn reduced_graph(&self) -> &StableUnGraph<NodeData, EdgeData> { &self.reduced }

    /// Every (constraint, variable) edge of the reduced graph, ordered by constraint
    /// then variable. This is what an external matching solver receives.
    pub fn reduced_edges(&self) -> Vec<(NodeId, NodeId)> {
        self.reduced_constraints
            .iter()
            .flat_map(|&c| self.reduced_neighbors(c).into_iter().map(move |v| (c, v)))
            .collect()
    }

    pub fn reduced_contains_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.reduced.contains_node(a) && self.reduced.contains_node(b) && self.reduced.find_edge(a, b).is_some()
    }
}

fn classify(graph: &SystemGraph, id: NodeId) -> Result<VariableKind> {
    let tag = graph.node(id).and_then(|n| n.kind_tag.clone());
    match tag.as_deref().map(str::parse::<VariableKind>) {
        Some(Ok(kind)) => Ok(kind),
        _ => Err(AnalysisError::MissingOrInvalidType { node: graph.name_of(id).to_string(), value: tag }),
    }
}

/// Copies the full graph, then removes known variables, restricted edges and
/// the constraints left with no neighbour, in that order.
fn reduce(
    full: &StableUnGraph<NodeData, EdgeData>,
    known: &[NodeId],
    constraints: &[NodeId],
) -> (StableUnGraph<NodeData, EdgeData>, Vec<NodeId>) {
    let mut reduced = full.clone();

    for &v in known {
        reduced.remove_node(v);
    }

    let restricted: Vec<_> = reduced
        .edge_indices()
        .filter(|&e| reduced.edge_weight(e).is_some_and(|w| w.derivative_causality_restricted))
        .collect();
    for e in restricted {
        reduced.remove_edge(e);
    }

    let solitary: HashSet<NodeId> = constraints
        .iter()
        .copied()
        .filter(|&c| reduced.neighbors(c).next().is_none())
        .collect();
    for &c in &solitary {
        reduced.remove_node(c);
    }

    let survivors = constraints.iter().copied().filter(|c| !solitary.contains(c)).collect();
    (reduced, survivors)
}

fn sorted_neighbors(graph: &StableUnGraph<NodeData, EdgeData>, id: NodeId) -> Vec<NodeId> {
    let mut out: Vec<NodeId> = graph.neighbors(id).collect();
    out.sort_unstable();
    out.dedup();
    out
}
