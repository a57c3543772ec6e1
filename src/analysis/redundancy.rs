//! redundancy.rs
//! Analytic redundancy relations and the structural detectability/isolability derived from them.

use super::model::StructuralModel;
use super::orientation::OrientationGraph;
use crate::config::PathLimits;
use crate::store::NodeId;
use petgraph::algo::all_simple_paths;
use smallvec::SmallVec;

/// Node sequence of one relation. Most relations in practice are short chains.
pub type RelationPath = SmallVec<[NodeId; 8]>;

/// An alternating variable/constraint chain in the orientation graph, from a
/// known variable to a constraint that computes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedundancyRelation {
    path: RelationPath,
}

impl RedundancyRelation {
    pub fn new(path: RelationPath) -> Self { Self { path } }

    pub fn nodes(&self) -> &[NodeId] { &self.path }
    pub fn len(&self) -> usize { self.path.len() }
    pub fn is_empty(&self) -> bool { self.path.is_empty() }

    pub fn known_variable(&self) -> Option<NodeId> { self.path.first().copied() }
    pub fn target_constraint(&self) -> Option<NodeId> { self.path.last().copied() }

    pub fn contains(&self, node: NodeId) -> bool { self.path.contains(&node) }

    /// Constraint nodes along the path, in path order.
    pub fn constraints(&self, model: &StructuralModel) -> Vec<NodeId> {
        self.path.iter().copied().filter(|&n| model.is_constraint(n)).collect()
    }
}

/// Enumerates every simple path from each known variable to each unmatched constraint.
///
/// Known variables form the outer loop and unmatched constraints the inner
/// one, both in id order; paths for one pair are appended in discovery order.
/// Several relations may share a known variable or a target. No attempt is
/// made to pick a minimal set; callers that need one filter the result.
///
/// Cost is worst-case exponential in the size of the orientation graph.
/// `limits` can bound path length and the total number of relations; with
/// the default limits the enumeration is exhaustive.
pub fn list_redundancy_relations(
    model: &StructuralModel,
    orientation: &OrientationGraph,
    unmatched_constraints: &[NodeId],
    limits: &PathLimits,
) -> Vec<RedundancyRelation> {
    let mut relations = Vec::new();

    let max_intermediate = match limits.max_path_nodes {
        // A relation has at least its two endpoints.
        Some(n) if n < 2 => return relations,
        Some(n) => Some(n - 2),
        None => None,
    };
    let cap = limits.max_relations.unwrap_or(usize::MAX);

    for &known in &model.known {
        for &target in unmatched_constraints {
            let before = relations.len();
            let paths = all_simple_paths::<RelationPath, _>(orientation.graph(), known, target, 0, max_intermediate);
            for path in paths {
                if relations.len() >= cap {
                    log::warn!("Stopped after {} redundancy relations (max_relations reached)", cap);
                    return relations;
                }
                relations.push(RedundancyRelation::new(path));
            }
            log::trace!(
                "{} relation(s) from '{}' to '{}'",
                relations.len() - before,
                model.name_of(known),
                model.name_of(target)
            );
        }
    }

    log::debug!("Found {} redundancy relations", relations.len());
    relations
}

/// Boolean relation x constraint incidence: entry (r, c) is set when
/// constraint c lies on relation r.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultSignatureMatrix {
    pub constraints: Vec<NodeId>,
    pub rows: Vec<Vec<bool>>,
}

impl FaultSignatureMatrix {
    pub fn new(relations: &[RedundancyRelation], constraints: &[NodeId]) -> Self {
        let rows = relations
            .iter()
            .map(|r| constraints.iter().map(|&c| r.contains(c)).collect())
            .collect();
        Self { constraints: constraints.to_vec(), rows }
    }

    /// Constraints with a non-zero signature in at least one relation.
    pub fn detectable(&self) -> Vec<NodeId> {
        self.columns_where(|col| self.rows.iter().any(|row| row[col]))
    }

    /// Constraints that are the only flag of at least one relation.
    pub fn isolable(&self) -> Vec<NodeId> {
        self.columns_where(|col| {
            self.rows.iter().any(|row| row[col] && row.iter().filter(|&&f| f).count() == 1)
        })
    }

    fn columns_where(&self, keep: impl Fn(usize) -> bool) -> Vec<NodeId> {
        self.constraints
            .iter()
            .enumerate()
            .filter(|&(col, _)| keep(col))
            .map(|(_, &c)| c)
            .collect()
    }
}

/// Constraints that appear in at least one relation, in `all_constraints` order.
pub fn list_detectable_constraints(relations: &[RedundancyRelation], all_constraints: &[NodeId]) -> Vec<NodeId> {
    FaultSignatureMatrix::new(relations, all_constraints).detectable()
}

/// Constraints that are the sole constraint node of at least one relation,
/// in `all_constraints` order.
pub fn list_isolable_constraints(relations: &[RedundancyRelation], all_constraints: &[NodeId]) -> Vec<NodeId> {
    FaultSignatureMatrix::new(relations, all_constraints).isolable()
}
