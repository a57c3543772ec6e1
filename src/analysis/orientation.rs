//! Turns a matching into the directed causality graph.

use super::matching::Matching;
use super::model::StructuralModel;
use crate::store::NodeId;
use petgraph::graph::DiGraph;
use petgraph::Direction;

/// Directed information flow between variables and constraints.
///
/// Covers every node of the original graph, known variables included, and
/// uses the same node ids. A matched constraint points at the variable it
/// computes and receives every other neighbour as input; an unmatched
/// constraint only receives inputs.
#[derive(Debug, Clone)]
pub struct OrientationGraph {
    graph: DiGraph<NodeId, ()>,
    edges: Vec<(NodeId, NodeId)>,
    /// Reduced constraints without an output; these are the redundancy checks.
    pub unmatched_constraints: Vec<NodeId>,
}

impl OrientationGraph {
    /// Directed edges in insertion order.
    pub fn edges(&self) -> &[(NodeId, NodeId)] { &self.edges }

    pub fn graph(&self) -> &DiGraph<NodeId, ()> { &self.graph }

    pub fn contains_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.graph.find_edge(from, to).is_some()
    }

    pub fn out_degree(&self, node: NodeId) -> usize {
        self.graph.neighbors_directed(node, Direction::Outgoing).count()
    }

    pub fn in_degree(&self, node: NodeId) -> usize {
        self.graph.neighbors_directed(node, Direction::Incoming).count()
    }

    fn push(&mut self, from: NodeId, to: NodeId) {
        self.graph.add_edge(from, to, ());
        self.edges.push((from, to));
    }
}

/// Orients the original graph according to `matching`.
///
/// Neighbourhoods come from the full graph, so known variables and restricted
/// edges appear as inputs. Same matching in, same graph out.
pub fn compute_orientation(model: &StructuralModel, matching: &Matching) -> OrientationGraph {
    let count = model.node_count();
    let mut graph = DiGraph::with_capacity(count, 0);
    for i in 0..count {
        // Dense ids: the i-th added node gets index i.
        graph.add_node(NodeId::new(i));
    }

    let unmatched = matching.unmatched_constraints(model);
    let mut orientation = OrientationGraph { graph, edges: Vec::new(), unmatched_constraints: Vec::new() };

    // 1. Matched constraints: one output, the rest inputs.
    for (constraint, variable) in matching.pairs() {
        orientation.push(constraint, variable);
        for input in model.full_neighbors(constraint) {
            if input != variable {
                orientation.push(input, constraint);
            }
        }
    }

    // 2. Unmatched constraints: inputs only.
    for &constraint in &unmatched {
        for input in model.full_neighbors(constraint) {
            orientation.push(input, constraint);
        }
    }
    orientation.unmatched_constraints = unmatched;

    log::debug!(
        "Orientation has {} edges, {} unmatched constraints",
        orientation.edges.len(),
        orientation.unmatched_constraints.len()
    );
    orientation
}
