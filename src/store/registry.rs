//! registry.rs
//! The caller-owned bipartite input graph.

use super::types::*;
use crate::error::{AnalysisError, Result};
use petgraph::stable_graph::StableUnGraph;
use std::collections::HashMap;

/// The full variable/constraint graph of a physical system.
///
/// Built once by the caller, then handed read-only to `StructuralModel::build`.
/// Nodes are never removed, so ids are dense and assigned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SystemGraph {
    pub name: String,
    pub(crate) graph: StableUnGraph<NodeData, EdgeData>,
    names: HashMap<String, NodeId>,
}

impl SystemGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn node_count(&self) -> usize { self.graph.node_count() }
    pub fn edge_count(&self) -> usize { self.graph.edge_count() }

    pub fn add_known(&mut self, name: &str) -> Result<NodeId> {
        self.add_variable(name, Some(VariableKind::Known.to_string()))
    }

    pub fn add_unknown(&mut self, name: &str) -> Result<NodeId> {
        self.add_variable(name, Some(VariableKind::Unknown.to_string()))
    }

    /// Adds a variable with a raw type tag. The tag is validated when the
    /// model is built, not here.
    pub fn add_variable(&mut self, name: &str, kind_tag: Option<String>) -> Result<NodeId> {
        self.push_node(NodeData { name: name.to_string(), class: NodeClass::Variable, kind_tag })
    }

    pub fn add_constraint(&mut self, name: &str) -> Result<NodeId> {
        self.push_node(NodeData { name: name.to_string(), class: NodeClass::Constraint, kind_tag: None })
    }

    fn push_node(&mut self, data: NodeData) -> Result<NodeId> {
        if self.names.contains_key(&data.name) {
            return Err(AnalysisError::invalid_graph(format!("duplicate node name '{}'", data.name)));
        }
        let name = data.name.clone();
        let id = self.graph.add_node(data);
        self.names.insert(name, id);
        Ok(id)
    }

    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<()> {
        self.connect(a, b, EdgeData::default())
    }

    /// Adds an edge that must never carry a matching or causal assignment.
    pub fn add_restricted_edge(&mut self, a: &str, b: &str) -> Result<()> {
        self.connect(a, b, EdgeData { derivative_causality_restricted: true })
    }

    fn connect(&mut self, a: &str, b: &str, data: EdgeData) -> Result<()> {
        let ia = self.require(a)?;
        let ib = self.require(b)?;
        if ia == ib {
            return Err(AnalysisError::invalid_graph(format!("self-loop on node '{}'", a)));
        }
        // Re-adding an existing pair only updates its flag.
        match self.graph.find_edge(ia, ib) {
            Some(e) => {
                if let Some(w) = self.graph.edge_weight_mut(e) {
                    w.derivative_causality_restricted |= data.derivative_causality_restricted;
                }
            }
            None => {
                self.graph.add_edge(ia, ib, data);
            }
        }
        Ok(())
    }

    fn require(&self, name: &str) -> Result<NodeId> {
        self.find_node(name)
            .ok_or_else(|| AnalysisError::invalid_graph(format!("edge references unknown node '{}'", name)))
    }

    // --- Accessors ---
    pub fn find_node(&self, name: &str) -> Option<NodeId> { self.names.get(name).copied() }
    pub fn node(&self, id: NodeId) -> Option<&NodeData> { self.graph.node_weight(id) }

    /// The node's name, or `"?"` for an id that does not belong to this graph.
    pub fn name_of(&self, id: NodeId) -> &str {
        self.graph.node_weight(id).map_or("?", |n| n.name.as_str())
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ { self.graph.node_indices() }

    /// Neighbours of `id` in ascending id order.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = self.graph.neighbors(id).collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    pub fn is_restricted(&self, a: NodeId, b: NodeId) -> bool {
        self.graph
            .find_edge(a, b)
            .and_then(|e| self.graph.edge_weight(e))
            .is_some_and(|w| w.derivative_causality_restricted)
    }
}
