//! Serialized form of a `SystemGraph`: node and edge lists with attribute maps.

use super::registry::SystemGraph;
use super::types::NodeClass;
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub name: String,
    pub nodes: Vec<NodeEntry>,
    #[serde(default)]
    pub edges: Vec<EdgeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeEntry {
    pub name: String,
    pub class: NodeClass,
    /// `"known"` or `"unknown"` for variables; ignored for constraints.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeEntry {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub derivative_causality: bool,
}

impl SystemGraph {
    pub fn from_document(doc: &GraphDocument) -> Result<Self> {
        let mut graph = SystemGraph::new(doc.name.clone());
        for node in &doc.nodes {
            match node.class {
                NodeClass::Variable => graph.add_variable(&node.name, node.kind.clone())?,
                NodeClass::Constraint => graph.add_constraint(&node.name)?,
            };
        }
        for edge in &doc.edges {
            if edge.derivative_causality {
                graph.add_restricted_edge(&edge.source, &edge.target)?;
            } else {
                graph.add_edge(&edge.source, &edge.target)?;
            }
        }
        Ok(graph)
    }

    pub fn to_document(&self) -> GraphDocument {
        let nodes = self
            .graph
            .node_indices()
            .filter_map(|i| self.graph.node_weight(i))
            .map(|n| NodeEntry { name: n.name.clone(), class: n.class, kind: n.kind_tag.clone() })
            .collect();
        let edges = self
            .graph
            .edge_indices()
            .filter_map(|e| {
                let (a, b) = self.graph.edge_endpoints(e)?;
                let w = self.graph.edge_weight(e)?;
                Some(EdgeEntry {
                    source: self.name_of(a).to_string(),
                    target: self.name_of(b).to_string(),
                    derivative_causality: w.derivative_causality_restricted,
                })
            })
            .collect();
        GraphDocument { name: self.name.clone(), nodes, edges }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: GraphDocument = serde_json::from_str(json)?;
        Self::from_document(&doc)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| AnalysisError::Document(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loading system graph from {}", path.display());
        Self::from_json_str(&text)
    }
}
