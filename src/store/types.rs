use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A unique, stable identifier for a node within the system graph.
///
/// This is a type alias for `petgraph::graph::NodeIndex` to abstract the
/// underlying graph implementation. The reduced and orientation graphs reuse
/// the same ids.
pub type NodeId = NodeIndex;

/// Which side of the bipartite structure a node is declared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeClass {
    /// A modeled quantity (class 0).
    Variable,
    /// A relation over variables (class 1).
    Constraint,
}

impl NodeClass {
    pub fn opposite(self) -> Self {
        match self {
            NodeClass::Variable => NodeClass::Constraint,
            NodeClass::Constraint => NodeClass::Variable,
        }
    }
}

/// Whether a variable is measured or must be inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Known,
    Unknown,
}

impl FromStr for VariableKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "known" => Ok(VariableKind::Known),
            "unknown" => Ok(VariableKind::Unknown),
            _ => Err(()),
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKind::Known => f.write_str("known"),
            VariableKind::Unknown => f.write_str("unknown"),
        }
    }
}

/// Node weight in the system graph.
///
/// `kind_tag` is kept raw: it is only parsed (and rejected if absent or
/// unrecognized) when a `StructuralModel` is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    pub name: String,
    pub class: NodeClass,
    pub kind_tag: Option<String>,
}

/// Edge weight in the system graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    /// The edge can carry no causal assignment in either direction
    /// (e.g. a derivative relation that must not be integrated).
    pub derivative_causality_restricted: bool,
}
