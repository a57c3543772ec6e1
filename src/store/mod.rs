//! Defines the input data structures: the caller-owned system graph.
mod document;
mod registry;
mod types;

pub use document::{EdgeEntry, GraphDocument, NodeEntry};
pub use registry::SystemGraph;
pub use types::{EdgeData, NodeClass, NodeData, NodeId, VariableKind};
