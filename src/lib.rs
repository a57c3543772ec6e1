//! # fdi_structure_core
//!
//! Structural analysis for fault detection and isolation. A system is given as
//! a bipartite graph of variables (known or unknown) and constraints; the
//! engine derives a causal matching, the directed information flow, and the
//! analytic redundancy relations that residual generators are built from.
//!
//! ```no_run
//! use fdi_structure_core::{Analyzer, SystemGraph};
//!
//! # fn main() -> fdi_structure_core::Result<()> {
//! let graph = SystemGraph::from_json_path("tank.json")?;
//! let analysis = Analyzer::default().run(&graph)?;
//! println!("{}", fdi_structure_core::format_trace(&analysis));
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod display;
pub mod error;
pub mod store;

// Re-export key types for convenient access
pub use analysis::{Analysis, Analyzer, Matching, MatchingSolver, OrientationGraph, RedundancyRelation, StructuralModel};
pub use config::{AnalysisConfig, MatchingBackend, PathLimits};
pub use display::{format_trace, AnalysisReport};
pub use error::{AnalysisError, Result};
pub use store::{NodeId, SystemGraph};
