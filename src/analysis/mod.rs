//! The structural analysis engine.
//!
//! Stages run strictly in order, each consuming the previous one's output:
//!
//! ```text
//! SystemGraph
//!     │
//!     ├──> StructuralModel   (partition, known/unknown, reduced graph)
//!     ├──> Matching          (ranking heuristic or exact backend)
//!     ├──> OrientationGraph  (causality, unmatched constraints)
//!     └──> RedundancyRelation[] -> detectable / isolable constraints
//! ```
pub mod matching;
pub mod model;
pub mod orientation;
pub mod partition;
pub mod pipeline;
pub mod redundancy;

#[cfg(test)]
pub(crate) mod fixtures;

pub use matching::{compute_exact_matching, compute_matching, ExactMatcher, Matching, MatchingSolver, RankingMatcher};
pub use model::StructuralModel;
pub use orientation::{compute_orientation, OrientationGraph};
pub use partition::{bipartite_sets, Partition};
pub use pipeline::{Analysis, Analyzer};
pub use redundancy::{
    list_detectable_constraints, list_isolable_constraints, list_redundancy_relations, FaultSignatureMatrix,
    RedundancyRelation, RelationPath,
};
