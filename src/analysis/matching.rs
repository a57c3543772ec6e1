//! matching.rs
//! Constraint -> variable assignment over the reduced graph.

use super::model::StructuralModel;
use crate::error::{AnalysisError, Result};
use crate::store::NodeId;
use petgraph::algo::maximum_matching;
use std::collections::BTreeMap;

/// A partial, injective assignment of reduced constraints to unknown variables.
///
/// Each matched constraint "computes" its variable. Pairs are kept in
/// ascending constraint id order so two equal matchings compare and iterate
/// identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matching {
    by_constraint: BTreeMap<NodeId, NodeId>,
    by_variable: BTreeMap<NodeId, NodeId>,
}

impl Matching {
    pub fn new() -> Self { Self::default() }

    /// Records `constraint -> variable` unless either side is already matched.
    pub fn assign(&mut self, constraint: NodeId, variable: NodeId) -> bool {
        if self.by_constraint.contains_key(&constraint) || self.by_variable.contains_key(&variable) {
            return false;
        }
        self.by_constraint.insert(constraint, variable);
        self.by_variable.insert(variable, constraint);
        true
    }

    /// Checks pairs produced elsewhere (e.g. by an external solver) against the
    /// reduced graph before accepting them.
    pub fn from_pairs(model: &StructuralModel, pairs: &[(NodeId, NodeId)]) -> Result<Self> {
        let mut matching = Self::new();
        for &(c, v) in pairs {
            if !model.is_constraint(c) || !model.reduced_contains_edge(c, v) {
                return Err(AnalysisError::UnsupportedMatchingBackend(format!(
                    "pair ({}, {}) is not an edge of the reduced graph",
                    model.name_of(c),
                    model.name_of(v)
                )));
            }
            if !matching.assign(c, v) {
                return Err(AnalysisError::UnsupportedMatchingBackend(format!(
                    "pair ({}, {}) reuses an already matched node",
                    model.name_of(c),
                    model.name_of(v)
                )));
            }
        }
        Ok(matching)
    }

    pub fn len(&self) -> usize { self.by_constraint.len() }
    pub fn is_empty(&self) -> bool { self.by_constraint.is_empty() }

    pub fn variable_for(&self, constraint: NodeId) -> Option<NodeId> {
        self.by_constraint.get(&constraint).copied()
    }

    pub fn constraint_for(&self, variable: NodeId) -> Option<NodeId> {
        self.by_variable.get(&variable).copied()
    }

    /// (constraint, variable) pairs in ascending constraint order.
    pub fn pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.by_constraint.iter().map(|(&c, &v)| (c, v))
    }

    pub fn matched_constraints(&self) -> Vec<NodeId> {
        self.by_constraint.keys().copied().collect()
    }

    /// Reduced constraints that received no variable.
    pub fn unmatched_constraints(&self, model: &StructuralModel) -> Vec<NodeId> {
        model
            .reduced_constraints
            .iter()
            .copied()
            .filter(|c| !self.by_constraint.contains_key(c))
            .collect()
    }

    /// Unknown variables no constraint computes.
    pub fn unmatched_unknowns(&self, model: &StructuralModel) -> Vec<NodeId> {
        model.unknown.iter().copied().filter(|v| !self.by_variable.contains_key(v)).collect()
    }

    /// True when every unknown variable is computed by some constraint.
    pub fn is_fully_observable(&self, model: &StructuralModel) -> bool {
        self.unmatched_unknowns(model).is_empty()
    }

    /// No variable is the image of two constraints.
    pub fn is_injective(&self) -> bool {
        self.by_variable.len() == self.by_constraint.len()
            && self.pairs().all(|(c, v)| self.by_variable.get(&v) == Some(&c))
    }
}

/// One way of producing a `Matching` for a model.
///
/// The ranking heuristic and the exact solver both implement this; callers
/// may plug in their own (e.g. a linear-programming backend) through
/// `Analyzer::with_external_solver`.
pub trait MatchingSolver {
    fn name(&self) -> &str;
    fn solve(&self, model: &StructuralModel) -> Result<Matching>;
}

/// Degree-ranking heuristic. Fast, injective, not always maximum.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingMatcher;

impl MatchingSolver for RankingMatcher {
    fn name(&self) -> &str { "ranking" }

    fn solve(&self, model: &StructuralModel) -> Result<Matching> {
        Ok(compute_matching(model))
    }
}

/// Maximum-cardinality matching over the reduced graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl MatchingSolver for ExactMatcher {
    fn name(&self) -> &str { "exact" }

    fn solve(&self, model: &StructuralModel) -> Result<Matching> {
        Ok(compute_exact_matching(model))
    }
}

/// Matches constraints to variables, most constrained first.
///
/// Constraints are grouped by their degree in the reduced graph and the groups
/// handled in ascending degree. Inside a group constraints go in id order, and
/// each takes its first (lowest id) neighbour no other constraint has taken.
/// A constraint with no free neighbour stays unmatched.
///
/// The result is always injective but may be smaller than a maximum matching;
/// use `compute_exact_matching` when that matters.
pub fn compute_matching(model: &StructuralModel) -> Matching {
    let mut by_degree: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
    for &c in &model.reduced_constraints {
        by_degree.entry(model.reduced_neighbors(c).len()).or_default().push(c);
    }

    let mut matching = Matching::new();
    for (degree, group) in &by_degree {
        for &constraint in group {
            let free = model
                .reduced_neighbors(constraint)
                .into_iter()
                .find(|&v| matching.constraint_for(v).is_none());
            match free {
                Some(variable) => {
                    log::debug!(
                        "Ranked '{}' (degree {}) -> '{}'",
                        model.name_of(constraint),
                        degree,
                        model.name_of(variable)
                    );
                    matching.assign(constraint, variable);
                }
                None => log::debug!("'{}' (degree {}) left unmatched", model.name_of(constraint), degree),
            }
        }
    }
    matching
}

/// Maximum matching of the reduced graph.
///
/// The reduced graph is bipartite, so a general maximum matching is a maximum
/// bipartite matching.
pub fn compute_exact_matching(model: &StructuralModel) -> Matching {
    let mate = maximum_matching(model.reduced_graph());
    let mut matching = Matching::new();
    for (a, b) in mate.edges() {
        let (c, v) = if model.is_constraint(a) { (a, b) } else { (b, a) };
        matching.assign(c, v);
    }
    log::debug!("Exact matching has {} pairs", matching.len());
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures;
    use crate::store::SystemGraph;
    use rstest::rstest;

    fn pair_names(model: &StructuralModel, m: &Matching) -> Vec<(String, String)> {
        m.pairs().map(|(c, v)| (model.name_of(c).to_string(), model.name_of(v).to_string())).collect()
    }

    #[test]
    fn test_tank_ranking() {
        let model = StructuralModel::build(&fixtures::tank_system()).unwrap();
        let m = compute_matching(&model);

        // Degree 1: c2, c4, c6. Degree 2: c3. Degree 3: c1 finds nothing left.
        assert_eq!(
            pair_names(&model, &m),
            vec![
                ("c2".to_string(), "q_i".to_string()),
                ("c3".to_string(), "q_o".to_string()),
                ("c4".to_string(), "h".to_string()),
                ("c6".to_string(), "h_dot".to_string()),
            ]
        );
        let unmatched: Vec<_> = m.unmatched_constraints(&model).iter().map(|&c| model.name_of(c)).collect();
        assert_eq!(unmatched, vec!["c1"]);
        assert!(m.is_fully_observable(&model));
    }

    #[test]
    fn test_single_constraint_matched() {
        let g = fixtures::single();
        let model = StructuralModel::build(&g).unwrap();
        let m = compute_matching(&model);
        assert_eq!(m.variable_for(g.find_node("c1").unwrap()), g.find_node("x1"));
        assert!(m.unmatched_constraints(&model).is_empty());
    }

    #[rstest]
    #[case(fixtures::tank_system())]
    #[case(fixtures::example_5_17())]
    #[case(fixtures::starving())]
    #[case(fixtures::single())]
    fn test_matching_is_injective_over_reduced_edges(#[case] graph: SystemGraph) {
        let model = StructuralModel::build(&graph).unwrap();
        for m in [compute_matching(&model), compute_exact_matching(&model)] {
            assert!(m.is_injective());
            for (c, v) in m.pairs() {
                assert!(model.reduced_contains_edge(c, v));
                assert!(model.unknown.contains(&v));
            }
            let mut all = m.matched_constraints();
            all.extend(m.unmatched_constraints(&model));
            all.sort();
            assert_eq!(all, model.reduced_constraints);
        }
    }

    #[rstest]
    #[case(fixtures::tank_system())]
    #[case(fixtures::example_5_17())]
    fn test_recomputation_is_identical(#[case] graph: SystemGraph) {
        let model = StructuralModel::build(&graph).unwrap();
        assert_eq!(compute_matching(&model), compute_matching(&model));
        assert_eq!(compute_exact_matching(&model), compute_exact_matching(&model));
    }

    #[test]
    fn test_ranking_is_not_always_maximum() {
        let model = StructuralModel::build(&fixtures::starving()).unwrap();
        assert_eq!(compute_matching(&model).len(), 3);
        assert_eq!(compute_exact_matching(&model).len(), 4);
    }

    #[test]
    fn test_example_5_17_exact_covers_unknowns() {
        let model = StructuralModel::build(&fixtures::example_5_17()).unwrap();
        let m = compute_exact_matching(&model);
        assert_eq!(m.len(), 5);
        assert_eq!(m.unmatched_constraints(&model).len(), 1);
        assert!(m.is_fully_observable(&model));
    }

    #[test]
    fn test_solvers_behind_trait() {
        let model = StructuralModel::build(&fixtures::tank_system()).unwrap();
        let solvers: Vec<Box<dyn MatchingSolver>> = vec![Box::new(RankingMatcher), Box::new(ExactMatcher)];
        for s in &solvers {
            let m = s.solve(&model).unwrap();
            assert_eq!(m.len(), 4, "solver {}", s.name());
        }
    }

    #[test]
    fn test_from_pairs_rejects_foreign_edge() {
        let g = fixtures::tank_system();
        let model = StructuralModel::build(&g).unwrap();
        let id = |n: &str| g.find_node(n).unwrap();
        // h - c6 is restricted.
        let err = Matching::from_pairs(&model, &[(id("c6"), id("h"))]).unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedMatchingBackend(_)));
        // q_i used twice.
        let err = Matching::from_pairs(&model, &[(id("c1"), id("q_i")), (id("c2"), id("q_i"))]).unwrap_err();
        assert!(err.to_string().contains("already matched"));
    }

    #[test]
    fn test_assign_refuses_second_use() {
        let g = fixtures::single();
        let x = g.find_node("x1").unwrap();
        let c = g.find_node("c1").unwrap();
        let mut m = Matching::new();
        assert!(m.assign(c, x));
        assert!(!m.assign(c, x));
        assert_eq!(m.len(), 1);
    }
}
