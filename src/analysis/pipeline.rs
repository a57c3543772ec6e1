//! The orchestrator that runs the four analysis stages in order.
use super::matching::{ExactMatcher, Matching, MatchingSolver, RankingMatcher};
use super::model::StructuralModel;
use super::orientation::{compute_orientation, OrientationGraph};
use super::redundancy::{list_detectable_constraints, list_isolable_constraints, list_redundancy_relations, RedundancyRelation};
use crate::config::{AnalysisConfig, MatchingBackend};
use crate::error::{AnalysisError, Result};
use crate::store::{NodeId, SystemGraph};

/// Every stage's output for one system graph.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub model: StructuralModel,
    pub matching: Matching,
    pub orientation: OrientationGraph,
    pub relations: Vec<RedundancyRelation>,
    pub detectable: Vec<NodeId>,
    pub isolable: Vec<NodeId>,
}

/// Runs model -> matching -> orientation -> redundancy.
///
/// Each stage takes the previous stage's result as an argument, so there is
/// no way to orient before matching or enumerate before orienting.
pub struct Analyzer {
    config: AnalysisConfig,
    external: Option<Box<dyn MatchingSolver>>,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config, external: None }
    }

    /// Registers the solver used for `MatchingBackend::External`.
    pub fn with_external_solver(mut self, solver: Box<dyn MatchingSolver>) -> Self {
        self.external = Some(solver);
        self
    }

    pub fn config(&self) -> &AnalysisConfig { &self.config }

    /// Resolves the configured backend to a solver.
    pub fn solver(&self) -> Result<&dyn MatchingSolver> {
        match self.config.matching {
            MatchingBackend::Ranking => Ok(&RankingMatcher),
            MatchingBackend::Exact => Ok(&ExactMatcher),
            MatchingBackend::External => self.external.as_deref().ok_or_else(|| {
                AnalysisError::UnsupportedMatchingBackend("no external matching solver registered".to_string())
            }),
        }
    }

    pub fn run(&self, graph: &SystemGraph) -> Result<Analysis> {
        // Fail fast on a missing backend before doing any work.
        let solver = self.solver()?;
        let model = StructuralModel::build(graph)?;

        let matching = solver.solve(&model)?;
        log::info!(
            "'{}' matched {} of {} reduced constraints",
            solver.name(),
            matching.len(),
            model.reduced_constraints.len()
        );

        let orientation = compute_orientation(&model, &matching);
        let relations =
            list_redundancy_relations(&model, &orientation, &orientation.unmatched_constraints, &self.config.paths);
        let detectable = list_detectable_constraints(&relations, &model.constraints);
        let isolable = list_isolable_constraints(&relations, &model.constraints);

        log::info!(
            "{} redundancy relations, {} detectable and {} isolable constraints",
            relations.len(),
            detectable.len(),
            isolable.len()
        );

        Ok(Analysis { model, matching, orientation, relations, detectable, isolable })
    }
}

impl Default for Analyzer {
    fn default() -> Self { Self::new(AnalysisConfig::default()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures;
    use crate::config::PathLimits;

    /// Stands in for a linear-programming backend: hands back a fixed pair list.
    struct FixedSolver(Vec<(String, String)>);

    impl MatchingSolver for FixedSolver {
        fn name(&self) -> &str { "fixed" }

        fn solve(&self, model: &StructuralModel) -> Result<Matching> {
            let find = |n: &str| model.constraints.iter().chain(&model.variables).copied().find(|&i| model.name_of(i) == n);
            let pairs: Vec<_> = self.0.iter().filter_map(|(c, v)| Some((find(c.as_str())?, find(v.as_str())?))).collect();
            Matching::from_pairs(model, &pairs)
        }
    }

    #[test]
    fn test_tank_end_to_end() {
        let analysis = Analyzer::default().run(&fixtures::tank_system()).unwrap();
        assert_eq!(analysis.matching.len(), 4);
        assert_eq!(analysis.relations.len(), 3);
        assert_eq!(analysis.detectable.len(), 5);
        assert!(analysis.isolable.is_empty());
    }

    #[test]
    fn test_single_end_to_end() {
        let analysis = Analyzer::default().run(&fixtures::single()).unwrap();
        assert_eq!(analysis.matching.len(), 1);
        assert!(analysis.orientation.unmatched_constraints.is_empty());
        assert!(analysis.relations.is_empty());
        assert!(analysis.detectable.is_empty());
    }

    #[test]
    fn test_external_backend_missing() {
        let analyzer = Analyzer::new(AnalysisConfig::default().with_matching(MatchingBackend::External));
        let err = analyzer.run(&fixtures::tank_system()).unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedMatchingBackend(_)));
    }

    #[test]
    fn test_external_backend_used() {
        // The other perfect-on-unknowns choice: c1 takes q_i, leaving c2 as the check.
        let pairs = [("c1", "q_i"), ("c3", "q_o"), ("c4", "h"), ("c6", "h_dot")]
            .iter()
            .map(|(c, v)| (c.to_string(), v.to_string()))
            .collect();
        let analyzer = Analyzer::new(AnalysisConfig::default().with_matching(MatchingBackend::External))
            .with_external_solver(Box::new(FixedSolver(pairs)));
        let analysis = analyzer.run(&fixtures::tank_system()).unwrap();

        let unmatched: Vec<_> =
            analysis.orientation.unmatched_constraints.iter().map(|&c| analysis.model.name_of(c)).collect();
        assert_eq!(unmatched, vec!["c2"]);
        // u feeds c2 directly.
        assert!(analysis
            .relations
            .iter()
            .any(|r| r.nodes().iter().map(|&n| analysis.model.name_of(n)).eq(["u", "c2"])));
    }

    #[test]
    fn test_exact_backend_on_starving_graph() {
        let analyzer = Analyzer::new(AnalysisConfig::default().with_matching(MatchingBackend::Exact));
        let analysis = analyzer.run(&fixtures::starving()).unwrap();
        assert_eq!(analysis.matching.len(), 4);
        assert!(analysis.orientation.unmatched_constraints.is_empty());
    }

    #[test]
    fn test_path_limits_flow_through() {
        let config = AnalysisConfig::default()
            .with_path_limits(PathLimits { max_path_nodes: None, max_relations: Some(1) });
        let analysis = Analyzer::new(config).run(&fixtures::tank_system()).unwrap();
        assert_eq!(analysis.relations.len(), 1);
    }

    #[test]
    fn test_invalid_graph_stops_pipeline() {
        let err = Analyzer::default().run(&fixtures::triangle()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidGraph { .. }));
    }
}
