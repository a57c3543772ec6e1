use crate::error::{AnalysisError, Result};
use crate::store::{NodeClass, NodeId, SystemGraph};
use std::collections::VecDeque;

/// The two node classes of a bipartite graph, each in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub variables: Vec<NodeId>,
    pub constraints: Vec<NodeId>,
}

/// Splits the graph into variables and constraints by two-colouring it.
///
/// Each connected component is coloured by BFS starting from its lowest id,
/// and that node's declared class fixes which colour means "variable". This
/// makes the result independent of discovery order even for disconnected
/// graphs. Fails if a component has an odd cycle, or if a node's colour
/// contradicts its declared class (an edge joins two nodes of one class).
pub fn bipartite_sets(graph: &SystemGraph) -> Result<Partition> {
    let count = graph.node_count();
    let mut side: Vec<Option<NodeClass>> = vec![None; count];
    let mut partition = Partition::default();

    // We iterate in id order to ensure all nodes (even isolated ones) are coloured.
    for start in graph.node_ids() {
        if side[start.index()].is_some() {
            continue;
        }
        let root_class = declared_class(graph, start)?;
        colour_component(graph, start, root_class, &mut side)?;
    }

    for id in graph.node_ids() {
        let declared = declared_class(graph, id)?;
        let coloured = side[id.index()]
            .ok_or_else(|| AnalysisError::invalid_graph(format!("node '{}' was not reached", graph.name_of(id))))?;
        if coloured != declared {
            return Err(AnalysisError::invalid_graph(format!(
                "node '{}' is declared {:?} but is adjacent to another {:?} node",
                graph.name_of(id),
                declared,
                declared
            )));
        }
        match coloured {
            NodeClass::Variable => partition.variables.push(id),
            NodeClass::Constraint => partition.constraints.push(id),
        }
    }

    Ok(partition)
}

fn colour_component(
    graph: &SystemGraph,
    start: NodeId,
    root_class: NodeClass,
    side: &mut [Option<NodeClass>],
) -> Result<()> {
    side[start.index()] = Some(root_class);
    let mut queue = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        let here = side[node.index()].unwrap_or(root_class);
        for next in graph.neighbors(node) {
            match side[next.index()] {
                None => {
                    side[next.index()] = Some(here.opposite());
                    queue.push_back(next);
                }
                Some(there) if there == here => {
                    return Err(AnalysisError::invalid_graph(format!(
                        "not bipartite: odd cycle through '{}' and '{}'",
                        graph.name_of(node),
                        graph.name_of(next)
                    )));
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}

fn declared_class(graph: &SystemGraph, id: NodeId) -> Result<NodeClass> {
    graph
        .node(id)
        .map(|n| n.class)
        .ok_or_else(|| AnalysisError::invalid_graph(format!("unknown node id {}", id.index())))
}
