//! Sample systems shared by the analysis tests.
use crate::store::SystemGraph;

/// Single tank: level `h`, its derivative, inflow `q_i`, outflow `q_o`,
/// pump command `u` and level sensor `y`. The `h - c6` edge is a derivative
/// relation and may not be matched.
pub(crate) fn tank_system() -> SystemGraph {
    let mut g = SystemGraph::new("Tank System");
    for v in ["h", "h_dot", "q_i", "q_o"] {
        g.add_unknown(v).unwrap();
    }
    for v in ["u", "y"] {
        g.add_known(v).unwrap();
    }
    for c in ["c1", "c2", "c3", "c4", "c5", "c6"] {
        g.add_constraint(c).unwrap();
    }
    for (a, b) in [
        ("u", "c2"),
        ("u", "c5"),
        ("h_dot", "c1"),
        ("h_dot", "c6"),
        ("h", "c3"),
        ("h", "c4"),
        ("q_i", "c1"),
        ("q_i", "c2"),
        ("q_o", "c3"),
        ("q_o", "c1"),
        ("y", "c5"),
        ("y", "c4"),
    ] {
        g.add_edge(a, b).unwrap();
    }
    g.add_restricted_edge("h", "c6").unwrap();
    g
}

/// One constraint over one unknown.
pub(crate) fn single() -> SystemGraph {
    let mut g = SystemGraph::new("Single");
    g.add_unknown("x1").unwrap();
    g.add_constraint("c1").unwrap();
    g.add_edge("x1", "c1").unwrap();
    g
}

/// Textbook example with five unknowns and six constraints.
pub(crate) fn example_5_17() -> SystemGraph {
    let mut g = SystemGraph::new("Example 5.17");
    for v in ["x1", "x2", "x3", "x4", "x5"] {
        g.add_unknown(v).unwrap();
    }
    for c in ["c1", "c2", "c3", "c4", "c5", "c6"] {
        g.add_constraint(c).unwrap();
    }
    for (a, b) in [
        ("x1", "c1"),
        ("x1", "c2"),
        ("x1", "c4"),
        ("x2", "c2"),
        ("x2", "c5"),
        ("x3", "c2"),
        ("x3", "c3"),
        ("x4", "c3"),
        ("x4", "c4"),
        ("x4", "c6"),
        ("x5", "c5"),
        ("x5", "c6"),
    ] {
        g.add_edge(a, b).unwrap();
    }
    g
}

/// Lowest-degree-first loses here: `c1`, `c2`, `c4` each take their
/// lowest-id neighbour, which uses up all of `c3`'s options. A maximum
/// matching has four pairs, ranking finds three.
pub(crate) fn starving() -> SystemGraph {
    let mut g = SystemGraph::new("Starving");
    for v in ["x1", "x2", "x3", "x4", "x5", "x6"] {
        g.add_unknown(v).unwrap();
    }
    for c in ["c1", "c2", "c3", "c4"] {
        g.add_constraint(c).unwrap();
    }
    for (a, b) in [
        ("x1", "c1"),
        ("x4", "c1"),
        ("x2", "c2"),
        ("x5", "c2"),
        ("x1", "c3"),
        ("x2", "c3"),
        ("x3", "c3"),
        ("x3", "c4"),
        ("x6", "c4"),
    ] {
        g.add_edge(a, b).unwrap();
    }
    g
}

/// Three nodes, mutually adjacent.
pub(crate) fn triangle() -> SystemGraph {
    let mut g = SystemGraph::new("Triangle");
    g.add_unknown("a").unwrap();
    g.add_constraint("b").unwrap();
    g.add_unknown("c").unwrap();
    g.add_edge("a", "b").unwrap();
    g.add_edge("b", "c").unwrap();
    g.add_edge("c", "a").unwrap();
    g
}
