use std::collections::VecDeque;

use log::trace;

use crate::network::model::{Edge, FlowNetwork};

/// Builds the level graph for one phase: a BFS sweep from the source in
/// which every dequeued node contributes all of its outgoing residual edges
/// as fresh zero-flow copies. Edges into nodes at an equal or shallower
/// level are kept too, so the result is everything one BFS sweep can see
/// rather than a strictly layered subgraph. Which augmenting paths a phase
/// can discover depends on this, so the sweep is pinned by tests.
pub fn build_level_graph(residual: &FlowNetwork) -> FlowNetwork {
    let mut level = residual.empty_like();
    let mut visited = vec![false; residual.node_count()];
    let mut queue = VecDeque::with_capacity(residual.node_count());

    visited[residual.source()] = true;
    queue.push_back(residual.source());
    while let Some(node) = queue.pop_front() {
        for edge in residual.outgoing(node) {
            if !visited[edge.dest] {
                visited[edge.dest] = true;
                queue.push_back(edge.dest);
            }
            level.add_edge(Edge::unit(edge.source, edge.dest));
        }
    }

    trace!(
        "Level graph covers {} of {} nodes",
        visited.iter().filter(|seen| **seen).count(),
        residual.node_count()
    );
    level
}

/// BFS over the residual graph; true while the sink can still be reached
/// from the source. The engine terminates on the first false.
pub fn sink_reachable(residual: &FlowNetwork) -> bool {
    let mut visited = vec![false; residual.node_count()];
    let mut queue = VecDeque::new();

    visited[residual.source()] = true;
    queue.push_back(residual.source());
    while let Some(node) = queue.pop_front() {
        for edge in residual.outgoing(node) {
            if !visited[edge.dest] {
                visited[edge.dest] = true;
                queue.push_back(edge.dest);
            }
        }
    }
    visited[residual.sink()]
}
