use log::trace;

use crate::dinic::level;
use crate::network::model::{Edge, FlowNetwork, NodeId};

/// What one phase did, plus whether the residual graph still admits an
/// augmenting path afterwards.
#[derive(Debug, Clone, Copy)]
pub struct PhaseReport {
    pub augmented_paths: usize,
    pub sink_reachable: bool,
}

/// Runs one full phase against the residual network: build the level graph,
/// then alternate advance and retreat until the search unwinds to the
/// source with nowhere left to go. Every augmenting path found inside the
/// level graph is applied to the residual before the phase ends.
///
/// The search keeps the path as an explicit edge stack; advance pushes,
/// retreat prunes and pops. Reaching the sink augments the residual,
/// strips the used edges from the level graph, and restarts from the
/// source within the same phase.
pub fn run_phase(residual: &mut FlowNetwork) -> PhaseReport {
    let mut level = level::build_level_graph(residual);
    let source = residual.source();
    let sink = residual.sink();

    let mut path: Vec<Edge> = Vec::new();
    let mut augmented_paths = 0;
    let mut current = source;

    loop {
        if current == sink {
            augment(residual, &path);
            strip_from_level(&mut level, &path);
            augmented_paths += 1;
            trace!("Augmented a {}-edge path", path.len());
            path.clear();
            current = source;
            continue;
        }

        match eligible_edge(&level, current, &path) {
            Some(edge) if edge.dest != source => {
                path.push(edge);
                current = edge.dest;
            }
            _ => {
                if current == source {
                    let sink_reachable = level::sink_reachable(residual);
                    return PhaseReport {
                        augmented_paths,
                        sink_reachable,
                    };
                }
                // Dead end. Drop every level edge into it so no later path
                // wanders back, then resume from the previous node.
                level.remove_incident_edges(current);
                let dead_end = path.pop().expect("path is non-empty below the source");
                current = dead_end.source;
            }
        }
    }
}

/// First outgoing level edge whose destination does not already appear as a
/// destination on the current path. An edge pointing back at the source can
/// win this scan; the caller then retreats rather than advancing, even if a
/// viable edge sits later in the bucket.
fn eligible_edge(level: &FlowNetwork, node: NodeId, path: &[Edge]) -> Option<Edge> {
    level
        .outgoing(node)
        .iter()
        .copied()
        .find(|edge| path.iter().all(|taken| taken.dest != edge.dest))
}

fn augment(residual: &mut FlowNetwork, path: &[Edge]) {
    for edge in path {
        residual.remove_edge(edge.source, edge.dest);
        residual.add_reverse_edge(*edge);
    }
}

fn strip_from_level(level: &mut FlowNetwork, path: &[Edge]) {
    for edge in path {
        level.remove_edge(edge.source, edge.dest);
    }
}
