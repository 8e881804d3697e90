use indexmap::IndexMap;

use crate::network::model::{FlowNetwork, NodeId};

/// Matched pairs keyed by right-partition node id, held in ascending right
/// id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matching {
    pairs: IndexMap<NodeId, NodeId>,
}

impl Matching {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Left partner of a right node, if matched.
    pub fn partner_of(&self, right: NodeId) -> Option<NodeId> {
        self.pairs.get(&right).copied()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.pairs.iter().map(|(right, left)| (*right, *left))
    }
}

/// Reads the matching off the residual network once the engine is done. A
/// right node whose bucket holds an augmented edge is matched, and that
/// edge's destination names the left partner. Pure read: the network is not
/// touched, so extracting twice gives the same answer.
#[derive(Debug, Default)]
pub struct MatchingExtractor;

impl MatchingExtractor {
    pub fn extract(network: &FlowNetwork) -> Matching {
        let mut pairs = IndexMap::new();
        for right in network.right_partition() {
            if let Some(edge) = network.augmented_edge(right) {
                pairs.insert(right, edge.dest);
            }
        }
        Matching { pairs }
    }
}
