use std::ops::RangeInclusive;

pub type NodeId = usize;

/// Every edge in the network carries the same capacity.
pub const UNIT_CAPACITY: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Directed unit-capacity arc. `flow == 1` marks a reverse edge created by
/// augmentation rather than a primitive input edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeId,
    pub dest: NodeId,
    pub capacity: u32,
    pub flow: u32,
}

impl Edge {
    pub fn unit(source: NodeId, dest: NodeId) -> Self {
        Self {
            source,
            dest,
            capacity: UNIT_CAPACITY,
            flow: 0,
        }
    }

    /// The residual counterpart: direction flipped, capacity marked as
    /// returned.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.dest,
            dest: self.source,
            capacity: UNIT_CAPACITY,
            flow: 1,
        }
    }

    pub fn is_augmented(&self) -> bool {
        self.flow == 1
    }
}

/// Adjacency-list flow network over dense node ids. Bucket order is
/// insertion order, which doubles as the search priority order during the
/// advance step, so it is part of the observable behavior.
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    nodes: Vec<Node>,
    buckets: Vec<Vec<Edge>>,
    source: NodeId,
    sink: NodeId,
    left_len: usize,
}

impl FlowNetwork {
    /// Sizes the network for `regular_nodes` nodes plus the two terminals.
    /// The source is always id 0 and the sink the highest id; the left
    /// partition takes the lower half of the regular ids (floor division).
    pub fn new(regular_nodes: usize) -> Self {
        let total = regular_nodes + 2;
        Self {
            nodes: Vec::with_capacity(total),
            buckets: Vec::with_capacity(total),
            source: 0,
            sink: regular_nodes + 1,
            left_len: regular_nodes / 2,
        }
    }

    /// Appends a node and allocates its empty outgoing bucket. Ids are
    /// assigned in call order, so the id range stays dense.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id, label));
        self.buckets.push(Vec::new());
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn label(&self, id: NodeId) -> &str {
        &self.nodes[id].label
    }

    /// Total node count, terminals included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn sink(&self) -> NodeId {
        self.sink
    }

    pub fn left_partition(&self) -> RangeInclusive<NodeId> {
        1..=self.left_len
    }

    pub fn right_partition(&self) -> RangeInclusive<NodeId> {
        self.left_len + 1..=self.sink - 1
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.buckets[edge.source].push(edge);
    }

    pub fn outgoing(&self, id: NodeId) -> &[Edge] {
        &self.buckets[id]
    }

    pub fn out_degree(&self, id: NodeId) -> usize {
        self.buckets[id].len()
    }

    /// Removes the first outgoing edge of `source` whose destination is
    /// `dest`. Removing an edge that is not present is a silent no-op; the
    /// augmentation step relies on this contract.
    pub fn remove_edge(&mut self, source: NodeId, dest: NodeId) {
        let bucket = &mut self.buckets[source];
        if let Some(position) = bucket.iter().position(|edge| edge.dest == dest) {
            bucket.remove(position);
        }
    }

    /// Inserts the reverse of `edge` with its capacity marked as returned,
    /// making the consumed capacity reclaimable by later paths.
    pub fn add_reverse_edge(&mut self, edge: Edge) {
        let reversed = edge.reversed();
        self.buckets[reversed.source].push(reversed);
    }

    /// Drops every edge pointing at `dest`, across all buckets. Used to
    /// prune level-graph dead ends during retreat.
    pub fn remove_incident_edges(&mut self, dest: NodeId) {
        for bucket in &mut self.buckets {
            bucket.retain(|edge| edge.dest != dest);
        }
    }

    /// First outgoing edge of `id` created by augmentation, if any.
    pub fn augmented_edge(&self, id: NodeId) -> Option<Edge> {
        self.buckets[id].iter().copied().find(Edge::is_augmented)
    }

    /// Same node table, terminals, and partition split; no edges. Each phase
    /// starts its level graph from one of these.
    pub fn empty_like(&self) -> FlowNetwork {
        FlowNetwork {
            nodes: self.nodes.clone(),
            buckets: vec![Vec::new(); self.buckets.len()],
            source: self.source,
            sink: self.sink,
            left_len: self.left_len,
        }
    }
}
