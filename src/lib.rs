pub mod dinic;
pub mod matching;
pub mod network;
pub mod report;

pub use dinic::{DinicEngine, EngineStats, MatchingSummary, PhaseReport};
pub use matching::{Matching, MatchingExtractor};
pub use network::{
    Edge, FlowNetwork, InputError, InstanceLoader, MatchingInstance, NetworkBuilder, Node, NodeId,
};
pub use report::MatchingWriter;
