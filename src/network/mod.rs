pub mod construction;
pub mod model;

pub use construction::{InputError, InstanceLoader, MatchingInstance, NetworkBuilder};
pub use model::{Edge, FlowNetwork, Node, NodeId};
