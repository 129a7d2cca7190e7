use crate::node::NodeId;

/// Errors raised by [`Network`](crate::Network) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The node handle does not refer to a live node, either because it was never inserted into
    /// this network or because the node has since been removed.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
}

pub type Result<T> = std::result::Result<T, Error>;
