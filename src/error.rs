/*!
# Errors

Only *structural misuse* is an error: referencing vertices that do not exist, inserting a
vertex or an incidence column twice, or comparing graphs of different size.
Query outcomes such as "not bipartite", "not connected", "no cycle" or "not isomorphic"
are ordinary return values.
*/

use thiserror::Error;

use crate::{Node, NumNodes};

/// Result type used throughout this crate
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Every error this crate can produce. Each kind is distinguishable by the caller;
/// none of them is retried or repaired internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A label was inserted into a [`VertexIndex`](crate::utils::VertexIndex) twice
    #[error("vertex already exists: {0}")]
    DuplicateVertex(String),

    /// A label was referenced that was never inserted
    #[error("unknown vertex: {0}")]
    UnknownVertex(String),

    /// A raw node index was referenced that is not smaller than the number of nodes
    #[error("node {node} is out of range for a graph with {n} nodes")]
    NodeOutOfRange { node: Node, n: NumNodes },

    /// The unordered pair already owns an edge column of an incidence matrix
    #[error("edge already exists: {0}-{1}")]
    DuplicateEdge(String, String),

    /// Incidence matrices only store undirected edges
    #[error("incidence matrices cannot store the directed edge {0}->{1}")]
    DirectedIncidenceEdge(String, String),

    /// Edges must occur at least once
    #[error("edge multiplicity must be at least 1")]
    InvalidMultiplicity,

    /// Adding the edge would push a multiplicity or the number of edges beyond `u32::MAX`
    #[error("multiplicity overflow on edge {0}-{1}")]
    MultiplicityOverflow(String, String),

    /// Two graphs compared for isomorphism have a different number of nodes
    #[error("graphs must have the same number of vertices: {left} vs {right}")]
    SizeMismatch { left: NumNodes, right: NumNodes },

    /// A matrix handed in as rows is not square
    #[error("row {row} has {len} entries, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },
}

impl GraphError {
    /// Replaces raw node indices in edge related errors by the given labels
    pub(crate) fn relabel_edge(self, source: String, target: String) -> Self {
        match self {
            GraphError::DuplicateEdge(..) => GraphError::DuplicateEdge(source, target),
            GraphError::DirectedIncidenceEdge(..) => {
                GraphError::DirectedIncidenceEdge(source, target)
            }
            GraphError::MultiplicityOverflow(..) => {
                GraphError::MultiplicityOverflow(source, target)
            }
            e => e,
        }
    }
}
