/*!
# Node Representation

Internally every vertex is a dense index `Node = u32` in the range `0..n`, assigned in
insertion order. External labels are mapped onto these indices by
[`VertexIndex`](crate::utils::VertexIndex).
*/

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// Number of parallel edges between two nodes (or the contribution of a node to an edge column).
/// A value of `0` means *no edge*.
pub type Multiplicity = u32;
