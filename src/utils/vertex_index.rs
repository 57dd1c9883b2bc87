/*!
# Vertex Index

Bidirectional mapping between opaque vertex labels and dense node indices `0..n`.
Indices are handed out in insertion order and are never reused; there is no removal.
*/

use std::{
    borrow::Borrow,
    fmt::{self, Display},
    hash::Hash,
};

use fxhash::FxHashMap;

use crate::*;

/// Maps labels of type `L` to [`Node`]s and back.
///
/// # Example
/// ```
/// use lgraphs::utils::VertexIndex;
///
/// let mut index = VertexIndex::new();
/// assert_eq!(index.add_vertex("A".to_string()), Ok(0));
/// assert_eq!(index.add_vertex("B".to_string()), Ok(1));
/// assert_eq!(index.index_of("B"), Ok(1));
/// assert_eq!(index.label_of(0).map(String::as_str), Some("A"));
/// assert!(index.add_vertex("A".to_string()).is_err());
/// ```
#[derive(Clone)]
pub struct VertexIndex<L = String> {
    label_to_node: FxHashMap<L, Node>,
    node_to_label: Vec<L>,
}

impl<L> Default for VertexIndex<L> {
    fn default() -> Self {
        Self {
            label_to_node: FxHashMap::default(),
            node_to_label: Vec::new(),
        }
    }
}

impl<L> VertexIndex<L>
where
    L: Clone + Eq + Hash + Display,
{
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty index with space for `n` labels
    pub fn with_capacity(n: usize) -> Self {
        Self {
            label_to_node: FxHashMap::with_capacity_and_hasher(n, Default::default()),
            node_to_label: Vec::with_capacity(n),
        }
    }

    /// Assigns the next free index to `label`.
    ///
    /// # Errors
    /// Returns `DuplicateVertex` if `label` was added before; the index is left untouched.
    pub fn add_vertex(&mut self, label: L) -> Result<Node> {
        if self.label_to_node.contains_key(&label) {
            return Err(GraphError::DuplicateVertex(label.to_string()));
        }

        let node = self.node_to_label.len() as Node;
        self.label_to_node.insert(label.clone(), node);
        self.node_to_label.push(label);
        Ok(node)
    }

    /// Returns the index of `label`.
    ///
    /// # Errors
    /// Returns `UnknownVertex` if `label` was never added.
    pub fn index_of<Q>(&self, label: &Q) -> Result<Node>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        self.label_to_node
            .get(label)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(label.to_string()))
    }

    /// Returns *true* if `label` was added
    pub fn contains<Q>(&self, label: &Q) -> bool
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.label_to_node.contains_key(label)
    }

    /// Returns the label of node `u` or `None` if `u >= n`
    pub fn label_of(&self, u: Node) -> Option<&L> {
        self.node_to_label.get(u as usize)
    }

    /// Translates a sequence of nodes into their labels.
    /// Nodes without a label are skipped.
    pub fn labels_of<I>(&self, nodes: I) -> Vec<L>
    where
        I: IntoIterator<Item = Node>,
    {
        nodes
            .into_iter()
            .filter_map(|u| self.label_of(u).cloned())
            .collect()
    }

    /// Returns the number of labels
    pub fn len(&self) -> usize {
        self.node_to_label.len()
    }

    /// Returns *true* if no label was added yet
    pub fn is_empty(&self) -> bool {
        self.node_to_label.is_empty()
    }

    /// Returns all labels in index order
    pub fn labels(&self) -> &[L] {
        &self.node_to_label
    }

    /// Returns an iterator over `(node, label)` in index order
    pub fn iter(&self) -> impl Iterator<Item = (Node, &L)> + '_ {
        self.node_to_label
            .iter()
            .enumerate()
            .map(|(u, l)| (u as Node, l))
    }
}

// `label_to_node` is fully determined by `node_to_label`
impl<L: PartialEq> PartialEq for VertexIndex<L> {
    fn eq(&self, other: &Self) -> bool {
        self.node_to_label == other.node_to_label
    }
}

impl<L: Eq> Eq for VertexIndex<L> {}

impl<L: fmt::Debug> fmt::Debug for VertexIndex<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.node_to_label.iter().enumerate())
            .finish()
    }
}
