/*!
# Edge Multiplicities

[`EdgeCounter`] records how often an ordered pair of labelled vertices is connected.
In contrast to [`GraphEdgeEditing::try_add_edge`], which accumulates parallel edges,
recording a pair again replaces the previous count.
*/

use fxhash::FxHashMap;
use tracing::trace;

use super::*;

/// Per ordered pair of labelled vertices, the count as last recorded.
///
/// # Examples
/// ```
/// use lgraphs::{prelude::*, algo::*};
///
/// let mut counter: EdgeCounter = EdgeCounter::new();
/// counter.add_vertex("A".to_string()).unwrap();
/// counter.add_vertex("B".to_string()).unwrap();
///
/// counter.record_edge("A", "B", 2).unwrap();
/// counter.record_edge("A", "B", 5).unwrap();
///
/// assert_eq!(counter.count_of("A", "B"), Ok(5));
/// assert_eq!(counter.count_of("B", "A"), Ok(0));
/// ```
#[derive(Debug, Clone)]
pub struct EdgeCounter<L = String> {
    index: VertexIndex<L>,
    counts: FxHashMap<Edge, Multiplicity>,
    order: Vec<Edge>,
}

impl<L> Default for EdgeCounter<L> {
    fn default() -> Self {
        Self {
            index: VertexIndex::default(),
            counts: FxHashMap::default(),
            order: Vec::new(),
        }
    }
}

impl<L> EdgeCounter<L>
where
    L: Clone + Eq + Hash + Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new vertex and returns its index.
    ///
    /// # Errors
    /// Returns `DuplicateVertex` if `label` is already present.
    pub fn add_vertex(&mut self, label: L) -> Result<Node> {
        self.index.add_vertex(label)
    }

    /// Sets the count of the ordered pair `(source, target)` to `count`,
    /// replacing any previously recorded count.
    ///
    /// # Errors
    /// - `UnknownVertex` if one of the labels is unknown,
    /// - `InvalidMultiplicity` if `count == 0`.
    pub fn record_edge<Q>(&mut self, source: &Q, target: &Q, count: Multiplicity) -> Result<()>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        let edge = Edge(self.index.index_of(source)?, self.index.index_of(target)?);
        if count == 0 {
            return Err(GraphError::InvalidMultiplicity);
        }

        if let Some(previous) = self.counts.insert(edge, count) {
            trace!(%source, %target, previous, count, "count replaced");
        } else {
            self.order.push(edge);
        }
        Ok(())
    }

    /// Returns the recorded count of `(source, target)`, `0` if the pair was never recorded.
    ///
    /// # Errors
    /// Returns `UnknownVertex` if one of the labels is unknown.
    pub fn count_of<Q>(&self, source: &Q, target: &Q) -> Result<Multiplicity>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        let edge = Edge(self.index.index_of(source)?, self.index.index_of(target)?);
        Ok(self.counts.get(&edge).copied().unwrap_or(0))
    }

    /// Returns all recorded pairs with their counts in the order they were first recorded
    pub fn edges(&self) -> impl Iterator<Item = (&L, &L, Multiplicity)> + '_ {
        self.order.iter().filter_map(|edge| {
            Some((
                self.index.label_of(edge.0)?,
                self.index.label_of(edge.1)?,
                *self.counts.get(edge)?,
            ))
        })
    }

    /// Returns the number of recorded pairs
    pub fn number_of_pairs(&self) -> usize {
        self.order.len()
    }

    /// Returns the `n x n` matrix of counts in index order
    pub fn to_rows(&self) -> Vec<Vec<Multiplicity>> {
        let n = self.index.len();
        let mut rows = vec![vec![0; n]; n];
        for (&Edge(u, v), &count) in &self.counts {
            rows[u as usize][v as usize] = count;
        }
        rows
    }

    /// Returns the counts as adjacency matrix. Pairs recorded with the same count in both
    /// directions become undirected edges, all other counts directed ones.
    ///
    /// # Errors
    /// Propagates errors of [`AdjMatrix::try_from_rows`]; the rows are always square.
    pub fn to_matrix(&self) -> Result<AdjMatrix> {
        AdjMatrix::try_from_rows(&self.to_rows())
    }

    pub fn vertex_index(&self) -> &VertexIndex<L> {
        &self.index
    }
}
