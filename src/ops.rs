/*!
# Graph Operations

Capability traits shared by every representation in [`repr`](crate::repr).
All algorithms in [`algo`](crate::algo) are written once against these traits:

- [`GraphNodeOrder`] / [`GraphEdgeOrder`] : sizes of the graph,
- [`AdjacencyList`] : ordered neighborhoods and degrees,
- [`AdjacencyTest`] : edge existence and multiplicities,
- [`GraphEdgeEditing`] / [`GraphNodeEditing`] / [`GraphNew`] : construction.

Edges are only ever added, there is no removal.
*/

use std::ops::Range;

use itertools::Itertools;

use crate::*;

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    /// As nodes are never deleted, this is always `0..n`
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `Err(NodeOutOfRange)` if `u` is not a node of the graph
    fn check_node(&self, u: Node) -> Result<()> {
        if u < self.number_of_nodes() {
            Ok(())
        } else {
            Err(GraphError::NodeOutOfRange {
                node: u,
                n: self.number_of_nodes(),
            })
        }
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph counted with multiplicity.
    /// An undirected edge is counted once.
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_singleton_graph(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Graphs may mix directed and undirected edges.
/// Algorithms that treat both kinds differently query this trait.
pub trait GraphDirection {
    /// Returns *true* if at least one directed edge was inserted
    fn has_directed_edges(&self) -> bool;
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Iterator over the neighbors of a node.
    /// Cloning the iterator restarts nothing but allows resuming from the same position.
    type NeighborIter<'a>: Iterator<Item = Node> + Clone + 'a
    where
        Self: 'a;

    /// Returns an iterator over the (open) neighborhood of a given vertex.
    /// Parallel edges yield the neighbor once per occurrence, the order is fixed
    /// by the representation (insertion order for lists).
    /// ** Panics if `u >= n` **
    ///
    /// Note that for directed edges, only the head is a neighbor of the tail
    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_>;

    /// Returns the number of (outgoing) neighbors of `u` counted with multiplicity.
    /// A self-loop is counted once per stored occurrence.
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns an iterator over the degrees of all nodes
    fn degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices().map(|u| self.degree_of(u))
    }

    /// Returns the maximum degree in the graph
    fn max_degree(&self) -> NumNodes {
        self.degrees().max().unwrap_or(0)
    }

    /// Returns a distribution `(degree, number of nodes)` sorted by degree
    fn degree_distribution(&self) -> Vec<(NumNodes, NumNodes)> {
        let mut distr = self
            .degrees()
            .counts()
            .into_iter()
            .map(|(d, n)| (d, n as NumNodes))
            .collect_vec();
        distr.sort_by_key(|(d, _)| *d);
        distr
    }

    /// Returns an iterator to all vertices with non-zero degree
    fn vertices_with_neighbors(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices().filter(|&u| self.degree_of(u) > 0)
    }

    /// Returns an iterator over outgoing edges of a given vertex.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u)
            .map(move |v| Edge(u, v))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all (outgoing) edges of the graph.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }
}

/// Tests for the existence of edges
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns the number of parallel edges from `u` to `v` (`0` if there is none)
    /// ** Panics if `u >= n || v >= n` **
    fn multiplicity_of(&self, u: Node, v: Node) -> Multiplicity;

    /// Returns *true* if at least one edge `(u, v)` exists
    /// ** Panics if `u >= n || v >= n` **
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.multiplicity_of(u, v) > 0
    }
}

/// Provides functions to create graphs
pub trait GraphNew: Sized {
    /// Creates an empty graph with `n` singleton nodes
    fn new(n: NumNodes) -> Self;

    /// Creates a graph with `n` nodes and the given undirected edges.
    /// ** Panics if an endpoint is `>= n` **
    fn from_edges<I, E>(n: NumNodes, edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
        Self: GraphEdgeEditing,
    {
        let mut graph = Self::new(n);
        graph.add_edges(edges);
        graph
    }

    /// Creates a graph with `n` nodes and the given directed edges.
    /// ** Panics if an endpoint is `>= n` **
    fn from_arcs<I, E>(n: NumNodes, arcs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
        Self: GraphEdgeEditing,
    {
        let mut graph = Self::new(n);
        graph.add_arcs(arcs);
        graph
    }
}

/// Appending nodes to an existing graph
pub trait GraphNodeEditing {
    /// Adds a new singleton node and returns its index (which equals the old number of nodes)
    fn add_node(&mut self) -> Node;
}

/// Provides functions to insert edges
pub trait GraphEdgeEditing: GraphNodeOrder {
    /// Inserts `multiplicity` parallel edges between `u` and `v`.
    /// Undirected edges update both endpoints, a self-loop is stored once.
    ///
    /// # Errors
    /// - `NodeOutOfRange` if `u >= n` or `v >= n`,
    /// - `InvalidMultiplicity` if `multiplicity == 0`,
    /// - `MultiplicityOverflow` if the graph would hold more than `u32::MAX` edges,
    /// - representation specific errors (see [`IncidenceMatrix`](crate::repr::IncidenceMatrix)).
    fn try_add_edge(
        &mut self,
        u: Node,
        v: Node,
        directed: bool,
        multiplicity: Multiplicity,
    ) -> Result<()>;

    /// Adds a single undirected edge `{u, v}`.
    /// ** Panics if the edge cannot be inserted (e.g. `u >= n || v >= n`) **
    fn add_edge(&mut self, u: Node, v: Node) {
        if let Err(err) = self.try_add_edge(u, v, false, 1) {
            panic!("cannot add edge {}: {err}", Edge(u, v));
        }
    }

    /// Adds a single directed edge `u -> v`.
    /// ** Panics if the edge cannot be inserted (e.g. `u >= n || v >= n`) **
    fn add_arc(&mut self, u: Node, v: Node) {
        if let Err(err) = self.try_add_edge(u, v, true, 1) {
            panic!("cannot add arc {}: {err}", Edge(u, v));
        }
    }

    /// Adds all undirected edges in the collection
    fn add_edges<I, E>(&mut self, edges: I)
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        for Edge(u, v) in edges.into_iter().map(|e| e.into()) {
            self.add_edge(u, v);
        }
    }

    /// Adds all directed edges in the collection
    fn add_arcs<I, E>(&mut self, arcs: I)
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        for Edge(u, v) in arcs.into_iter().map(|e| e.into()) {
            self.add_arc(u, v);
        }
    }
}

/// Validates the common preconditions of [`GraphEdgeEditing::try_add_edge`] and returns the
/// number of edges after the insertion.
///
/// Every cell, neighborhood and degree is bounded by the number of edges, so checking the
/// total is enough to rule out overflows in the stores.
pub(crate) fn check_edge_insertion<G: GraphNodeOrder + GraphEdgeOrder + ?Sized>(
    graph: &G,
    u: Node,
    v: Node,
    multiplicity: Multiplicity,
) -> Result<NumEdges> {
    graph.check_node(u)?;
    graph.check_node(v)?;
    if multiplicity == 0 {
        return Err(GraphError::InvalidMultiplicity);
    }
    graph
        .number_of_edges()
        .checked_add(multiplicity)
        .ok_or_else(|| GraphError::MultiplicityOverflow(u.to_string(), v.to_string()))
}
