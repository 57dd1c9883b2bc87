/*!
# Bipartite Graph Algorithms

Testing whether a graph is bipartite and computing a two-coloring if one exists.

The coloring is derived from a depth-first forest: every root is put on the
[`Side::Left`], every tree child on the side opposite to its parent. As soon as an examined
edge joins two nodes of the same side, the search stops. Directed edges are ignored in their
orientation, i.e. the test runs on the underlying undirected graph.
*/

use tracing::{debug, instrument, trace};

use super::{traversal::*, *};

/// One of the two color classes of a bipartition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    /// Returns the other side
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// An assignment of every node to a [`Side`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bipartition {
    sides: Vec<Side>,
}

impl Bipartition {
    /// Creates a bipartition where `u` is on side `sides[u]`
    pub fn new(sides: Vec<Side>) -> Self {
        Self { sides }
    }

    /// Creates a bipartition of `n` nodes where exactly the given nodes are on the right side
    /// ** Panics if a node is `>= n` **
    pub fn from_right_side<I>(n: NumNodes, right: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        let mut sides = vec![Side::Left; n as usize];
        for u in right {
            sides[u as usize] = Side::Right;
        }
        Self { sides }
    }

    /// Returns the side of `u`
    /// ** Panics if `u >= n` **
    pub fn side_of(&self, u: Node) -> Side {
        self.sides[u as usize]
    }

    /// Returns `true` if the node is on the left side of the partition.
    pub fn is_on_left_side(&self, u: Node) -> bool {
        self.side_of(u) == Side::Left
    }

    /// Returns `true` if the node is on the right side of the partition.
    pub fn is_on_right_side(&self, u: Node) -> bool {
        self.side_of(u) == Side::Right
    }

    /// Returns the nodes of the given side in increasing order
    pub fn nodes_on(&self, side: Side) -> impl Iterator<Item = Node> + '_ {
        self.sides
            .iter()
            .enumerate()
            .filter(move |(_, s)| **s == side)
            .map(|(u, _)| u as Node)
    }

    /// Returns the number of nodes covered by the bipartition
    pub fn len(&self) -> usize {
        self.sides.len()
    }

    /// Returns *true* if the bipartition covers no node
    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }
}

/// A trait for testing and computing bipartitions in graphs.
pub trait BipartiteTest {
    /// Tests whether the given candidate partition is a valid bipartition, i.e. whether
    /// every edge joins nodes of different sides. Self-loops are never valid.
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{prelude::*, algo::*, gens::*};
    ///
    /// let mut g = AdjList::new(10);
    /// g.connect_path(0..10 as Node);
    ///
    /// assert!(g.is_bipartition(&Bipartition::from_right_side(10, [1, 3, 5, 7, 9])));
    /// ```
    fn is_bipartition(&self, bipartition: &Bipartition) -> bool;

    /// Computes a valid bipartition of the graph, if one exists.
    /// Returns `None` if the graph is not bipartite.
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{prelude::*, algo::*, gens::*};
    ///
    /// let mut g = AdjList::new(10);
    /// g.connect_path(0..10 as Node);
    ///
    /// let bip = g.compute_bipartition().unwrap();
    /// assert_eq!(bip.nodes_on(Side::Right).count(), 5);
    /// ```
    fn compute_bipartition(&self) -> Option<Bipartition>;

    /// Tests whether the graph is bipartite.
    fn is_bipartite(&self) -> bool {
        self.compute_bipartition().is_some()
    }
}

impl<G> BipartiteTest for G
where
    G: AdjacencyList + AdjacencyTest + GraphDirection + GraphEdgeOrder,
{
    fn is_bipartition(&self, bipartition: &Bipartition) -> bool {
        bipartition.len() == self.len()
            && self
                .edges(false)
                .all(|Edge(u, v)| bipartition.side_of(u) != bipartition.side_of(v))
    }

    #[instrument(level = "trace", skip_all)]
    fn compute_bipartition(&self) -> Option<Bipartition> {
        if self.has_directed_edges() {
            two_coloring(&AdjList::underlying_undirected(self))
        } else {
            two_coloring(self)
        }
    }
}

/// Colors a graph whose neighborhoods are symmetric along a depth-first forest
fn two_coloring<G>(graph: &G) -> Option<Bipartition>
where
    G: AdjacencyList,
{
    let mut colors: Vec<Option<Side>> = vec![None; graph.len()];

    for event in graph.dfs_forest() {
        match event {
            DfsEvent::Discover { node, parent } => {
                colors[node as usize] = Some(match parent {
                    None => Side::Left,
                    Some(p) => colors[p as usize].unwrap_or_default().opposite(),
                });
            }
            DfsEvent::Examine { from, to, .. } => {
                if colors[from as usize] == colors[to as usize] {
                    trace!(from, to, "edge joins nodes of the same side");
                    return None;
                }
            }
            DfsEvent::Finish(_) => {}
        }
    }

    Some(Bipartition::new(
        colors.into_iter().map(Option::unwrap_or_default).collect(),
    ))
}

/// Returns *true* if the labelled graph is bipartite
pub fn query_bipartite<G, L>(graph: &LabelledGraph<G, L>) -> bool
where
    G: AdjacencyList + AdjacencyTest + GraphDirection + GraphEdgeOrder,
    L: Clone + Eq + Hash + Display,
{
    let bipartite = graph.graph().is_bipartite();
    debug!(bipartite, "bipartite query");
    bipartite
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{gens::*, testing::init_test_logging};
    use itertools::Itertools;

    #[test]
    fn path() {
        for n in 1..10 {
            let mut graph = AdjList::new(n);
            for u in 0..n - 1 {
                graph.add_edge(u, u + 1);
            }

            assert!(graph.is_bipartite());

            if n > 2 {
                let mut graph = graph.clone();
                graph.add_edge(1 - (n % 2), n - 1);
                assert!(!graph.is_bipartite());
            }
        }
    }

    #[test]
    fn cycles() {
        init_test_logging();
        for k in 3..12 {
            let mut list = AdjList::new(k);
            list.connect_cycle(0..k);
            let mut matrix = AdjMatrix::new(k);
            matrix.connect_cycle(0..k);
            let mut incidence = IncidenceMatrix::new(k);
            incidence.connect_cycle(0..k);

            let even = k % 2 == 0;
            assert_eq!(list.is_bipartite(), even);
            assert_eq!(matrix.is_bipartite(), even);
            assert_eq!(incidence.is_bipartite(), even);
        }
    }

    #[test]
    fn computed_bipartition_is_valid() {
        let graph = AdjList::from_edges(7, [(0, 1), (1, 2), (3, 4), (2, 5), (5, 0)]);
        let bip = graph.compute_bipartition().unwrap();

        assert!(graph.is_bipartition(&bip));
        assert_eq!(bip.side_of(0), Side::Left);
        assert_eq!(bip.side_of(3), Side::Left);
        assert_eq!(bip.side_of(6), Side::Left);
        assert_eq!(bip.nodes_on(Side::Right).collect_vec(), vec![1, 4, 5]);

        assert!(!graph.is_bipartition(&Bipartition::from_right_side(7, [])));
        assert!(!graph.is_bipartition(&Bipartition::from_right_side(6, [1, 4, 5])));
    }

    #[test]
    fn disconnected_odd_component() {
        let graph = AdjMatrix::from_edges(6, [(0, 1), (3, 4), (4, 5), (5, 3)]);
        assert!(!graph.is_bipartite());
    }

    #[test]
    fn self_loops_and_parallel_edges() {
        let graph = AdjList::from_edges(2, [(0, 1), (1, 1)]);
        assert!(!graph.is_bipartite());

        let mut graph = AdjList::new(2);
        graph.try_add_edge(0, 1, false, 3).unwrap();
        assert!(graph.is_bipartite());
    }

    #[test]
    fn directed_edges_use_underlying_graph() {
        // orientation would split the path 0 - 1 - 3 - 2 over two dfs trees
        let graph = AdjList::from_arcs(4, [(0, 1), (2, 3), (3, 1)]);
        assert!(graph.is_bipartite());

        let graph = AdjMatrix::from_arcs(3, [(0, 1), (1, 2), (0, 2)]);
        assert!(!graph.is_bipartite());
    }

    #[test]
    fn labelled() {
        let square: LabelledGraph<AdjList> = build_graph(
            ["a", "b", "c", "d"].map(String::from),
            [("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")]
                .map(|(x, y)| EdgeSpec::undirected(x.to_string(), y.to_string())),
        )
        .unwrap();
        assert!(query_bipartite(&square));

        let empty: LabelledGraph<AdjMatrix> = LabelledGraph::new();
        assert!(query_bipartite(&empty));
    }
}
