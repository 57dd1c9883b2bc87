/*!
# Cycle Detection

Finds a single cycle with a depth-first search: as soon as an edge to a node on the active
search path is examined, the path from that node to the current one closes a cycle.

Graphs without directed edges are searched as undirected graphs: the mirror entry of a tree
edge is not a cycle, so trees are acyclic, while parallel edges form cycles of length 2 and
self-loops cycles of length 1. As soon as a graph contains a directed edge, it is searched as a
digraph where every undirected edge `{u, v}` is the pair of arcs `u -> v` and `v -> u`.
*/

use tracing::{debug, instrument, trace};

use super::{traversal::*, *};

/// A cycle given by its nodes in traversal order; every node appears exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    nodes: Vec<Node>,
    spans_graph: bool,
}

impl Cycle {
    /// Returns the nodes of the cycle. Consecutive nodes (and the last and first) are adjacent.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the number of nodes (and edges) of the cycle
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Cycles are never empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns *true* if the cycle passes through every node of the graph
    pub fn spans_graph(&self) -> bool {
        self.spans_graph
    }

    /// Returns the nodes of the cycle with the first node repeated at the end
    pub fn closed_walk(&self) -> Vec<Node> {
        let mut walk = self.nodes.clone();
        walk.extend(self.nodes.first());
        walk
    }

    /// Returns the nodes of the cycle, consuming it
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

/// Configurable cycle search.
///
/// # Examples
/// ```
/// use lgraphs::{prelude::*, algo::*};
///
/// let path = AdjList::from_edges(3, [(0, 1), (1, 2)]);
/// assert!(CycleSearch::new().find(&path).is_none());
///
/// // every undirected edge is a 2-cycle if orientation is taken literally
/// let cycle = CycleSearch::new().treat_as_directed(true).find(&path).unwrap();
/// assert_eq!(cycle.nodes(), &[0, 1]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleSearch {
    treat_as_directed: Option<bool>,
}

impl CycleSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the automatic choice between undirected and directed search.
    /// Searching a graph with directed edges as undirected runs on
    /// [`AdjList::underlying_undirected`]: a pair of opposite arcs `u -> v`, `v -> u` becomes a
    /// single undirected edge there (it cannot be told apart from an undirected edge), so it
    /// does not form a 2-cycle.
    pub fn set_treat_as_directed(&mut self, directed: bool) {
        self.treat_as_directed = Some(directed);
    }

    /// Builder variant of [`CycleSearch::set_treat_as_directed`]
    pub fn treat_as_directed(mut self, directed: bool) -> Self {
        self.set_treat_as_directed(directed);
        self
    }

    /// Returns the first cycle found by a DFS that starts at node `0` and restarts at
    /// unvisited nodes in index order, or `None` if the graph is acyclic.
    #[instrument(level = "trace", skip_all)]
    pub fn find<G>(&self, graph: &G) -> Option<Cycle>
    where
        G: AdjacencyList + AdjacencyTest + GraphDirection + GraphEdgeOrder,
    {
        let has_directed = graph.has_directed_edges();
        match self.treat_as_directed.unwrap_or(has_directed) {
            true => first_cycle(graph, true),
            false if has_directed => first_cycle(&AdjList::underlying_undirected(graph), false),
            false => first_cycle(graph, false),
        }
    }
}

fn first_cycle<G>(graph: &G, directed: bool) -> Option<Cycle>
where
    G: AdjacencyList,
{
    let mut dfs = graph.dfs_forest().skip_parent(!directed);

    while let Some(event) = dfs.next() {
        if let DfsEvent::Examine {
            from,
            to,
            state: NodeState::OnStack,
        } = event
        {
            let nodes = dfs.active_path_from(to);
            debug_assert_eq!(nodes.last(), Some(&from));
            trace!(from, to, len = nodes.len(), "back edge closes cycle");

            return Some(Cycle {
                spans_graph: nodes.len() == graph.len(),
                nodes,
            });
        }
    }

    None
}

/// Cycle queries on graphs
pub trait CycleDetection {
    /// Returns some cycle of the graph or `None` if there is none.
    /// See [`CycleSearch::find`].
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjList::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 1)]);
    /// let cycle = g.find_cycle().unwrap();
    /// assert_eq!(cycle.closed_walk(), vec![1, 2, 3, 1]);
    /// assert!(!cycle.spans_graph());
    /// ```
    fn find_cycle(&self) -> Option<Cycle>;

    /// Returns *true* if the graph contains no cycle
    fn is_acyclic(&self) -> bool {
        self.find_cycle().is_none()
    }
}

impl<G> CycleDetection for G
where
    G: AdjacencyList + AdjacencyTest + GraphDirection + GraphEdgeOrder,
{
    fn find_cycle(&self) -> Option<Cycle> {
        CycleSearch::new().find(self)
    }
}

/// Returns a cycle of a labelled graph as closed walk of labels (the first label is repeated
/// at the end), or `None` if the graph is acyclic.
pub fn query_cycle<G, L>(graph: &LabelledGraph<G, L>) -> Option<Vec<L>>
where
    G: AdjacencyList + AdjacencyTest + GraphDirection + GraphEdgeOrder,
    L: Clone + Eq + Hash + Display,
{
    let cycle = graph.graph().find_cycle();
    debug!(
        len = cycle.as_ref().map(Cycle::len),
        spans_graph = cycle.as_ref().is_some_and(Cycle::spans_graph),
        "cycle query"
    );

    cycle.map(|c| graph.vertex_index().labels_of(c.closed_walk()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{gens::*, testing::init_test_logging};
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn assert_is_closed_walk<G: AdjacencyTest>(graph: &G, cycle: &Cycle) {
        assert!(!cycle.is_empty());
        assert_eq!(cycle.nodes().iter().unique().count(), cycle.len());
        for (&u, &v) in cycle.closed_walk().iter().tuple_windows() {
            assert!(graph.has_edge(u, v), "{u} -> {v} is not an edge");
        }
    }

    #[test]
    fn triangle() {
        init_test_logging();
        let graph: LabelledGraph<AdjList> = build_graph(
            ["A", "B", "C"].map(String::from),
            [("A", "B"), ("B", "C"), ("C", "A")]
                .map(|(a, b)| EdgeSpec::undirected(a.to_string(), b.to_string())),
        )
        .unwrap();

        assert_eq!(
            query_cycle(&graph),
            Some(["A", "B", "C", "A"].map(String::from).to_vec())
        );
        assert!(graph.graph().find_cycle().unwrap().spans_graph());
    }

    #[test]
    fn trees_are_acyclic() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);
        for n in 1..40 {
            let edges = (1..n).map(|u| (rng.random_range(0..u), u)).collect_vec();

            assert!(AdjList::from_edges(n, edges.iter()).is_acyclic());
            assert!(AdjMatrix::from_edges(n, edges.iter()).is_acyclic());
            assert!(IncidenceMatrix::from_edges(n, edges.iter()).is_acyclic());
        }

        assert!(AdjList::new(0).is_acyclic());
    }

    #[test]
    fn spanning_cycles() {
        for k in 3..20 {
            let mut graph = AdjMatrix::new(k);
            graph.connect_cycle((0..k).rev());

            let cycle = graph.find_cycle().unwrap();
            assert_eq!(cycle.len(), k as usize);
            assert!(cycle.spans_graph());
            assert_is_closed_walk(&graph, &cycle);
        }
    }

    #[test]
    fn sub_cycles() {
        for k in 3..12 {
            // a cycle on k nodes attached to a path of 3 nodes with an isolated node at the end
            let n = k + 4;
            let mut graph = IncidenceMatrix::new(n);
            graph.connect_path(0..3);
            graph.connect_cycle(2..2 + k);

            let cycle = graph.find_cycle().unwrap();
            assert_eq!(cycle.len(), k as usize);
            assert!(!cycle.spans_graph());
            assert_eq!(cycle.nodes()[0], 2);
            assert_is_closed_walk(&graph, &cycle);
        }
    }

    #[test]
    fn random_cycles_are_closed_walks() {
        let rng = &mut Pcg64Mcg::seed_from_u64(17);
        for n in 2..30 {
            for directed in [false, true] {
                let mut graph = AdjList::new(n);
                for _ in 0..n {
                    let u = rng.random_range(0..n);
                    let v = rng.random_range(0..n);
                    graph.try_add_edge(u, v, directed, 1).unwrap();
                }

                if let Some(cycle) = graph.find_cycle() {
                    assert_is_closed_walk(&graph, &cycle);
                }
            }
        }
    }

    #[test]
    fn directed() {
        assert!(AdjList::from_arcs(3, [(0, 1), (1, 2)]).is_acyclic());
        assert!(AdjMatrix::from_arcs(4, [(0, 1), (0, 2), (1, 3), (2, 3)]).is_acyclic());

        let graph = AdjList::from_arcs(4, [(3, 0), (0, 1), (1, 2), (2, 0)]);
        let cycle = graph.find_cycle().unwrap();
        assert_eq!(cycle.nodes(), &[0, 1, 2]);
        assert!(!cycle.spans_graph());

        // undirected edges in a digraph are pairs of opposite arcs
        let mut mixed = AdjList::new(3);
        mixed.add_arc(0, 1);
        mixed.add_edge(1, 2);
        assert_eq!(mixed.find_cycle().unwrap().nodes(), &[1, 2]);
        assert!(
            CycleSearch::new()
                .treat_as_directed(false)
                .find(&mixed)
                .is_none()
        );
    }

    #[test]
    fn opposite_arcs() {
        let graph = AdjList::from_arcs(2, [(0, 1), (1, 0)]);
        assert_eq!(graph.find_cycle().unwrap().nodes(), &[0, 1]);

        // without orientation the two arcs are a single edge
        assert!(
            CycleSearch::new()
                .treat_as_directed(false)
                .find(&graph)
                .is_none()
        );

        let graph = AdjMatrix::from_arcs(2, [(0, 1), (1, 0), (0, 1)]);
        let cycle = CycleSearch::new()
            .treat_as_directed(false)
            .find(&graph)
            .unwrap();
        assert_eq!(cycle.nodes(), &[0, 1]);
    }

    #[test]
    fn loops_and_parallel_edges() {
        let graph = AdjList::from_edges(2, [(0, 1), (1, 1)]);
        let cycle = graph.find_cycle().unwrap();
        assert_eq!(cycle.closed_walk(), vec![1, 1]);

        let mut graph = AdjMatrix::new(3);
        graph.add_edge(1, 2);
        graph.try_add_edge(0, 1, false, 2).unwrap();
        let cycle = graph.find_cycle().unwrap();
        assert_eq!(cycle.closed_walk(), vec![0, 1, 0]);
        assert_is_closed_walk(&graph, &cycle);
    }

    #[test]
    fn deep_cycle() {
        let n = 100_000;
        let mut graph = AdjList::new(n);
        graph.connect_cycle(0..n);

        let cycle = graph.find_cycle().unwrap();
        assert!(cycle.spans_graph());
        assert_eq!(cycle.nodes()[..3], [0, 1, 2]);
    }
}
