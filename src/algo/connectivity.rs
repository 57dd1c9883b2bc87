use std::iter::FusedIterator;

use itertools::Itertools;
use tracing::{debug, instrument};

use super::{traversal::*, *};

/// Decides whether nodes without any incident edge form components of their own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComponentPolicy {
    /// Every node is part of exactly one component; isolated nodes are singleton components
    #[default]
    IncludeIsolated,
    /// Nodes without incident edges are not reported (a self-loop counts as incident edge)
    ExcludeIsolated,
}

/// Iterator over the connected components of a graph whose neighborhoods are symmetric,
/// i.e. a graph without directed edges. Components are reported in the order of their smallest
/// node, each as the DFS preorder of its nodes.
///
/// For graphs with directed edges use [`Connectivity`] (which works on the underlying undirected
/// graph) or iterate over [`AdjList::underlying_undirected`].
pub struct ConnectedComponents<'a, G>
where
    G: AdjacencyList,
{
    graph: &'a G,
    dfs: DepthFirstSearch<'a, G>,
    policy: ComponentPolicy,
}

impl<'a, G> ConnectedComponents<'a, G>
where
    G: AdjacencyList,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            dfs: DepthFirstSearch::forest(graph).restart(false),
            policy: ComponentPolicy::default(),
        }
    }

    pub fn set_policy(&mut self, policy: ComponentPolicy) {
        self.policy = policy;
    }

    pub fn policy(mut self, policy: ComponentPolicy) -> Self {
        self.set_policy(policy);
        self
    }

    fn is_reported(&self, component: &[Node]) -> bool {
        match self.policy {
            ComponentPolicy::IncludeIsolated => true,
            ComponentPolicy::ExcludeIsolated => {
                component.len() > 1 || self.graph.degree_of(component[0]) > 0
            }
        }
    }
}

impl<G> Iterator for ConnectedComponents<'_, G>
where
    G: AdjacencyList,
{
    type Item = Vec<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let cc = self
                .dfs
                .by_ref()
                .filter_map(|event| match event {
                    DfsEvent::Discover { node, .. } => Some(node),
                    _ => None,
                })
                .collect_vec();

            if !cc.is_empty() && self.is_reported(&cc) {
                return Some(cc);
            }

            if !self.dfs.try_restart_at_unvisited() {
                return None;
            }
        }
    }
}

impl<G> FusedIterator for ConnectedComponents<'_, G> where G: AdjacencyList {}

/// Summary of a connectivity analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityReport {
    /// Every node is reachable from every other node (ignoring edge directions)
    pub connected: bool,
    /// Number of connected components with respect to the configured [`ComponentPolicy`]
    pub component_count: NumNodes,
}

/// Configurable (weak) connectivity analysis.
///
/// # Examples
/// ```
/// use lgraphs::{prelude::*, algo::*};
///
/// let g = AdjList::from_edges(5, [(0, 1), (2, 3)]);
///
/// assert_eq!(ComponentCounting::new().count(&g), 3);
/// assert_eq!(
///     ComponentCounting::new()
///         .policy(ComponentPolicy::ExcludeIsolated)
///         .count(&g),
///     2
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentCounting {
    policy: ComponentPolicy,
}

impl ComponentCounting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_policy(&mut self, policy: ComponentPolicy) {
        self.policy = policy;
    }

    pub fn policy(mut self, policy: ComponentPolicy) -> Self {
        self.set_policy(policy);
        self
    }

    /// Returns the (weakly) connected components of `graph`
    #[instrument(level = "trace", skip_all)]
    pub fn components<G>(&self, graph: &G) -> Vec<Vec<Node>>
    where
        G: AdjacencyList + AdjacencyTest + GraphDirection + GraphEdgeOrder,
    {
        if graph.has_directed_edges() {
            let undirected = AdjList::underlying_undirected(graph);
            ConnectedComponents::new(&undirected)
                .policy(self.policy)
                .collect()
        } else {
            ConnectedComponents::new(graph).policy(self.policy).collect()
        }
    }

    /// Returns the number of (weakly) connected components of `graph`
    pub fn count<G>(&self, graph: &G) -> NumNodes
    where
        G: AdjacencyList + AdjacencyTest + GraphDirection + GraphEdgeOrder,
    {
        self.components(graph).len() as NumNodes
    }

    /// Computes connectedness and the number of components in one go
    pub fn report<G>(&self, graph: &G) -> ConnectivityReport
    where
        G: AdjacencyList + AdjacencyTest + GraphDirection + GraphEdgeOrder,
    {
        let report = ConnectivityReport {
            connected: graph.is_connected(),
            component_count: self.count(graph),
        };
        debug!(
            connected = report.connected,
            components = report.component_count,
            "connectivity analysed"
        );
        report
    }
}

/// Connectivity queries on graphs. Edge directions are ignored.
pub trait Connectivity: AdjacencyList {
    /// Returns *true* if every node is reachable from node `0` in the underlying undirected
    /// graph. Graphs with at most one node are connected.
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{prelude::*, algo::*};
    ///
    /// assert!(AdjList::from_arcs(3, [(0, 1), (2, 1)]).is_connected());
    /// assert!(!AdjList::from_edges(3, [(0, 1)]).is_connected());
    /// ```
    fn is_connected(&self) -> bool;

    /// Returns the connected components; isolated nodes are singleton components
    fn connected_components(&self) -> Vec<Vec<Node>>;

    /// Returns the number of connected components; isolated nodes are counted
    fn number_of_connected_components(&self) -> NumNodes {
        self.connected_components().len() as NumNodes
    }
}

impl<G> Connectivity for G
where
    G: AdjacencyList + AdjacencyTest + GraphDirection + GraphEdgeOrder,
{
    fn is_connected(&self) -> bool {
        if self.len() <= 1 {
            return true;
        }

        if self.has_directed_edges() {
            reaches_all_from_first(&AdjList::underlying_undirected(self))
        } else {
            reaches_all_from_first(self)
        }
    }

    fn connected_components(&self) -> Vec<Vec<Node>> {
        ComponentCounting::new().components(self)
    }
}

fn reaches_all_from_first<G>(graph: &G) -> bool
where
    G: AdjacencyList,
{
    graph.dfs_order(0).count() == graph.len()
}

/// Analyses the connectivity of a labelled graph counting isolated vertices as components
pub fn query_connectivity<G, L>(graph: &LabelledGraph<G, L>) -> ConnectivityReport
where
    G: AdjacencyList + AdjacencyTest + GraphDirection + GraphEdgeOrder,
    L: Clone + Eq + Hash + Display,
{
    ComponentCounting::new().report(graph.graph())
}
