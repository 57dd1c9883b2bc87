use std::{iter::Copied, slice::Iter};

use itertools::Itertools;

use super::*;

/// Representation using one neighbor array per node.
///
/// Neighbors are kept in insertion order; parallel edges are stored as repeated entries.
/// An undirected edge `{u, v}` appends `v` to `u` and `u` to `v` (a self-loop appends once).
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct AdjList {
    nbs: Vec<Vec<Node>>,
    num_edges: NumEdges,
    has_directed: bool,
}

impl AdjList {
    /// Builds the underlying undirected graph of `graph`: each edge `(u, v)` of `graph`
    /// becomes reachable from both endpoints.
    ///
    /// Undirected edges of `graph` already appear in both neighborhoods and are copied as is;
    /// only arcs are mirrored. The neighbor order of every node is preserved.
    /// Opposite arcs `u -> v` and `v -> u` look exactly like an undirected edge and therefore
    /// collapse into one undirected edge.
    pub fn underlying_undirected<G>(graph: &G) -> Self
    where
        G: AdjacencyList + AdjacencyTest + GraphDirection + GraphEdgeOrder,
    {
        let mut nbs: Vec<Vec<Node>> = graph
            .vertices()
            .map(|u| graph.neighbors_of(u).collect())
            .collect();

        if graph.has_directed_edges() {
            for u in graph.vertices() {
                for v in graph.neighbors_of(u).unique().filter(|&v| v != u) {
                    // arcs `u -> v` without a counterpart `v -> u` need a mirror entry
                    let missing = graph
                        .multiplicity_of(u, v)
                        .saturating_sub(graph.multiplicity_of(v, u));
                    for _ in 0..missing {
                        nbs[v as usize].push(u);
                    }
                }
            }
        }

        Self {
            nbs,
            num_edges: graph.number_of_edges(),
            has_directed: false,
        }
    }
}

impl GraphNodeOrder for AdjList {
    fn number_of_nodes(&self) -> NumNodes {
        self.nbs.len() as NumNodes
    }
}

impl GraphEdgeOrder for AdjList {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl GraphDirection for AdjList {
    fn has_directed_edges(&self) -> bool {
        self.has_directed
    }
}

impl AdjacencyList for AdjList {
    type NeighborIter<'a>
        = Copied<Iter<'a, Node>>
    where
        Self: 'a;

    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
        self.nbs[u as usize].iter().copied()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.nbs[u as usize].len() as NumNodes
    }
}

impl AdjacencyTest for AdjList {
    fn multiplicity_of(&self, u: Node, v: Node) -> Multiplicity {
        assert!(v < self.number_of_nodes());
        self.nbs[u as usize].iter().filter(|&&x| x == v).count() as Multiplicity
    }
}

impl GraphNew for AdjList {
    fn new(n: NumNodes) -> Self {
        Self {
            nbs: vec![Vec::new(); n as usize],
            num_edges: 0,
            has_directed: false,
        }
    }
}

impl GraphNodeEditing for AdjList {
    fn add_node(&mut self) -> Node {
        self.nbs.push(Vec::new());
        self.number_of_nodes() - 1
    }
}

impl GraphEdgeEditing for AdjList {
    fn try_add_edge(
        &mut self,
        u: Node,
        v: Node,
        directed: bool,
        multiplicity: Multiplicity,
    ) -> Result<()> {
        let num_edges = check_edge_insertion(self, u, v, multiplicity)?;

        for _ in 0..multiplicity {
            self.nbs[u as usize].push(v);
            if !directed && u != v {
                self.nbs[v as usize].push(u);
            }
        }

        self.num_edges = num_edges;
        self.has_directed |= directed;
        Ok(())
    }
}
