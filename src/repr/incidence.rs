use fxhash::FxHashMap;
use itertools::Itertools;

use super::*;

/// A single edge column of an [`IncidenceMatrix`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IncidenceColumn {
    /// The normalized endpoints of the edge
    pub edge: Edge,
    /// The value both endpoints contribute to this column
    pub multiplicity: Multiplicity,
}

/// Representation using a vertex-by-edge incidence matrix.
///
/// Each *distinct unordered pair* of nodes owns exactly one column; both endpoints carry the
/// multiplicity of the edge in that column. Declaring the same pair again is rejected with
/// [`GraphError::DuplicateEdge`] instead of accumulating. Only undirected edges are supported.
///
/// Columns are stored sparsely (endpoints + multiplicity), the dense view is available via
/// [`IncidenceMatrix::to_rows`].
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct IncidenceMatrix {
    columns: Vec<IncidenceColumn>,
    incident: Vec<Vec<EdgeId>>,
    pair_to_column: FxHashMap<Edge, EdgeId>,
    num_edges: NumEdges,
}

impl IncidenceMatrix {
    /// Returns the number of edge columns
    pub fn number_of_columns(&self) -> NumEdges {
        self.columns.len() as NumEdges
    }

    /// Returns all columns in insertion order
    pub fn columns(&self) -> &[IncidenceColumn] {
        &self.columns
    }

    /// Returns the column that was assigned to the unordered pair `{u, v}`, if any
    pub fn column_of(&self, u: Node, v: Node) -> Option<EdgeId> {
        self.pair_to_column.get(&Edge(u, v).normalized()).copied()
    }

    /// Returns the value of cell `(u, e)`
    /// ** Panics if `u >= n` or `e` is not a column **
    pub fn incidence(&self, u: Node, e: EdgeId) -> Multiplicity {
        assert!(u < self.number_of_nodes());
        let column = self.columns[e as usize];
        if column.edge.0 == u || column.edge.1 == u {
            column.multiplicity
        } else {
            0
        }
    }

    /// Returns the dense `n x m` matrix where rows are nodes and columns are edges
    pub fn to_rows(&self) -> Vec<Vec<Multiplicity>> {
        self.vertices()
            .map(|u| {
                (0..self.number_of_columns())
                    .map(|e| self.incidence(u, e))
                    .collect_vec()
            })
            .collect()
    }
}

/// Iterator over the neighbors of a node in an [`IncidenceMatrix`].
/// Walks the incident columns in column order, repeating each neighbor by its multiplicity.
#[derive(Clone, Debug)]
pub struct IncidenceNeighborIter<'a> {
    node: Node,
    columns: &'a [IncidenceColumn],
    incident: std::slice::Iter<'a, EdgeId>,
    current: Option<Node>,
    remaining: Multiplicity,
}

impl Iterator for IncidenceNeighborIter<'_> {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining == 0 {
            let column = self.columns[*self.incident.next()? as usize];
            self.current = Some(column.edge.opposite_of(self.node));
            self.remaining = column.multiplicity;
        }

        self.remaining -= 1;
        self.current
    }
}

impl GraphNodeOrder for IncidenceMatrix {
    fn number_of_nodes(&self) -> NumNodes {
        self.incident.len() as NumNodes
    }
}

impl GraphEdgeOrder for IncidenceMatrix {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl GraphDirection for IncidenceMatrix {
    fn has_directed_edges(&self) -> bool {
        false
    }
}

impl AdjacencyList for IncidenceMatrix {
    type NeighborIter<'a>
        = IncidenceNeighborIter<'a>
    where
        Self: 'a;

    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
        IncidenceNeighborIter {
            node: u,
            columns: &self.columns,
            incident: self.incident[u as usize].iter(),
            current: None,
            remaining: 0,
        }
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.incident[u as usize]
            .iter()
            .map(|&e| self.columns[e as usize].multiplicity)
            .sum()
    }
}

impl AdjacencyTest for IncidenceMatrix {
    fn multiplicity_of(&self, u: Node, v: Node) -> Multiplicity {
        assert!(u < self.number_of_nodes() && v < self.number_of_nodes());
        self.column_of(u, v)
            .map_or(0, |e| self.columns[e as usize].multiplicity)
    }
}

impl GraphNew for IncidenceMatrix {
    fn new(n: NumNodes) -> Self {
        Self {
            columns: Vec::new(),
            incident: vec![Vec::new(); n as usize],
            pair_to_column: FxHashMap::default(),
            num_edges: 0,
        }
    }
}

impl GraphNodeEditing for IncidenceMatrix {
    fn add_node(&mut self) -> Node {
        self.incident.push(Vec::new());
        self.number_of_nodes() - 1
    }
}

impl GraphEdgeEditing for IncidenceMatrix {
    /// Assigns a new column to the unordered pair `{u, v}`.
    ///
    /// # Errors
    /// Additionally to the common errors, fails with
    /// - `DirectedIncidenceEdge` if `directed` is set,
    /// - `DuplicateEdge` if `{u, v}` already owns a column.
    fn try_add_edge(
        &mut self,
        u: Node,
        v: Node,
        directed: bool,
        multiplicity: Multiplicity,
    ) -> Result<()> {
        let num_edges = check_edge_insertion(self, u, v, multiplicity)?;
        if directed {
            return Err(GraphError::DirectedIncidenceEdge(
                u.to_string(),
                v.to_string(),
            ));
        }

        let edge = Edge(u, v).normalized();
        if self.pair_to_column.contains_key(&edge) {
            return Err(GraphError::DuplicateEdge(u.to_string(), v.to_string()));
        }

        let id = self.number_of_columns();
        self.pair_to_column.insert(edge, id);
        self.columns.push(IncidenceColumn { edge, multiplicity });
        self.incident[u as usize].push(id);
        if u != v {
            self.incident[v as usize].push(id);
        }

        self.num_edges = num_edges;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn one_column_per_pair() {
        let mut graph = IncidenceMatrix::new(3);
        graph.try_add_edge(0, 1, false, 2).unwrap();
        graph.try_add_edge(2, 1, false, 1).unwrap();

        assert_eq!(
            graph.try_add_edge(1, 0, false, 5),
            Err(GraphError::DuplicateEdge("1".into(), "0".into()))
        );
        assert_eq!(
            graph.try_add_edge(0, 2, true, 1),
            Err(GraphError::DirectedIncidenceEdge("0".into(), "2".into()))
        );

        assert_eq!(graph.number_of_columns(), 2);
        assert_eq!(graph.number_of_edges(), 3);
        assert_eq!(graph.to_rows(), vec![vec![2, 0], vec![2, 1], vec![0, 1]]);
        assert_eq!(graph.column_of(1, 0), Some(0));
        assert_eq!(graph.column_of(0, 2), None);
        assert_eq!(graph.columns()[1].edge, Edge(1, 2));
    }

    #[test]
    fn neighbors_follow_columns() {
        let mut graph = IncidenceMatrix::new(4);
        graph.try_add_edge(1, 3, false, 1).unwrap();
        graph.try_add_edge(1, 0, false, 2).unwrap();
        graph.add_edge(1, 1);

        assert_eq!(graph.neighbors_of(1).collect_vec(), vec![3, 0, 0, 1]);
        assert_eq!(graph.neighbors_of(0).collect_vec(), vec![1, 1]);
        assert_eq!(graph.neighbors_of(2).count(), 0);
        assert_eq!(graph.degree_of(1), 4);
        assert_eq!(graph.multiplicity_of(0, 1), 2);
        assert_eq!(graph.incidence(1, 2), 1);
        assert_eq!(graph.incidence(2, 0), 0);
    }

    #[test]
    fn multiplicity_overflow() {
        let mut graph = IncidenceMatrix::new(3);
        graph.try_add_edge(0, 1, false, u32::MAX).unwrap();
        assert_eq!(
            graph.try_add_edge(1, 2, false, 1),
            Err(GraphError::MultiplicityOverflow("1".into(), "2".into()))
        );
        assert_eq!(graph.number_of_columns(), 1);
        assert_eq!(graph.number_of_edges(), u32::MAX);
        assert!(!graph.has_edge(1, 2));
        assert_eq!(graph.degree_of(1), u32::MAX);
    }

    #[test]
    #[should_panic]
    fn add_edge_panics_on_duplicate() {
        let mut graph = IncidenceMatrix::new(2);
        graph.add_edge(0, 1);
        graph.add_edge(1, 0);
    }
}
