use super::*;

/// Representation using a dense `n x n` matrix of edge multiplicities.
///
/// Cell `(u, v)` stores how many edges lead from `u` to `v` (`0` = no edge).
/// Undirected edges increment both `(u, v)` and `(v, u)`, so the matrix is symmetric
/// as long as no directed edge was inserted. Self-loops increment their diagonal cell once.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AdjMatrix {
    n: NumNodes,
    cells: Vec<Multiplicity>,
    num_edges: NumEdges,
    has_directed: bool,
}

impl AdjMatrix {
    /// Builds a matrix from explicit rows where `rows[u][v]` is the multiplicity of `(u, v)`.
    /// Mirrored entries are read as undirected edges; the graph reports directed edges
    /// iff the input is not symmetric.
    ///
    /// # Errors
    /// - `NonSquareMatrix` if some row does not have exactly `rows.len()` entries,
    /// - `MultiplicityOverflow` if the matrix holds more than `u32::MAX` edges.
    ///
    /// # Example
    /// ```
    /// use lgraphs::prelude::*;
    ///
    /// let rows: Vec<Vec<Multiplicity>> = vec![vec![0, 1], vec![1, 0]];
    /// let m = AdjMatrix::try_from_rows(&rows).unwrap();
    /// assert!(m.has_edge(0, 1));
    /// assert!(!m.has_directed_edges());
    /// ```
    pub fn try_from_rows<R>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[Multiplicity]>,
    {
        let n = rows.len();
        let mut cells = Vec::with_capacity(n * n);
        for (row, entries) in rows.iter().enumerate() {
            let entries = entries.as_ref();
            if entries.len() != n {
                return Err(GraphError::NonSquareMatrix {
                    row,
                    len: entries.len(),
                    expected: n,
                });
            }
            cells.extend_from_slice(entries);
        }

        let mut num_edges: NumEdges = 0;
        let mut has_directed = false;
        for u in 0..n {
            for v in u..n {
                let (uv, vu) = (cells[u * n + v], cells[v * n + u]);
                // mirrored parts are undirected edges, the surplus is directed
                let added = if u == v { uv } else { uv.max(vu) };
                has_directed |= uv != vu;
                num_edges = num_edges.checked_add(added).ok_or_else(|| {
                    GraphError::MultiplicityOverflow(u.to_string(), v.to_string())
                })?;
            }
        }

        Ok(Self {
            n: n as NumNodes,
            cells,
            num_edges,
            has_directed,
        })
    }

    /// Returns the matrix as a vector of rows
    pub fn to_rows(&self) -> Vec<Vec<Multiplicity>> {
        self.cells
            .chunks(self.n.max(1) as usize)
            .take(self.n as usize)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Returns the row of `u`, i.e. the multiplicities of all edges leaving `u`.
    /// ** Panics if `u >= n` **
    pub fn row(&self, u: Node) -> &[Multiplicity] {
        let n = self.n as usize;
        &self.cells[u as usize * n..(u as usize + 1) * n]
    }

    fn cell_mut(&mut self, u: Node, v: Node) -> &mut Multiplicity {
        &mut self.cells[u as usize * self.n as usize + v as usize]
    }
}

impl std::fmt::Debug for AdjMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.to_rows()).finish()
    }
}

/// Iterator over the neighbors of a node in an [`AdjMatrix`].
/// Neighbors are produced in increasing order, each as often as its multiplicity.
#[derive(Clone, Debug)]
pub struct MatrixNeighborIter<'a> {
    row: &'a [Multiplicity],
    column: usize,
    remaining: Multiplicity,
}

impl Iterator for MatrixNeighborIter<'_> {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining == 0 {
            self.column += 1;
            self.remaining = *self.row.get(self.column)?;
        }

        self.remaining -= 1;
        Some(self.column as Node)
    }
}

impl GraphNodeOrder for AdjMatrix {
    fn number_of_nodes(&self) -> NumNodes {
        self.n
    }
}

impl GraphEdgeOrder for AdjMatrix {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl GraphDirection for AdjMatrix {
    fn has_directed_edges(&self) -> bool {
        self.has_directed
    }
}

impl AdjacencyList for AdjMatrix {
    type NeighborIter<'a>
        = MatrixNeighborIter<'a>
    where
        Self: 'a;

    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
        let row = self.row(u);
        MatrixNeighborIter {
            row,
            column: 0,
            remaining: row.first().copied().unwrap_or(0),
        }
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.row(u).iter().sum()
    }
}

impl AdjacencyTest for AdjMatrix {
    fn multiplicity_of(&self, u: Node, v: Node) -> Multiplicity {
        assert!(v < self.n);
        self.row(u)[v as usize]
    }
}

impl GraphNew for AdjMatrix {
    fn new(n: NumNodes) -> Self {
        Self {
            n,
            cells: vec![0; n as usize * n as usize],
            num_edges: 0,
            has_directed: false,
        }
    }
}

impl GraphNodeEditing for AdjMatrix {
    fn add_node(&mut self) -> Node {
        let old = self.n as usize;
        let mut cells = vec![0; (old + 1) * (old + 1)];
        for (u, row) in self.cells.chunks(old.max(1)).take(old).enumerate() {
            cells[u * (old + 1)..u * (old + 1) + old].copy_from_slice(row);
        }

        self.cells = cells;
        self.n += 1;
        old as Node
    }
}

impl GraphEdgeEditing for AdjMatrix {
    fn try_add_edge(
        &mut self,
        u: Node,
        v: Node,
        directed: bool,
        multiplicity: Multiplicity,
    ) -> Result<()> {
        let num_edges = check_edge_insertion(self, u, v, multiplicity)?;

        *self.cell_mut(u, v) += multiplicity;
        if !directed && u != v {
            *self.cell_mut(v, u) += multiplicity;
        }

        self.num_edges = num_edges;
        self.has_directed |= directed;
        Ok(())
    }
}
