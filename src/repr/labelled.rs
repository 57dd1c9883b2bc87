use std::{borrow::Borrow, fmt::Display, hash::Hash};

use tracing::debug;

use super::*;
use crate::utils::VertexIndex;

/// A single edge declaration referring to vertices by label
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeSpec<L = String> {
    pub source: L,
    pub target: L,
    pub directed: bool,
    pub multiplicity: Multiplicity,
}

impl<L> EdgeSpec<L> {
    /// An undirected edge `{source, target}` occurring once
    pub fn undirected(source: L, target: L) -> Self {
        Self {
            source,
            target,
            directed: false,
            multiplicity: 1,
        }
    }

    /// A directed edge `source -> target` occurring once
    pub fn directed(source: L, target: L) -> Self {
        Self {
            source,
            target,
            directed: true,
            multiplicity: 1,
        }
    }

    /// Sets the number of parallel edges this declaration stands for
    pub fn with_multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = multiplicity;
        self
    }
}

impl<L> From<(L, L)> for EdgeSpec<L> {
    fn from((source, target): (L, L)) -> Self {
        Self::undirected(source, target)
    }
}

/// A graph store `G` whose nodes carry labels of type `L`.
///
/// All edge insertions go through the labels; the underlying store only ever sees
/// indices handed out by the [`VertexIndex`], so every stored index references a known vertex.
///
/// # Example
/// ```
/// use lgraphs::prelude::*;
///
/// let graph: LabelledGraph<AdjList> = LabelledGraph::build(
///     ["A", "B", "C"].map(String::from),
///     [("A", "B"), ("B", "C")].map(|(a, b)| EdgeSpec::undirected(a.to_string(), b.to_string())),
/// )
/// .unwrap();
///
/// assert_eq!(graph.index_of("C"), Ok(2));
/// assert_eq!(graph.graph().degree_of(1), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelledGraph<G, L = String> {
    index: VertexIndex<L>,
    graph: G,
}

impl<G, L> Default for LabelledGraph<G, L>
where
    G: GraphNew,
{
    fn default() -> Self {
        Self {
            index: VertexIndex::default(),
            graph: G::new(0),
        }
    }
}

impl<G, L> LabelledGraph<G, L>
where
    G: GraphNew + GraphNodeEditing + GraphEdgeEditing,
    L: Clone + Eq + Hash + Display,
{
    /// Creates a graph without any vertex
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from an ordered sequence of distinct labels and an ordered sequence of
    /// edge declarations. Vertices receive indices in the order of `labels`.
    ///
    /// # Errors
    /// Fails on the first construction error (`DuplicateVertex`, `UnknownVertex`,
    /// `InvalidMultiplicity`, or a representation specific error such as `DuplicateEdge`).
    /// Nothing is repaired; the caller has to rebuild from corrected input.
    pub fn build<LI, EI, E>(labels: LI, edges: EI) -> Result<Self>
    where
        LI: IntoIterator<Item = L>,
        EI: IntoIterator<Item = E>,
        E: Into<EdgeSpec<L>>,
    {
        let labels = labels.into_iter();
        let mut index = VertexIndex::with_capacity(labels.size_hint().0);
        for label in labels {
            index.add_vertex(label)?;
        }

        // allocate the store once; growing a matrix node by node copies it every time
        let mut graph = Self {
            graph: G::new(index.len() as NumNodes),
            index,
        };

        for spec in edges {
            let spec = spec.into();
            graph.add_edge(&spec.source, &spec.target, spec.directed, spec.multiplicity)?;
        }

        debug!(
            nodes = graph.graph.number_of_nodes(),
            "built labelled graph"
        );
        Ok(graph)
    }

    /// Adds a new vertex and returns its index.
    /// For an [`AdjMatrix`] this copies the whole matrix, prefer [`LabelledGraph::build`]
    /// if all labels are known upfront.
    ///
    /// # Errors
    /// Returns `DuplicateVertex` if `label` is already present.
    pub fn add_vertex(&mut self, label: L) -> Result<Node> {
        let node = self.index.add_vertex(label)?;
        let added = self.graph.add_node();
        debug_assert_eq!(node, added);
        Ok(node)
    }

    /// Inserts `multiplicity` edges between the vertices labelled `source` and `target`.
    ///
    /// # Errors
    /// - `UnknownVertex` if one of the labels is unknown,
    /// - `InvalidMultiplicity` if `multiplicity == 0`,
    /// - errors of the underlying store, reported with labels instead of indices.
    pub fn add_edge<Q>(
        &mut self,
        source: &Q,
        target: &Q,
        directed: bool,
        multiplicity: Multiplicity,
    ) -> Result<()>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        let u = self.index.index_of(source)?;
        let v = self.index.index_of(target)?;
        self.graph
            .try_add_edge(u, v, directed, multiplicity)
            .map_err(|err| err.relabel_edge(source.to_string(), target.to_string()))
    }
}

impl<G, L> LabelledGraph<G, L>
where
    L: Clone + Eq + Hash + Display,
{
    /// Returns the underlying store
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Returns the mapping between labels and nodes
    pub fn vertex_index(&self) -> &VertexIndex<L> {
        &self.index
    }

    /// Splits the graph into its label mapping and store
    pub fn into_parts(self) -> (VertexIndex<L>, G) {
        (self.index, self.graph)
    }

    /// Returns the node of `label`.
    ///
    /// # Errors
    /// Returns `UnknownVertex` if `label` is unknown.
    pub fn index_of<Q>(&self, label: &Q) -> Result<Node>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        self.index.index_of(label)
    }

    /// Returns the label of `u` if `u < n`
    pub fn label_of(&self, u: Node) -> Option<&L> {
        self.index.label_of(u)
    }
}

/// Builds a labelled graph in the representation `G`.
/// Shorthand for [`LabelledGraph::build`].
pub fn build_graph<G, L, LI, EI, E>(labels: LI, edges: EI) -> Result<LabelledGraph<G, L>>
where
    G: GraphNew + GraphNodeEditing + GraphEdgeEditing,
    L: Clone + Eq + Hash + Display,
    LI: IntoIterator<Item = L>,
    EI: IntoIterator<Item = E>,
    E: Into<EdgeSpec<L>>,
{
    LabelledGraph::build(labels, edges)
}

#[cfg(test)]
mod test {
    use super::*;

    fn labels(ls: &[&str]) -> Vec<String> {
        ls.iter().map(|l| l.to_string()).collect()
    }

    fn edge(a: &str, b: &str) -> EdgeSpec {
        EdgeSpec::undirected(a.to_string(), b.to_string())
    }

    #[test]
    fn build_list_and_matrix() {
        let edges = vec![
            edge("A", "B"),
            edge("B", "C").with_multiplicity(2),
            EdgeSpec::directed("C".to_string(), "A".to_string()),
        ];

        let list: LabelledGraph<AdjList> =
            build_graph(labels(&["A", "B", "C"]), edges.clone()).unwrap();
        let matrix: LabelledGraph<AdjMatrix> =
            build_graph(labels(&["A", "B", "C"]), edges).unwrap();

        for (u, v, m) in [(0, 1, 1), (1, 2, 2), (2, 1, 2), (2, 0, 1), (0, 2, 0)] {
            assert_eq!(list.graph().multiplicity_of(u, v), m);
            assert_eq!(matrix.graph().multiplicity_of(u, v), m);
        }

        assert_eq!(list.label_of(2).map(String::as_str), Some("C"));
        assert!(list.graph().has_directed_edges());
    }

    #[test]
    fn construction_errors() {
        let dup: Result<LabelledGraph<AdjList>> = build_graph(labels(&["A", "A"]), Vec::<EdgeSpec>::new());
        assert_eq!(dup, Err(GraphError::DuplicateVertex("A".into())));

        let unknown: Result<LabelledGraph<AdjList>> =
            build_graph(labels(&["A", "B"]), vec![edge("A", "Q")]);
        assert_eq!(unknown, Err(GraphError::UnknownVertex("Q".into())));

        let zero: Result<LabelledGraph<AdjMatrix>> =
            build_graph(labels(&["A", "B"]), vec![edge("A", "B").with_multiplicity(0)]);
        assert_eq!(zero, Err(GraphError::InvalidMultiplicity));

        let duplicate_edge: Result<LabelledGraph<IncidenceMatrix>> = build_graph(
            labels(&["A", "B"]),
            vec![edge("A", "B"), edge("B", "A")],
        );
        assert_eq!(
            duplicate_edge,
            Err(GraphError::DuplicateEdge("B".into(), "A".into()))
        );
    }

    #[test]
    fn build_large_matrix() {
        let n = 2000;
        let names = (0..n).map(|i| format!("v{i}")).collect::<Vec<_>>();
        let edges = names
            .iter()
            .zip(names.iter().skip(1))
            .map(|(a, b)| edge(a, b))
            .collect::<Vec<_>>();

        let graph: LabelledGraph<AdjMatrix> = build_graph(names, edges).unwrap();
        assert_eq!(graph.graph().number_of_nodes(), n);
        assert_eq!(graph.graph().number_of_edges(), n - 1);
        assert_eq!(graph.index_of("v1999"), Ok(1999));
        assert!(graph.graph().has_edge(1998, 1999));
        assert_eq!(graph.graph().degree_of(0), 1);
        assert_eq!(graph.vertex_index().len(), n as usize);
    }

    #[test]
    fn incremental_construction() {
        let mut graph: LabelledGraph<IncidenceMatrix, u32> = LabelledGraph::new();
        assert_eq!(graph.add_vertex(7), Ok(0));
        assert_eq!(graph.add_vertex(3), Ok(1));
        graph.add_edge(&7, &3, false, 4).unwrap();

        assert_eq!(
            graph.add_edge(&3, &7, true, 1),
            Err(GraphError::DirectedIncidenceEdge("3".into(), "7".into()))
        );
        assert_eq!(graph.graph().to_rows(), vec![vec![4], vec![4]]);

        let (index, store) = graph.into_parts();
        assert_eq!(index.labels(), &[7, 3]);
        assert_eq!(store.number_of_columns(), 1);
    }
}
