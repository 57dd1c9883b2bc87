use tracing::debug;

use super::*;

/// Returns the degree of the vertex labelled `label`, i.e. the number of entries in its
/// neighborhood. Parallel edges are counted per occurrence, a self-loop is counted once and
/// for directed edges only the outgoing ones are counted.
///
/// # Errors
/// Returns `UnknownVertex` if `label` is not a vertex of the graph.
///
/// # Examples
/// ```
/// use lgraphs::{prelude::*, algo::*};
///
/// let graph: LabelledGraph<AdjList> = build_graph(
///     ["A", "B"].map(String::from),
///     [EdgeSpec::undirected("A".to_string(), "B".to_string()).with_multiplicity(2)],
/// )
/// .unwrap();
///
/// assert_eq!(query_degree(&graph, "A"), Ok(2));
/// assert!(query_degree(&graph, "C").is_err());
/// ```
pub fn query_degree<G, L, Q>(graph: &LabelledGraph<G, L>, label: &Q) -> Result<NumNodes>
where
    G: AdjacencyList,
    L: Clone + Eq + Hash + Display + Borrow<Q>,
    Q: Hash + Eq + Display + ?Sized,
{
    let u = graph.index_of(label)?;
    let degree = graph.graph().degree_of(u);
    debug!(vertex = %label, degree, "degree query");
    Ok(degree)
}

/// Returns all vertices together with their degree in index order
pub fn query_degrees<G, L>(graph: &LabelledGraph<G, L>) -> Vec<(&L, NumNodes)>
where
    G: AdjacencyList,
    L: Clone + Eq + Hash + Display,
{
    graph
        .vertex_index()
        .iter()
        .map(|(u, label)| (label, graph.graph().degree_of(u)))
        .collect()
}
