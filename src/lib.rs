/*!
`lgraphs` is a small graph data structure & algorithms library for **l**abelled graphs:
vertices carry arbitrary external labels (usually `String`s) while every algorithm works on
dense integer indices.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of vertices.
Labels are mapped onto these indices in insertion order by a
[`VertexIndex`](crate::utils::VertexIndex).
For **edges**, we use a simple tuple-struct `Edge(Node, Node)`.

### Directed vs Undirected

Every edge is either undirected or directed, and a graph may mix both:

- An **undirected** edge `{u, v}` appears in the neighborhoods of both endpoints,
  a self-loop `{u, u}` only once.
- A **directed** edge `u -> v` only appears in the neighborhood of `u`.

As soon as a graph holds a directed edge it is treated as a digraph by the algorithms that
care about orientation (cycle detection); connectivity and bipartiteness always work on the
underlying undirected graph.

Parallel edges are stored as **multiplicities**: adding an edge that already exists increases
its multiplicity.

### Available Representations

See the [`repr`] module for the full list of graph storage backends:

- [`AdjList`](crate::repr::AdjList)
- [`AdjMatrix`](crate::repr::AdjMatrix)
- [`IncidenceMatrix`](crate::repr::IncidenceMatrix) (undirected only)

All of them answer the same queries identically for the same edge set.

# Design

All algorithms are provided as configurable structs that one can alter to their needs using
either the *Builder* / *Setter* pattern before calling the configured algorithm on a graph.
The most commonly used functionality is also implemented via traits on the graph itself,
making it usable without configuring the algorithm beforehand.

Only structural misuse (unknown or duplicate vertices, mismatched sizes) is reported as
[`GraphError`]; "not connected" or "not isomorphic" are ordinary answers.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges, errors, basic graph operations, and all graph representations,
- [`algo`] includes the queries such as DFS (`graph.dfs(start_node)`), connected components, cycle detection, bipartiteness, isomorphism and degrees,
- [`gens`] includes deterministic substructures such as paths/cycles/cliques,
- [`utils`] includes the [`VertexIndex`](crate::utils::VertexIndex) between labels and nodes.

In most use-cases, `use lgraphs::{prelude::*, algo::*};` suffices for your needs.

```
use lgraphs::{prelude::*, algo::*};

let graph: LabelledGraph<AdjList> = build_graph(
    ["A", "B", "C"].map(String::from),
    [("A", "B"), ("B", "C"), ("C", "A")]
        .map(|(a, b)| EdgeSpec::undirected(a.to_string(), b.to_string())),
)
.unwrap();

assert!(query_connectivity(&graph).connected);
assert!(!query_bipartite(&graph));
assert_eq!(query_cycle(&graph).unwrap().len(), 4);
for label in ["A", "B", "C"] {
    assert_eq!(query_degree(&graph, label), Ok(2));
}
```
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;
pub mod utils;

pub use edge::*;
pub use error::*;
pub use node::*;

/// `lgraphs::prelude` includes definitions for nodes, edges and errors, all basic graph operation traits as well as all implemented representations.
pub mod prelude {
    pub use super::{edge::*, error::*, node::*, ops::*, repr::*};
}
