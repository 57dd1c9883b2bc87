/*!
# Representations

Three interchangeable stores for the same abstract multigraph:

- [`AdjList`] : one neighbor array per node in insertion order,
- [`AdjMatrix`] : dense `n x n` matrix of multiplicities,
- [`IncidenceMatrix`] : node-by-edge matrix with one column per unordered pair (undirected only).

All of them implement the traits of [`ops`](crate::ops), so every algorithm works on every store.
[`LabelledGraph`] couples a store with a [`VertexIndex`](crate::utils::VertexIndex) to address
nodes by label.
*/

use crate::{ops::*, *};

mod adj_list;
mod incidence;
mod labelled;
mod matrix;

pub use adj_list::*;
pub use incidence::*;
pub use labelled::*;
pub use matrix::*;

use crate::testing::test_graph_ops;

test_graph_ops!(
    test_adj_list,
    AdjList,
    (GraphNew, AdjacencyList, AdjacencyTest, GraphNodeEditing)
);
test_graph_ops!(
    test_adj_list_directed,
    AdjList,
    directed,
    (AdjacencyList, AdjacencyTest)
);
test_graph_ops!(
    test_adj_matrix,
    AdjMatrix,
    (GraphNew, AdjacencyList, AdjacencyTest, GraphNodeEditing)
);
test_graph_ops!(
    test_adj_matrix_directed,
    AdjMatrix,
    directed,
    (AdjacencyList, AdjacencyTest)
);
test_graph_ops!(
    test_incidence_matrix,
    IncidenceMatrix,
    (GraphNew, AdjacencyList, AdjacencyTest, GraphNodeEditing)
);
