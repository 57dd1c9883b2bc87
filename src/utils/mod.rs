/*!
# Utilities

Helper structures that are shared by all representations, currently the
[`VertexIndex`] mapping external labels to dense node indices.
*/

pub mod vertex_index;

pub use vertex_index::VertexIndex;
