/*!
# Graph Algorithms

This module provides the **graph queries** built on top of the representations in this crate.
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use lgraphs::algo::*;
```
and gain access to traversal, connectivity, cycle detection, bipartiteness, isomorphism and
the degree/multiplicity reporters.
Every query is available as trait method on the raw graphs and as `query_*` function on
[`LabelledGraph`](crate::repr::LabelledGraph).
If possible, algorithms are provided as **iterators**, making it easy to consume results lazily.
*/

mod bipartite;
mod connectivity;
mod cycle;
mod degree;
mod isomorphism;
mod multiplicity;
mod traversal;

use std::{borrow::Borrow, fmt::Display, hash::Hash};

use crate::{prelude::*, utils::*};

pub use bipartite::*;
pub use connectivity::*;
pub use cycle::*;
pub use degree::*;
pub use isomorphism::*;
pub use multiplicity::*;
pub use traversal::*;
