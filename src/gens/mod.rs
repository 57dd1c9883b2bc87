/*!
# Graph Generators

Deterministic building blocks to add common substructures (paths, cycles, cliques) to an
existing graph of any representation. Mostly used to set up test instances.
*/

use crate::prelude::*;

mod substructures;

pub use substructures::*;
