//! Stepwise graph search over a [`Board`](pathlab_core::Board).
//!
//! Six strategies share one neighbor model and one observable
//! [`SearchState`]:
//!
//! | Algorithm | Frontier | Path found |
//! |---|---|---|
//! | BFS ([`Bfs`]) | FIFO queue | fewest edges |
//! | DFS ([`Dfs`]) | LIFO stack | first by neighbor order |
//! | UCS ([`Ucs`]) | min-heap on cost | cheapest |
//! | DLS ([`Dls`]) | frame stack, depth-bounded | any within the limit |
//! | IDDFS ([`Iddfs`]) | DLS with limits 1, 2, 3, … | within the first limit that succeeds |
//! | Bidirectional ([`Bidirectional`]) | two FIFO queues | where the two searches meet |
//!
//! Each algorithm is a stepper: one call to `step` expands one node and
//! returns, leaving the state consistent for an observer. [`SearchContext`]
//! owns the board and the state, drives one run at a time, and turns the
//! final step into a [`Status`].
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, DFS, DLS, IDDFS, Bidirectional |
//! | [`WeightedPather`] : [`Pather`] | UCS, [`SearchContext`] |

mod bfs;
mod bidir;
mod bounded;
mod context;
mod dfs;
mod neighbors;
mod runner;
mod state;
mod traits;
mod ucs;

#[cfg(test)]
mod testutil;

pub use bfs::Bfs;
pub use bidir::Bidirectional;
pub use bounded::{Dls, Iddfs};
pub use context::{Progress, SearchContext, SearchError};
pub use dfs::Dfs;
pub use neighbors::{DIAGONAL_COST, DIRECTIONS, Neighbors, ORTHOGONAL_COST, step_cost};
pub use runner::Runner;
pub use state::{Algorithm, DEFAULT_DEPTH_LIMIT, SearchState, Status, Step, path_cost};
pub use traits::{Pather, WeightedPather};
pub use ucs::Ucs;
