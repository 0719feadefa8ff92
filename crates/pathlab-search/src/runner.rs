use pathlab_core::Cell;

use crate::bfs::Bfs;
use crate::bidir::Bidirectional;
use crate::bounded::{Dls, Iddfs};
use crate::dfs::Dfs;
use crate::state::{Algorithm, SearchState, Step};
use crate::traits::WeightedPather;
use crate::ucs::Ucs;

/// An in-progress run of one of the six algorithms.
#[derive(Debug, Clone)]
pub enum Runner {
    Bfs(Bfs),
    Dfs(Dfs),
    Ucs(Ucs),
    Dls(Dls),
    Iddfs(Iddfs),
    Bidirectional(Bidirectional),
}

impl Runner {
    /// Seed `state` and prepare a run of `algorithm`. `depth_limit` applies
    /// to DLS; `max_depth` caps the IDDFS limit.
    pub fn new(
        algorithm: Algorithm,
        start: Cell,
        end: Cell,
        depth_limit: usize,
        max_depth: usize,
        state: &mut SearchState,
    ) -> Self {
        match algorithm {
            Algorithm::Bfs => Self::Bfs(Bfs::new(start, end, state)),
            Algorithm::Dfs => Self::Dfs(Dfs::new(start, end, state)),
            Algorithm::Ucs => Self::Ucs(Ucs::new(start, end, state)),
            Algorithm::Dls => Self::Dls(Dls::new(start, end, depth_limit, state)),
            Algorithm::Iddfs => Self::Iddfs(Iddfs::new(start, end, max_depth, state)),
            Algorithm::Bidirectional => {
                Self::Bidirectional(Bidirectional::new(start, end, state))
            }
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Bfs(_) => Algorithm::Bfs,
            Self::Dfs(_) => Algorithm::Dfs,
            Self::Ucs(_) => Algorithm::Ucs,
            Self::Dls(_) => Algorithm::Dls,
            Self::Iddfs(_) => Algorithm::Iddfs,
            Self::Bidirectional(_) => Algorithm::Bidirectional,
        }
    }

    pub fn step<P: WeightedPather>(&mut self, pather: &P, state: &mut SearchState) -> Step {
        match self {
            Self::Bfs(s) => s.step(pather, state),
            Self::Dfs(s) => s.step(pather, state),
            Self::Ucs(s) => s.step(pather, state),
            Self::Dls(s) => s.step(pather, state),
            Self::Iddfs(s) => s.step(pather, state),
            Self::Bidirectional(s) => s.step(pather, state),
        }
    }
}
