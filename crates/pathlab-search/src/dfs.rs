use std::collections::HashSet;

use pathlab_core::Cell;

use crate::state::{SearchState, Step};
use crate::traits::Pather;

/// Depth-first search with an explicit LIFO stack.
///
/// Neighbors are pushed in enumeration order and marked visited when
/// pushed, so the last-enumerated neighbor is expanded first.
#[derive(Debug, Clone)]
pub struct Dfs {
    end: Cell,
    stack: Vec<Cell>,
    visited: HashSet<Cell>,
    nbuf: Vec<Cell>,
}

impl Dfs {
    /// Start a search from `start` towards `end`, seeding `state`.
    pub fn new(start: Cell, end: Cell, state: &mut SearchState) -> Self {
        state.seed(start);
        Self {
            end,
            stack: vec![start],
            visited: HashSet::from([start]),
            nbuf: Vec::with_capacity(6),
        }
    }

    /// Pop and expand one cell.
    pub fn step<P: Pather>(&mut self, pather: &P, state: &mut SearchState) -> Step {
        let Some(current) = self.stack.pop() else {
            return Step::Exhausted;
        };
        state.settle(current);

        if current == self.end {
            return Step::Found(state.path_to(current));
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(current, &mut nbuf);
        for &nb in &nbuf {
            if self.visited.insert(nb) {
                state.discover(nb, current);
                self.stack.push(nb);
            }
        }
        self.nbuf = nbuf;
        Step::Expanded
    }
}
