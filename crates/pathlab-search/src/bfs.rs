use std::collections::{HashSet, VecDeque};

use pathlab_core::Cell;

use crate::state::{SearchState, Step};
use crate::traits::Pather;

/// Breadth-first search with a FIFO queue.
///
/// A cell is marked visited when it is enqueued, so it is never queued
/// twice. The path found has the fewest edges, ignoring diagonal weight.
#[derive(Debug, Clone)]
pub struct Bfs {
    end: Cell,
    queue: VecDeque<Cell>,
    visited: HashSet<Cell>,
    nbuf: Vec<Cell>,
}

impl Bfs {
    /// Start a search from `start` towards `end`, seeding `state`.
    pub fn new(start: Cell, end: Cell, state: &mut SearchState) -> Self {
        state.seed(start);
        Self {
            end,
            queue: VecDeque::from([start]),
            visited: HashSet::from([start]),
            nbuf: Vec::with_capacity(6),
        }
    }

    /// Dequeue and expand one cell.
    pub fn step<P: Pather>(&mut self, pather: &P, state: &mut SearchState) -> Step {
        let Some(current) = self.queue.pop_front() else {
            return Step::Exhausted;
        };
        state.settle(current);

        if current == self.end {
            return Step::Found(state.path_to(current));
        }

        self.nbuf.clear();
        pather.neighbors(current, &mut self.nbuf);
        for &nb in &self.nbuf {
            if self.visited.insert(nb) {
                state.discover(nb, current);
                self.queue.push_back(nb);
            }
        }
        Step::Expanded
    }
}
