use std::collections::{HashMap, VecDeque};

use pathlab_core::Cell;

use crate::state::{SearchState, Step, rebuild_path};
use crate::traits::Pather;

/// Bidirectional breadth-first search.
///
/// One FIFO queue grows from the start and another from the end. Each step
/// pops at most one cell from each side, so the two searches meet at
/// single-cell granularity. The forward predecessor map is the state's
/// `came_from`; the backward one is kept here.
#[derive(Debug, Clone)]
pub struct Bidirectional {
    fwd: VecDeque<Cell>,
    bwd: VecDeque<Cell>,
    bwd_from: HashMap<Cell, Option<Cell>>,
    nbuf: Vec<Cell>,
}

impl Bidirectional {
    pub fn new(start: Cell, end: Cell, state: &mut SearchState) -> Self {
        state.seed(start);
        state.frontier.insert(end);
        Self {
            fwd: VecDeque::from([start]),
            bwd: VecDeque::from([end]),
            bwd_from: HashMap::from([(end, None)]),
            nbuf: Vec::with_capacity(6),
        }
    }

    /// Backward predecessor map; the end maps to `None`.
    pub fn backward(&self) -> &HashMap<Cell, Option<Cell>> {
        &self.bwd_from
    }

    pub fn step<P: Pather>(&mut self, pather: &P, state: &mut SearchState) -> Step {
        if self.fwd.is_empty() && self.bwd.is_empty() {
            return Step::Exhausted;
        }

        if let Some(current) = self.fwd.pop_front() {
            state.settle(current);
            if self.bwd_from.contains_key(&current) {
                return Step::Found(self.join(current, state));
            }
            self.nbuf.clear();
            pather.neighbors(current, &mut self.nbuf);
            for &nb in &self.nbuf {
                if !state.came_from.contains_key(&nb) {
                    state.discover(nb, current);
                    self.fwd.push_back(nb);
                }
            }
        }

        if let Some(current) = self.bwd.pop_front() {
            state.settle(current);
            if state.came_from.contains_key(&current) {
                return Step::Found(self.join(current, state));
            }
            self.nbuf.clear();
            pather.neighbors(current, &mut self.nbuf);
            for &nb in &self.nbuf {
                if !self.bwd_from.contains_key(&nb) {
                    self.bwd_from.insert(nb, Some(current));
                    if !state.is_explored(nb) {
                        state.frontier.insert(nb);
                    }
                    self.bwd.push_back(nb);
                }
            }
        }

        Step::Expanded
    }

    /// Start-to-meeting half from the forward map, then meeting-to-end from
    /// the backward map.
    fn join(&self, meeting: Cell, state: &SearchState) -> Vec<Cell> {
        let mut path = rebuild_path(&state.came_from, meeting);
        let mut cur = self.bwd_from.get(&meeting).copied().flatten();
        while let Some(c) = cur {
            path.push(c);
            cur = self.bwd_from.get(&c).copied().flatten();
        }
        path
    }
}
