//! Depth-bounded depth-first search, run once (DLS) or with growing limits
//! (IDDFS).
//!
//! Both walk an explicit stack of frames instead of recursing. One visited
//! set is shared by the whole tree of a single pass: a cell claimed by one
//! branch is never offered to another, even at a shallower depth. This makes
//! a pass incomplete within its depth bound.

use std::collections::HashSet;

use pathlab_core::Cell;

use crate::state::{SearchState, Step};
use crate::traits::Pather;

#[derive(Debug, Clone)]
struct Frame {
    cell: Cell,
    /// Remaining depth budget below this cell.
    depth: usize,
    neighbors: Vec<Cell>,
    next: usize,
}

/// One depth-bounded pass.
///
/// A step enters the child discovered by the previous step, then scans for
/// the next unvisited neighbor of the innermost frame, backtracking as
/// needed. Each discovery is a yield point.
#[derive(Debug, Clone)]
struct DepthBounded {
    end: Cell,
    stack: Vec<Frame>,
    visited: HashSet<Cell>,
    pending: Option<(Cell, usize)>,
    cut_off: bool,
}

impl DepthBounded {
    fn new(start: Cell, end: Cell, limit: usize, state: &mut SearchState) -> Self {
        state.seed(start);
        Self {
            end,
            stack: Vec::new(),
            visited: HashSet::from([start]),
            pending: Some((start, limit)),
            cut_off: false,
        }
    }

    fn step<P: Pather>(&mut self, pather: &P, state: &mut SearchState) -> Step {
        loop {
            if let Some((cell, depth)) = self.pending.take() {
                state.settle(cell);
                if cell == self.end {
                    return Step::Found(state.path_to(cell));
                }
                let mut neighbors = Vec::with_capacity(6);
                pather.neighbors(cell, &mut neighbors);
                if depth == 0 {
                    if neighbors.iter().any(|nb| !self.visited.contains(nb)) {
                        self.cut_off = true;
                    }
                } else {
                    self.stack.push(Frame {
                        cell,
                        depth,
                        neighbors,
                        next: 0,
                    });
                }
            }

            let Some(top) = self.stack.last_mut() else {
                return Step::Exhausted;
            };
            while let Some(&nb) = top.neighbors.get(top.next) {
                top.next += 1;
                if self.visited.insert(nb) {
                    state.discover(nb, top.cell);
                    self.pending = Some((nb, top.depth - 1));
                    return Step::Expanded;
                }
            }
            self.stack.pop();
        }
    }
}

// ---------------------------------------------------------------------------
// DLS
// ---------------------------------------------------------------------------

/// Depth-limited search: a single depth-bounded pass.
#[derive(Debug, Clone)]
pub struct Dls {
    limit: usize,
    pass: DepthBounded,
}

impl Dls {
    pub fn new(start: Cell, end: Cell, limit: usize, state: &mut SearchState) -> Self {
        state.depth_limit = Some(limit);
        Self {
            limit,
            pass: DepthBounded::new(start, end, limit, state),
        }
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn step<P: Pather>(&mut self, pather: &P, state: &mut SearchState) -> Step {
        self.pass.step(pather, state)
    }
}

// ---------------------------------------------------------------------------
// IDDFS
// ---------------------------------------------------------------------------

/// Iterative deepening: depth-bounded passes with limits `1..=max_limit`.
///
/// Every pass starts from a cleared trace. A pass in which no branch hit the
/// depth limit would be replayed unchanged by every deeper pass, so the
/// search stops there.
#[derive(Debug, Clone)]
pub struct Iddfs {
    start: Cell,
    end: Cell,
    limit: usize,
    max_limit: usize,
    pass: DepthBounded,
}

impl Iddfs {
    pub fn new(start: Cell, end: Cell, max_limit: usize, state: &mut SearchState) -> Self {
        state.depth_limit = Some(1);
        Self {
            start,
            end,
            limit: 1,
            max_limit,
            pass: DepthBounded::new(start, end, 1, state),
        }
    }

    /// Depth limit of the current pass.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn step<P: Pather>(&mut self, pather: &P, state: &mut SearchState) -> Step {
        loop {
            match self.pass.step(pather, state) {
                Step::Exhausted if self.pass.cut_off && self.limit < self.max_limit => {
                    self.limit += 1;
                    log::trace!("IDDFS: deepening to {}", self.limit);
                    state.clear_trace();
                    state.depth_limit = Some(self.limit);
                    self.pass = DepthBounded::new(self.start, self.end, self.limit, state);
                }
                step => return step,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::drive;
    use pathlab_core::{Board, Bounds};

    #[test]
    fn first_step_enters_root_and_offers_a_child() {
        let board = Board::parse("S..\n...\n..E").unwrap();
        let mut state = SearchState::new();
        let mut dls = Dls::new(Cell::new(0, 0), Cell::new(2, 2), 15, &mut state);
        assert_eq!(dls.step(&board, &mut state), Step::Expanded);
        assert_eq!(state.explored().len(), 1);
        assert!(state.is_explored(Cell::new(0, 0)));
        // First enumerated neighbor is Right.
        assert!(state.is_frontier(Cell::new(0, 1)));
        assert_eq!(state.frontier().len(), 1);
        assert_eq!(state.depth_limit(), Some(15));
    }

    #[test]
    fn dls_goes_deep_along_enumeration_order() {
        // Up is out of bounds, so Right is followed to the edge before Down.
        let board = Board::parse("S..\n..E").unwrap();
        let mut state = SearchState::new();
        let mut dls = Dls::new(Cell::new(0, 0), Cell::new(1, 2), 15, &mut state);
        let (last, _) = drive(|| dls.step(&board, &mut state));
        assert_eq!(
            last,
            Step::Found(vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(0, 2),
                Cell::new(1, 2),
            ])
        );
    }

    #[test]
    fn dls_respects_limit() {
        let board = Board::parse("S....E").unwrap();
        let mut state = SearchState::new();
        let mut dls = Dls::new(Cell::new(0, 0), Cell::new(0, 5), 3, &mut state);
        let (last, _) = drive(|| dls.step(&board, &mut state));
        assert_eq!(last, Step::Exhausted);
        // Cells at depth 0..=3 are entered.
        assert_eq!(state.explored().len(), 4);
        assert!(state.frontier().is_empty());
    }

    #[test]
    fn dls_end_reached_exactly_at_limit() {
        let board = Board::parse("S....E").unwrap();
        let mut state = SearchState::new();
        let mut dls = Dls::new(Cell::new(0, 0), Cell::new(0, 5), 5, &mut state);
        let (last, _) = drive(|| dls.step(&board, &mut state));
        let Step::Found(path) = last else {
            panic!("expected a path, got {last:?}");
        };
        assert_eq!(path.len() - 1, 5);
    }

    #[test]
    fn dls_shared_visited_blocks_shorter_route() {
        // The end is three steps right of the start. The first branch goes
        // Up and then along row 0, claiming (1,1) and (1,2) at the depth
        // limit. The direct route along row 1 finds them taken.
        let board = Board::parse("....\nS..E").unwrap();
        let mut state = SearchState::new();
        let mut dls = Dls::new(Cell::new(1, 0), Cell::new(1, 3), 3, &mut state);
        let (last, _) = drive(|| dls.step(&board, &mut state));
        assert_eq!(last, Step::Exhausted);
        let mut explored: Vec<_> = state.explored().iter().copied().collect();
        explored.sort();
        assert_eq!(
            explored,
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(0, 2),
                Cell::new(1, 0),
                Cell::new(1, 1),
                Cell::new(1, 2),
            ]
        );
    }

    #[test]
    fn frontier_holds_at_most_the_offered_child() {
        let board = Board::new(Bounds::new(4, 4));
        let mut state = SearchState::new();
        let mut dls = Dls::new(Cell::new(0, 0), Cell::new(3, 3), 2, &mut state);
        loop {
            match dls.step(&board, &mut state) {
                Step::Expanded => {
                    assert_eq!(state.frontier().len(), 1);
                    assert!(state.explored().is_disjoint(state.frontier()));
                }
                _ => break,
            }
        }
        assert!(state.frontier().is_empty());
    }

    #[test]
    fn iddfs_path_length_matches_limit() {
        let board = Board::parse("S....E").unwrap();
        let mut state = SearchState::new();
        let max = board.bounds().len();
        let mut iddfs = Iddfs::new(Cell::new(0, 0), Cell::new(0, 5), max, &mut state);
        let (last, _) = drive(|| iddfs.step(&board, &mut state));
        let Step::Found(path) = last else {
            panic!("expected a path, got {last:?}");
        };
        assert_eq!(iddfs.limit(), 5);
        assert_eq!(path.len() - 1, 5);
        assert_eq!(state.depth_limit(), Some(5));
        // Only the last pass remains in the trace.
        assert_eq!(state.explored().len(), 6);
    }

    #[test]
    fn iddfs_finds_diagonal_in_one_pass() {
        let board = Board::parse("S.\n.E").unwrap();
        let mut state = SearchState::new();
        let max = board.bounds().len();
        let mut iddfs = Iddfs::new(Cell::new(0, 0), Cell::new(1, 1), max, &mut state);
        let (last, _) = drive(|| iddfs.step(&board, &mut state));
        assert_eq!(last, Step::Found(vec![Cell::new(0, 0), Cell::new(1, 1)]));
        assert_eq!(iddfs.limit(), 1);
    }

    #[test]
    fn iddfs_stops_once_limit_no_longer_bites() {
        let board = Board::parse(
            "\
S.#..
..#.E",
        )
        .unwrap();
        let mut state = SearchState::new();
        let max = board.bounds().len();
        let mut iddfs = Iddfs::new(Cell::new(0, 0), Cell::new(1, 4), max, &mut state);
        let (last, _) = drive(|| iddfs.step(&board, &mut state));
        assert_eq!(last, Step::Exhausted);
        // Along the first branch the last pocket cell, (1,0), sits three
        // steps down, so the pass at limit 3 is the first with no cut-off.
        assert_eq!(iddfs.limit(), 3);
        assert_eq!(state.explored().len(), 4);
    }
}
