//! The search context: a board, the state of the current or last run, and
//! the run in progress.

use std::fmt;
use std::ops::ControlFlow;

use pathlab_core::{Board, Bounds, Cell, EditError, EditOp};

use crate::runner::Runner;
use crate::state::{Algorithm, DEFAULT_DEPTH_LIMIT, SearchState, Status, Step};

/// A rejected run request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Start or end is not set.
    MissingEndpoints(Algorithm),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoints(a) => write!(f, "{a}: start and end must both be set"),
        }
    }
}

impl std::error::Error for SearchError {}

/// What [`SearchContext::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// No run is active.
    Idle,
    /// One node was expanded and the run continues.
    Running,
    /// The run reached a terminal status.
    Done,
}

/// Owns the [`Board`] and the [`SearchState`], and drives at most one run at
/// a time.
///
/// A run is either stepped by hand with [`begin`](Self::begin) and
/// [`step`](Self::step), or driven to completion by [`run`](Self::run) with
/// an observer called at every yield point. Any edit, reset or new run while
/// a run is active abandons it first.
#[derive(Debug, Clone)]
pub struct SearchContext {
    board: Board,
    state: SearchState,
    active: Option<Runner>,
    depth_limit: usize,
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new(Bounds::default())
    }
}

impl SearchContext {
    /// A context over an empty board of the given size.
    pub fn new(bounds: Bounds) -> Self {
        Self::with_board(Board::new(bounds))
    }

    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            state: SearchState::new(),
            active: None,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    #[inline]
    pub fn status(&self) -> &Status {
        &self.state.status
    }

    /// The algorithm of the active run, if any.
    pub fn active(&self) -> Option<Algorithm> {
        self.active.as_ref().map(Runner::algorithm)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Depth limit used when DLS is started through [`run`](Self::run).
    #[inline]
    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    pub fn set_depth_limit(&mut self, limit: usize) {
        self.depth_limit = limit;
    }

    // Grid
    // -----------------------------------------------------------------------

    /// Apply a grid edit, cancelling the active run first.
    pub fn edit(&mut self, cell: Cell, op: EditOp) -> Result<(), EditError> {
        self.cancel();
        self.board.apply(cell, op)
    }

    /// Mutable access to the board, cancelling the active run first.
    pub fn board_mut(&mut self) -> &mut Board {
        self.cancel();
        &mut self.board
    }

    /// Clear the search trace and status, keeping the grid.
    pub fn reset_search(&mut self) {
        if let Some(runner) = self.active.take() {
            log::debug!("{}: abandoned by reset", runner.algorithm());
        }
        self.state.reset();
    }

    /// Clear the grid, both markers and the search state.
    pub fn clear_grid(&mut self) {
        self.reset_search();
        self.board.reset();
    }

    // Runs
    // -----------------------------------------------------------------------

    /// Start a run of `algorithm`. `depth_limit` is used by DLS only.
    ///
    /// Without both endpoints the run is rejected: the status becomes
    /// [`Status::MissingEndpoints`] and nothing else changes.
    pub fn begin(&mut self, algorithm: Algorithm, depth_limit: usize) -> Result<(), SearchError> {
        let Some((start, end)) = self.board.endpoints() else {
            log::debug!("{algorithm}: rejected, start or end unset");
            self.state.status = Status::MissingEndpoints(algorithm);
            return Err(SearchError::MissingEndpoints(algorithm));
        };
        if let Some(runner) = self.active.take() {
            log::debug!("{}: superseded by {algorithm}", runner.algorithm());
        }
        self.state.reset();
        let max_depth = self.board.bounds().len();
        self.active = Some(Runner::new(
            algorithm,
            start,
            end,
            depth_limit,
            max_depth,
            &mut self.state,
        ));
        self.state.status = Status::Running(algorithm);
        log::info!("{algorithm}: searching from {start} to {end}");
        Ok(())
    }

    /// Advance the active run by one step.
    pub fn step(&mut self) -> Progress {
        let Some(runner) = self.active.as_mut() else {
            return Progress::Idle;
        };
        let algorithm = runner.algorithm();
        match runner.step(&self.board, &mut self.state) {
            Step::Expanded => {
                self.state.steps += 1;
                Progress::Running
            }
            Step::Found(path) => {
                self.state.path = path;
                self.finish(Status::Found {
                    algorithm,
                    explored: self.state.explored.len(),
                    path_len: self.state.path_len(),
                    depth: match algorithm {
                        Algorithm::Iddfs => self.state.depth_limit,
                        _ => None,
                    },
                });
                Progress::Done
            }
            Step::Exhausted => {
                self.finish(Status::NotFound {
                    algorithm,
                    explored: self.state.explored.len(),
                    depth_limit: match algorithm {
                        Algorithm::Dls => self.state.depth_limit,
                        _ => None,
                    },
                });
                Progress::Done
            }
        }
    }

    fn finish(&mut self, status: Status) {
        self.active = None;
        log::info!("{status}");
        self.state.status = status;
    }

    /// Abandon the active run. Its partial trace is discarded and the status
    /// becomes [`Status::Cancelled`]. Does nothing when idle.
    pub fn cancel(&mut self) {
        if let Some(runner) = self.active.take() {
            let algorithm = runner.algorithm();
            log::warn!("{algorithm}: cancelled after {} steps", self.state.steps);
            self.state.reset();
            self.state.status = Status::Cancelled(algorithm);
        }
    }

    /// Run `algorithm` to completion, calling `observer` after every
    /// expansion. Returning [`ControlFlow::Break`] cancels the run at that
    /// point.
    pub fn run<F>(&mut self, algorithm: Algorithm, observer: F) -> &Status
    where
        F: FnMut(&SearchState) -> ControlFlow<()>,
    {
        self.run_with_limit(algorithm, self.depth_limit, observer)
    }

    fn run_with_limit<F>(
        &mut self,
        algorithm: Algorithm,
        depth_limit: usize,
        mut observer: F,
    ) -> &Status
    where
        F: FnMut(&SearchState) -> ControlFlow<()>,
    {
        if self.begin(algorithm, depth_limit).is_err() {
            return &self.state.status;
        }
        while self.step() == Progress::Running {
            if observer(&self.state).is_break() {
                self.cancel();
                break;
            }
        }
        &self.state.status
    }

    pub fn run_bfs<F>(&mut self, observer: F) -> &Status
    where
        F: FnMut(&SearchState) -> ControlFlow<()>,
    {
        self.run(Algorithm::Bfs, observer)
    }

    pub fn run_dfs<F>(&mut self, observer: F) -> &Status
    where
        F: FnMut(&SearchState) -> ControlFlow<()>,
    {
        self.run(Algorithm::Dfs, observer)
    }

    pub fn run_ucs<F>(&mut self, observer: F) -> &Status
    where
        F: FnMut(&SearchState) -> ControlFlow<()>,
    {
        self.run(Algorithm::Ucs, observer)
    }

    /// Depth-limited search with an explicit limit
    /// ([`DEFAULT_DEPTH_LIMIT`] is the usual choice).
    pub fn run_dls<F>(&mut self, limit: usize, observer: F) -> &Status
    where
        F: FnMut(&SearchState) -> ControlFlow<()>,
    {
        self.run_with_limit(Algorithm::Dls, limit, observer)
    }

    pub fn run_iddfs<F>(&mut self, observer: F) -> &Status
    where
        F: FnMut(&SearchState) -> ControlFlow<()>,
    {
        self.run(Algorithm::Iddfs, observer)
    }

    pub fn run_bidirectional<F>(&mut self, observer: F) -> &Status
    where
        F: FnMut(&SearchState) -> ControlFlow<()>,
    {
        self.run(Algorithm::Bidirectional, observer)
    }
}
