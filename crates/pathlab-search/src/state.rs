//! Per-run search state and the terminal status reported to the UI.

use std::collections::{HashMap, HashSet};
use std::fmt;

use pathlab_core::Cell;

use crate::neighbors::step_cost;

/// Default depth limit for depth-limited search.
pub const DEFAULT_DEPTH_LIMIT: usize = 15;

/// The six search strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Bfs,
    Dfs,
    Ucs,
    Dls,
    Iddfs,
    Bidirectional,
}

impl Algorithm {
    /// All strategies, in menu order.
    pub const ALL: [Algorithm; 6] = [
        Self::Bfs,
        Self::Dfs,
        Self::Ucs,
        Self::Dls,
        Self::Iddfs,
        Self::Bidirectional,
    ];

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::Ucs => "UCS",
            Self::Dls => "DLS",
            Self::Iddfs => "IDDFS",
            Self::Bidirectional => "Bidirectional",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Summary of the current or last run.
///
/// The [`Display`](fmt::Display) form is the one-line message shown to the
/// user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// No run has happened since the last reset.
    #[default]
    Idle,
    /// A run was requested without both endpoints set.
    MissingEndpoints(Algorithm),
    /// A run is in progress.
    Running(Algorithm),
    /// The end cell was reached. `path_len` counts edges. `depth` is the
    /// succeeding depth limit for iterative deepening.
    Found {
        algorithm: Algorithm,
        explored: usize,
        path_len: usize,
        depth: Option<usize>,
    },
    /// The search ran out of cells. `depth_limit` is set for depth-limited
    /// search.
    NotFound {
        algorithm: Algorithm,
        explored: usize,
        depth_limit: Option<usize>,
    },
    /// The run was abandoned at a yield point.
    Cancelled(Algorithm),
}

impl Status {
    /// The algorithm this status refers to, if any.
    pub fn algorithm(&self) -> Option<Algorithm> {
        match *self {
            Self::Idle => None,
            Self::MissingEndpoints(a) | Self::Running(a) | Self::Cancelled(a) => Some(a),
            Self::Found { algorithm, .. } | Self::NotFound { algorithm, .. } => Some(algorithm),
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => Ok(()),
            Self::MissingEndpoints(_) => f.write_str("Please set Start and End nodes first."),
            Self::Running(a) => write!(f, "{a}: Searching..."),
            Self::Found {
                algorithm,
                explored,
                path_len,
                ..
            } => write!(
                f,
                "{algorithm}: Found!   Explored {explored} nodes   Path {path_len} steps"
            ),
            Self::NotFound {
                algorithm,
                explored,
                depth_limit: Some(limit),
            } => write!(
                f,
                "{algorithm}: No path found within depth {limit}!   Explored {explored} nodes"
            ),
            Self::NotFound {
                algorithm,
                explored,
                depth_limit: None,
            } => write!(f, "{algorithm}: No path found!   Explored {explored} nodes"),
            Self::Cancelled(a) => write!(f, "{a}: Cancelled"),
        }
    }
}

/// Outcome of advancing a search by one step.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// One node was expanded; the state is ready to be observed.
    Expanded,
    /// The end cell was reached, with the path from start to end.
    Found(Vec<Cell>),
    /// Nothing is left to expand.
    Exhausted,
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// Everything a run exposes to its observer.
///
/// Between steps the following hold: `explored` and `frontier` are
/// disjoint, every key of `came_from` is explored or in the frontier, and an
/// explored cell never re-enters the frontier.
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    pub(crate) explored: HashSet<Cell>,
    pub(crate) frontier: HashSet<Cell>,
    pub(crate) came_from: HashMap<Cell, Option<Cell>>,
    pub(crate) path: Vec<Cell>,
    pub(crate) status: Status,
    pub(crate) steps: usize,
    pub(crate) depth_limit: Option<usize>,
}

impl SearchState {
    /// A blank state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells that have been expanded.
    #[inline]
    pub fn explored(&self) -> &HashSet<Cell> {
        &self.explored
    }

    /// Cells discovered but not yet expanded.
    #[inline]
    pub fn frontier(&self) -> &HashSet<Cell> {
        &self.frontier
    }

    /// Predecessor map; the root maps to `None`.
    #[inline]
    pub fn came_from(&self) -> &HashMap<Cell, Option<Cell>> {
        &self.came_from
    }

    /// The final path from start to end. Empty unless the run succeeded.
    #[inline]
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    /// Number of edges in the final path.
    #[inline]
    pub fn path_len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Sum of step costs along the final path.
    pub fn path_cost(&self) -> f64 {
        path_cost(&self.path)
    }

    #[inline]
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Number of step events emitted so far in this run.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Depth limit of the current depth-bounded iteration, if any.
    #[inline]
    pub fn depth_limit(&self) -> Option<usize> {
        self.depth_limit
    }

    #[inline]
    pub fn is_explored(&self, c: Cell) -> bool {
        self.explored.contains(&c)
    }

    #[inline]
    pub fn is_frontier(&self, c: Cell) -> bool {
        self.frontier.contains(&c)
    }

    pub fn is_on_path(&self, c: Cell) -> bool {
        self.path.contains(&c)
    }

    /// Seed a run from `root`: it is discovered with no predecessor.
    pub(crate) fn seed(&mut self, root: Cell) {
        self.came_from.insert(root, None);
        self.frontier.insert(root);
    }

    /// Record `c` as discovered from `parent`. An explored cell is never put
    /// back into the frontier.
    pub(crate) fn discover(&mut self, c: Cell, parent: Cell) {
        self.came_from.insert(c, Some(parent));
        if !self.explored.contains(&c) {
            self.frontier.insert(c);
        }
    }

    /// Move `c` from the frontier to the explored set.
    pub(crate) fn settle(&mut self, c: Cell) {
        self.frontier.remove(&c);
        self.explored.insert(c);
    }

    /// Walk the predecessor map back from `c` to the root.
    pub(crate) fn path_to(&self, c: Cell) -> Vec<Cell> {
        rebuild_path(&self.came_from, c)
    }

    /// Drop the per-iteration trace, keeping status and counters.
    pub(crate) fn clear_trace(&mut self) {
        self.explored.clear();
        self.frontier.clear();
        self.came_from.clear();
        self.path.clear();
    }

    /// Return to the blank baseline.
    pub(crate) fn reset(&mut self) {
        self.clear_trace();
        self.status = Status::Idle;
        self.steps = 0;
        self.depth_limit = None;
    }
}

/// Reconstruct a root-to-`node` path from a predecessor map.
pub(crate) fn rebuild_path(came_from: &HashMap<Cell, Option<Cell>>, node: Cell) -> Vec<Cell> {
    let mut path = vec![node];
    let mut cur = node;
    while let Some(&Some(prev)) = came_from.get(&cur) {
        path.push(prev);
        cur = prev;
    }
    path.reverse();
    path
}

/// Sum of [`step_cost`] over consecutive pairs of `path`.
pub fn path_cost(path: &[Cell]) -> f64 {
    path.windows(2).map(|w| step_cost(w[0], w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_messages() {
        assert_eq!(Status::Idle.to_string(), "");
        assert_eq!(
            Status::MissingEndpoints(Algorithm::Bfs).to_string(),
            "Please set Start and End nodes first."
        );
        let found = Status::Found {
            algorithm: Algorithm::Ucs,
            explored: 42,
            path_len: 7,
            depth: None,
        };
        assert_eq!(
            found.to_string(),
            "UCS: Found!   Explored 42 nodes   Path 7 steps"
        );
        let none = Status::NotFound {
            algorithm: Algorithm::Bidirectional,
            explored: 3,
            depth_limit: None,
        };
        assert_eq!(
            none.to_string(),
            "Bidirectional: No path found!   Explored 3 nodes"
        );
        let dls = Status::NotFound {
            algorithm: Algorithm::Dls,
            explored: 9,
            depth_limit: Some(15),
        };
        assert_eq!(
            dls.to_string(),
            "DLS: No path found within depth 15!   Explored 9 nodes"
        );
    }

    #[test]
    fn status_accessors() {
        assert_eq!(Status::Idle.algorithm(), None);
        assert_eq!(
            Status::Cancelled(Algorithm::Dfs).algorithm(),
            Some(Algorithm::Dfs)
        );
        assert!(
            Status::Found {
                algorithm: Algorithm::Bfs,
                explored: 1,
                path_len: 1,
                depth: None
            }
            .is_found()
        );
        assert!(!Status::Running(Algorithm::Bfs).is_found());
    }

    #[test]
    fn algorithm_names_are_distinct() {
        let names: HashSet<_> = Algorithm::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(names.len(), 6);
        assert_eq!(Algorithm::Iddfs.to_string(), "IDDFS");
    }

    #[test]
    fn rebuild_walks_to_root() {
        let mut came = HashMap::new();
        let a = Cell::new(0, 0);
        let b = Cell::new(0, 1);
        let c = Cell::new(1, 2);
        came.insert(a, None);
        came.insert(b, Some(a));
        came.insert(c, Some(b));
        assert_eq!(rebuild_path(&came, c), vec![a, b, c]);
        assert_eq!(rebuild_path(&came, a), vec![a]);
    }

    #[test]
    fn path_len_and_cost() {
        let mut s = SearchState::new();
        assert_eq!(s.path_len(), 0);
        s.path = vec![Cell::new(0, 0), Cell::new(1, 1), Cell::new(1, 2)];
        assert_eq!(s.path_len(), 2);
        assert!((s.path_cost() - 2.414).abs() < 1e-9);
    }

    #[test]
    fn discover_never_refills_explored() {
        let mut s = SearchState::new();
        let a = Cell::new(0, 0);
        let b = Cell::new(0, 1);
        s.seed(a);
        s.settle(a);
        // `b` was expanded by some other trace sharing this state.
        s.explored.insert(b);
        s.discover(b, a);
        assert!(s.is_explored(b));
        assert!(!s.is_frontier(b));
        assert_eq!(s.came_from()[&b], Some(a));
        assert!(s.explored().is_disjoint(s.frontier()));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut s = SearchState::new();
        s.seed(Cell::new(0, 0));
        s.status = Status::Running(Algorithm::Bfs);
        s.steps = 4;
        s.reset();
        let once = format!("{s:?}");
        s.reset();
        assert_eq!(format!("{s:?}"), once);
        assert!(s.explored().is_empty() && s.frontier().is_empty());
        assert_eq!(*s.status(), Status::Idle);
    }
}
