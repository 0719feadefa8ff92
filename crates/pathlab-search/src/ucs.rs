use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use pathlab_core::Cell;

use crate::state::{SearchState, Step};
use crate::traits::WeightedPather;

/// Priority-queue entry, ordered so `BinaryHeap` (a max-heap) pops the
/// cheapest entry first, and the smaller cell among equal costs.
#[derive(Clone, Copy, Debug)]
struct Entry {
    cost: f64,
    cell: Cell,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Uniform-cost (Dijkstra) search keyed by accumulated step cost.
///
/// The queue may hold several entries for one cell. A cell is finalized the
/// first time it is popped; later, staler entries are skipped when they come
/// off the queue rather than being removed eagerly.
#[derive(Debug, Clone)]
pub struct Ucs {
    end: Cell,
    open: BinaryHeap<Entry>,
    g_cost: HashMap<Cell, f64>,
    nbuf: Vec<Cell>,
}

impl Ucs {
    /// Start a search from `start` towards `end`, seeding `state`.
    pub fn new(start: Cell, end: Cell, state: &mut SearchState) -> Self {
        state.seed(start);
        Self {
            end,
            open: BinaryHeap::from([Entry {
                cost: 0.0,
                cell: start,
            }]),
            g_cost: HashMap::from([(start, 0.0)]),
            nbuf: Vec::with_capacity(6),
        }
    }

    /// Best known cost to reach `c`, if it has been discovered.
    pub fn cost_to(&self, c: Cell) -> Option<f64> {
        self.g_cost.get(&c).copied()
    }

    /// Pop entries until a non-finalized cell comes off, then expand it.
    pub fn step<P: WeightedPather>(&mut self, pather: &P, state: &mut SearchState) -> Step {
        let current = loop {
            let Some(entry) = self.open.pop() else {
                return Step::Exhausted;
            };
            // Skip stale entries.
            if !state.is_explored(entry.cell) {
                break entry.cell;
            }
        };
        state.settle(current);

        if current == self.end {
            return Step::Found(state.path_to(current));
        }

        let current_g = self.g_cost[&current];
        self.nbuf.clear();
        pather.neighbors(current, &mut self.nbuf);

        for &nb in &self.nbuf {
            if state.is_explored(nb) {
                continue;
            }
            let tentative = current_g + pather.cost(current, nb);
            if self.g_cost.get(&nb).is_some_and(|&g| tentative >= g) {
                continue;
            }
            self.g_cost.insert(nb, tentative);
            state.discover(nb, current);
            self.open.push(Entry {
                cost: tentative,
                cell: nb,
            });
        }
        Step::Expanded
    }
}
