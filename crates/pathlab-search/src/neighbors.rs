use pathlab_core::{Board, Cell};

use crate::traits::{Pather, WeightedPather};

/// The six move offsets as `(drow, dcol)`, in enumeration order: Up, Right,
/// Down, Down-Right, Left, Up-Left.
///
/// Down-Left and Up-Right are deliberately absent. Every algorithm's output
/// depends on this exact set and order, so it must not be "completed" to
/// eight directions.
pub const DIRECTIONS: [(i32, i32); 6] = [(-1, 0), (0, 1), (1, 0), (1, 1), (0, -1), (-1, -1)];

/// Cost of a move that stays in the same row or column.
pub const ORTHOGONAL_COST: f64 = 1.0;

/// Cost of a diagonal move. An approximation of √2, kept at three decimals.
pub const DIAGONAL_COST: f64 = 1.414;

/// Cost of stepping from `a` to the adjacent cell `b`.
#[inline]
pub fn step_cost(a: Cell, b: Cell) -> f64 {
    if a.is_orthogonal_to(b) {
        ORTHOGONAL_COST
    } else {
        DIAGONAL_COST
    }
}

/// Cached neighbor computation helper.
///
/// Enumerates the [`DIRECTIONS`] around a cell, filtered by a predicate.
pub struct Neighbors {
    buf: Vec<Cell>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DIRECTIONS.len()),
        }
    }

    /// Return the six-way neighbors of `c`, keeping only those for which
    /// `keep` returns `true`.
    pub fn six_way(&mut self, c: Cell, keep: impl Fn(Cell) -> bool) -> &[Cell] {
        self.buf.clear();
        push_six_way(c, keep, &mut self.buf);
        &self.buf
    }
}

#[inline]
fn push_six_way(c: Cell, keep: impl Fn(Cell) -> bool, buf: &mut Vec<Cell>) {
    for (dr, dc) in DIRECTIONS {
        let n = c.offset(dr, dc);
        if keep(n) {
            buf.push(n);
        }
    }
}

impl Pather for Board {
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        push_six_way(c, |n| self.is_traversable(n), buf);
    }
}

impl WeightedPather for Board {
    fn cost(&self, from: Cell, to: Cell) -> f64 {
        step_cost(from, to)
    }
}
