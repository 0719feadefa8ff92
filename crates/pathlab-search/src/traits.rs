use pathlab_core::Cell;

/// Minimal search interface: neighbor enumeration.
pub trait Pather {
    /// Append the traversable neighbors of `c` into `buf`, in the order the
    /// search should consider them. The caller clears `buf` before calling.
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Cell, to: Cell) -> f64;
}
