//! The editable occupancy map searched by the engine.
//!
//! A [`Board`] is a fixed-size grid of [`Tile`]s plus optional start and end
//! markers. It owns no search state: it is only changed through the edit
//! operations below, each of which validates its input and leaves the board
//! untouched on error.

use std::fmt;

use rand::Rng;

use crate::geom::{Bounds, Cell};

/// Occupancy of a single grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Free,
    Wall,
}

/// One of the two search endpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Marker {
    Start,
    End,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// A single grid edit, as issued by the UI.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditOp {
    SetWall,
    ClearWall,
    SetStart,
    ClearStart,
    SetEnd,
    ClearEnd,
}

/// A rejected grid edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The cell lies outside the board.
    OutOfBounds(Cell),
    /// The cell holds a marker that the edit may not overwrite.
    Occupied { cell: Cell, marker: Marker },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(c) => write!(f, "cell {c} is outside the grid"),
            Self::Occupied { cell, marker } => {
                write!(f, "cell {cell} already holds the {marker} marker")
            }
        }
    }
}

impl std::error::Error for EditError {}

/// Errors that can occur when parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Lines have inconsistent widths.
    InconsistentSize(String),
    /// A character other than `.`, `#`, `S` or `E` was found.
    InvalidRune { ch: char, cell: Cell },
    /// A marker appears more than once.
    DuplicateMarker(Marker),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentSize(s) => write!(f, "board: inconsistent size:\n{s}"),
            Self::InvalidRune { ch, cell } => {
                write!(f, "board contains invalid rune \u{201c}{ch}\u{201d} at {cell}")
            }
            Self::DuplicateMarker(m) => write!(f, "board contains more than one {m} marker"),
        }
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// Fixed-size occupancy grid with optional start and end markers.
///
/// Invariants: the start and end cells are never walls and never coincide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    bounds: Bounds,
    tiles: Vec<Tile>,
    start: Option<Cell>,
    end: Option<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Bounds::default())
    }
}

impl Board {
    /// Create an empty board of the given size.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            tiles: vec![Tile::Free; bounds.len()],
            start: None,
            end: None,
        }
    }

    /// Parse a board from ASCII art.
    ///
    /// `.` is free, `#` is a wall, `S` and `E` mark the start and end cells.
    /// Leading/trailing whitespace is trimmed from the whole string, and every
    /// line must have the same width.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        let lines: Vec<&str> = s.lines().map(str::trim_end).collect();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        if lines.iter().any(|l| l.chars().count() != cols) {
            return Err(ParseError::InconsistentSize(s.to_string()));
        }

        let mut board = Self::new(Bounds::new(lines.len() as i32, cols as i32));
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let cell = Cell::new(row as i32, col as i32);
                match ch {
                    '.' => {}
                    '#' => board.put(cell, Tile::Wall),
                    'S' if board.start.is_some() => {
                        return Err(ParseError::DuplicateMarker(Marker::Start));
                    }
                    'S' => board.start = Some(cell),
                    'E' if board.end.is_some() => {
                        return Err(ParseError::DuplicateMarker(Marker::End));
                    }
                    'E' => board.end = Some(cell),
                    _ => return Err(ParseError::InvalidRune { ch, cell }),
                }
            }
        }
        Ok(board)
    }

    /// Size of the board.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Current start cell, if set.
    #[inline]
    pub fn start(&self) -> Option<Cell> {
        self.start
    }

    /// Current end cell, if set.
    #[inline]
    pub fn end(&self) -> Option<Cell> {
        self.end
    }

    /// Both endpoints, or `None` if either is missing.
    #[inline]
    pub fn endpoints(&self) -> Option<(Cell, Cell)> {
        Some((self.start?, self.end?))
    }

    /// Tile at `c`, or `None` if out of bounds.
    #[inline]
    pub fn tile(&self, c: Cell) -> Option<Tile> {
        self.bounds.index(c).map(|i| self.tiles[i])
    }

    /// Whether `c` is in bounds and holds a wall.
    #[inline]
    pub fn is_wall(&self, c: Cell) -> bool {
        self.tile(c) == Some(Tile::Wall)
    }

    /// Whether a search may step onto `c`.
    #[inline]
    pub fn is_traversable(&self, c: Cell) -> bool {
        self.tile(c) == Some(Tile::Free)
    }

    /// Which marker, if any, sits on `c`.
    pub fn marker_at(&self, c: Cell) -> Option<Marker> {
        if self.start == Some(c) {
            Some(Marker::Start)
        } else if self.end == Some(c) {
            Some(Marker::End)
        } else {
            None
        }
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t == Tile::Wall).count()
    }

    /// Iterate over all wall cells in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = Cell> + '_ {
        self.bounds.iter().filter(|&c| self.is_wall(c))
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Apply a single edit at `cell`.
    ///
    /// `ClearStart` and `ClearEnd` remove the marker wherever it is; `cell`
    /// is only checked against the bounds.
    pub fn apply(&mut self, cell: Cell, op: EditOp) -> Result<(), EditError> {
        match op {
            EditOp::SetWall => self.set_wall(cell),
            EditOp::ClearWall => self.clear_wall(cell),
            EditOp::SetStart => self.set_start(cell),
            EditOp::SetEnd => self.set_end(cell),
            EditOp::ClearStart => {
                self.check(cell)?;
                self.clear_start();
                Ok(())
            }
            EditOp::ClearEnd => {
                self.check(cell)?;
                self.clear_end();
                Ok(())
            }
        }
    }

    /// Turn `c` into a wall. Rejected on the start or end cell.
    pub fn set_wall(&mut self, c: Cell) -> Result<(), EditError> {
        self.check(c)?;
        if let Some(marker) = self.marker_at(c) {
            return Err(EditError::Occupied { cell: c, marker });
        }
        self.put(c, Tile::Wall);
        Ok(())
    }

    /// Turn `c` back into a free cell.
    pub fn clear_wall(&mut self, c: Cell) -> Result<(), EditError> {
        self.check(c)?;
        self.put(c, Tile::Free);
        Ok(())
    }

    /// Move the start marker to `c`, clearing any wall there. Rejected on
    /// the end cell.
    pub fn set_start(&mut self, c: Cell) -> Result<(), EditError> {
        self.check(c)?;
        if self.end == Some(c) {
            return Err(EditError::Occupied {
                cell: c,
                marker: Marker::End,
            });
        }
        self.put(c, Tile::Free);
        self.start = Some(c);
        Ok(())
    }

    /// Remove the start marker.
    pub fn clear_start(&mut self) {
        self.start = None;
    }

    /// Move the end marker to `c`, clearing any wall there. Rejected on the
    /// start cell.
    pub fn set_end(&mut self, c: Cell) -> Result<(), EditError> {
        self.check(c)?;
        if self.start == Some(c) {
            return Err(EditError::Occupied {
                cell: c,
                marker: Marker::Start,
            });
        }
        self.put(c, Tile::Free);
        self.end = Some(c);
        Ok(())
    }

    /// Remove the end marker.
    pub fn clear_end(&mut self) {
        self.end = None;
    }

    /// Clear all walls and both markers.
    pub fn reset(&mut self) {
        self.tiles.fill(Tile::Free);
        self.start = None;
        self.end = None;
    }

    /// Randomly turn free cells into walls.
    ///
    /// Each free cell that holds no marker becomes a wall with probability
    /// `density` (clamped to 0.0 to 1.0). Returns the number of walls placed.
    pub fn scatter_walls(&mut self, rng: &mut impl Rng, density: f64) -> usize {
        let density = density.clamp(0.0, 1.0);
        let mut placed = 0;
        for c in self.bounds.iter() {
            if self.is_wall(c) || self.marker_at(c).is_some() {
                continue;
            }
            if rng.random_bool(density) {
                self.put(c, Tile::Wall);
                placed += 1;
            }
        }
        placed
    }

    #[inline]
    fn check(&self, c: Cell) -> Result<(), EditError> {
        if self.bounds.contains(c) {
            Ok(())
        } else {
            Err(EditError::OutOfBounds(c))
        }
    }

    #[inline]
    fn put(&mut self, c: Cell, tile: Tile) {
        if let Some(i) = self.bounds.index(c) {
            self.tiles[i] = tile;
        }
    }
}

impl fmt::Display for Board {
    /// Writes the board in the format accepted by [`Board::parse`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.bounds.rows {
            if row > 0 {
                f.write_str("\n")?;
            }
            for col in 0..self.bounds.cols {
                let c = Cell::new(row, col);
                let ch = match self.marker_at(c) {
                    Some(Marker::Start) => 'S',
                    Some(Marker::End) => 'E',
                    None if self.is_wall(c) => '#',
                    None => '.',
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const ROOM: &str = "\
S..#
.#..
...E";

    #[test]
    fn parse_and_size() {
        let b = Board::parse(ROOM).unwrap();
        assert_eq!(b.bounds(), Bounds::new(3, 4));
        assert_eq!(b.start(), Some(Cell::new(0, 0)));
        assert_eq!(b.end(), Some(Cell::new(2, 3)));
        assert!(b.is_wall(Cell::new(0, 3)));
        assert!(b.is_wall(Cell::new(1, 1)));
        assert_eq!(b.wall_count(), 2);
    }

    #[test]
    fn display_round_trips_parse() {
        let b = Board::parse(ROOM).unwrap();
        assert_eq!(b.to_string(), ROOM);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            Board::parse("..\n..."),
            Err(ParseError::InconsistentSize(_))
        ));
        assert_eq!(
            Board::parse("..\n.x"),
            Err(ParseError::InvalidRune {
                ch: 'x',
                cell: Cell::new(1, 1)
            })
        );
        assert_eq!(
            Board::parse("SS"),
            Err(ParseError::DuplicateMarker(Marker::Start))
        );
    }

    #[test]
    fn wall_edits() {
        let mut b = Board::new(Bounds::new(3, 3));
        let c = Cell::new(1, 1);
        assert!(b.is_traversable(c));
        b.set_wall(c).unwrap();
        assert!(b.is_wall(c));
        assert!(!b.is_traversable(c));
        b.clear_wall(c).unwrap();
        assert!(b.is_traversable(c));
    }

    #[test]
    fn out_of_bounds_edits_are_rejected() {
        let mut b = Board::new(Bounds::new(3, 3));
        let before = b.clone();
        let c = Cell::new(3, 0);
        assert_eq!(b.set_wall(c), Err(EditError::OutOfBounds(c)));
        assert_eq!(b.set_start(c), Err(EditError::OutOfBounds(c)));
        assert_eq!(b.apply(c, EditOp::ClearEnd), Err(EditError::OutOfBounds(c)));
        assert_eq!(b, before);
        assert!(!b.is_traversable(c));
    }

    #[test]
    fn walling_a_marker_is_rejected() {
        let mut b = Board::new(Bounds::new(3, 3));
        let s = Cell::new(0, 0);
        let e = Cell::new(2, 2);
        b.set_start(s).unwrap();
        b.set_end(e).unwrap();
        assert_eq!(
            b.set_wall(s),
            Err(EditError::Occupied {
                cell: s,
                marker: Marker::Start
            })
        );
        assert_eq!(
            b.apply(e, EditOp::SetWall),
            Err(EditError::Occupied {
                cell: e,
                marker: Marker::End
            })
        );
        assert!(b.is_traversable(s));
        assert!(b.is_traversable(e));
    }

    #[test]
    fn markers_are_mutually_exclusive() {
        let mut b = Board::new(Bounds::new(3, 3));
        let c = Cell::new(1, 1);
        b.set_start(c).unwrap();
        assert!(b.set_end(c).is_err());
        assert_eq!(b.end(), None);
        b.clear_start();
        b.set_end(c).unwrap();
        assert!(b.set_start(c).is_err());
        assert_eq!(b.start(), None);
    }

    #[test]
    fn marker_on_wall_clears_wall() {
        let mut b = Board::new(Bounds::new(3, 3));
        let c = Cell::new(0, 2);
        b.set_wall(c).unwrap();
        b.apply(c, EditOp::SetStart).unwrap();
        assert!(b.is_traversable(c));
        assert_eq!(b.start(), Some(c));
    }

    #[test]
    fn moving_a_marker_releases_old_cell() {
        let mut b = Board::new(Bounds::new(3, 3));
        b.set_start(Cell::new(0, 0)).unwrap();
        b.set_start(Cell::new(1, 0)).unwrap();
        assert_eq!(b.marker_at(Cell::new(0, 0)), None);
        b.set_wall(Cell::new(0, 0)).unwrap();
    }

    #[test]
    fn endpoints_require_both() {
        let mut b = Board::new(Bounds::new(2, 2));
        assert_eq!(b.endpoints(), None);
        b.set_start(Cell::new(0, 0)).unwrap();
        assert_eq!(b.endpoints(), None);
        b.set_end(Cell::new(1, 1)).unwrap();
        assert_eq!(b.endpoints(), Some((Cell::new(0, 0), Cell::new(1, 1))));
        b.apply(Cell::new(0, 0), EditOp::ClearStart).unwrap();
        assert_eq!(b.endpoints(), None);
    }

    #[test]
    fn reset_clears_everything() {
        let mut b = Board::parse(ROOM).unwrap();
        b.reset();
        assert_eq!(b.wall_count(), 0);
        assert_eq!(b.start(), None);
        assert_eq!(b.end(), None);
        assert_eq!(b.bounds(), Bounds::new(3, 4));
    }

    #[test]
    fn scatter_walls_spares_markers() {
        let mut b = Board::new(Bounds::new(10, 10));
        b.set_start(Cell::new(0, 0)).unwrap();
        b.set_end(Cell::new(9, 9)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let placed = b.scatter_walls(&mut rng, 1.0);
        assert_eq!(placed, 98);
        assert_eq!(b.wall_count(), 98);
        assert!(b.is_traversable(Cell::new(0, 0)));
        assert!(b.is_traversable(Cell::new(9, 9)));
    }

    #[test]
    fn scatter_walls_zero_density() {
        let mut b = Board::new(Bounds::new(5, 5));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(b.scatter_walls(&mut rng, 0.0), 0);
        assert_eq!(b.walls().count(), 0);
    }
}
