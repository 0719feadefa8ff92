//! The [`Canvas`] a model draws into, and the [`Frame`] diff sent to a
//! driver.

use crate::geom::Point;
use crate::style::Style;

/// A styled character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    /// A glyph with the given character and style.
    #[inline]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Glyph {
    #[inline]
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

/// A fixed-size screen buffer of [`Glyph`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    glyphs: Vec<Glyph>,
    width: i32,
    height: i32,
}

impl Canvas {
    /// Create a blank canvas.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            glyphs: vec![Glyph::default(); (width * height) as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height {
            Some((p.y * self.width + p.x) as usize)
        } else {
            None
        }
    }

    /// Read the glyph at `p`. Returns the blank glyph outside the canvas.
    pub fn at(&self, p: Point) -> Glyph {
        self.index(p).map(|i| self.glyphs[i]).unwrap_or_default()
    }

    /// Set the glyph at `p`. No-op outside the canvas.
    pub fn set(&mut self, p: Point, g: Glyph) {
        if let Some(i) = self.index(p) {
            self.glyphs[i] = g;
        }
    }

    /// Fill every position with `g`.
    pub fn fill(&mut self, g: Glyph) {
        self.glyphs.fill(g);
    }

    /// Fill the `w × h` rectangle whose top-left corner is `p`.
    pub fn fill_rect(&mut self, p: Point, w: i32, h: i32, g: Glyph) {
        for y in p.y..p.y + h {
            for x in p.x..p.x + w {
                self.set(Point::new(x, y), g);
            }
        }
    }

    /// Write `text` starting at `p`, clipped at the right edge. Returns the
    /// number of columns written.
    pub fn print(&mut self, p: Point, text: &str, style: Style) -> i32 {
        let mut x = p.x;
        for ch in text.chars() {
            if x >= self.width {
                break;
            }
            self.set(Point::new(x, p.y), Glyph::new(ch, style));
            x += 1;
        }
        x - p.x
    }

    /// Copy `other` into `self`. Both canvases must have the same size;
    /// otherwise `self` is replaced wholesale.
    pub fn copy_from(&mut self, other: &Canvas) {
        if self.width == other.width && self.height == other.height {
            self.glyphs.copy_from_slice(&other.glyphs);
        } else {
            *self = other.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single glyph that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub glyph: Glyph,
    pub pos: Point,
}

/// A set of glyph changes.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Compute the difference between two canvases.
///
/// A size change yields a full frame.
pub fn compute_frame(prev: &Canvas, curr: &Canvas) -> Frame {
    let full = prev.width != curr.width || prev.height != curr.height;
    let mut cells = Vec::new();
    for y in 0..curr.height {
        for x in 0..curr.width {
            let p = Point::new(x, y);
            let g = curr.at(p);
            if full || prev.at(p) != g {
                cells.push(FrameCell { glyph: g, pos: p });
            }
        }
    }
    Frame {
        cells,
        width: curr.width,
        height: curr.height,
    }
}
