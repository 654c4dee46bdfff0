//! Rectangular drawing targets.
//!
//! A [`Surface`] is an off-screen grid of [`Cell`]s placed at an absolute
//! terminal position. Drawing into a surface never touches the terminal;
//! the [`Display`](super::Display) composites it onto the frame when the
//! surface is refreshed. Every write is clipped to the surface's extent.

use crate::color::Attr;
use crate::geometry::{Offset, Region, Size};

use super::cell::Cell;
use super::SurfaceId;

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// A character-cell drawing target.
#[derive(Debug, Clone)]
pub struct Surface {
    origin: Offset,
    size: Size,
    /// Row-major cell storage, `width * height` entries.
    cells: Vec<Cell>,
    parent: Option<SurfaceId>,
}

impl Surface {
    /// Create a blank surface. Negative dimensions are treated as zero.
    pub fn new(origin: Offset, size: Size, parent: Option<SurfaceId>) -> Self {
        let size = Size::new(size.width.max(0), size.height.max(0));
        let cells = vec![Cell::blank(); (size.width * size.height) as usize];
        Self { origin, size, cells, parent }
    }

    /// Absolute position of the top-left cell.
    pub fn origin(&self) -> Offset {
        self.origin
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    /// The absolute region this surface covers.
    pub fn region(&self) -> Region {
        Region::at(self.origin, self.size)
    }

    /// The surface this one was derived from, if any.
    pub fn parent(&self) -> Option<SurfaceId> {
        self.parent
    }

    pub(crate) fn set_origin(&mut self, origin: Offset) {
        self.origin = origin;
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.size.contains(x, y) {
            Some((y * self.size.width + x) as usize)
        } else {
            None
        }
    }

    /// The cell at surface-relative `(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Place one glyph. Returns `false` when `(x, y)` is outside the surface.
    pub fn put(&mut self, x: i32, y: i32, ch: char, attr: Attr) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = Cell::new(ch, attr);
                true
            }
            None => false,
        }
    }

    /// Horizontal run of `n` glyphs starting at `(x, y)`, clipped.
    pub fn hline(&mut self, x: i32, y: i32, ch: char, attr: Attr, n: i32) {
        for dx in 0..n.max(0) {
            if !self.put(x + dx, y, ch, attr) && x + dx >= self.size.width {
                break;
            }
        }
    }

    /// Vertical run of `n` glyphs starting at `(x, y)`, clipped.
    pub fn vline(&mut self, x: i32, y: i32, ch: char, attr: Attr, n: i32) {
        for dy in 0..n.max(0) {
            if !self.put(x, y + dy, ch, attr) && y + dy >= self.size.height {
                break;
            }
        }
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.fill(Cell::blank());
    }

    /// Set every cell to `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.iter_mut().for_each(|c| *c = cell);
    }

    /// Row `y` as a string of glyphs.
    pub fn row_text(&self, y: i32) -> String {
        if y < 0 || y >= self.size.height {
            return String::new();
        }
        let start = (y * self.size.width) as usize;
        let end = start + self.size.width as usize;
        self.cells[start..end].iter().map(|c| c.ch).collect()
    }

    /// Iterate `(x, y, cell)` over every cell, surface-relative.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        let width = self.size.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (i as i32 % width, i as i32 / width, *c))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
