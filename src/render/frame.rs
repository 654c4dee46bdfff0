//! The virtual screen and frame diffing.
//!
//! A [`Frame`] is a 2D grid of [`Cell`]s covering the whole terminal.
//! Refreshed surfaces are composited onto it via [`Frame::place`], and
//! [`Frame::diff`] compares two frames to produce only the
//! [`CellUpdate`]s needed to transition between them.

use crate::geometry::Region;

use super::cell::{Cell, CellUpdate};
use super::surface::Surface;

/// The full-terminal cell grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// `cells[y][x]` is the cell at column x, row y.
    cells: Vec<Vec<Cell>>,
    pub width: u16,
    pub height: u16,
}

impl Frame {
    /// A blank frame of the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: Self::blank(width, height),
            width,
            height,
        }
    }

    /// Resize the grid. All cells are reset to blank.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = Self::blank(width, height);
    }

    /// The region covered by this frame.
    pub fn region(&self) -> Region {
        Region::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Copy a surface's cells into the frame at the surface's origin,
    /// clipped to the frame bounds.
    pub fn place(&mut self, surface: &Surface) {
        let clip = surface.region().intersection(self.region());
        if clip.is_empty() {
            return;
        }
        let origin = surface.origin();
        for (x, y, cell) in surface.cells() {
            let ax = origin.x + x;
            let ay = origin.y + y;
            if clip.contains(ax, ay) {
                self.cells[ay as usize][ax as usize] = cell;
            }
        }
    }

    /// Compare this frame against `previous` and return the changed cells.
    ///
    /// Cells outside the previous frame's bounds are always reported.
    pub fn diff(&self, previous: &Frame) -> Vec<CellUpdate> {
        let mut updates = Vec::new();
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let old = previous.cells.get(y).and_then(|r| r.get(x));
                if old != Some(cell) {
                    updates.push(CellUpdate { x: x as u16, y: y as u16, cell: *cell });
                }
            }
        }
        updates
    }

    /// Every cell as an update, for a full resend.
    pub fn all_updates(&self) -> Vec<CellUpdate> {
        self.diff(&Frame::new(0, 0))
    }

    /// The cell at (x, y), or `None` out of bounds.
    pub fn get_cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.cells.get(y as usize).and_then(|row| row.get(x as usize))
    }

    /// Row `y` as a string of glyphs.
    pub fn row_text(&self, y: u16) -> String {
        self.cells
            .get(y as usize)
            .map(|row| row.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }

    fn blank(width: u16, height: u16) -> Vec<Vec<Cell>> {
        (0..height as usize)
            .map(|_| vec![Cell::blank(); width as usize])
            .collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
