//! Character cells and cell updates.

use crate::color::Attr;

/// A single terminal cell: one glyph plus its attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub attr: Attr,
}

impl Cell {
    /// Create a cell.
    pub const fn new(ch: char, attr: Attr) -> Self {
        Self { ch, attr }
    }

    /// A blank (space) cell with the neutral attribute.
    pub const fn blank() -> Self {
        Self { ch: ' ', attr: Attr::NORMAL }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

/// A single cell that changed between frames.
///
/// Used by backends to emit minimal terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}
