//! Core geometry types: Offset, Size, Region, plus placement helpers.
//!
//! Besides the plain coordinate types, this module holds the small set of
//! placement rules widgets use instead of a layout engine: symbolic
//! positions ([`XPos`], [`YPos`]) resolved by [`align_xy`], proposed
//! dimensions resolved by [`widget_dimension`], and text justification via
//! [`justify_offset`].

use std::ops::{Add, Neg, Sub};

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A 2D displacement or position in terminal cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// Create a new offset.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Offset {
    type Output = Offset;
    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Neg for Offset {
    type Output = Offset;
    #[inline]
    fn neg(self) -> Offset {
        Offset { x: -self.x, y: -self.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in terminal cells (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether the point (x, y) is inside `0..width` and `0..height`.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Whether either dimension is zero or negative.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangular region in terminal cells defined by position and size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// A region of the given size with its top-left corner at `origin`.
    #[inline]
    pub const fn at(origin: Offset, size: Size) -> Self {
        Self { x: origin.x, y: origin.y, width: size.width, height: size.height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// The top-left corner as an [`Offset`].
    #[inline]
    pub const fn offset(self) -> Offset {
        Offset { x: self.x, y: self.y }
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Whether the region covers no cells.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the point (x, y) lies inside this region.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether `other` is entirely contained within this region.
    #[inline]
    pub const fn contains_region(self, other: Region) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Compute the intersection of two regions.
    ///
    /// Returns [`Region::EMPTY`] if the regions do not overlap.
    #[inline]
    pub const fn intersection(self, other: Region) -> Region {
        let x1 = if self.x > other.x { self.x } else { other.x };
        let y1 = if self.y > other.y { self.y } else { other.y };

        let sr = self.right();
        let or = other.right();
        let x2 = if sr < or { sr } else { or };

        let sb = self.bottom();
        let ob = other.bottom();
        let y2 = if sb < ob { sb } else { ob };

        let w = x2 - x1;
        let h = y2 - y1;

        if w <= 0 || h <= 0 {
            Region::EMPTY
        } else {
            Region { x: x1, y: y1, width: w, height: h }
        }
    }

    /// Translate the region by an [`Offset`].
    #[inline]
    pub const fn translate(self, offset: Offset) -> Region {
        Region { x: self.x + offset.x, y: self.y + offset.y, width: self.width, height: self.height }
    }
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Horizontal placement of a box inside its parent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum XPos {
    Left,
    Right,
    Center,
    /// An absolute column, clamped into the parent.
    At(i32),
}

/// Vertical placement of a box inside its parent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum YPos {
    Top,
    Bottom,
    Center,
    /// An absolute row, clamped into the parent.
    At(i32),
}

/// Resolve a placement to the absolute top-left corner of a box of
/// `size` cells inside `parent`.
///
/// When the box is larger than the parent the gap is treated as zero, so
/// every placement collapses onto the parent's origin on that axis.
pub fn align_xy(parent: Region, x: XPos, y: YPos, size: Size) -> Offset {
    let xgap = (parent.width - size.width).max(0);
    let ygap = (parent.height - size.height).max(0);

    let ax = match x {
        XPos::Left => parent.x,
        XPos::Right => parent.x + xgap,
        XPos::Center => parent.x + xgap / 2,
        XPos::At(n) => n.clamp(parent.x, parent.x + xgap),
    };
    let ay = match y {
        YPos::Top => parent.y,
        YPos::Bottom => parent.y + ygap,
        YPos::Center => parent.y + ygap / 2,
        YPos::At(n) => n.clamp(parent.y, parent.y + ygap),
    };
    Offset::new(ax, ay)
}

/// A proposed widget dimension, resolved against the parent's extent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Take the parent's full extent.
    Full,
    /// An explicit number of cells. Zero means [`Dimension::Full`].
    Cells(i32),
    /// The parent's extent minus this many cells.
    Inset(i32),
}

/// Resolve a proposed dimension against `parent` cells.
///
/// Explicit sizes at or beyond the parent extent are capped to it; smaller
/// ones get `adjustment` added (typically the border width). An inset that
/// would go negative falls back to the parent extent.
pub fn widget_dimension(parent: i32, proposed: Dimension, adjustment: i32) -> i32 {
    match proposed {
        Dimension::Full | Dimension::Cells(0) => parent,
        Dimension::Cells(n) if n < 0 => widget_dimension(parent, Dimension::Inset(-n), adjustment),
        Dimension::Cells(n) if n >= parent => parent,
        Dimension::Cells(n) => n + adjustment,
        Dimension::Inset(n) => {
            let dim = parent - n;
            if dim < 0 {
                parent
            } else {
                dim
            }
        }
    }
}

/// Text justification inside a box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Justify {
    Left,
    Right,
    Center,
    /// A fixed starting column.
    At(i32),
}

/// Starting column for a message of `len` cells justified inside a box of
/// `box_width` cells. Messages that do not fit always start at zero.
pub fn justify_offset(box_width: i32, len: i32, justify: Justify) -> i32 {
    if len >= box_width {
        return 0;
    }
    match justify {
        Justify::Left => 0,
        Justify::Right => box_width - len,
        Justify::Center => (box_width - len) / 2,
        Justify::At(n) => n,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
