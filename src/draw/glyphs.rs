//! Line-drawing glyph sets.

/// Upper-left corner.
pub const ULCORNER: char = '┌';
pub const URCORNER: char = '┐';
pub const LLCORNER: char = '└';
pub const LRCORNER: char = '┘';
/// Horizontal line.
pub const HLINE: char = '─';
/// Vertical line.
pub const VLINE: char = '│';

/// The six glyphs of a widget border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxGlyphs {
    pub ul: char,
    pub ur: char,
    pub ll: char,
    pub lr: char,
    pub hz: char,
    pub vt: char,
}

impl Default for BoxGlyphs {
    fn default() -> Self {
        Self {
            ul: ULCORNER,
            ur: URCORNER,
            ll: LLCORNER,
            lr: LRCORNER,
            hz: HLINE,
            vt: VLINE,
        }
    }
}

impl BoxGlyphs {
    /// Plain ASCII borders for terminals without line drawing.
    pub const ASCII: BoxGlyphs = BoxGlyphs {
        ul: '+',
        ur: '+',
        ll: '+',
        lr: '+',
        hz: '-',
        vt: '|',
    };
}

/// A box where every glyph may be suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CustomBox {
    pub ul: Option<char>,
    pub ur: Option<char>,
    pub ll: Option<char>,
    pub lr: Option<char>,
    pub hz: Option<char>,
    pub vt: Option<char>,
}

impl CustomBox {
    /// Only the top and bottom edges.
    pub fn horizontal(hz: char) -> Self {
        Self { hz: Some(hz), ..Self::default() }
    }

    /// Only the left and right edges.
    pub fn vertical(vt: char) -> Self {
        Self { vt: Some(vt), ..Self::default() }
    }

    /// Whether nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<BoxGlyphs> for CustomBox {
    fn from(g: BoxGlyphs) -> Self {
        Self {
            ul: Some(g.ul),
            ur: Some(g.ur),
            ll: Some(g.ll),
            lr: Some(g.lr),
            hz: Some(g.hz),
            vt: Some(g.vt),
        }
    }
}
