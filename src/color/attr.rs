//! Packed cell attributes.
//!
//! An [`Attr`] is the terminal-native attribute value carried by every cell:
//! modifier flags in the high byte pair and a color-pair number in bits
//! 8..16. Pair 0 means "no color" and leaves the terminal defaults alone.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Modifier flags plus an optional color pair.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Attr(pub u32);

impl Attr {
    /// No modifiers, no color.
    pub const NORMAL: Attr = Attr(0);
    /// Mask selecting the color-pair number.
    pub const COLOR: Attr = Attr(0x0000_ff00);
    pub const STANDOUT: Attr = Attr(1 << 16);
    pub const UNDERLINE: Attr = Attr(1 << 17);
    pub const REVERSE: Attr = Attr(1 << 18);
    pub const BLINK: Attr = Attr(1 << 19);
    pub const DIM: Attr = Attr(1 << 20);
    pub const BOLD: Attr = Attr(1 << 21);
    pub const INVISIBLE: Attr = Attr(1 << 22);
    /// Mask extracting every attribute bit (modifiers and color).
    pub const ATTRIBUTES: Attr = Attr(0x00ff_ff00);

    /// Mask selecting only the modifier flags.
    const MODIFIERS: u32 = 0x00ff_0000;

    /// The attribute selecting color pair `n`.
    #[inline]
    pub const fn pair(n: u8) -> Attr {
        Attr((n as u32) << 8)
    }

    /// The color-pair number, zero when uncolored.
    #[inline]
    pub const fn pair_number(self) -> u8 {
        ((self.0 & Self::COLOR.0) >> 8) as u8
    }

    /// Only the modifier flags of this attribute.
    #[inline]
    pub const fn modifiers(self) -> Attr {
        Attr(self.0 & Self::MODIFIERS)
    }

    /// Whether every bit in `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Attr) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Layer `over` on top of `self`.
    ///
    /// Modifier flags accumulate. A non-zero color pair in `over` replaces
    /// the pair in `self` instead of being OR-ed into it.
    #[inline]
    pub const fn combine(self, over: Attr) -> Attr {
        let modifiers = (self.0 | over.0) & Self::MODIFIERS;
        let source = if over.pair_number() != 0 { over.0 } else { self.0 };
        let pair = source & Self::COLOR.0;
        Attr(modifiers | pair)
    }
}

impl BitOr for Attr {
    type Output = Attr;
    fn bitor(self, rhs: Self) -> Self::Output {
        Attr(self.0 | rhs.0)
    }
}

impl BitOrAssign for Attr {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Attr {
    type Output = Attr;
    fn bitand(self, rhs: Self) -> Self::Output {
        Attr(self.0 & rhs.0)
    }
}

impl fmt::Debug for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Attr, &str); 7] = [
            (Attr::STANDOUT, "STANDOUT"),
            (Attr::UNDERLINE, "UNDERLINE"),
            (Attr::REVERSE, "REVERSE"),
            (Attr::BLINK, "BLINK"),
            (Attr::DIM, "DIM"),
            (Attr::BOLD, "BOLD"),
            (Attr::INVISIBLE, "INVISIBLE"),
        ];
        let mut parts: Vec<String> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| (*name).to_owned())
            .collect();
        if self.pair_number() != 0 {
            parts.push(format!("PAIR({})", self.pair_number()));
        }
        if parts.is_empty() {
            write!(f, "Attr(NORMAL)")
        } else {
            write!(f, "Attr({})", parts.join("|"))
        }
    }
}
