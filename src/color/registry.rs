//! Symbolic color and attribute lookup.
//!
//! [`ColorRegistry`] maps labels such as `"bold"` or `"red_blue"` to
//! [`Attr`] values. Color pairs are registered once, from the cross product
//! of the eight-color [`PALETTE`] plus the terminal's default color, and
//! are read-only afterwards. On terminals without color support the pair
//! table stays empty and every color lookup degrades to [`Attr::NORMAL`].

use std::collections::HashMap;

use super::attr::Attr;

/// Upper bound on registered color pairs: 8x8 combinations plus eight
/// default-background and eight default-foreground variants.
pub const PAIR_BUDGET: usize = 80;

/// A base palette color, or the terminal's own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    White,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Black,
    /// The terminal's default foreground or background.
    Default,
}

/// Pair registration order. Pair numbers follow this order, starting at 1.
pub const PALETTE: [PaletteColor; 8] = [
    PaletteColor::White,
    PaletteColor::Red,
    PaletteColor::Green,
    PaletteColor::Yellow,
    PaletteColor::Blue,
    PaletteColor::Magenta,
    PaletteColor::Cyan,
    PaletteColor::Black,
];

impl PaletteColor {
    /// Lower-case label used in color-pair names.
    pub fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::Black => "black",
            Self::Default => "default",
        }
    }
}

/// Modifier labels. These resolve with or without color support.
const MODIFIERS: [(&str, Attr); 9] = [
    ("normal", Attr::NORMAL),
    ("bold", Attr::BOLD),
    ("reverse", Attr::REVERSE),
    ("underline", Attr::UNDERLINE),
    ("blink", Attr::BLINK),
    ("dim", Attr::DIM),
    ("invisible", Attr::INVISIBLE),
    ("standout", Attr::STANDOUT),
    ("extract", Attr::ATTRIBUTES),
];

// ---------------------------------------------------------------------------
// ColorRegistry
// ---------------------------------------------------------------------------

/// Label -> attribute mapping plus the registered pair table.
#[derive(Debug, Clone, Default)]
pub struct ColorRegistry {
    initialized: bool,
    supported: bool,
    labels: HashMap<String, Attr>,
    /// `pairs[n - 1]` holds the (foreground, background) of pair `n`.
    pairs: Vec<(PaletteColor, PaletteColor)>,
}

impl ColorRegistry {
    /// An uninitialised registry. Every color lookup returns the neutral
    /// attribute until [`init`](Self::init) runs on a color terminal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every color pair, once.
    ///
    /// Later calls are ignored. When `supported` is false the mapping is
    /// left empty.
    pub fn init(&mut self, supported: bool) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.supported = supported;
        if !supported {
            tracing::debug!("terminal reports no color support; color lookups are neutral");
            return;
        }

        for fg in PALETTE {
            for bg in PALETTE {
                self.register(fg, bg);
            }
        }
        for fg in PALETTE {
            self.register(fg, PaletteColor::Default);
        }
        for bg in PALETTE {
            self.register(PaletteColor::Default, bg);
        }
        tracing::debug!(pairs = self.pairs.len(), "color pairs registered");
    }

    /// Add one pair if the budget allows.
    fn register(&mut self, fg: PaletteColor, bg: PaletteColor) {
        if self.pairs.len() >= PAIR_BUDGET {
            return;
        }
        self.pairs.push((fg, bg));
        let number = self.pairs.len() as u8;
        let label = format!("{}_{}", fg.name(), bg.name());
        self.labels.insert(label, Attr::pair(number));
    }

    /// Resolve a label to an attribute.
    ///
    /// Modifier names always resolve. Color combinations may be written as
    /// `fg_bg` or `fg-on-bg`. Anything else, including every color label
    /// before initialisation or without color support, yields
    /// [`Attr::NORMAL`].
    pub fn lookup(&self, label: &str) -> Attr {
        let label = label.trim().to_ascii_lowercase();
        if let Some(attr) = modifier(&label) {
            return attr;
        }
        let key = label.replace("-on-", "_");
        self.labels.get(&key).copied().unwrap_or(Attr::NORMAL)
    }

    /// Whether the terminal reported color support at initialisation.
    pub fn has_color_support(&self) -> bool {
        self.supported
    }

    /// Whether [`init`](Self::init) has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The (foreground, background) registered for pair `n`.
    pub fn pair_colors(&self, n: u8) -> Option<(PaletteColor, PaletteColor)> {
        if n == 0 {
            return None;
        }
        self.pairs.get(n as usize - 1).copied()
    }

    /// Number of registered pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pair has been registered.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Resolve a modifier label.
fn modifier(label: &str) -> Option<Attr> {
    MODIFIERS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, attr)| *attr)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn initialized() -> ColorRegistry {
        let mut reg = ColorRegistry::new();
        reg.init(true);
        reg
    }

    #[test]
    fn new_registry_is_empty() {
        let reg = ColorRegistry::new();
        assert!(reg.is_empty());
        assert!(!reg.is_initialized());
        assert!(!reg.has_color_support());
    }

    #[test]
    fn lookup_before_init_is_neutral() {
        let reg = ColorRegistry::new();
        assert_eq!(reg.lookup("red_black"), Attr::NORMAL);
    }

    #[test]
    fn init_fills_pair_budget() {
        let reg = initialized();
        assert_eq!(reg.len(), PAIR_BUDGET);
        assert!(reg.has_color_support());
    }

    #[test]
    fn pair_numbers_follow_palette_order() {
        let reg = initialized();
        assert_eq!(reg.lookup("white_white"), Attr::pair(1));
        assert_eq!(reg.lookup("white_red"), Attr::pair(2));
        assert_eq!(reg.lookup("red_white"), Attr::pair(9));
        assert_eq!(reg.lookup("black_black"), Attr::pair(64));
        assert_eq!(reg.lookup("white_default"), Attr::pair(65));
        assert_eq!(reg.lookup("default_black"), Attr::pair(80));
    }

    #[test]
    fn pair_colors_resolve() {
        let reg = initialized();
        let attr = reg.lookup("red_blue");
        assert_eq!(
            reg.pair_colors(attr.pair_number()),
            Some((PaletteColor::Red, PaletteColor::Blue))
        );
        assert_eq!(reg.pair_colors(0), None);
        assert_eq!(reg.pair_colors(81), None);
    }

    #[test]
    fn on_spelling_is_accepted() {
        let reg = initialized();
        assert_eq!(reg.lookup("red-on-blue"), reg.lookup("red_blue"));
        assert_eq!(reg.lookup("Red_Blue"), reg.lookup("red_blue"));
    }

    #[test]
    fn unknown_label_is_neutral() {
        let reg = initialized();
        assert_eq!(reg.lookup("nonexistent-label"), Attr::NORMAL);
        assert_eq!(reg.lookup("purple_black"), Attr::NORMAL);
    }

    #[test]
    fn modifiers_resolve_without_color() {
        let mut reg = ColorRegistry::new();
        assert_eq!(reg.lookup("bold"), Attr::BOLD);
        reg.init(false);
        assert!(reg.is_empty());
        assert_eq!(reg.lookup("bold"), Attr::BOLD);
        assert_eq!(reg.lookup("reverse"), Attr::REVERSE);
        assert_eq!(reg.lookup("extract"), Attr::ATTRIBUTES);
        assert_eq!(reg.lookup("red_black"), Attr::NORMAL);
    }

    #[test]
    fn init_runs_once() {
        let mut reg = ColorRegistry::new();
        reg.init(false);
        reg.init(true);
        assert!(reg.is_empty());
        assert!(!reg.has_color_support());
    }
}
