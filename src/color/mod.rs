//! Color registry: attributes, palette, symbolic label lookup.

pub mod attr;
pub mod registry;

pub use attr::Attr;
pub use registry::{ColorRegistry, PaletteColor, PAIR_BUDGET, PALETTE};
