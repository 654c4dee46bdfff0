//! Stateless drawing primitives.
//!
//! Boxes, lines, drop shadows and clipped text writes into a [`Surface`]
//! owned by the [`Display`]. No primitive writes outside its target
//! surface, and every operation on an absent surface is a no-op.
//!
//! [`Surface`]: crate::render::Surface
//! [`Display`]: crate::render::Display

pub mod glyphs;
pub mod primitives;

pub use glyphs::{BoxGlyphs, CustomBox};
pub use primitives::{
    draw_box, draw_custom_box, draw_line, draw_shadow, draw_widget_box, write_blanks, write_cells,
    write_text, Axis,
};
