//! Box, line, shadow and text primitives.

use crate::color::Attr;
use crate::render::{Cell, Display, SurfaceId};
use crate::widget::WidgetCore;

use super::glyphs::{BoxGlyphs, CustomBox, HLINE, LLCORNER, LRCORNER, URCORNER, VLINE};

/// Direction of a text write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

// ---------------------------------------------------------------------------
// Boxes
// ---------------------------------------------------------------------------

/// Draw a line-drawing box around the full extent of `id`, then repaint it.
pub fn draw_box(display: &mut Display, id: SurfaceId, attr: Attr) {
    draw_custom_box(display, id, &CustomBox::from(BoxGlyphs::default()), attr);
}

/// Draw a box with independently optional glyphs.
///
/// The horizontal glyph fills the whole top and bottom rows, the vertical
/// glyph the whole left and right columns; corners are placed last. The
/// surface is repainted once, and only when something was drawn.
pub fn draw_custom_box(display: &mut Display, id: SurfaceId, glyphs: &CustomBox, attr: Attr) {
    let Some(surface) = display.surface_mut(id) else {
        return;
    };
    let (width, height) = (surface.width(), surface.height());
    let (right, bottom) = (width - 1, height - 1);
    let mut drawn = 0;

    if let Some(hz) = glyphs.hz {
        surface.hline(0, 0, hz, attr, width);
        surface.hline(0, bottom, hz, attr, width);
        drawn += 1;
    }
    if let Some(vt) = glyphs.vt {
        surface.vline(0, 0, vt, attr, height);
        surface.vline(right, 0, vt, attr, height);
        drawn += 1;
    }
    for (corner, x, y) in [
        (glyphs.ul, 0, 0),
        (glyphs.ur, right, 0),
        (glyphs.ll, 0, bottom),
        (glyphs.lr, right, bottom),
    ] {
        if let Some(ch) = corner {
            surface.put(x, y, ch, attr);
            drawn += 1;
        }
    }

    if drawn > 0 {
        display.refresh(id);
    }
}

/// Draw a widget's border with its own glyphs and border attribute.
pub fn draw_widget_box(display: &mut Display, core: &WidgetCore) {
    draw_custom_box(display, core.surface(), &CustomBox::from(core.glyphs), core.border_attr);
}

// ---------------------------------------------------------------------------
// Lines and shadows
// ---------------------------------------------------------------------------

/// Rasterise a line from `(x0, y0)` towards `(x1, y1)`.
///
/// Bresenham's algorithm, start inclusive and end exclusive in every
/// direction; horizontal and vertical runs fall out as degenerate cases.
/// Points outside the surface are clipped. Does not repaint.
#[allow(clippy::too_many_arguments)]
pub fn draw_line(display: &mut Display, id: SurfaceId, x0: i32, y0: i32, x1: i32, y1: i32, ch: char, attr: Attr) {
    let Some(surface) = display.surface_mut(id) else {
        return;
    };
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    while (x, y) != (x1, y1) {
        surface.put(x, y, ch, attr);
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Paint a dim drop shadow into a shadow surface, then repaint it.
///
/// The shadow surface sits one cell down and right of the box it shades:
/// a bottom edge starting one column in, a right edge, and three corners.
pub fn draw_shadow(display: &mut Display, shadow: Option<SurfaceId>) {
    let Some(id) = shadow else {
        return;
    };
    let Some(surface) = display.surface_mut(id) else {
        return;
    };
    let x_hi = surface.width() - 1;
    let y_hi = surface.height() - 1;
    let dim = Attr::DIM;

    surface.hline(1, y_hi, HLINE, dim, x_hi);
    surface.vline(x_hi, 0, VLINE, dim, y_hi);
    surface.put(x_hi, 0, URCORNER, dim);
    surface.put(0, y_hi, LLCORNER, dim);
    surface.put(x_hi, y_hi, LRCORNER, dim);
    display.refresh(id);
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Write `text[start..end)` at `(x, y)` along `axis`.
///
/// The span is clipped to the characters available and to the surface on
/// both ends; the return value counts only cells that landed on it. Each character takes
/// `attr`. Does not repaint.
#[allow(clippy::too_many_arguments)]
pub fn write_text(
    display: &mut Display,
    id: SurfaceId,
    x: i32,
    y: i32,
    text: &str,
    attr: Attr,
    axis: Axis,
    start: i32,
    end: i32,
) -> i32 {
    let cells: Vec<Cell> = text.chars().map(|ch| Cell::new(ch, Attr::NORMAL)).collect();
    write_cells(display, id, x, y, &cells, attr, axis, start, end)
}

/// Like [`write_text`] for pre-attributed cells; each cell's attribute is
/// combined with `attr`. Returns the number of cells written.
#[allow(clippy::too_many_arguments)]
pub fn write_cells(
    display: &mut Display,
    id: SurfaceId,
    x: i32,
    y: i32,
    cells: &[Cell],
    attr: Attr,
    axis: Axis,
    start: i32,
    end: i32,
) -> i32 {
    let Some(surface) = display.surface_mut(id) else {
        return 0;
    };
    let (along, across, extent, across_extent) = match axis {
        Axis::Horizontal => (x, y, surface.width(), surface.height()),
        Axis::Vertical => (y, x, surface.height(), surface.width()),
    };
    if across < 0 || across >= across_extent {
        return 0;
    }
    let len = cells.len() as i32;
    let start = start.clamp(0, len);
    let end = end.clamp(start, len);
    // Cells before the surface edge are skipped.
    let skip = (-along).max(0);
    let first = along.max(0);
    let count = (end - start - skip).min(extent - first).max(0);

    for i in 0..count {
        let cell = cells[(start + skip + i) as usize];
        let (cx, cy) = match axis {
            Axis::Horizontal => (first + i, y),
            Axis::Vertical => (x, first + i),
        };
        surface.put(cx, cy, cell.ch, cell.attr.combine(attr));
    }
    count
}

/// Write `end - start` blanks at `(x, y)` along `axis`, clipped like
/// [`write_text`].
#[allow(clippy::too_many_arguments)]
pub fn write_blanks(display: &mut Display, id: SurfaceId, x: i32, y: i32, attr: Attr, axis: Axis, start: i32, end: i32) -> i32 {
    if end <= start {
        return 0;
    }
    let blanks = " ".repeat((end - start) as usize);
    write_text(display, id, x, y, &blanks, attr, axis, 0, end - start)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Region;
    use crate::testing::snapshot::surface_to_string;
    use crate::testing::HeadlessBackend;

    fn setup(width: i32, height: i32) -> (Display, SurfaceId) {
        let (backend, _) = HeadlessBackend::new(40, 12);
        let mut display = Display::new(Box::new(backend), true).unwrap();
        let id = display.create_surface(Region::new(0, 0, width, height)).unwrap();
        (display, id)
    }

    fn text(display: &Display, id: SurfaceId) -> String {
        surface_to_string(display, id)
    }

    // ── Boxes ────────────────────────────────────────────────────────

    #[test]
    fn box_at_full_extent() {
        let (mut d, id) = setup(5, 3);
        draw_box(&mut d, id, Attr::NORMAL);
        insta::assert_snapshot!(text(&d, id), @r"
        ┌───┐
        │   │
        └───┘
        ");
        assert_eq!(d.refresh_count(), 1);
    }

    #[test]
    fn custom_box_horizontal_only() {
        let (mut d, id) = setup(4, 3);
        draw_custom_box(&mut d, id, &CustomBox::horizontal('='), Attr::NORMAL);
        assert_eq!(text(&d, id), "====\n\n====");
        assert_eq!(d.refresh_count(), 1);
    }

    #[test]
    fn custom_box_nothing_set_does_not_repaint() {
        let (mut d, id) = setup(4, 3);
        draw_custom_box(&mut d, id, &CustomBox::default(), Attr::NORMAL);
        assert_eq!(d.refresh_count(), 0);
    }

    #[test]
    fn custom_box_corners_only() {
        let (mut d, id) = setup(3, 2);
        let glyphs = CustomBox { ul: Some('a'), lr: Some('d'), ..CustomBox::default() };
        draw_custom_box(&mut d, id, &glyphs, Attr::BOLD);
        assert_eq!(text(&d, id), "a\n  d");
        let cell = d.surface(id).and_then(|s| s.get(0, 0)).unwrap();
        assert_eq!(cell.attr, Attr::BOLD);
    }

    #[test]
    fn box_on_absent_surface_is_noop() {
        let (mut d, id) = setup(3, 3);
        d.remove_surface(id);
        draw_box(&mut d, id, Attr::NORMAL);
        assert_eq!(d.refresh_count(), 0);
    }

    // ── Lines ────────────────────────────────────────────────────────

    #[test]
    fn horizontal_line_is_half_open() {
        let (mut d, id) = setup(6, 1);
        draw_line(&mut d, id, 1, 0, 4, 0, '-', Attr::NORMAL);
        assert_eq!(text(&d, id), " ---");
        draw_line(&mut d, id, 5, 0, 4, 0, '<', Attr::NORMAL);
        assert_eq!(text(&d, id), " --- <");
    }

    #[test]
    fn vertical_line_upwards() {
        let (mut d, id) = setup(1, 4);
        draw_line(&mut d, id, 0, 3, 0, 0, '|', Attr::NORMAL);
        assert_eq!(text(&d, id), "\n|\n|\n|");
    }

    #[test]
    fn diagonal_line() {
        let (mut d, id) = setup(4, 4);
        draw_line(&mut d, id, 0, 0, 3, 3, '\\', Attr::NORMAL);
        assert_eq!(text(&d, id), "\\\n \\\n  \\\n");
    }

    #[test]
    fn shallow_line_steps_once() {
        let (mut d, id) = setup(6, 2);
        draw_line(&mut d, id, 0, 0, 6, 1, '*', Attr::NORMAL);
        let stars = d
            .surface(id)
            .map(|s| s.cells().filter(|(_, _, c)| c.ch == '*').count())
            .unwrap();
        assert_eq!(stars, 6);
        assert_eq!(d.surface(id).unwrap().get(0, 0).map(|c| c.ch), Some('*'));
    }

    #[test]
    fn degenerate_line_draws_nothing() {
        let (mut d, id) = setup(3, 3);
        draw_line(&mut d, id, 1, 1, 1, 1, '#', Attr::NORMAL);
        assert_eq!(text(&d, id), "\n\n");
    }

    #[test]
    fn line_is_clipped() {
        let (mut d, id) = setup(3, 1);
        draw_line(&mut d, id, -2, 0, 8, 0, '=', Attr::NORMAL);
        assert_eq!(text(&d, id), "===");
    }

    // ── Shadow ───────────────────────────────────────────────────────

    #[test]
    fn shadow_shape() {
        let (mut d, id) = setup(5, 3);
        draw_shadow(&mut d, Some(id));
        insta::assert_snapshot!(text(&d, id), @r"
            ┐
            │
        └───┘
        ");
        let cell = d.surface(id).and_then(|s| s.get(2, 2)).unwrap();
        assert!(cell.attr.contains(Attr::DIM));
        assert_eq!(d.refresh_count(), 1);
    }

    #[test]
    fn absent_shadow_is_noop() {
        let (mut d, _) = setup(5, 3);
        draw_shadow(&mut d, None);
        assert_eq!(d.refresh_count(), 0);
    }

    // ── Text ─────────────────────────────────────────────────────────

    #[test]
    fn write_text_clips_to_remaining_width() {
        let (mut d, id) = setup(8, 1);
        let written = write_text(&mut d, id, 3, 0, "abcdefghij", Attr::NORMAL, Axis::Horizontal, 0, 10);
        assert_eq!(written, 5);
        assert_eq!(text(&d, id), "   abcde");
    }

    #[test]
    fn write_text_substring() {
        let (mut d, id) = setup(10, 1);
        let written = write_text(&mut d, id, 0, 0, "hello world", Attr::NORMAL, Axis::Horizontal, 6, 9);
        assert_eq!(written, 3);
        assert_eq!(text(&d, id), "wor");
    }

    #[test]
    fn write_text_vertical() {
        let (mut d, id) = setup(2, 3);
        let written = write_text(&mut d, id, 1, 1, "xyz", Attr::NORMAL, Axis::Vertical, 0, 3);
        assert_eq!(written, 2);
        assert_eq!(text(&d, id), "\n x\n y");
    }

    #[test]
    fn write_text_past_edge_writes_nothing() {
        let (mut d, id) = setup(4, 1);
        assert_eq!(write_text(&mut d, id, 6, 0, "abc", Attr::NORMAL, Axis::Horizontal, 0, 3), 0);
        assert_eq!(write_text(&mut d, id, 0, 0, "abc", Attr::NORMAL, Axis::Horizontal, 2, 1), 0);
    }

    #[test]
    fn write_text_before_origin_counts_visible_cells() {
        let (mut d, id) = setup(4, 2);
        let written = write_text(&mut d, id, -2, 0, "abcdefgh", Attr::NORMAL, Axis::Horizontal, 0, 8);
        assert_eq!(written, 4);
        assert_eq!(text(&d, id), "cdef");

        let written = write_text(&mut d, id, 1, -1, "xyz", Attr::NORMAL, Axis::Vertical, 0, 3);
        assert_eq!(written, 2);
        assert_eq!(text(&d, id), "cyef\n z");

        assert_eq!(write_text(&mut d, id, -5, 0, "abc", Attr::NORMAL, Axis::Horizontal, 0, 3), 0);
        assert_eq!(write_text(&mut d, id, 0, -1, "abc", Attr::NORMAL, Axis::Horizontal, 0, 3), 0);
    }

    #[test]
    fn write_cells_combines_attributes() {
        let (mut d, id) = setup(4, 1);
        let cells = [Cell::new('a', Attr::BOLD | Attr::pair(3)), Cell::new('b', Attr::NORMAL)];
        write_cells(&mut d, id, 0, 0, &cells, Attr::UNDERLINE, Axis::Horizontal, 0, 2);
        let surface = d.surface(id).unwrap();
        let a = surface.get(0, 0).unwrap().attr;
        assert!(a.contains(Attr::BOLD | Attr::UNDERLINE));
        assert_eq!(a.pair_number(), 3);
        assert_eq!(surface.get(1, 0).unwrap().attr, Attr::UNDERLINE);
    }

    #[test]
    fn write_blanks_overwrites_span() {
        let (mut d, id) = setup(6, 1);
        write_text(&mut d, id, 0, 0, "xxxxxx", Attr::NORMAL, Axis::Horizontal, 0, 6);
        assert_eq!(write_blanks(&mut d, id, 2, 0, Attr::NORMAL, Axis::Horizontal, 0, 10), 4);
        assert_eq!(text(&d, id), "xx");
        assert_eq!(write_blanks(&mut d, id, 0, 0, Attr::NORMAL, Axis::Horizontal, 3, 3), 0);
    }

    #[test]
    fn text_on_absent_surface_is_noop() {
        let (mut d, id) = setup(4, 1);
        d.remove_surface(id);
        assert_eq!(write_text(&mut d, id, 0, 0, "abc", Attr::NORMAL, Axis::Horizontal, 0, 3), 0);
    }
}
