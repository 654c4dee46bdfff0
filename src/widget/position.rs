//! Interactive widget positioning.
//!
//! [`position`] runs a small key loop that lets the user nudge a widget
//! around its parent with the cursor keys or the numeric keypad, snap it
//! to an edge or the centre with letter keys, and confirm with Enter.

use crate::event::{read_mapped, Key, KeyEvent};
use crate::geometry::{XPos, YPos};
use crate::render::Display;

use super::traits::Widget;

/// Key that redraws the whole terminal during positioning.
pub const REPAINT_KEY: KeyEvent = KeyEvent {
    code: Key::Char('l'),
    modifiers: crate::event::Modifiers::CTRL,
};

/// One-cell step for a direction key, as (dx, dy).
fn step(key: KeyEvent) -> Option<(i32, i32)> {
    if !key.modifiers.is_empty() {
        return None;
    }
    match key.code {
        Key::Up | Key::Char('8') => Some((0, -1)),
        Key::Down | Key::Char('2') => Some((0, 1)),
        Key::Left | Key::Char('4') => Some((-1, 0)),
        Key::Right | Key::Char('6') => Some((1, 0)),
        Key::Char('7') => Some((-1, -1)),
        Key::Char('9') => Some((1, -1)),
        Key::Char('1') => Some((-1, 1)),
        Key::Char('3') => Some((1, 1)),
        _ => None,
    }
}

/// Interactively reposition `widget` inside its parent.
///
/// - Arrow keys and keypad digits 1-4 and 6-9 move one cell; a move that
///   would push any part of the widget outside the parent beeps instead.
/// - `5` centres the widget. `t`, `b`, `l` and `r` snap to the top,
///   bottom, left and right edges; `c` centres horizontally and `C`
///   vertically.
/// - Escape restores the position the loop started from.
/// - The repaint key redraws the terminal.
/// - Enter ends the loop. A failed read ends it too.
///
/// Keys are read through the widget's own key remapping.
///
/// Every other key beeps.
pub fn position(widget: &mut dyn Widget, display: &mut Display) {
    let Some(start) = display.region(widget.core().surface()) else {
        return;
    };
    tracing::debug!(x = start.x, y = start.y, "interactive positioning started");

    loop {
        let key = read_mapped(widget, display, None);
        if matches!(key.code, Key::Enter | Key::Error) {
            break;
        }

        let (Some(current), Some(bounds)) = (
            display.region(widget.core().surface()),
            display.region(widget.core().parent()),
        ) else {
            break;
        };

        if let Some((dx, dy)) = step(key) {
            let moved = current.translate(crate::geometry::Offset::new(dx, dy));
            if bounds.contains_region(moved) {
                widget.move_to(display, XPos::At(dx), YPos::At(dy), true, true);
            } else {
                display.beep();
            }
            continue;
        }

        let here_x = XPos::At(current.x);
        let here_y = YPos::At(current.y);
        match key.code {
            Key::Char('5') => widget.move_to(display, XPos::Center, YPos::Center, false, true),
            Key::Char('t') => widget.move_to(display, here_x, YPos::Top, false, true),
            Key::Char('b') => widget.move_to(display, here_x, YPos::Bottom, false, true),
            Key::Char('l') if key.modifiers.is_empty() => {
                widget.move_to(display, XPos::Left, here_y, false, true)
            }
            Key::Char('r') => widget.move_to(display, XPos::Right, here_y, false, true),
            Key::Char('c') => widget.move_to(display, XPos::Center, here_y, false, true),
            Key::Char('C') => widget.move_to(display, here_x, YPos::Center, false, true),
            Key::Escape => widget.move_to(display, XPos::At(start.x), YPos::At(start.y), false, true),
            _ if key == REPAINT_KEY => display.redraw(),
            _ => display.beep(),
        }
    }

    if let Some(end) = display.region(widget.core().surface()) {
        tracing::debug!(x = end.x, y = end.y, "interactive positioning finished");
    }
}

// ===========================================================================
// Tests
// ===========================================================================
