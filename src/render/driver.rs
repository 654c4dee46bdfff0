//! Crossterm terminal backend.
//!
//! [`CrosstermBackend`] wraps a buffered stdout writer and implements
//! [`Backend`] for a real terminal: raw mode and alternate screen, cell
//! output with attribute and color-pair translation, cursor control, and
//! blocking or timed event reads.

use std::io::{self, BufWriter, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor, event, execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::color::{Attr, ColorRegistry, PaletteColor};
use crate::event::InputEvent;

use super::backend::Backend;
use super::cell::CellUpdate;

// ---------------------------------------------------------------------------
// CrosstermBackend
// ---------------------------------------------------------------------------

/// Terminal backend using crossterm.
///
/// Output is batched with `queue!`; nothing reaches the terminal until
/// [`flush`](Backend::flush).
pub struct CrosstermBackend {
    writer: BufWriter<Stdout>,
    alt_screen: bool,
    entered: bool,
}

impl CrosstermBackend {
    /// Create a backend on stdout. `alt_screen` selects whether
    /// [`enter`](Backend::enter) switches to the alternate screen.
    pub fn new(alt_screen: bool) -> Self {
        Self {
            writer: BufWriter::new(io::stdout()),
            alt_screen,
            entered: false,
        }
    }

    /// Queue crossterm style commands for an attribute.
    fn apply_attr(&mut self, attr: Attr, colors: &ColorRegistry) -> io::Result<()> {
        if let Some((fg, bg)) = colors.pair_colors(attr.pair_number()) {
            if let Some(color) = palette_color(fg) {
                queue!(self.writer, SetForegroundColor(color))?;
            }
            if let Some(color) = palette_color(bg) {
                queue!(self.writer, SetBackgroundColor(color))?;
            }
        }
        const FLAGS: [(Attr, Attribute); 7] = [
            (Attr::BOLD, Attribute::Bold),
            (Attr::DIM, Attribute::Dim),
            (Attr::UNDERLINE, Attribute::Underlined),
            (Attr::BLINK, Attribute::SlowBlink),
            (Attr::REVERSE, Attribute::Reverse),
            (Attr::STANDOUT, Attribute::Reverse),
            (Attr::INVISIBLE, Attribute::Hidden),
        ];
        for (flag, attribute) in FLAGS {
            if attr.contains(flag) {
                queue!(self.writer, SetAttribute(attribute))?;
            }
        }
        Ok(())
    }
}

impl Backend for CrosstermBackend {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn has_colors(&self) -> bool {
        crossterm::style::available_color_count() >= 8
    }

    fn enter(&mut self) -> io::Result<()> {
        if self.alt_screen {
            execute!(self.writer, EnterAlternateScreen)?;
        }
        terminal::enable_raw_mode()?;
        self.entered = true;
        Ok(())
    }

    fn leave(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        terminal::disable_raw_mode()?;
        execute!(self.writer, cursor::Show)?;
        if self.alt_screen {
            execute!(self.writer, LeaveAlternateScreen)?;
        }
        Ok(())
    }

    fn apply_updates(&mut self, updates: &[CellUpdate], colors: &ColorRegistry) -> io::Result<()> {
        for update in updates {
            queue!(self.writer, cursor::MoveTo(update.x, update.y))?;
            self.apply_attr(update.cell.attr, colors)?;
            queue!(self.writer, Print(update.cell.ch))?;
            queue!(self.writer, SetAttribute(Attribute::Reset), ResetColor)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn read_event(&mut self, timeout: Option<Duration>) -> io::Result<Option<InputEvent>> {
        if let Some(limit) = timeout {
            if !event::poll(limit)? {
                return Ok(None);
            }
        }
        Ok(Some(InputEvent::from(event::read()?)))
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            execute!(self.writer, cursor::Show)
        } else {
            execute!(self.writer, cursor::Hide)
        }
    }

    fn beep(&mut self) -> io::Result<()> {
        execute!(self.writer, Print('\u{7}'))
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        if let Err(err) = self.leave() {
            tracing::warn!(%err, "failed to restore terminal");
        }
    }
}

// ---------------------------------------------------------------------------
// Color mapping
// ---------------------------------------------------------------------------

/// The crossterm color for a palette entry. `Default` leaves the terminal
/// color alone.
pub fn palette_color(color: PaletteColor) -> Option<Color> {
    match color {
        PaletteColor::White => Some(Color::White),
        PaletteColor::Red => Some(Color::DarkRed),
        PaletteColor::Green => Some(Color::DarkGreen),
        PaletteColor::Yellow => Some(Color::DarkYellow),
        PaletteColor::Blue => Some(Color::DarkBlue),
        PaletteColor::Magenta => Some(Color::DarkMagenta),
        PaletteColor::Cyan => Some(Color::DarkCyan),
        PaletteColor::Black => Some(Color::Black),
        PaletteColor::Default => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
