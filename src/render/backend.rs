//! The terminal-control surface the toolkit is written against.

use std::io;
use std::time::Duration;

use crate::color::ColorRegistry;
use crate::event::InputEvent;

use super::cell::CellUpdate;

/// Primitive terminal operations.
///
/// [`Display`](super::Display) owns exactly one backend. The crossterm
/// implementation is [`CrosstermBackend`](super::CrosstermBackend); tests
/// use [`HeadlessBackend`](crate::testing::HeadlessBackend).
pub trait Backend {
    /// Terminal size as (columns, rows).
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Whether the terminal can display colors.
    fn has_colors(&self) -> bool;

    /// Enter raw mode (and the alternate screen when requested).
    fn enter(&mut self) -> io::Result<()>;

    /// Undo [`enter`](Self::enter).
    fn leave(&mut self) -> io::Result<()>;

    /// Queue cell updates. Color pairs are resolved through `colors`.
    fn apply_updates(&mut self, updates: &[CellUpdate], colors: &ColorRegistry) -> io::Result<()>;

    /// Send queued output to the terminal.
    fn flush(&mut self) -> io::Result<()>;

    /// Block for one input event. `Ok(None)` means `timeout` elapsed.
    fn read_event(&mut self, timeout: Option<Duration>) -> io::Result<Option<InputEvent>>;

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    /// Audible bell.
    fn beep(&mut self) -> io::Result<()>;
}
