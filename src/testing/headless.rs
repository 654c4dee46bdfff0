//! In-memory terminal backend.
//!
//! [`HeadlessBackend`] implements [`Backend`] without a terminal. Input is
//! scripted through a [`HeadlessHandle`], which also exposes the cells the
//! backend has "printed" plus flush, bell and cursor state. The handle is
//! cheap to clone and stays valid after the backend moves into a
//! [`Display`](crate::render::Display).

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use crate::color::ColorRegistry;
use crate::event::{InputEvent, KeyEvent};
use crate::render::{Backend, Cell, CellUpdate};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// A scripted read result. `None` is a timeout.
type Scripted = Option<InputEvent>;

#[derive(Debug)]
struct State {
    width: u16,
    height: u16,
    colors: bool,
    grid: Vec<Vec<Cell>>,
    input: VecDeque<Scripted>,
    flushes: usize,
    beeps: usize,
    cursor_visible: bool,
    entered: bool,
}

impl State {
    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.grid = vec![vec![Cell::blank(); width as usize]; height as usize];
    }
}

// ---------------------------------------------------------------------------
// HeadlessBackend
// ---------------------------------------------------------------------------

/// A [`Backend`] that renders into memory.
#[derive(Debug)]
pub struct HeadlessBackend {
    state: Rc<RefCell<State>>,
}

impl HeadlessBackend {
    /// A color-capable headless terminal.
    pub fn new(width: u16, height: u16) -> (Self, HeadlessHandle) {
        Self::build(width, height, true)
    }

    /// A headless terminal reporting no color support.
    pub fn without_colors(width: u16, height: u16) -> (Self, HeadlessHandle) {
        Self::build(width, height, false)
    }

    fn build(width: u16, height: u16, colors: bool) -> (Self, HeadlessHandle) {
        let mut state = State {
            width,
            height,
            colors,
            grid: Vec::new(),
            input: VecDeque::new(),
            flushes: 0,
            beeps: 0,
            cursor_visible: true,
            entered: false,
        };
        state.resize(width, height);
        let state = Rc::new(RefCell::new(state));
        (Self { state: state.clone() }, HeadlessHandle { state })
    }
}

impl Backend for HeadlessBackend {
    fn size(&self) -> io::Result<(u16, u16)> {
        let state = self.state.borrow();
        Ok((state.width, state.height))
    }

    fn has_colors(&self) -> bool {
        self.state.borrow().colors
    }

    fn enter(&mut self) -> io::Result<()> {
        self.state.borrow_mut().entered = true;
        Ok(())
    }

    fn leave(&mut self) -> io::Result<()> {
        self.state.borrow_mut().entered = false;
        Ok(())
    }

    fn apply_updates(&mut self, updates: &[CellUpdate], _colors: &ColorRegistry) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        for update in updates {
            if let Some(cell) = state
                .grid
                .get_mut(update.y as usize)
                .and_then(|row| row.get_mut(update.x as usize))
            {
                *cell = update.cell;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.state.borrow_mut().flushes += 1;
        Ok(())
    }

    /// Pops the next scripted event. An exhausted script fails the read.
    fn read_event(&mut self, _timeout: Option<Duration>) -> io::Result<Option<InputEvent>> {
        let mut state = self.state.borrow_mut();
        match state.input.pop_front() {
            Some(Some(InputEvent::Resize { width, height })) => {
                state.resize(width, height);
                Ok(Some(InputEvent::Resize { width, height }))
            }
            Some(event) => Ok(event),
            None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input script exhausted")),
        }
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.state.borrow_mut().cursor_visible = visible;
        Ok(())
    }

    fn beep(&mut self) -> io::Result<()> {
        self.state.borrow_mut().beeps += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// HeadlessHandle
// ---------------------------------------------------------------------------

/// Scripting and inspection handle for a [`HeadlessBackend`].
#[derive(Debug, Clone)]
pub struct HeadlessHandle {
    state: Rc<RefCell<State>>,
}

impl HeadlessHandle {
    // ── Input script ─────────────────────────────────────────────────

    pub fn push_key(&self, key: impl Into<KeyEvent>) {
        self.push_event(InputEvent::Key(key.into()));
    }

    pub fn push_keys<K: Into<KeyEvent>>(&self, keys: impl IntoIterator<Item = K>) {
        for key in keys {
            self.push_key(key);
        }
    }

    pub fn push_event(&self, event: InputEvent) {
        self.state.borrow_mut().input.push_back(Some(event));
    }

    /// Script a read that times out.
    pub fn push_timeout(&self) {
        self.state.borrow_mut().input.push_back(None);
    }

    /// Number of scripted reads not yet consumed.
    pub fn pending(&self) -> usize {
        self.state.borrow().input.len()
    }

    // ── Output ───────────────────────────────────────────────────────

    /// The printed cell at (x, y).
    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        let state = self.state.borrow();
        state.grid.get(y as usize).and_then(|row| row.get(x as usize)).copied()
    }

    /// Row `y` as printed, untrimmed.
    pub fn row_text(&self, y: u16) -> String {
        let state = self.state.borrow();
        state
            .grid
            .get(y as usize)
            .map(|row| row.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }

    /// The whole printed screen, rows right-trimmed and joined by `'\n'`.
    pub fn screen_text(&self) -> String {
        let height = self.state.borrow().height;
        (0..height)
            .map(|y| self.row_text(y).trim_end().to_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn flush_count(&self) -> usize {
        self.state.borrow().flushes
    }

    pub fn beep_count(&self) -> usize {
        self.state.borrow().beeps
    }

    pub fn cursor_visible(&self) -> bool {
        self.state.borrow().cursor_visible
    }

    /// Whether the terminal is in raw mode.
    pub fn entered(&self) -> bool {
        self.state.borrow().entered
    }
}

// ===========================================================================
// Tests
// ===========================================================================
