//! Input event types wrapping crossterm for decoupling.
//!
//! Defines [`Key`], [`KeyEvent`] and [`InputEvent`]. Crossterm events are
//! converted via `From` impls so the rest of the toolkit never depends on
//! crossterm directly. Besides real keys, [`Key`] carries the pseudo codes
//! a curses-style read can produce: a null code, a read failure, a timeout
//! and a terminal resize.

use std::fmt;
use std::ops::{BitAnd, BitOr};

/// Highest function key number a binding may use.
pub const MAX_FUNCTION_KEY: u8 = 63;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Insert,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    /// The zero code. Ends a widget's input loop early.
    Null,
    /// The read failed.
    Error,
    /// A timed read elapsed without input.
    Timeout,
    /// The terminal changed size.
    Resize,
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key with no modifiers.
    pub fn plain(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    /// A control chord such as Ctrl-X.
    pub fn ctrl(ch: char) -> Self {
        Self::new(Key::Char(ch.to_ascii_lowercase()), Modifiers::CTRL)
    }

    /// Whether this is a Ctrl chord on `ch`.
    pub fn is_ctrl(&self, ch: char) -> bool {
        self.modifiers.contains(Modifiers::CTRL) && self.code == Key::Char(ch)
    }

    /// Whether this key may appear in a binding table.
    ///
    /// Pseudo codes (null, error, timeout, resize) and function keys beyond
    /// [`MAX_FUNCTION_KEY`] are out of range.
    pub fn is_bindable(&self) -> bool {
        match self.code {
            Key::Null | Key::Error | Key::Timeout | Key::Resize => false,
            Key::F(n) => n <= MAX_FUNCTION_KEY,
            Key::Char(c) => c != '\0',
            _ => true,
        }
    }

    /// Fold control-key aliases onto the keys they stand for.
    ///
    /// Emacs-style motion chords map to cursor keys, Ctrl-N / Ctrl-P to
    /// Tab / BackTab, and the ASCII control codes for carriage return,
    /// line feed, tab and backspace to their named keys.
    pub fn normalize(self) -> KeyEvent {
        if !self.modifiers.contains(Modifiers::CTRL) {
            return self;
        }
        let mapped = match self.code {
            Key::Char('a') => Key::Home,
            Key::Char('e') => Key::End,
            Key::Char('f') => Key::Right,
            Key::Char('b') => Key::Left,
            Key::Char('n') | Key::Char('i') => Key::Tab,
            Key::Char('p') => Key::BackTab,
            Key::Char('m') | Key::Char('j') => Key::Enter,
            Key::Char('h') => Key::Backspace,
            _ => return self,
        };
        KeyEvent::plain(mapped)
    }
}

impl From<Key> for KeyEvent {
    fn from(code: Key) -> Self {
        KeyEvent::plain(code)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(Modifiers::CTRL) {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.contains(Modifiers::ALT) {
            write!(f, "Alt+")?;
        }
        if self.modifiers.contains(Modifiers::SHIFT) {
            write!(f, "Shift+")?;
        }
        match self.code {
            Key::Char(c) => write!(f, "{c}"),
            Key::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event as delivered by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    /// Mouse, paste, focus and key-release events. Readers skip these.
    Other,
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

/// Convert crossterm key modifiers to our `Modifiers`.
///
/// Shift is dropped for character keys: the character already carries it.
fn convert_modifiers(code: crossterm::event::KeyCode, m: crossterm::event::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(crossterm::event::KeyModifiers::SHIFT) && !matches!(code, crossterm::event::KeyCode::Char(_)) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(crossterm::event::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(crossterm::event::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

/// Media, modifier-only and lock keys have no curses counterpart; the
/// unmapped code is returned as the error.
impl TryFrom<crossterm::event::KeyEvent> for KeyEvent {
    type Error = crossterm::event::KeyCode;

    fn try_from(ct: crossterm::event::KeyEvent) -> Result<Self, Self::Error> {
        let code = match ct.code {
            crossterm::event::KeyCode::Char('\0') | crossterm::event::KeyCode::Null => Key::Null,
            crossterm::event::KeyCode::Char(c) => Key::Char(c),
            crossterm::event::KeyCode::Enter => Key::Enter,
            crossterm::event::KeyCode::Esc => Key::Escape,
            crossterm::event::KeyCode::Tab => Key::Tab,
            crossterm::event::KeyCode::BackTab => Key::BackTab,
            crossterm::event::KeyCode::Backspace => Key::Backspace,
            crossterm::event::KeyCode::Delete => Key::Delete,
            crossterm::event::KeyCode::Insert => Key::Insert,
            crossterm::event::KeyCode::Left => Key::Left,
            crossterm::event::KeyCode::Right => Key::Right,
            crossterm::event::KeyCode::Up => Key::Up,
            crossterm::event::KeyCode::Down => Key::Down,
            crossterm::event::KeyCode::Home => Key::Home,
            crossterm::event::KeyCode::End => Key::End,
            crossterm::event::KeyCode::PageUp => Key::PageUp,
            crossterm::event::KeyCode::PageDown => Key::PageDown,
            crossterm::event::KeyCode::F(n) => Key::F(n),
            // Keypad 5 with NumLock off.
            crossterm::event::KeyCode::KeypadBegin => Key::Char('5'),
            other => return Err(other),
        };
        let modifiers = convert_modifiers(ct.code, ct.modifiers);
        Ok(KeyEvent { code, modifiers })
    }
}

impl From<crossterm::event::Event> for InputEvent {
    fn from(ct: crossterm::event::Event) -> Self {
        match ct {
            crossterm::event::Event::Key(ke) if ke.kind == crossterm::event::KeyEventKind::Release => {
                InputEvent::Other
            }
            crossterm::event::Event::Key(ke) => match KeyEvent::try_from(ke) {
                Ok(key) => InputEvent::Key(key),
                Err(code) => {
                    tracing::trace!(?code, "skipping unmapped key");
                    InputEvent::Other
                }
            },
            crossterm::event::Event::Resize(w, h) => InputEvent::Resize {
                width: w,
                height: h,
            },
            _ => InputEvent::Other,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
