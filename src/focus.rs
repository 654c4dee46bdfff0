//! Focus traversal over a screen's registry.
//!
//! Focus is a single optional registry index on the [`Screen`]. The scans
//! here move that index: [`Screen::focus_next`] and
//! [`Screen::focus_previous`] wrap around the registry looking for a widget
//! that accepts focus, [`Screen::focus_on`] looks for one particular widget.
//! A scan that comes back to where it started without a match leaves focus
//! at `None`.
//!
//! [`Traversal`] is the keyboard state machine on top: it reads keys from the
//! focused widget, handles the global navigation keys, forwards everything
//! else to the widget, and runs a menu widget as an explicit sub-state.

use std::fmt;
use std::time::Duration;

use crate::event::{read_mapped, Key, KeyEvent, Signal};
use crate::render::Display;
use crate::screen::{ExitStatus, Screen, WidgetId};
use crate::widget::{ExitType, WidgetKind};

// ---------------------------------------------------------------------------
// Focus scans
// ---------------------------------------------------------------------------

impl Screen {
    /// Current focus index.
    pub fn focus_index(&self) -> Option<usize> {
        self.focus.filter(|&i| i < self.count())
    }

    /// The widget at the focus index.
    pub fn focused(&self) -> Option<WidgetId> {
        self.widget_at(self.focus_index()?)
    }

    /// Scan start: the focus index clamped into the registry.
    fn scan_start(&self) -> usize {
        self.focus.unwrap_or(0).min(self.count().saturating_sub(1))
    }

    fn accepts_focus_at(&self, index: usize) -> bool {
        self.widget_at(index)
            .and_then(|id| self.widget(id))
            .is_some_and(|w| w.accepts_focus())
    }

    /// Move focus forward to the next widget that accepts it, wrapping past
    /// the end. The widget at the starting index is checked last.
    pub fn focus_next(&mut self) -> Option<WidgetId> {
        let count = self.count();
        if count == 0 {
            self.focus = None;
            return None;
        }
        let first = self.scan_start();
        let mut n = first;
        self.focus = loop {
            n = (n + 1) % count;
            if self.accepts_focus_at(n) {
                break Some(n);
            }
            if n == first {
                break None;
            }
        };
        tracing::trace!(focus = ?self.focus, "focus advanced");
        self.focused()
    }

    /// Move focus backward to the previous widget that accepts it.
    pub fn focus_previous(&mut self) -> Option<WidgetId> {
        let count = self.count();
        if count == 0 {
            self.focus = None;
            return None;
        }
        let first = self.scan_start();
        let mut n = first;
        self.focus = loop {
            n = n.checked_sub(1).unwrap_or(count - 1);
            if self.accepts_focus_at(n) {
                break Some(n);
            }
            if n == first {
                break None;
            }
        };
        tracing::trace!(focus = ?self.focus, "focus retreated");
        self.focused()
    }

    /// Move focus to `target` by scanning forward for it. Does not check
    /// whether the widget accepts focus.
    pub fn focus_on(&mut self, target: WidgetId) -> Option<WidgetId> {
        let count = self.count();
        if count == 0 {
            self.focus = None;
            return None;
        }
        let first = self.scan_start();
        let mut n = first;
        self.focus = loop {
            n = (n + 1) % count;
            if self.widget_at(n) == Some(target) {
                break Some(n);
            }
            if n == first {
                break None;
            }
        };
        self.focused()
    }

    /// Focus the first widget that accepts focus.
    pub fn focus_first(&mut self) -> Option<WidgetId> {
        self.focus = self.count().checked_sub(1);
        self.focus_next()
    }

    /// Focus the last widget that accepts focus.
    pub fn focus_last(&mut self) -> Option<WidgetId> {
        self.focus = Some(0);
        self.focus_previous()
    }

    /// Hand focus from `old` to `new`.
    ///
    /// `old` runs its before-leaving actions, loses its focus flag, is
    /// unfocused and runs its after-leaving actions; the cursor is hidden
    /// meanwhile. Then `new` gains the flag, is focused and the cursor is
    /// shown. Nothing happens when both are the same widget.
    pub fn switch_focus(&mut self, new: Option<WidgetId>, old: Option<WidgetId>, display: &mut Display) {
        if new == old {
            return;
        }
        display.set_cursor_visible(false);
        if let Some(w) = old.and_then(|id| self.widget_mut(id)) {
            w.core_mut().signals.run_actions(Signal::BeforeLeaving);
            w.core_mut().has_focus = false;
            w.unfocus(display);
            w.core_mut().signals.run_actions(Signal::AfterLeaving);
        }
        if let Some(w) = new.and_then(|id| self.widget_mut(id)) {
            w.core_mut().has_focus = true;
            w.focus(display);
        }
        display.set_cursor_visible(true);
        tracing::debug!(?old, ?new, "focus switched");
    }

    /// Re-focus `id` without unfocusing anything.
    fn refocus(&mut self, id: WidgetId, display: &mut Display) {
        if let Some(w) = self.widget_mut(id) {
            w.core_mut().has_focus = true;
            w.focus(display);
        }
        display.set_cursor_visible(true);
    }
}

// ---------------------------------------------------------------------------
// TraversalKeys
// ---------------------------------------------------------------------------

/// The global keys a [`Traversal`] handles itself. Tab and BackTab always
/// move focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalKeys {
    /// Save data and exit.
    pub commit: KeyEvent,
    /// Exit without saving.
    pub cancel: KeyEvent,
    /// Reload every widget's data.
    pub reset: KeyEvent,
    /// Repaint the screen.
    pub repaint: KeyEvent,
}

impl Default for TraversalKeys {
    fn default() -> Self {
        Self {
            commit: KeyEvent::plain(Key::F(10)),
            cancel: KeyEvent::ctrl('x'),
            reset: KeyEvent::ctrl('r'),
            repaint: KeyEvent::ctrl('l'),
        }
    }
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

/// Decides whether a key opens the menu.
pub type MenuPredicate = Box<dyn Fn(KeyEvent) -> bool>;

/// Where keys currently go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalState {
    /// Keys go to the focused widget.
    #[default]
    Navigating,
    /// Keys go to this menu widget until it completes.
    MenuActive(WidgetId),
}

/// Keyboard focus traversal for one screen at a time.
pub struct Traversal {
    keys: TraversalKeys,
    menu_key: Option<MenuPredicate>,
    state: TraversalState,
    read_timeout: Option<Duration>,
}

impl Default for Traversal {
    fn default() -> Self {
        Self::new(TraversalKeys::default())
    }
}

impl Traversal {
    /// A traversal without a menu key that blocks on every read.
    pub fn new(keys: TraversalKeys) -> Self {
        Self {
            keys,
            menu_key: None,
            state: TraversalState::Navigating,
            read_timeout: None,
        }
    }

    /// Open the screen's menu widget on keys matching `predicate`.
    pub fn with_menu_key(mut self, predicate: impl Fn(KeyEvent) -> bool + 'static) -> Self {
        self.menu_key = Some(Box::new(predicate));
        self
    }

    /// Bound every key read; `None` blocks.
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn keys(&self) -> &TraversalKeys {
        &self.keys
    }

    pub fn state(&self) -> TraversalState {
        self.state
    }

    fn claims_menu_key(&self, key: KeyEvent) -> bool {
        self.menu_key.as_ref().is_some_and(|claims| claims(key))
    }

    /// Handle one key.
    ///
    /// In [`TraversalState::Navigating`]: Tab and BackTab move focus, the
    /// commit and cancel keys set the screen's exit status, the reset key
    /// reloads every widget's data and the repaint key refreshes the screen
    /// (both re-focus the current widget). A key claimed by the menu
    /// predicate hands control to the first menu widget in the registry.
    /// Every other key is injected into the focused widget. A read error
    /// marks the focused widget's exit-type and cancels the screen.
    ///
    /// In [`TraversalState::MenuActive`]: keys go to the menu. Tab ends the
    /// menu, Escape is injected and ends it, and any other key ends it once
    /// the menu reports a result. Focus then returns to the focused widget.
    ///
    /// Returns the result of the inject call the key was forwarded to.
    pub fn dispatch(&mut self, screen: &mut Screen, display: &mut Display, key: KeyEvent) -> Option<i32> {
        match self.state {
            TraversalState::MenuActive(menu) => self.dispatch_menu(screen, display, menu, key),
            TraversalState::Navigating => self.dispatch_navigating(screen, display, key),
        }
    }

    fn dispatch_navigating(&mut self, screen: &mut Screen, display: &mut Display, key: KeyEvent) -> Option<i32> {
        let current = screen.focused()?;

        match key.code {
            Key::Timeout => return None,
            Key::Error => {
                if let Some(w) = screen.widget_mut(current) {
                    w.core_mut().exit_type = ExitType::Error;
                }
                screen.set_exit_status(ExitStatus::Cancel);
                tracing::warn!("key read failed, cancelling traversal");
                return None;
            }
            Key::Resize => {
                screen.erase(display);
                screen.refresh(display);
                return None;
            }
            Key::BackTab => {
                let next = screen.focus_previous();
                screen.switch_focus(next, Some(current), display);
                return None;
            }
            Key::Tab if key.modifiers.is_empty() => {
                let next = screen.focus_next();
                screen.switch_focus(next, Some(current), display);
                return None;
            }
            _ => {}
        }

        if key == self.keys.commit {
            screen.set_exit_status(ExitStatus::Ok);
        } else if key == self.keys.cancel {
            screen.set_exit_status(ExitStatus::Cancel);
        } else if key == self.keys.reset {
            screen.refresh_data();
            screen.refocus(current, display);
        } else if key == self.keys.repaint {
            screen.refresh(display);
            screen.refocus(current, display);
        } else if let Some(menu) = self.menu_for(screen, key) {
            screen.switch_focus(Some(menu), Some(current), display);
            self.state = TraversalState::MenuActive(menu);
            tracing::debug!(?menu, "menu activated");
        } else {
            return screen.widget_mut(current)?.inject(display, key);
        }
        None
    }

    /// The first registered menu, if `key` opens one.
    fn menu_for(&self, screen: &Screen, key: KeyEvent) -> Option<WidgetId> {
        if !self.claims_menu_key(key) {
            return None;
        }
        screen
            .ids()
            .iter()
            .copied()
            .find(|id| screen.widget(*id).is_some_and(|w| w.kind() == WidgetKind::Menu))
    }

    fn dispatch_menu(&mut self, screen: &mut Screen, display: &mut Display, menu: WidgetId, key: KeyEvent) -> Option<i32> {
        let (done, result) = match key.code {
            Key::Tab => (true, None),
            Key::Escape => (true, screen.widget_mut(menu).and_then(|w| w.inject(display, key))),
            _ => match screen.widget_mut(menu) {
                Some(w) => {
                    let result = w.inject(display, key);
                    (result.is_some(), result)
                }
                None => (true, None),
            },
        };

        if done {
            let next = match screen.focused() {
                Some(id) => Some(id),
                None => screen.focus_next(),
            };
            screen.switch_focus(next, Some(menu), display);
            self.state = TraversalState::Navigating;
            tracing::debug!(?menu, "menu closed");
        }
        result
    }

    /// Run the screen until it is committed or cancelled.
    ///
    /// Reloads every widget's data, focuses the first focusable widget,
    /// repaints, then reads and dispatches keys. A commit saves every
    /// widget's data and returns `true`. Anything else returns `false`,
    /// including a screen with no focusable widget.
    pub fn run(&mut self, screen: &mut Screen, display: &mut Display) -> bool {
        screen.refresh_data();
        screen.set_exit_status(ExitStatus::None);
        self.state = TraversalState::Navigating;

        let Some(first) = screen.focus_first() else {
            return false;
        };
        screen.switch_focus(Some(first), None, display);
        screen.refresh(display);
        tracing::debug!(count = screen.count(), "traversal started");

        while screen.exit_status() == ExitStatus::None {
            let reader = match self.state {
                TraversalState::MenuActive(menu) => menu,
                TraversalState::Navigating => match screen.focused() {
                    Some(id) => id,
                    None => break,
                },
            };
            let Some(widget) = screen.widget_mut(reader) else {
                self.state = TraversalState::Navigating;
                continue;
            };
            let key = read_mapped(widget, display, self.read_timeout);
            self.dispatch(screen, display, key);
        }

        let committed = screen.exit_status() == ExitStatus::Ok;
        if committed {
            screen.save_data();
        }
        tracing::debug!(status = ?screen.exit_status(), "traversal finished");
        committed
    }
}

impl fmt::Debug for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traversal")
            .field("keys", &self.keys)
            .field("menu_key", &self.menu_key.is_some())
            .field("state", &self.state)
            .field("read_timeout", &self.read_timeout)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
