//! Screen: the widget registry, paint order and exit status.
//!
//! A [`Screen`] owns the widgets registered with it in an ordered
//! registry. Registry position is the single source of truth for both the
//! focus cycle and the paint order: later widgets paint over earlier ones,
//! and [`Screen::raise`] / [`Screen::lower`] restack by swapping positions.
//! Focus scanning and traversal over the registry live in
//! [`focus`](crate::focus).

use slotmap::SlotMap;

use crate::event::Signal;
use crate::render::{Display, SurfaceId};
use crate::widget::{self, Widget};

slotmap::new_key_type! {
    /// Handle to a widget registered with a [`Screen`].
    pub struct WidgetId;
}

// ---------------------------------------------------------------------------
// ExitStatus
// ---------------------------------------------------------------------------

/// How a traversal of the screen ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExitStatus {
    /// Still running.
    #[default]
    None,
    /// Committed: widget data should be saved.
    Ok,
    Cancel,
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// An ordered registry of widgets sharing one surface.
pub struct Screen {
    window: SurfaceId,
    widgets: SlotMap<WidgetId, Box<dyn Widget>>,
    /// Registry order; `registry[i]`'s widget has screen index `i`.
    registry: Vec<WidgetId>,
    capacity: usize,
    pub(crate) focus: Option<usize>,
    pub(crate) exit_status: ExitStatus,
}

impl Screen {
    /// An empty screen drawing on `window`.
    pub fn new(window: SurfaceId) -> Self {
        Self {
            window,
            widgets: SlotMap::with_key(),
            registry: Vec::new(),
            capacity: 0,
            focus: None,
            exit_status: ExitStatus::None,
        }
    }

    /// The surface this screen repaints.
    pub fn window(&self) -> SurfaceId {
        self.window
    }

    // -- registry --------------------------------------------------------

    /// Number of registered widgets.
    pub fn count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Reserved registry slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a widget to the registry and take ownership of it.
    ///
    /// The backing capacity grows to `(capacity + 2) * 2` whenever the
    /// registry would fill up.
    pub fn register(&mut self, widget: Box<dyn Widget>) -> WidgetId {
        let index = self.registry.len();
        if index + 1 >= self.capacity {
            self.capacity = (self.capacity + 2) * 2;
            self.registry.reserve(self.capacity - index);
        }
        let id = self.widgets.insert(widget);
        if let Some(w) = self.widgets.get_mut(id) {
            w.core_mut().set_screen_index(Some(index));
        }
        self.registry.push(id);
        tracing::debug!(index, capacity = self.capacity, "widget registered");
        id
    }

    /// Remove a widget and hand it back to the caller.
    ///
    /// Widgets after it move down one slot. A focus index on the removed
    /// slot moves back one and re-advances; a focus index after it moves
    /// back one. Emptying the registry resets its capacity. Returns `None`
    /// for an unknown id.
    pub fn unregister(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        let index = self.index_of(id)?;
        self.registry.remove(index);
        let mut widget = self.widgets.remove(id)?;
        widget.core_mut().set_screen_index(None);

        if self.registry.is_empty() {
            self.capacity = 0;
            self.focus = None;
        } else {
            self.resequence(index);
            match self.focus {
                Some(f) if f == index => {
                    self.focus = index.checked_sub(1);
                    self.focus_next();
                }
                Some(f) if f > index => self.focus = Some(f - 1),
                _ => {}
            }
        }
        tracing::debug!(index, count = self.count(), "widget unregistered");
        Some(widget)
    }

    /// Move a widget to the top of the paint order.
    pub fn raise(&mut self, id: WidgetId) {
        if let (Some(index), Some(last)) = (self.index_of(id), self.count().checked_sub(1)) {
            self.swap(index, last);
            tracing::debug!(from = index, to = last, "widget raised");
        }
    }

    /// Move a widget to the bottom of the paint order.
    pub fn lower(&mut self, id: WidgetId) {
        if let Some(index) = self.index_of(id) {
            self.swap(index, 0);
            tracing::debug!(from = index, to = 0, "widget lowered");
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b || a >= self.count() || b >= self.count() {
            return;
        }
        self.registry.swap(a, b);
        self.resequence(a.min(b));
        self.focus = match self.focus {
            Some(f) if f == a => Some(b),
            Some(f) if f == b => Some(a),
            other => other,
        };
    }

    /// Rewrite stored indices from `from` onwards.
    fn resequence(&mut self, from: usize) {
        for (index, id) in self.registry.iter().enumerate().skip(from) {
            if let Some(w) = self.widgets.get_mut(*id) {
                w.core_mut().set_screen_index(Some(index));
            }
        }
    }

    // -- lookup ----------------------------------------------------------

    /// Registry position of a widget.
    pub fn index_of(&self, id: WidgetId) -> Option<usize> {
        self.widgets.get(id)?.core().screen_index()
    }

    /// The widget at registry position `index`.
    pub fn widget_at(&self, index: usize) -> Option<WidgetId> {
        self.registry.get(index).copied()
    }

    /// Widget ids in registry order.
    pub fn ids(&self) -> &[WidgetId] {
        &self.registry
    }

    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.widgets.get(id).map(|w| &**w)
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut dyn Widget> {
        self.widgets.get_mut(id).map(|w| &mut **w as &mut dyn Widget)
    }

    /// Typed access to a registered widget.
    pub fn get<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.widget(id)?.downcast_ref::<T>()
    }

    pub fn get_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.widget_mut(id)?.downcast_mut::<T>()
    }

    // -- exit status -----------------------------------------------------

    pub fn exit_status(&self) -> ExitStatus {
        self.exit_status
    }

    pub fn set_exit_status(&mut self, status: ExitStatus) {
        self.exit_status = status;
    }

    // -- painting --------------------------------------------------------

    /// Repaint the screen.
    ///
    /// The window is refreshed first. One pass erases every invisible
    /// widget and notes the first visible widget that holds focus; a second
    /// pass sets each widget's focus flag from that note and draws the
    /// visible widgets in registry order.
    pub fn refresh(&mut self, display: &mut Display) {
        display.refresh(self.window);

        let mut focused = None;
        for (index, id) in self.registry.iter().enumerate() {
            let Some(w) = self.widgets.get_mut(*id) else {
                continue;
            };
            if w.core().visible {
                if w.core().has_focus && focused.is_none() {
                    focused = Some(index);
                }
            } else {
                w.erase(display);
            }
        }

        for (index, id) in self.registry.iter().enumerate() {
            let Some(w) = self.widgets.get_mut(*id) else {
                continue;
            };
            w.core_mut().has_focus = focused == Some(index);
            if w.core().visible {
                let boxed = w.core().boxed;
                w.draw(display, boxed);
            }
        }
        tracing::trace!(count = self.count(), ?focused, "screen refreshed");
    }

    /// Erase every widget, then repaint the window.
    pub fn erase(&mut self, display: &mut Display) {
        for id in &self.registry {
            if let Some(w) = self.widgets.get_mut(*id) {
                w.erase(display);
            }
        }
        display.refresh(self.window);
    }

    /// Unregister and destroy one widget, running its destroy actions.
    pub fn destroy_widget(&mut self, id: WidgetId, display: &mut Display) {
        if let Some(mut w) = self.unregister(id) {
            teardown(w.as_mut(), display);
        }
    }

    /// Erase and destroy every registered widget. The screen itself stays
    /// usable.
    pub fn destroy_widgets(&mut self, display: &mut Display) {
        let ids = std::mem::take(&mut self.registry);
        for id in ids {
            if let Some(mut w) = self.widgets.remove(id) {
                w.core_mut().set_screen_index(None);
                teardown(w.as_mut(), display);
            }
        }
        self.capacity = 0;
        self.focus = None;
        tracing::debug!("screen widgets destroyed");
    }

    // -- data ------------------------------------------------------------

    /// Reload every widget's value, in registry order.
    pub fn refresh_data(&mut self) {
        for id in &self.registry {
            if let Some(w) = self.widgets.get_mut(*id) {
                w.refresh_data();
            }
        }
    }

    /// Persist every widget's value, in registry order.
    pub fn save_data(&mut self) {
        for id in &self.registry {
            if let Some(w) = self.widgets.get_mut(*id) {
                w.save_data();
            }
        }
    }

    /// Interactively reposition a widget. See [`widget::position`].
    pub fn position(&mut self, id: WidgetId, display: &mut Display) {
        if let Some(w) = self.widget_mut(id) {
            widget::position(w, display);
        }
    }
}

/// Erase, run destroy actions, destroy.
fn teardown(widget: &mut dyn Widget, display: &mut Display) {
    widget.erase(display);
    widget.core_mut().signals.run_actions(Signal::Destroy);
    widget.destroy(display);
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("count", &self.count())
            .field("capacity", &self.capacity)
            .field("focus", &self.focus)
            .field("exit_status", &self.exit_status)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Region;
    use crate::testing::{EventLog, HeadlessBackend, Probe};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setup() -> (Display, Screen, EventLog) {
        let (backend, _) = HeadlessBackend::new(40, 12);
        let display = Display::new(Box::new(backend), true).unwrap();
        let screen = Screen::new(display.root());
        (display, screen, EventLog::new())
    }

    fn probe(display: &mut Display, log: &EventLog, name: &str, x: i32) -> Box<dyn Widget> {
        Box::new(Probe::new(display, name, Region::new(x, 0, 5, 3), log).unwrap())
    }

    fn names(screen: &Screen) -> Vec<String> {
        screen
            .ids()
            .iter()
            .filter_map(|id| screen.get::<Probe>(*id))
            .map(|p| p.name().to_owned())
            .collect()
    }

    fn indices_match(screen: &Screen) -> bool {
        screen
            .ids()
            .iter()
            .enumerate()
            .all(|(i, id)| screen.index_of(*id) == Some(i))
    }

    // ── register ─────────────────────────────────────────────────────

    #[test]
    fn register_assigns_sequential_indices() {
        let (mut d, mut s, log) = setup();
        let a = s.register(probe(&mut d, &log, "a", 0));
        let b = s.register(probe(&mut d, &log, "b", 6));
        assert_eq!(s.index_of(a), Some(0));
        assert_eq!(s.index_of(b), Some(1));
        assert_eq!(s.count(), 2);
    }

    #[test]
    fn capacity_grows_by_doubling_plus_offset() {
        let (mut d, mut s, log) = setup();
        let mut seen = Vec::new();
        for n in 0..12 {
            s.register(probe(&mut d, &log, &format!("w{n}"), 0));
            assert!(s.capacity() >= s.count() + 1);
            if seen.last() != Some(&s.capacity()) {
                seen.push(s.capacity());
            }
        }
        assert_eq!(seen, vec![4, 12, 28]);
        let expected: Vec<String> = (0..12).map(|n| format!("w{n}")).collect();
        assert_eq!(names(&s), expected);
        assert!(indices_match(&s));
    }

    // ── unregister ───────────────────────────────────────────────────

    #[test]
    fn unregister_resequences() {
        let (mut d, mut s, log) = setup();
        let ids: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|n| s.register(probe(&mut d, &log, n, 0)))
            .collect();
        let removed = s.unregister(ids[1]).unwrap();
        assert_eq!(removed.core().screen_index(), None);
        assert_eq!(names(&s), vec!["a", "c", "d"]);
        assert_eq!(s.index_of(ids[0]), Some(0));
        assert_eq!(s.index_of(ids[2]), Some(1));
        assert_eq!(s.index_of(ids[3]), Some(2));
        assert!(indices_match(&s));
    }

    #[test]
    fn unregister_unknown_is_noop() {
        let (mut d, mut s, log) = setup();
        let a = s.register(probe(&mut d, &log, "a", 0));
        s.unregister(a);
        assert!(s.unregister(a).is_none());
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn unregister_last_resets_capacity() {
        let (mut d, mut s, log) = setup();
        let a = s.register(probe(&mut d, &log, "a", 0));
        s.focus = Some(0);
        s.unregister(a);
        assert_eq!(s.capacity(), 0);
        assert_eq!(s.focus, None);
    }

    #[test]
    fn unregister_adjusts_focus_after_removed() {
        let (mut d, mut s, log) = setup();
        let a = s.register(probe(&mut d, &log, "a", 0));
        s.register(probe(&mut d, &log, "b", 0));
        s.register(probe(&mut d, &log, "c", 0));
        s.focus = Some(2);
        s.unregister(a);
        assert_eq!(s.focus, Some(1));
    }

    // ── raise / lower ────────────────────────────────────────────────

    #[test]
    fn raise_swaps_with_last() {
        let (mut d, mut s, log) = setup();
        let a = s.register(probe(&mut d, &log, "a", 0));
        s.register(probe(&mut d, &log, "b", 0));
        s.register(probe(&mut d, &log, "c", 0));
        s.focus = Some(0);
        s.raise(a);
        assert_eq!(names(&s), vec!["c", "b", "a"]);
        assert_eq!(s.focus, Some(2));
        assert!(indices_match(&s));
    }

    #[test]
    fn lower_swaps_with_first() {
        let (mut d, mut s, log) = setup();
        s.register(probe(&mut d, &log, "a", 0));
        s.register(probe(&mut d, &log, "b", 0));
        let c = s.register(probe(&mut d, &log, "c", 0));
        s.focus = Some(0);
        s.lower(c);
        assert_eq!(names(&s), vec!["c", "b", "a"]);
        assert_eq!(s.focus, Some(2));
        s.lower(c);
        assert_eq!(names(&s), vec!["c", "b", "a"]);
    }

    // ── refresh ──────────────────────────────────────────────────────

    #[test]
    fn refresh_erases_hidden_then_draws_visible_in_order() {
        let (mut d, mut s, log) = setup();
        s.register(probe(&mut d, &log, "a", 0));
        let b = s.register(probe(&mut d, &log, "b", 6));
        s.register(probe(&mut d, &log, "c", 12));
        s.widget_mut(b).unwrap().core_mut().visible = false;
        s.refresh(&mut d);
        assert_eq!(log.entries(), vec!["b.erase", "a.draw", "c.draw"]);
    }

    #[test]
    fn refresh_keeps_single_focus_flag() {
        let (mut d, mut s, log) = setup();
        let a = s.register(probe(&mut d, &log, "a", 0));
        let b = s.register(probe(&mut d, &log, "b", 6));
        s.widget_mut(a).unwrap().core_mut().has_focus = true;
        s.widget_mut(b).unwrap().core_mut().has_focus = true;
        s.refresh(&mut d);
        assert!(s.widget(a).unwrap().has_focus());
        assert!(!s.widget(b).unwrap().has_focus());
    }

    #[test]
    fn later_widgets_paint_on_top() {
        let (mut d, mut s, log) = setup();
        let a = s.register(probe(&mut d, &log, "a", 0));
        s.register(probe(&mut d, &log, "b", 2));
        s.refresh(&mut d);
        assert_eq!(d.frame().row_text(1).trim_end(), "│a│b  │");
        s.raise(a);
        s.refresh(&mut d);
        assert_eq!(d.frame().row_text(1).trim_end(), "│a  │ │");
    }

    // ── erase / destroy ──────────────────────────────────────────────

    #[test]
    fn erase_erases_every_widget() {
        let (mut d, mut s, log) = setup();
        s.register(probe(&mut d, &log, "a", 0));
        s.register(probe(&mut d, &log, "b", 6));
        s.refresh(&mut d);
        log.clear();
        s.erase(&mut d);
        assert_eq!(log.entries(), vec!["a.erase", "b.erase"]);
        assert_eq!(d.frame().row_text(1).trim_end(), "");
    }

    #[test]
    fn destroy_widgets_runs_destroy_actions() {
        let (mut d, mut s, log) = setup();
        let fired = Rc::new(RefCell::new(Vec::new()));
        for name in ["a", "b"] {
            let id = s.register(probe(&mut d, &log, name, 0));
            let fired = fired.clone();
            s.widget_mut(id)
                .unwrap()
                .core_mut()
                .signals
                .bind_signal(Signal::Destroy, move || fired.borrow_mut().push(name));
        }
        s.destroy_widgets(&mut d);
        assert_eq!(log.entries(), vec!["a.erase", "a.destroy", "b.erase", "b.destroy"]);
        assert_eq!(*fired.borrow(), vec!["a", "b"]);
        assert!(s.is_empty());
        assert_eq!(s.capacity(), 0);
    }

    #[test]
    fn destroy_widget_unregisters() {
        let (mut d, mut s, log) = setup();
        let a = s.register(probe(&mut d, &log, "a", 0));
        let b = s.register(probe(&mut d, &log, "b", 0));
        s.destroy_widget(a, &mut d);
        assert_eq!(s.index_of(b), Some(0));
        assert_eq!(log.entries(), vec!["a.erase", "a.destroy"]);
    }

    // ── data ─────────────────────────────────────────────────────────

    #[test]
    fn data_hooks_run_in_registry_order() {
        let (mut d, mut s, log) = setup();
        s.register(probe(&mut d, &log, "a", 0));
        s.register(probe(&mut d, &log, "b", 0));
        s.refresh_data();
        s.save_data();
        assert_eq!(log.entries(), vec!["a.refresh", "b.refresh", "a.save", "b.save"]);
    }
}
