//! An instrumented widget for tests.
//!
//! [`Probe`] implements the whole [`Widget`] contract, records every call
//! into a shared [`EventLog`] as `"<name>.<call>"`, and draws a box with
//! its name inside. Injected keys consult the probe's bindings first, then
//! a per-key table of scripted results.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::draw::{draw_widget_box, write_text, Axis};
use crate::event::{check_bind, BindOutcome, KeyEvent};
use crate::geometry::{Dimension, Region, XPos, YPos};
use crate::render::Display;
use crate::widget::{Widget, WidgetCore, WidgetKind};

// ---------------------------------------------------------------------------
// EventLog
// ---------------------------------------------------------------------------

/// Shared, append-only call log.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<String>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    /// A copy of every entry so far.
    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    /// Entries containing `needle`.
    pub fn matching(&self, needle: &str) -> Vec<String> {
        self.0.borrow().iter().filter(|e| e.contains(needle)).cloned().collect()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

// ---------------------------------------------------------------------------
// Probe
// ---------------------------------------------------------------------------

/// A recording widget.
#[derive(Debug)]
pub struct Probe {
    core: WidgetCore,
    name: String,
    kind: WidgetKind,
    log: EventLog,
    results: HashMap<KeyEvent, i32>,
    delegate: Option<Box<Probe>>,
}

impl Probe {
    /// A boxed, focusable probe covering `region` of the root surface.
    pub fn new(display: &mut Display, name: &str, region: Region, log: &EventLog) -> Option<Self> {
        let root = display.root();
        let core = WidgetCore::new(
            display,
            root,
            XPos::At(region.x),
            YPos::At(region.y),
            Dimension::Cells(region.width),
            Dimension::Cells(region.height),
            true,
            false,
        )?;
        Some(Self {
            core,
            name: name.to_owned(),
            kind: WidgetKind::Custom("probe"),
            log: log.clone(),
            results: HashMap::new(),
            delegate: None,
        })
    }

    /// Set whether the probe accepts focus.
    pub fn focusable(mut self, accepts: bool) -> Self {
        self.core.accepts_focus = accepts;
        self
    }

    /// Report [`WidgetKind::Menu`].
    pub fn as_menu(mut self) -> Self {
        self.kind = WidgetKind::Menu;
        self
    }

    /// Make `inject(key)` return `Some(result)`.
    pub fn returning(mut self, key: impl Into<KeyEvent>, result: i32) -> Self {
        self.results.insert(key.into(), result);
        self
    }

    /// Delegate key bindings to an embedded probe.
    pub fn with_delegate(mut self, inner: Probe) -> Self {
        self.delegate = Some(Box::new(inner));
        self
    }

    pub fn delegate(&self) -> Option<&Probe> {
        self.delegate.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn record(&self, call: &str) {
        self.log.push(format!("{}.{}", self.name, call));
    }
}

impl Widget for Probe {
    fn kind(&self) -> WidgetKind {
        self.kind
    }

    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn draw(&mut self, display: &mut Display, boxed: bool) {
        self.record("draw");
        let id = self.core.surface();
        let inset = self.core.border_size();
        let len = self.name.chars().count() as i32;
        write_text(display, id, inset, inset, &self.name, self.core.border_attr, Axis::Horizontal, 0, len);
        if boxed {
            draw_widget_box(display, &self.core);
        } else {
            display.refresh(id);
        }
    }

    fn erase(&mut self, display: &mut Display) {
        self.record("erase");
        for id in self.core.surfaces() {
            display.erase(id);
        }
    }

    fn inject(&mut self, _display: &mut Display, key: KeyEvent) -> Option<i32> {
        self.record(&format!("inject({key})"));
        self.core.set_exit_type(key);
        match check_bind(self, key) {
            Some(BindOutcome::Status(status)) => return Some(status),
            Some(BindOutcome::Data(_)) => return None,
            None => {}
        }
        self.results.get(&key).copied()
    }

    fn focus(&mut self, _display: &mut Display) {
        self.record("focus");
    }

    fn unfocus(&mut self, _display: &mut Display) {
        self.record("unfocus");
    }

    fn destroy(&mut self, display: &mut Display) {
        self.record("destroy");
        self.core.release(display);
    }

    fn save_data(&mut self) {
        self.record("save");
    }

    fn refresh_data(&mut self) {
        self.record("refresh");
    }

    fn bindable_mut(&mut self) -> Option<&mut dyn Widget> {
        self.delegate.as_deref_mut().map(|inner| inner as &mut dyn Widget)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
