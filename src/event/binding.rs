//! Per-widget key binding tables.
//!
//! A [`BindingTable`] maps a [`KeyEvent`] to a [`Binding`]: either the
//! [`BindAction::ReturnData`] sentinel, which hands the stored
//! [`BindData`] back verbatim, or a handler invoked with the widget, the
//! data and the key. Bindings are consulted before a widget's default key
//! handling.
//!
//! Composite widgets may delegate their bindings to an embedded widget
//! (see [`Widget::bindable_mut`]); the free functions in this module
//! resolve that indirection before touching any table.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::render::Display;
use crate::widget::Widget;

use super::input::KeyEvent;

// ---------------------------------------------------------------------------
// Binding types
// ---------------------------------------------------------------------------

/// Payload stored with a binding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BindData {
    #[default]
    None,
    /// A replacement key, used for key remapping.
    Key(KeyEvent),
    Int(i32),
    Text(String),
}

/// A binding handler: receives the bound widget, the stored data and the
/// key, and returns a status.
pub type BindFn = Box<dyn FnMut(&mut dyn Widget, &BindData, KeyEvent) -> i32>;

/// What happens when a bound key arrives.
pub enum BindAction {
    /// Return the stored data itself.
    ReturnData,
    Call(BindFn),
}

impl BindAction {
    /// Wrap a closure as a handler.
    pub fn call(f: impl FnMut(&mut dyn Widget, &BindData, KeyEvent) -> i32 + 'static) -> Self {
        BindAction::Call(Box::new(f))
    }
}

impl fmt::Debug for BindAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReturnData => write!(f, "ReturnData"),
            Self::Call(_) => write!(f, "Call(<fn>)"),
        }
    }
}

/// A single table entry.
#[derive(Debug)]
pub struct Binding {
    pub action: BindAction,
    pub data: BindData,
}

/// Result of [`check_bind`] on a bound key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindOutcome {
    /// The stored data, from a [`BindAction::ReturnData`] binding.
    Data(BindData),
    /// The handler's return value.
    Status(i32),
}

// ---------------------------------------------------------------------------
// BindingTable
// ---------------------------------------------------------------------------

/// Key -> binding mapping owned by one widget.
#[derive(Debug, Default)]
pub struct BindingTable {
    entries: HashMap<KeyEvent, Binding>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a binding, replacing any existing one for `key`.
    ///
    /// Keys outside the bindable range are ignored; returns whether the
    /// binding was stored.
    pub fn bind(&mut self, key: KeyEvent, action: BindAction, data: BindData) -> bool {
        if !key.is_bindable() {
            tracing::trace!(%key, "ignoring binding for reserved key");
            return false;
        }
        self.entries.insert(key, Binding { action, data });
        true
    }

    /// Remove the binding for `key`. Returns whether one existed.
    pub fn unbind(&mut self, key: KeyEvent) -> bool {
        self.entries.remove(&key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_bound(&self, key: KeyEvent) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn get(&self, key: KeyEvent) -> Option<&Binding> {
        self.entries.get(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn take(&mut self, key: KeyEvent) -> Option<Binding> {
        self.entries.remove(&key)
    }

    /// Put a taken binding back unless the handler rebound the key.
    fn restore(&mut self, key: KeyEvent, binding: Binding) {
        self.entries.entry(key).or_insert(binding);
    }
}

// ---------------------------------------------------------------------------
// Widget-level operations
// ---------------------------------------------------------------------------

/// Run `f` on the widget that owns `widget`'s bindings.
pub fn with_bindable<R>(widget: &mut dyn Widget, f: impl FnOnce(&mut dyn Widget) -> R) -> R {
    match widget.bindable_mut() {
        Some(inner) => f(inner),
        None => f(widget),
    }
}

/// Bind `key` on `widget`'s bindable widget.
pub fn bind(widget: &mut dyn Widget, key: KeyEvent, action: BindAction, data: BindData) -> bool {
    with_bindable(widget, |target| target.core_mut().bindings.bind(key, action, data))
}

/// Remove `key` from `widget`'s bindable widget.
pub fn unbind(widget: &mut dyn Widget, key: KeyEvent) -> bool {
    with_bindable(widget, |target| target.core_mut().bindings.unbind(key))
}

/// Drop every binding of `widget`'s bindable widget.
pub fn clean_bindings(widget: &mut dyn Widget) {
    with_bindable(widget, |target| target.core_mut().bindings.clear());
}

/// Whether `key` is bound on `widget`'s bindable widget.
pub fn is_bound(widget: &mut dyn Widget, key: KeyEvent) -> bool {
    with_bindable(widget, |target| target.core().bindings.is_bound(key))
}

/// Consult `widget`'s bindings for `key`.
///
/// Returns `None` when the key is not bound. The handler runs with the
/// entry temporarily removed, so it may freely rebind or unbind keys.
pub fn check_bind(widget: &mut dyn Widget, key: KeyEvent) -> Option<BindOutcome> {
    with_bindable(widget, |target| {
        let mut binding = target.core_mut().bindings.take(key)?;
        let outcome = match &mut binding.action {
            BindAction::ReturnData => BindOutcome::Data(binding.data.clone()),
            BindAction::Call(handler) => BindOutcome::Status(handler(target, &binding.data, key)),
        };
        target.core_mut().bindings.restore(key, binding);
        Some(outcome)
    })
}

/// Read one key for `widget`, applying key remapping.
///
/// A key bound with [`BindAction::ReturnData`] and [`BindData::Key`] reads
/// as the stored key. Other bound keys are returned unchanged, and unbound
/// control aliases are folded by [`KeyEvent::normalize`].
pub fn read_mapped(widget: &mut dyn Widget, display: &mut Display, timeout: Option<Duration>) -> KeyEvent {
    let key = display.read_key(timeout);
    let mapped = with_bindable(widget, |target| {
        target.core().bindings.get(key).map(|binding| match (&binding.action, &binding.data) {
            (BindAction::ReturnData, BindData::Key(replacement)) => *replacement,
            _ => key,
        })
    });
    mapped.unwrap_or_else(|| key.normalize())
}

// ===========================================================================
// Tests
// ===========================================================================
