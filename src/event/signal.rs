//! Lifecycle signals and their action lists.
//!
//! Every widget carries a [`SignalTable`]: for each [`Signal`] an ordered
//! list of zero-argument actions. Actions run synchronously, in
//! registration order, on the thread that owns the event loop. Actions
//! that need widget state should capture shared handles (`Rc<Cell<_>>`,
//! `Rc<RefCell<_>>`) rather than references.

use std::fmt;

/// A lifecycle event observers may attach actions to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The widget is about to be destroyed.
    Destroy,
    /// Focus is about to move away from the widget.
    BeforeLeaving,
    /// Focus has moved away from the widget.
    AfterLeaving,
}

impl Signal {
    pub const ALL: [Signal; 3] = [Signal::Destroy, Signal::BeforeLeaving, Signal::AfterLeaving];

    fn slot(self) -> usize {
        match self {
            Signal::Destroy => 0,
            Signal::BeforeLeaving => 1,
            Signal::AfterLeaving => 2,
        }
    }
}

/// A registered signal action.
pub type Action = Box<dyn FnMut()>;

/// Per-widget signal -> actions mapping.
#[derive(Default)]
pub struct SignalTable {
    actions: [Vec<Action>; 3],
}

impl SignalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action to `signal`'s list.
    pub fn bind_signal(&mut self, signal: Signal, action: impl FnMut() + 'static) {
        self.actions[signal.slot()].push(Box::new(action));
    }

    /// Run every action bound to `signal`, in registration order.
    /// Returns how many ran.
    pub fn run_actions(&mut self, signal: Signal) -> usize {
        let actions = &mut self.actions[signal.slot()];
        for action in actions.iter_mut() {
            action();
        }
        actions.len()
    }

    /// Number of actions bound to `signal`.
    pub fn len(&self, signal: Signal) -> usize {
        self.actions[signal.slot()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.iter().all(Vec::is_empty)
    }

    /// Drop every action bound to `signal`.
    pub fn clear(&mut self, signal: Signal) {
        self.actions[signal.slot()].clear();
    }
}

impl fmt::Debug for SignalTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for signal in Signal::ALL {
            map.entry(&signal, &self.len(signal));
        }
        map.finish()
    }
}
