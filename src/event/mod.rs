//! Event system: input, per-widget key bindings, lifecycle signals.

pub mod binding;
pub mod input;
pub mod signal;

pub use binding::{
    bind, check_bind, clean_bindings, is_bound, read_mapped, unbind, with_bindable, BindAction,
    BindData, BindFn, BindOutcome, Binding, BindingTable,
};
pub use input::{InputEvent, Key, KeyEvent, Modifiers, MAX_FUNCTION_KEY};
pub use signal::{Action, Signal, SignalTable};
