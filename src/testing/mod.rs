//! Headless testing toolkit: backend, pilot, probe widget, snapshot helpers.
//!
//! Use [`HeadlessBackend`] to run a [`Display`](crate::render::Display)
//! without a terminal, the [`Pilot`] to drive a whole
//! [`App`](crate::app::App), [`Probe`] as a stand-in widget that records
//! every call it receives, and [`surface_to_string`] to capture output as
//! plain text for snapshot-style assertions.

pub mod headless;
pub mod pilot;
pub mod probe;
pub mod snapshot;

pub use headless::{HeadlessBackend, HeadlessHandle};
pub use pilot::Pilot;
pub use probe::{EventLog, Probe};
pub use snapshot::{frame_to_string, surface_to_string};
