//! Crate error type.
//!
//! Only host-facing constructors report failures through [`Error`]. Widget
//! and surface construction signals failure with `None`, invalid operations
//! are silent no-ops, and read failures surface as [`Key::Error`] and an
//! error exit-type.
//!
//! [`Key::Error`]: crate::event::Key::Error

use std::io;

/// Errors raised while bringing up or tearing down the terminal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Terminal I/O failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The terminal cannot host even a single cell.
    #[error("terminal too small ({width}x{height})")]
    TerminalTooSmall { width: u16, height: u16 },
}

/// Result alias used by the host-facing constructors.
pub type Result<T> = std::result::Result<T, Error>;
