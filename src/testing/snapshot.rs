//! Snapshot rendering helpers.
//!
//! Turn surfaces and frames into plain text for assertions and `insta`
//! snapshots. Each row is right-trimmed of spaces and rows are joined with
//! `'\n'`; trailing empty rows are kept so the height stays visible.

use crate::render::{Display, Frame, SurfaceId};

/// The text content of a surface, or an empty string for an unknown id.
pub fn surface_to_string(display: &Display, id: SurfaceId) -> String {
    let Some(surface) = display.surface(id) else {
        return String::new();
    };
    let rows: Vec<String> = (0..surface.height())
        .map(|y| surface.row_text(y).trim_end().to_owned())
        .collect();
    rows.join("\n")
}

/// The text content of a composited frame.
pub fn frame_to_string(frame: &Frame) -> String {
    let rows: Vec<String> = (0..frame.height)
        .map(|y| frame.row_text(y).trim_end().to_owned())
        .collect();
    rows.join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================
