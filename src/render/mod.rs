//! Rendering pipeline: cells, surfaces, frame diffing, terminal backends.

pub mod backend;
pub mod cell;
pub mod display;
pub mod driver;
pub mod frame;
pub mod surface;

slotmap::new_key_type! {
    /// Handle to a [`Surface`] owned by the [`Display`].
    pub struct SurfaceId;
}

pub use backend::Backend;
pub use cell::{Cell, CellUpdate};
pub use display::Display;
pub use driver::CrosstermBackend;
pub use frame::Frame;
pub use surface::Surface;
