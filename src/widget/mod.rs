//! Widget system: the contract, shared core state, interactive positioning.

pub mod core;
pub mod position;
pub mod traits;

pub use self::core::{ExitType, WidgetCore, WidgetKind};
pub use position::position;
pub use traits::Widget;
