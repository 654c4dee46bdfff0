//! # cellkit
//!
//! A curses-style widget toolkit for character-cell terminals.
//!
//! cellkit keeps the classic curses model: widgets own rectangular surfaces
//! on one display, drawing changes a surface, and an explicit refresh sends
//! what changed to the terminal. A [`Screen`](screen::Screen) owns an
//! ordered registry of widgets that decides both paint order and the focus
//! cycle, and a [`Traversal`](focus::Traversal) reads keys and moves focus
//! between them.
//!
//! ## Core Systems
//!
//! - **[`color`]**: Color-pair registry and attribute packing
//! - **[`draw`]**: Boxes, lines, shadows and clipped text on surfaces
//! - **[`widget`]**: Widget trait, shared core state, interactive positioning
//! - **[`screen`]**: Widget registry, two-pass repaint, raise/lower
//! - **[`focus`]**: Focus scans and the keyboard traversal state machine
//! - **[`event`]**: Keys, per-widget key bindings, signal actions
//! - **[`render`]**: Display, surfaces, frame diffing and the crossterm backend
//! - **[`app`]**: Terminal lifecycle and screen management
//! - **[`testing`]**: Headless backend, pilot and snapshot helpers
//! - **[`geometry`]**: Offset, Size, Region and placement helpers
//!
//! ## Example
//!
//! ```no_run
//! use cellkit::app::{App, AppConfig};
//! use cellkit::geometry::Region;
//! use cellkit::testing::{EventLog, Probe};
//!
//! let mut app = App::new(AppConfig::default())?;
//! let screen = app.add_screen();
//! let log = EventLog::new();
//! if let Some(probe) = Probe::new(app.display_mut(), "hello", Region::new(2, 1, 10, 3), &log) {
//!     app.register(screen, probe);
//! }
//! let committed = app.traverse(screen);
//! app.shutdown()?;
//! println!("committed: {committed}");
//! # Ok::<(), cellkit::error::Error>(())
//! ```

// Foundation
pub mod error;
pub mod geometry;
pub mod logging;

// Terminal and drawing
pub mod color;
pub mod draw;
pub mod render;

// Widget system
pub mod event;
pub mod widget;

// Screens
pub mod focus;
pub mod screen;

// Application
pub mod app;

// Test support
pub mod testing;

pub use app::{App, AppConfig, ScreenId};
pub use error::{Error, Result};
pub use focus::{Traversal, TraversalKeys, TraversalState};
pub use screen::{ExitStatus, Screen, WidgetId};
pub use widget::{ExitType, Widget, WidgetCore, WidgetKind};
