//! App struct: terminal lifecycle and screen management.
//!
//! [`App`] owns the one [`Display`] and an arena of [`Screen`]s. Hosts create
//! screens, build widgets against [`App::display_mut`], register them, and
//! hand a screen to [`App::traverse`]. The [`App::with_backend`] constructor
//! runs the same code against any [`Backend`], which is how the headless
//! test pilot works.

use std::time::Duration;

use slotmap::SlotMap;

use crate::error::Result;
use crate::focus::{Traversal, TraversalKeys};
use crate::render::{Backend, CrosstermBackend, Display, SurfaceId};
use crate::screen::{Screen, WidgetId};
use crate::widget::Widget;

slotmap::new_key_type! {
    /// Handle to a screen owned by an [`App`].
    pub struct ScreenId;
}

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Upper bound on each key read. `None` blocks.
    pub read_timeout: Option<Duration>,
    /// Use colors when the terminal supports them.
    pub use_color: bool,
    /// Draw on the alternate screen.
    pub alt_screen: bool,
    /// Global traversal keys.
    pub keys: TraversalKeys,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            read_timeout: None,
            use_color: true,
            alt_screen: true,
            keys: TraversalKeys::default(),
        }
    }
}

impl AppConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key read timeout (builder).
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Enable or disable colors (builder).
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Enable or disable the alternate screen (builder).
    pub fn with_alt_screen(mut self, alt_screen: bool) -> Self {
        self.alt_screen = alt_screen;
        self
    }

    /// Replace the traversal keys (builder).
    pub fn with_keys(mut self, keys: TraversalKeys) -> Self {
        self.keys = keys;
        self
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The main application struct.
pub struct App {
    display: Display,
    screens: SlotMap<ScreenId, Screen>,
    config: AppConfig,
}

impl App {
    /// Take over the controlling terminal.
    ///
    /// Fails when the terminal cannot be queried or switched into raw mode,
    /// or reports no usable size.
    pub fn new(config: AppConfig) -> Result<Self> {
        let backend = CrosstermBackend::new(config.alt_screen);
        Self::with_backend(Box::new(backend), config)
    }

    /// Run on an arbitrary backend.
    pub fn with_backend(backend: Box<dyn Backend>, config: AppConfig) -> Result<Self> {
        let mut display = Display::new(backend, config.use_color)?;
        display.enter()?;
        let region = display.screen_region();
        tracing::info!(width = region.width, height = region.height, "app started");
        Ok(Self {
            display,
            screens: SlotMap::with_key(),
            config,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    /// The display, for building widgets and drawing.
    pub fn display_mut(&mut self) -> &mut Display {
        &mut self.display
    }

    // -- screens ---------------------------------------------------------

    /// A new screen covering the whole terminal.
    pub fn add_screen(&mut self) -> ScreenId {
        let root = self.display.root();
        self.add_screen_on(root)
    }

    /// A new screen repainting `window`.
    pub fn add_screen_on(&mut self, window: SurfaceId) -> ScreenId {
        self.screens.insert(Screen::new(window))
    }

    pub fn screen(&self, id: ScreenId) -> Option<&Screen> {
        self.screens.get(id)
    }

    pub fn screen_mut(&mut self, id: ScreenId) -> Option<&mut Screen> {
        self.screens.get_mut(id)
    }

    /// Number of live screens.
    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }

    /// Register `widget` with a screen.
    pub fn register(&mut self, screen: ScreenId, widget: impl Widget) -> Option<WidgetId> {
        Some(self.screens.get_mut(screen)?.register(Box::new(widget)))
    }

    /// Detach a screen from the app and hand it back. Its widgets are not
    /// destroyed.
    pub fn destroy_screen(&mut self, id: ScreenId) -> Option<Screen> {
        let screen = self.screens.remove(id)?;
        tracing::debug!(widgets = screen.count(), "screen detached");
        Some(screen)
    }

    /// Repaint a screen.
    pub fn refresh(&mut self, id: ScreenId) {
        if let Some(screen) = self.screens.get_mut(id) {
            screen.refresh(&mut self.display);
        }
    }

    // -- traversal -------------------------------------------------------

    /// Run keyboard traversal on a screen with the configured keys.
    ///
    /// Returns `true` when the screen was committed.
    pub fn traverse(&mut self, id: ScreenId) -> bool {
        let mut traversal = Traversal::new(self.config.keys).with_read_timeout(self.config.read_timeout);
        self.traverse_with(id, &mut traversal)
    }

    /// Run a caller-configured traversal on a screen.
    pub fn traverse_with(&mut self, id: ScreenId, traversal: &mut Traversal) -> bool {
        match self.screens.get_mut(id) {
            Some(screen) => traversal.run(screen, &mut self.display),
            None => false,
        }
    }

    /// Destroy every screen's widgets and give the terminal back.
    pub fn shutdown(mut self) -> Result<()> {
        for (_, screen) in self.screens.iter_mut() {
            screen.destroy_widgets(&mut self.display);
        }
        self.display.leave()?;
        tracing::info!("app stopped");
        Ok(())
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("display", &self.display)
            .field("screens", &self.screens.len())
            .field("config", &self.config)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
