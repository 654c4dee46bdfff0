//! Pilot: programmatic interaction with a headless App.
//!
//! The `Pilot` builds an [`App`] on a [`HeadlessBackend`] and keeps the
//! backend's handle, so tests can queue input, run a traversal and read
//! back what the terminal shows.

use crate::app::{App, AppConfig, ScreenId};
use crate::event::{InputEvent, Key, KeyEvent};
use crate::geometry::Region;
use crate::screen::{Screen, WidgetId};

use super::headless::{HeadlessBackend, HeadlessHandle};
use super::probe::{EventLog, Probe};

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless app driver for testing.
///
/// # Examples
///
/// ```
/// use cellkit::event::Key;
/// use cellkit::geometry::Region;
/// use cellkit::testing::Pilot;
///
/// let mut pilot = Pilot::new(40, 10);
/// let screen = pilot.app_mut().add_screen();
/// pilot.add_probe(screen, "name", Region::new(0, 0, 8, 3));
/// pilot.press_keys([Key::Char('a'), Key::F(10)]);
/// assert!(pilot.run(screen));
/// assert!(pilot.screen_text().contains("name"));
/// ```
pub struct Pilot {
    app: App,
    handle: HeadlessHandle,
    log: EventLog,
}

impl Pilot {
    /// Create a headless app with the given terminal size.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_config(width, height, AppConfig::default())
    }

    /// Create a headless app with a custom config.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    pub fn with_config(width: u16, height: u16, config: AppConfig) -> Self {
        let (backend, handle) = if config.use_color {
            HeadlessBackend::new(width, height)
        } else {
            HeadlessBackend::without_colors(width, height)
        };
        let app = match App::with_backend(Box::new(backend), config) {
            Ok(app) => app,
            Err(err) => panic!("headless app failed to start: {err}"),
        };
        Self {
            app,
            handle,
            log: EventLog::new(),
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// The backend handle.
    pub fn handle(&self) -> &HeadlessHandle {
        &self.handle
    }

    /// The log shared by every probe this pilot created.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    // ── Widgets ──────────────────────────────────────────────────────

    /// Create a [`Probe`] and register it with `screen`.
    pub fn add_probe(&mut self, screen: ScreenId, name: &str, region: Region) -> Option<WidgetId> {
        self.add_probe_with(screen, name, region, |p| p)
    }

    /// Create a [`Probe`], configure it and register it with `screen`.
    pub fn add_probe_with(
        &mut self,
        screen: ScreenId,
        name: &str,
        region: Region,
        configure: impl FnOnce(Probe) -> Probe,
    ) -> Option<WidgetId> {
        let probe = Probe::new(self.app.display_mut(), name, region, &self.log)?;
        self.app.register(screen, configure(probe))
    }

    pub fn screen(&self, id: ScreenId) -> Option<&Screen> {
        self.app.screen(id)
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Queue one key.
    pub fn press(&mut self, key: impl Into<KeyEvent>) {
        self.handle.push_key(key);
    }

    /// Queue several keys.
    pub fn press_keys<K: Into<KeyEvent>>(&mut self, keys: impl IntoIterator<Item = K>) {
        self.handle.push_keys(keys);
    }

    /// Queue each character of `text` as a key press.
    pub fn type_text(&mut self, text: &str) {
        self.handle.push_keys(text.chars().map(Key::Char));
    }

    /// Queue a terminal resize.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.handle.push_event(InputEvent::Resize { width, height });
    }

    // ── Running ──────────────────────────────────────────────────────

    /// Traverse `screen` until it is committed or cancelled. An exhausted
    /// key queue reads as an error and cancels.
    pub fn run(&mut self, screen: ScreenId) -> bool {
        self.app.traverse(screen)
    }

    /// Repaint `screen`.
    pub fn refresh(&mut self, screen: ScreenId) {
        self.app.refresh(screen);
    }

    // ── Output ───────────────────────────────────────────────────────

    /// What the headless terminal shows, without trailing blank rows.
    pub fn screen_text(&self) -> String {
        self.handle.screen_text().trim_end_matches('\n').to_owned()
    }
}

impl std::fmt::Debug for Pilot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pilot").field("app", &self.app).finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
