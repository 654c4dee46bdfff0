//! The single terminal display and its surfaces.
//!
//! [`Display`] owns the [`Backend`], an arena of [`Surface`]s, the virtual
//! frame, the last frame sent to the terminal, and the process's
//! [`ColorRegistry`]. Surfaces are addressed by [`SurfaceId`]; every
//! operation on an unknown id is a silent no-op.
//!
//! Repainting follows the curses model: drawing only changes a surface,
//! [`Display::refresh`] composites the surface onto the frame and sends
//! the cells that differ from what the terminal already shows.

use std::time::Duration;

use slotmap::SlotMap;

use crate::color::{Attr, ColorRegistry};
use crate::error::{Error, Result};
use crate::event::{InputEvent, Key, KeyEvent};
use crate::geometry::{Offset, Region, Size};

use super::backend::Backend;
use super::frame::Frame;
use super::surface::Surface;
use super::SurfaceId;

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// One local character-cell terminal.
pub struct Display {
    backend: Box<dyn Backend>,
    surfaces: SlotMap<SurfaceId, Surface>,
    root: SurfaceId,
    /// Composited contents.
    frame: Frame,
    /// What the terminal currently shows.
    shown: Frame,
    colors: ColorRegistry,
    cursor_visible: bool,
    refresh_count: usize,
    entered: bool,
}

impl Display {
    /// Wrap a backend.
    ///
    /// Color pairs are registered when `use_color` is set and the backend
    /// reports color support. Fails when the terminal size cannot be read
    /// or is zero on either axis.
    pub fn new(backend: Box<dyn Backend>, use_color: bool) -> Result<Self> {
        let (width, height) = backend.size()?;
        if width == 0 || height == 0 {
            return Err(Error::TerminalTooSmall { width, height });
        }

        let mut colors = ColorRegistry::new();
        colors.init(use_color && backend.has_colors());

        let mut surfaces = SlotMap::with_key();
        let root = surfaces.insert(Surface::new(
            Offset::default(),
            Size::new(width as i32, height as i32),
            None,
        ));

        tracing::debug!(width, height, colors = colors.has_color_support(), "display created");
        Ok(Self {
            backend,
            surfaces,
            root,
            frame: Frame::new(width, height),
            shown: Frame::new(width, height),
            colors,
            cursor_visible: true,
            refresh_count: 0,
            entered: false,
        })
    }

    /// Put the terminal into raw mode.
    pub fn enter(&mut self) -> Result<()> {
        self.backend.enter()?;
        self.entered = true;
        Ok(())
    }

    /// Restore the terminal.
    pub fn leave(&mut self) -> Result<()> {
        if self.entered {
            self.entered = false;
            self.backend.leave()?;
        }
        Ok(())
    }

    // -- surfaces --------------------------------------------------------

    /// The surface covering the whole terminal.
    pub fn root(&self) -> SurfaceId {
        self.root
    }

    /// The whole terminal as a region.
    pub fn screen_region(&self) -> Region {
        self.frame.region()
    }

    /// Create a top-level surface. `None` when `region` is empty or does
    /// not fit inside the terminal.
    pub fn create_surface(&mut self, region: Region) -> Option<SurfaceId> {
        if region.is_empty() || !self.screen_region().contains_region(region) {
            tracing::trace!(?region, "surface rejected");
            return None;
        }
        Some(self.surfaces.insert(Surface::new(region.offset(), region.size(), None)))
    }

    /// Create a surface derived from `parent`. `region` is absolute and must
    /// lie inside the parent.
    pub fn create_subsurface(&mut self, parent: SurfaceId, region: Region) -> Option<SurfaceId> {
        let bounds = self.surfaces.get(parent)?.region();
        if region.is_empty() || !bounds.contains_region(region) {
            tracing::trace!(?region, ?bounds, "subsurface rejected");
            return None;
        }
        Some(self.surfaces.insert(Surface::new(region.offset(), region.size(), Some(parent))))
    }

    /// Drop a surface. The root surface cannot be removed.
    pub fn remove_surface(&mut self, id: SurfaceId) -> Option<Surface> {
        if id == self.root {
            return None;
        }
        self.surfaces.remove(id)
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.get(id)
    }

    pub fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut Surface> {
        self.surfaces.get_mut(id)
    }

    /// Absolute region of a surface.
    pub fn region(&self, id: SurfaceId) -> Option<Region> {
        self.surfaces.get(id).map(Surface::region)
    }

    /// Shift a surface by `delta`. Returns `false` (and leaves the surface
    /// alone) when the moved surface would leave the terminal.
    pub fn move_surface(&mut self, id: SurfaceId, delta: Offset) -> bool {
        let screen = self.screen_region();
        let Some(surface) = self.surfaces.get_mut(id) else {
            return false;
        };
        let moved = surface.region().translate(delta);
        if !screen.contains_region(moved) {
            return false;
        }
        surface.set_origin(moved.offset());
        true
    }

    // -- painting --------------------------------------------------------

    /// Composite a surface onto the frame and send the changes.
    pub fn refresh(&mut self, id: SurfaceId) {
        let Some(surface) = self.surfaces.get(id) else {
            return;
        };
        self.frame.place(surface);
        self.refresh_count += 1;
        self.send(false);
    }

    /// Blank a surface and refresh it.
    pub fn erase(&mut self, id: SurfaceId) {
        if let Some(surface) = self.surfaces.get_mut(id) {
            surface.clear();
            self.refresh(id);
        }
    }

    /// Resend the entire frame, discarding whatever the terminal shows.
    pub fn redraw(&mut self) {
        self.refresh_count += 1;
        self.send(true);
    }

    /// Number of repaints so far.
    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }

    /// The composited frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    fn send(&mut self, full: bool) {
        let updates = if full {
            self.frame.all_updates()
        } else {
            self.frame.diff(&self.shown)
        };
        if !updates.is_empty() {
            if let Err(err) = self.backend.apply_updates(&updates, &self.colors) {
                tracing::warn!(%err, "failed to write cells");
            }
        }
        if let Err(err) = self.backend.flush() {
            tracing::warn!(%err, "failed to flush terminal");
        }
        self.shown = self.frame.clone();
    }

    /// Adopt a new terminal size. The frame and the root surface are
    /// cleared; other surfaces keep their contents and position.
    pub fn resize(&mut self, width: u16, height: u16) {
        tracing::debug!(width, height, "display resized");
        self.frame.resize(width, height);
        self.shown.resize(width, height);
        if let Some(root) = self.surfaces.get_mut(self.root) {
            *root = Surface::new(Offset::default(), Size::new(width as i32, height as i32), None);
        }
        self.redraw();
    }

    // -- input -----------------------------------------------------------

    /// Block for one key.
    ///
    /// A timed-out read yields [`Key::Timeout`], a failed read
    /// [`Key::Error`]. A terminal resize is applied here and reported as
    /// [`Key::Resize`].
    pub fn read_key(&mut self, timeout: Option<Duration>) -> KeyEvent {
        loop {
            match self.backend.read_event(timeout) {
                Ok(None) => return KeyEvent::plain(Key::Timeout),
                Ok(Some(InputEvent::Key(key))) => return key,
                Ok(Some(InputEvent::Resize { width, height })) => {
                    self.resize(width, height);
                    return KeyEvent::plain(Key::Resize);
                }
                Ok(Some(InputEvent::Other)) => continue,
                Err(err) => {
                    tracing::warn!(%err, "key read failed");
                    return KeyEvent::plain(Key::Error);
                }
            }
        }
    }

    // -- terminal state --------------------------------------------------

    /// Audible reject signal.
    pub fn beep(&mut self) {
        if let Err(err) = self.backend.beep() {
            tracing::warn!(%err, "beep failed");
        }
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        if self.cursor_visible == visible {
            return;
        }
        self.cursor_visible = visible;
        if let Err(err) = self.backend.set_cursor_visible(visible) {
            tracing::warn!(%err, "failed to toggle cursor");
        }
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    // -- colors ----------------------------------------------------------

    pub fn colors(&self) -> &ColorRegistry {
        &self.colors
    }

    /// Shorthand for [`ColorRegistry::lookup`].
    pub fn color(&self, label: &str) -> Attr {
        self.colors.lookup(label)
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        if let Err(err) = self.leave() {
            tracing::warn!(%err, "failed to restore terminal");
        }
    }
}

impl std::fmt::Debug for Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Display")
            .field("width", &self.frame.width)
            .field("height", &self.frame.height)
            .field("surfaces", &self.surfaces.len())
            .field("refresh_count", &self.refresh_count)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::HeadlessBackend;

    fn display(width: u16, height: u16) -> (Display, crate::testing::HeadlessHandle) {
        let (backend, handle) = HeadlessBackend::new(width, height);
        let display = Display::new(Box::new(backend), true).unwrap();
        (display, handle)
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn zero_size_terminal_is_rejected() {
        let (backend, _) = HeadlessBackend::new(0, 10);
        let err = Display::new(Box::new(backend), true).unwrap_err();
        assert!(matches!(err, Error::TerminalTooSmall { width: 0, height: 10 }));
    }

    #[test]
    fn colors_follow_backend_and_request() {
        let (d, _) = display(10, 5);
        assert!(d.colors().has_color_support());

        let (backend, _) = HeadlessBackend::without_colors(10, 5);
        let d = Display::new(Box::new(backend), true).unwrap();
        assert!(!d.colors().has_color_support());

        let (backend, _) = HeadlessBackend::new(10, 5);
        let d = Display::new(Box::new(backend), false).unwrap();
        assert!(!d.colors().has_color_support());
    }

    #[test]
    fn root_covers_screen() {
        let (d, _) = display(20, 6);
        assert_eq!(d.region(d.root()), Some(Region::new(0, 0, 20, 6)));
    }

    // ── Surfaces ─────────────────────────────────────────────────────

    #[test]
    fn create_surface_must_fit() {
        let (mut d, _) = display(10, 5);
        assert!(d.create_surface(Region::new(0, 0, 10, 5)).is_some());
        assert!(d.create_surface(Region::new(5, 0, 6, 1)).is_none());
        assert!(d.create_surface(Region::new(0, 0, 0, 3)).is_none());
    }

    #[test]
    fn subsurface_must_lie_in_parent() {
        let (mut d, _) = display(20, 10);
        let parent = d.create_surface(Region::new(2, 2, 10, 5)).unwrap();
        let child = d.create_subsurface(parent, Region::new(3, 3, 4, 2)).unwrap();
        assert_eq!(d.surface(child).and_then(Surface::parent), Some(parent));
        assert!(d.create_subsurface(parent, Region::new(0, 0, 4, 2)).is_none());
    }

    #[test]
    fn root_cannot_be_removed() {
        let (mut d, _) = display(10, 5);
        let root = d.root();
        assert!(d.remove_surface(root).is_none());
        assert!(d.surface(root).is_some());
    }

    #[test]
    fn unknown_surface_is_noop() {
        let (mut d, _) = display(10, 5);
        let id = d.create_surface(Region::new(0, 0, 2, 2)).unwrap();
        d.remove_surface(id);
        let before = d.refresh_count();
        d.refresh(id);
        d.erase(id);
        assert!(!d.move_surface(id, Offset::new(1, 1)));
        assert_eq!(d.refresh_count(), before);
    }

    #[test]
    fn move_surface_stays_on_screen() {
        let (mut d, _) = display(10, 5);
        let id = d.create_surface(Region::new(0, 0, 3, 3)).unwrap();
        assert!(d.move_surface(id, Offset::new(2, 1)));
        assert_eq!(d.region(id), Some(Region::new(2, 1, 3, 3)));
        assert!(!d.move_surface(id, Offset::new(6, 0)));
        assert_eq!(d.region(id), Some(Region::new(2, 1, 3, 3)));
    }

    // ── Painting ─────────────────────────────────────────────────────

    #[test]
    fn refresh_sends_diff() {
        let (mut d, handle) = display(10, 3);
        let id = d.create_surface(Region::new(1, 1, 3, 1)).unwrap();
        d.surface_mut(id).unwrap().put(0, 0, 'a', Attr::NORMAL);
        d.refresh(id);
        assert_eq!(handle.row_text(1), " a        ");
        assert_eq!(d.refresh_count(), 1);
        assert_eq!(handle.flush_count(), 1);
    }

    #[test]
    fn erase_blanks_surface() {
        let (mut d, handle) = display(5, 1);
        let id = d.create_surface(Region::new(0, 0, 5, 1)).unwrap();
        d.surface_mut(id).unwrap().hline(0, 0, '#', Attr::NORMAL, 5);
        d.refresh(id);
        d.erase(id);
        assert_eq!(handle.row_text(0), "     ");
    }

    #[test]
    fn resize_updates_frame() {
        let (mut d, _) = display(10, 5);
        d.resize(30, 8);
        assert_eq!(d.screen_region(), Region::new(0, 0, 30, 8));
        assert_eq!(d.region(d.root()), Some(Region::new(0, 0, 30, 8)));
    }

    // ── Input ────────────────────────────────────────────────────────

    #[test]
    fn read_key_maps_events() {
        let (mut d, handle) = display(10, 5);
        handle.push_key(KeyEvent::plain(Key::Char('q')));
        handle.push_event(InputEvent::Other);
        handle.push_key(KeyEvent::plain(Key::Enter));
        handle.push_event(InputEvent::Resize { width: 12, height: 6 });
        assert_eq!(d.read_key(None).code, Key::Char('q'));
        assert_eq!(d.read_key(None).code, Key::Enter);
        assert_eq!(d.read_key(None).code, Key::Resize);
        assert_eq!(d.screen_region(), Region::new(0, 0, 12, 6));
        assert_eq!(d.read_key(None).code, Key::Error);
    }

    #[test]
    fn read_key_timeout() {
        let (mut d, handle) = display(10, 5);
        handle.push_timeout();
        assert_eq!(d.read_key(Some(Duration::from_millis(5))).code, Key::Timeout);
    }

    // ── Terminal state ───────────────────────────────────────────────

    #[test]
    fn beep_and_cursor() {
        let (mut d, handle) = display(10, 5);
        d.beep();
        assert_eq!(handle.beep_count(), 1);
        d.set_cursor_visible(false);
        assert!(!d.cursor_visible());
        assert!(!handle.cursor_visible());
    }
}
