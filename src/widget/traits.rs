//! Widget trait: the contract every widget implements.
//!
//! The toolkit drives widgets exclusively through [`Widget`]: the
//! [`Screen`](crate::screen::Screen) draws and erases them, focus traversal
//! focuses, unfocuses and injects keys into them, and the data hooks let a
//! host load and persist widget values around a traversal run. Shared state
//! lives in the embedded [`WidgetCore`].
//!
//! The trait is object-safe; screens own widgets as `Box<dyn Widget>`.

use std::any::Any;

use crate::event::KeyEvent;
use crate::geometry::{align_xy, Offset, XPos, YPos};
use crate::render::Display;

use super::core::{WidgetCore, WidgetKind};

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by all widgets.
pub trait Widget: Any {
    /// What kind of widget this is.
    fn kind(&self) -> WidgetKind;

    fn core(&self) -> &WidgetCore;

    fn core_mut(&mut self) -> &mut WidgetCore;

    /// Paint the widget, with or without its border.
    fn draw(&mut self, display: &mut Display, boxed: bool);

    /// Blank every surface the widget owns.
    fn erase(&mut self, display: &mut Display) {
        for id in self.core().surfaces() {
            display.erase(id);
        }
    }

    /// Feed one key to the widget.
    ///
    /// Returns `Some` when the key completed the widget's interaction (the
    /// value is widget-specific), `None` while it is still in progress or
    /// when it was cancelled.
    fn inject(&mut self, display: &mut Display, key: KeyEvent) -> Option<i32>;

    /// Move the widget.
    ///
    /// With `relative`, [`XPos::At`] and [`YPos::At`] are deltas from the
    /// current position; symbolic positions always resolve against the
    /// parent. The target is clamped into the parent, every owned surface
    /// shifts by the same amount, and the parent is repainted. With
    /// `repaint` the widget is drawn again at its new position.
    fn move_to(&mut self, display: &mut Display, x: XPos, y: YPos, relative: bool, repaint: bool) {
        let core = self.core();
        let (Some(current), Some(bounds)) = (display.region(core.surface()), display.region(core.parent())) else {
            return;
        };
        let (x, y) = if relative {
            let x = match x {
                XPos::At(dx) => XPos::At(current.x + dx),
                other => other,
            };
            let y = match y {
                YPos::At(dy) => YPos::At(current.y + dy),
                other => other,
            };
            (x, y)
        } else {
            (x, y)
        };
        let target = align_xy(bounds, x, y, current.size());
        let delta: Offset = target - current.offset();
        if delta == Offset::default() {
            return;
        }

        let parent = core.parent();
        if !display.move_surface(core.surface(), delta) {
            return;
        }
        for id in core.surfaces().into_iter().skip(1) {
            display.move_surface(id, delta);
        }
        display.refresh(parent);

        if repaint {
            let boxed = self.core().boxed;
            self.draw(display, boxed);
        }
    }

    /// Called when the widget gains focus.
    fn focus(&mut self, _display: &mut Display) {}

    /// Called when the widget loses focus.
    fn unfocus(&mut self, _display: &mut Display) {}

    /// Release the widget's resources. The default drops its surfaces.
    fn destroy(&mut self, display: &mut Display) {
        self.core_mut().release(display);
    }

    /// Persist the widget's value.
    fn save_data(&mut self) {}

    /// Reload the widget's value.
    fn refresh_data(&mut self) {}

    /// The embedded widget that owns this widget's key bindings, if any.
    /// `None` means the widget binds keys itself.
    fn bindable_mut(&mut self) -> Option<&mut dyn Widget> {
        None
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<'a> dyn Widget + 'a {
    /// Downcast to a concrete widget type.
    pub fn downcast_ref<T: Widget>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Widget>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    pub fn is_visible(&self) -> bool {
        self.core().visible
    }

    pub fn has_focus(&self) -> bool {
        self.core().has_focus
    }

    pub fn accepts_focus(&self) -> bool {
        self.core().accepts_focus
    }

    pub fn border_size(&self) -> i32 {
        self.core().border_size()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
