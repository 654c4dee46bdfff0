//! State shared by every widget.
//!
//! [`WidgetCore`] holds what the toolkit itself reads and writes on a
//! widget: its surfaces, registry index, visibility and focus flags, exit
//! type, border description, binding table and signal table. Concrete
//! widgets embed one and expose it through [`Widget::core`].
//!
//! [`Widget::core`]: super::Widget::core

use crate::color::Attr;
use crate::draw::BoxGlyphs;
use crate::event::{BindingTable, Key, KeyEvent, SignalTable};
use crate::geometry::{align_xy, widget_dimension, Dimension, Offset, Region, Size, XPos, YPos};
use crate::render::{Display, SurfaceId};

// ---------------------------------------------------------------------------
// ExitType
// ---------------------------------------------------------------------------

/// Why a widget's input loop last ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExitType {
    /// A null key ended the loop.
    EarlyExit,
    EscapeHit,
    Normal,
    /// The widget has not been activated yet.
    #[default]
    NeverActivated,
    /// The key read failed.
    Error,
}

impl ExitType {
    /// The exit type a key implies, if any.
    ///
    /// Read errors and timeouts map to [`ExitType::Error`], Escape to
    /// [`ExitType::EscapeHit`], the null key to [`ExitType::EarlyExit`] and
    /// Enter or Tab to [`ExitType::Normal`]. Other keys are widget-specific.
    pub fn from_key(key: KeyEvent) -> Option<ExitType> {
        match key.code {
            Key::Error | Key::Timeout => Some(ExitType::Error),
            Key::Escape => Some(ExitType::EscapeHit),
            Key::Null => Some(ExitType::EarlyExit),
            Key::Enter | Key::Tab => Some(ExitType::Normal),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// WidgetKind
// ---------------------------------------------------------------------------

/// Coarse widget classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// A menu bar. Focus traversal hands keys claimed by the menu-open
    /// predicate to the first registered menu.
    Menu,
    /// Anything else, tagged with a type name.
    Custom(&'static str),
}

// ---------------------------------------------------------------------------
// WidgetCore
// ---------------------------------------------------------------------------

/// Toolkit-managed widget state.
#[derive(Debug)]
pub struct WidgetCore {
    surface: SurfaceId,
    shadow: Option<SurfaceId>,
    extra: Vec<SurfaceId>,
    parent: SurfaceId,
    screen_index: Option<usize>,
    pub visible: bool,
    pub has_focus: bool,
    pub accepts_focus: bool,
    pub exit_type: ExitType,
    pub boxed: bool,
    border_size: i32,
    pub glyphs: BoxGlyphs,
    pub border_attr: Attr,
    pub bindings: BindingTable,
    pub signals: SignalTable,
}

impl WidgetCore {
    /// Create the widget's surfaces inside `parent`.
    ///
    /// The requested dimensions resolve against the parent with
    /// [`widget_dimension`], and the box is placed with [`align_xy`]. With
    /// `shadow`, a second surface one cell down and right holds the drop
    /// shadow; a shadow that would leave the terminal is omitted. Returns
    /// `None` when the parent is unknown or the widget surface cannot be
    /// created.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        display: &mut Display,
        parent: SurfaceId,
        x: XPos,
        y: YPos,
        width: Dimension,
        height: Dimension,
        boxed: bool,
        shadow: bool,
    ) -> Option<Self> {
        let bounds = display.region(parent)?;
        let size = Size::new(
            widget_dimension(bounds.width, width, 0),
            widget_dimension(bounds.height, height, 0),
        );
        let origin = align_xy(bounds, x, y, size);
        let region = Region::at(origin, size);
        let surface = display.create_subsurface(parent, region)?;
        let shadow = if shadow {
            display.create_surface(region.translate(Offset::new(1, 1)))
        } else {
            None
        };

        Some(Self {
            surface,
            shadow,
            extra: Vec::new(),
            parent,
            screen_index: None,
            visible: true,
            has_focus: false,
            accepts_focus: true,
            exit_type: ExitType::NeverActivated,
            boxed,
            border_size: if boxed { 1 } else { 0 },
            glyphs: BoxGlyphs::default(),
            border_attr: Attr::NORMAL,
            bindings: BindingTable::new(),
            signals: SignalTable::new(),
        })
    }

    // -- surfaces --------------------------------------------------------

    /// The widget's main surface.
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn shadow(&self) -> Option<SurfaceId> {
        self.shadow
    }

    /// The surface the widget was placed in.
    pub fn parent(&self) -> SurfaceId {
        self.parent
    }

    /// Attach an additional surface (a title strip, a scroll area, ...)
    /// that moves, erases and dies with the widget.
    pub fn add_surface(&mut self, id: SurfaceId) {
        self.extra.push(id);
    }

    /// Every surface the widget owns: main, shadow, then extras.
    pub fn surfaces(&self) -> Vec<SurfaceId> {
        let mut all = vec![self.surface];
        all.extend(self.shadow);
        all.extend(self.extra.iter().copied());
        all
    }

    /// Remove every owned surface from the display.
    pub fn release(&mut self, display: &mut Display) {
        for id in self.surfaces() {
            display.remove_surface(id);
        }
        self.shadow = None;
        self.extra.clear();
    }

    // -- registry --------------------------------------------------------

    /// Position in the owning screen's registry, or `None` when detached.
    pub fn screen_index(&self) -> Option<usize> {
        self.screen_index
    }

    pub(crate) fn set_screen_index(&mut self, index: Option<usize>) {
        self.screen_index = index;
    }

    // -- border ----------------------------------------------------------

    /// Border thickness: one when boxed, zero otherwise.
    pub fn border_size(&self) -> i32 {
        self.border_size
    }

    /// Turn the border on or off.
    pub fn set_box(&mut self, boxed: bool) {
        self.boxed = boxed;
        self.border_size = if boxed { 1 } else { 0 };
    }

    // -- exit type -------------------------------------------------------

    /// Derive the exit type from `key`. Keys with no standard meaning leave
    /// it unchanged.
    pub fn set_exit_type(&mut self, key: KeyEvent) {
        if let Some(exit) = ExitType::from_key(key) {
            self.exit_type = exit;
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
