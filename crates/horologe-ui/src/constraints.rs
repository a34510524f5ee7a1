use std::cell::{Cell, RefCell};

use horologe_engine::coords::{Rect, Vec2};
use horologe_engine::text::FontSystem;

use crate::focus::{FocusId, FocusManager};

// ── Edges ─────────────────────────────────────────────────────────────────

/// Insets on all four sides (padding, margin, border).
#[derive(Debug, Clone, Copy, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    #[inline]
    pub fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    #[inline]
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self { top: vertical, bottom: vertical, left: horizontal, right: horizontal }
    }

    /// Total inset on the horizontal axis.
    #[inline]
    pub fn h(self) -> f32 {
        self.left + self.right
    }

    /// Total inset on the vertical axis.
    #[inline]
    pub fn v(self) -> f32 {
        self.top + self.bottom
    }
}

// ── Constraints ───────────────────────────────────────────────────────────

/// Layout constraints passed down from parent to child during measure.
///
/// A child may return any size in `[min, max]`. Parents enforce their own
/// policy by calling [`Constraints::constrain`] on the returned size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: Vec2,
    pub max: Vec2,
}

impl Constraints {
    /// Loose: child can be anywhere from zero up to `max`.
    #[inline]
    pub fn loose(max: Vec2) -> Self {
        Self { min: Vec2::zero(), max }
    }

    /// Clamp a size into `[min, max]`.
    #[inline]
    #[must_use]
    pub fn constrain(self, size: Vec2) -> Vec2 {
        Vec2::new(
            size.x.max(self.min.x).min(self.max.x),
            size.y.max(self.min.y).min(self.max.y),
        )
    }

    /// Shrink max inward by `edges` (for padding). Min becomes zero.
    #[inline]
    #[must_use]
    pub fn shrink(self, edges: Edges) -> Self {
        Self {
            min: Vec2::zero(),
            max: Vec2::new(
                (self.max.x - edges.h()).max(0.0),
                (self.max.y - edges.v()).max(0.0),
            ),
        }
    }
}

// ── LayoutCtx ────────────────────────────────────────────────────────────

/// Resources made available to [`Widget::measure`] and [`Widget::on_event`].
///
/// Passed down through the widget tree so any widget can measure text,
/// interact with the focus system and ask for another frame without owning
/// those resources.
///
/// [`Widget::measure`]: crate::widget::Widget::measure
/// [`Widget::on_event`]: crate::widget::Widget::on_event
pub struct LayoutCtx<'a> {
    pub fonts: &'a FontSystem,
    /// Physical pixels per logical pixel. Pass this to
    /// `fonts.measure_text_scaled` so measured widths match what the text
    /// renderer draws.
    pub scale: f32,
    /// Focus manager, available during event routing so widgets can request focus.
    ///
    /// `None` in contexts that do not support focus (measurement, tests).
    pub focus: Option<&'a RefCell<FocusManager>>,
    /// Set by [`LayoutCtx::request_redraw`]; read by the scene after the
    /// event pass.
    pub redraw: Option<&'a Cell<bool>>,
}

impl<'a> LayoutCtx<'a> {
    /// Context with fonts only: no focus, redraw requests are dropped.
    #[inline]
    pub fn measure_only(fonts: &'a FontSystem, scale: f32) -> Self {
        Self { fonts, scale, focus: None, redraw: None }
    }

    /// Request that `id` becomes the focused widget.
    ///
    /// The focus change takes effect at end of frame.
    #[inline]
    pub fn request_focus(&self, id: FocusId) {
        if let Some(fm) = self.focus {
            fm.borrow_mut().request_focus(id);
        }
    }

    /// Returns `true` if `id` is currently focused.
    #[inline]
    pub fn is_focused(&self, id: FocusId) -> bool {
        self.focus.is_some_and(|fm| fm.borrow().is_focused(id))
    }

    /// Ask the runtime for another frame after this one.
    ///
    /// Widgets animating on `Tick` call this every tick while they run.
    #[inline]
    pub fn request_redraw(&self) {
        if let Some(flag) = self.redraw {
            flag.set(true);
        }
    }
}

// ── rect helper ──────────────────────────────────────────────────────────

/// Shrink a rect by `edges` (padding/inset).
#[inline]
pub fn inset_rect(rect: Rect, edges: Edges) -> Rect {
    Rect::new(
        rect.origin.x + edges.left,
        rect.origin.y + edges.top,
        (rect.size.x - edges.h()).max(0.0),
        (rect.size.y - edges.v()).max(0.0),
    )
}
