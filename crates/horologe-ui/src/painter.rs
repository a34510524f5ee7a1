use std::cell::{Cell, RefCell};

use horologe_engine::coords::{Rect, Vec2};
use horologe_engine::paint::Color;
use horologe_engine::scene::{DrawList, Stroke, ZIndex};
use horologe_engine::text::{FontId, FontSystem};

use crate::constraints::LayoutCtx;
use crate::focus::{FocusId, FocusManager};

/// Drawing surface passed to [`crate::widget::Widget::paint`].
///
/// Wraps the engine's `DrawList` with a high-level API and exposes per-frame
/// input and focus state so widgets can express hover / pressed / focused
/// visuals directly in their paint implementations.
///
/// Every call records at the next z layer, so later calls draw on top of
/// earlier ones of the same shape kind.
pub struct Painter<'a> {
    pub(crate) draw_list: &'a mut DrawList,
    pub(crate) font_system: &'a FontSystem,
    focus: Option<&'a RefCell<FocusManager>>,
    redraw: Option<&'a Cell<bool>>,
    /// Physical pixels per logical pixel for this frame.
    pub scale: f32,
    z: i32,
    /// Current mouse position in logical pixels.
    pub mouse_pos: Vec2,
    /// True while the primary button is held down.
    pub mouse_pressed: bool,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(
        draw_list: &'a mut DrawList,
        font_system: &'a FontSystem,
        focus: Option<&'a RefCell<FocusManager>>,
        redraw: Option<&'a Cell<bool>>,
        mouse_pos: Vec2,
        mouse_pressed: bool,
        scale: f32,
    ) -> Self {
        Self { draw_list, font_system, focus, redraw, scale, z: 0, mouse_pos, mouse_pressed }
    }

    // ── input queries ─────────────────────────────────────────────────────

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        rect.contains(self.mouse_pos)
    }

    /// Returns `true` if the primary button is held and the cursor is over `rect`.
    #[inline]
    pub fn is_pressed(&self, rect: Rect) -> bool {
        self.mouse_pressed && rect.contains(self.mouse_pos)
    }

    // ── focus ─────────────────────────────────────────────────────────────

    /// Enroll `id` in Tab cycling for this frame.
    pub fn register_focusable(&mut self, id: FocusId) {
        if let Some(fm) = self.focus {
            fm.borrow_mut().register(id);
        }
    }

    pub fn is_focused(&self, id: FocusId) -> bool {
        self.focus.is_some_and(|fm| fm.borrow().is_focused(id))
    }

    /// Ask for another frame, e.g. while the painted state is still animating.
    pub fn request_redraw(&self) {
        if let Some(flag) = self.redraw {
            flag.set(true);
        }
    }

    // ── text measurement ──────────────────────────────────────────────────

    /// Measures `text` at the renderer's physical scale, so widths line up
    /// with where the text renderer places glyphs.
    pub fn measure_text(&self, text: &str, font: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        self.font_system.measure_text_scaled(text, font, size, max_width, self.scale)
    }

    /// Returns a [`LayoutCtx`] for re-measuring children during paint.
    ///
    /// Redraw requests made through it are dropped; paint must not animate.
    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx<'_> {
        LayoutCtx { fonts: self.font_system, scale: self.scale, focus: self.focus, redraw: None }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Circle with optional fill and optional centered outline.
    pub fn circle(&mut self, center: Vec2, radius: f32, fill: Option<Color>, stroke: Option<Stroke>) {
        let z = self.next_z();
        self.draw_list.push_circle(z, center, radius, fill, stroke);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.circle(center, radius, Some(color), None);
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke) {
        self.circle(center, radius, None, Some(stroke));
    }

    /// Line from `from` to `to` with round caps.
    pub fn segment(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let z = self.next_z();
        self.draw_list.push_segment(z, from, to, width, color);
    }

    /// Rounded rectangle. Pass `radius = 0.0` for sharp corners.
    pub fn rounded_rect(&mut self, rect: Rect, radius: f32, fill: Option<Color>, stroke: Option<Stroke>) {
        let z = self.next_z();
        self.draw_list.push_rounded_rect(z, rect, radius, fill, stroke);
    }

    /// Text at `origin` (top-left of the first line), wrapped at `max_width`.
    pub fn text(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
        max_width: Option<f32>,
    ) {
        let z = self.next_z();
        self.draw_list.push_text(z, text, font, size, color, origin, max_width);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Begin a scissor region. Must be paired with [`Painter::pop_clip`].
    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horologe_engine::scene::DrawCmd;

    #[test]
    fn calls_record_in_increasing_z() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        {
            let mut p = Painter::new(&mut list, &fonts, None, None, Vec2::zero(), false, 1.0);
            p.fill_circle(Vec2::new(10.0, 10.0), 5.0, Color::WHITE);
            p.segment(Vec2::zero(), Vec2::new(1.0, 1.0), 2.0, Color::BLACK);
            p.rounded_rect(Rect::new(0.0, 0.0, 4.0, 4.0), 1.0, Some(Color::WHITE), None);
        }
        let zs: Vec<i32> = list.items().iter().map(|i| i.key.z.0).collect();
        assert_eq!(zs, vec![0, 1, 2]);
        assert!(matches!(list.items()[1].cmd, DrawCmd::Segment(_)));
    }

    #[test]
    fn hover_and_press_follow_pointer() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let p = Painter::new(&mut list, &fonts, None, None, Vec2::new(5.0, 5.0), true, 1.0);
        let inside = Rect::new(0.0, 0.0, 10.0, 10.0);
        let outside = Rect::new(20.0, 20.0, 10.0, 10.0);
        assert!(p.is_hovered(inside));
        assert!(p.is_pressed(inside));
        assert!(!p.is_hovered(outside));
    }

    #[test]
    fn redraw_request_reaches_the_scene_flag() {
        let fonts = FontSystem::new();
        let flag = Cell::new(false);
        let mut list = DrawList::new();
        let p = Painter::new(&mut list, &fonts, None, Some(&flag), Vec2::zero(), false, 1.0);
        p.request_redraw();
        assert!(flag.get());
    }

    #[test]
    fn registered_ids_take_part_in_tab_cycling() {
        let fonts = FontSystem::new();
        let focus = RefCell::new(FocusManager::new());
        let id = FocusId::new();
        let mut list = DrawList::new();
        {
            let mut p = Painter::new(&mut list, &fonts, Some(&focus), None, Vec2::zero(), false, 1.0);
            p.register_focusable(id);
            assert!(!p.is_focused(id));
        }
        focus.borrow_mut().advance(false);
        assert!(focus.borrow().is_focused(id));
    }
}
