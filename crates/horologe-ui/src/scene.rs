use std::cell::{Cell, RefCell};
use std::time::Duration;

use horologe_engine::coords::{Rect, Vec2};
use horologe_engine::input::{Key, Modifiers};
use horologe_engine::scene::DrawList;
use horologe_engine::text::{FontId, FontLoadError, FontSystem};

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::UiEvent;
use crate::focus::FocusManager;
use crate::painter::Painter;
use crate::widget::Element;

// ── UiInput ───────────────────────────────────────────────────────────────

/// Snapshot of input for one UI frame.
///
/// Built by the application from the engine's `InputState` / `InputFrame`.
#[derive(Debug, Clone, Default)]
pub struct UiInput {
    /// Time since the previous frame, already clamped by the frame clock.
    pub dt: Duration,
    /// Current cursor position in logical pixels.
    pub mouse_pos: Vec2,
    /// `true` while the primary button is held down.
    pub mouse_pressed: bool,
    /// `true` for exactly one frame when the primary button is released.
    pub mouse_clicked: bool,
    /// Committed text typed this frame, in arrival order.
    pub text_input: Vec<String>,
    /// Key presses this frame (auto-repeat included), in arrival order.
    pub keys_pressed: Vec<(Key, Modifiers)>,
}

impl UiInput {
    /// Returns `true` when nothing but time passed this frame.
    pub fn is_idle(&self) -> bool {
        !self.mouse_clicked && self.text_input.is_empty() && self.keys_pressed.is_empty()
    }
}

// ── UiScene ───────────────────────────────────────────────────────────────

/// Owns what a widget tree needs across frames: fonts, the draw list it
/// paints into, and keyboard focus.
///
/// # Frame order
///
/// 1. `Tick` is broadcast so animations advance before anything reads them.
/// 2. Input is routed: hover, click (focus is cleared first), text, keys.
///    Tab / Shift+Tab cycle focus and Escape clears it; neither reaches widgets.
/// 3. Pending focus is committed and `FocusLost` / `FocusGained` broadcast.
/// 4. The tree is measured and painted, so the draw list reflects every
///    state change above. Widgets still animating may ask for another frame
///    from paint as well as from `Tick`.
pub struct UiScene {
    /// Public so the application can lend it to the engine's `TextRenderer`.
    pub font_system: FontSystem,
    /// Draw list filled by the most recent [`UiScene::frame_ref`].
    pub draw_list: DrawList,
    /// Physical pixels per logical pixel; set by the application each frame.
    pub scale: f32,
    focus: RefCell<FocusManager>,
}

impl UiScene {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            draw_list: DrawList::new(),
            scale: 1.0,
            focus: RefCell::new(FocusManager::new()),
        }
    }

    /// Load a TrueType / OpenType font from raw bytes.
    pub fn load_font(&mut self, data: &[u8]) -> Result<FontId, FontLoadError> {
        self.font_system.load_font(data)
    }

    /// Runs one frame over a root widget that persists across frames.
    ///
    /// Returns `true` if any widget asked for another frame.
    #[must_use]
    pub fn frame_ref(&mut self, root: &mut Element, viewport: Vec2, input: &UiInput) -> bool {
        let rect = Rect::new(0.0, 0.0, viewport.x, viewport.y);
        let redraw = Cell::new(false);

        {
            let ctx = LayoutCtx {
                fonts: &self.font_system,
                scale: self.scale,
                focus: Some(&self.focus),
                redraw: Some(&redraw),
            };

            // ── tick ──────────────────────────────────────────────────────
            root.on_event(&UiEvent::Tick { dt: input.dt }, rect, &ctx);

            // ── input ─────────────────────────────────────────────────────
            root.on_event(&UiEvent::Hover { pos: input.mouse_pos }, rect, &ctx);
            if input.mouse_clicked {
                self.focus.borrow_mut().clear();
                root.on_event(&UiEvent::Click { pos: input.mouse_pos }, rect, &ctx);
            }
            for text in &input.text_input {
                root.on_event(&UiEvent::TextInput { text: text.clone() }, rect, &ctx);
            }
            for &(key, modifiers) in &input.keys_pressed {
                match key {
                    Key::Tab => self.focus.borrow_mut().advance(modifiers.shift),
                    Key::Escape => self.focus.borrow_mut().clear(),
                    _ => {
                        root.on_event(&UiEvent::KeyPress { key, modifiers }, rect, &ctx);
                    }
                }
            }

            // ── focus ─────────────────────────────────────────────────────
            let change = self.focus.borrow_mut().commit();
            if let Some(id) = change.lost {
                root.on_event(&UiEvent::FocusLost { id }, rect, &ctx);
            }
            if let Some(id) = change.gained {
                root.on_event(&UiEvent::FocusGained { id }, rect, &ctx);
            }
            if !change.is_empty() {
                log::debug!("focus: {:?} -> {:?}", change.lost, change.gained);
            }
        }

        // ── measure + paint ───────────────────────────────────────────────
        self.draw_list.clear();
        self.focus.borrow_mut().begin_paint();
        {
            let ctx = LayoutCtx::measure_only(&self.font_system, self.scale);
            // The root always fills the viewport; measuring lets children
            // settle their natural sizes.
            let _ = root.measure(Constraints::loose(viewport), &ctx);
        }
        {
            let mut painter = Painter::new(
                &mut self.draw_list,
                &self.font_system,
                Some(&self.focus),
                Some(&redraw),
                input.mouse_pos,
                input.mouse_pressed,
                self.scale,
            );
            root.paint(&mut painter, rect);
        }

        redraw.get()
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::event::EventResult;
    use crate::focus::FocusId;
    use crate::widget::Widget;

    /// Focusable box that logs every event it sees.
    struct Probe {
        id: FocusId,
        log: Rc<RefCell<Vec<String>>>,
        animate: bool,
    }

    impl Widget for Probe {
        fn measure(&self, c: Constraints, _ctx: &LayoutCtx) -> Vec2 {
            c.constrain(Vec2::new(50.0, 50.0))
        }

        fn paint(&self, painter: &mut Painter, rect: Rect) {
            painter.register_focusable(self.id);
            painter.fill_circle(rect.center(), 10.0, horologe_engine::paint::Color::WHITE);
        }

        fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
            let entry = match event {
                UiEvent::Tick { .. } => {
                    if self.animate {
                        ctx.request_redraw();
                    }
                    "tick".to_string()
                }
                UiEvent::Hover { .. } => return EventResult::Ignored,
                UiEvent::Click { pos } if rect.contains(*pos) => {
                    ctx.request_focus(self.id);
                    "click".to_string()
                }
                UiEvent::Click { .. } => "click-outside".to_string(),
                UiEvent::TextInput { text } => format!("text:{text}"),
                UiEvent::KeyPress { key, .. } => format!("key:{key}"),
                UiEvent::FocusGained { id } if *id == self.id => "gained".to_string(),
                UiEvent::FocusLost { id } if *id == self.id => "lost".to_string(),
                _ => return EventResult::Ignored,
            };
            self.log.borrow_mut().push(entry);
            EventResult::Consumed
        }
    }

    fn probe(animate: bool) -> (Element, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let root = Element::new(Probe { id: FocusId::new(), log: log.clone(), animate });
        (root, log)
    }

    const VIEW: Vec2 = Vec2 { x: 100.0, y: 100.0 };

    fn click_at(x: f32, y: f32) -> UiInput {
        UiInput { mouse_pos: Vec2::new(x, y), mouse_clicked: true, ..UiInput::default() }
    }

    #[test]
    fn tick_comes_first_and_paint_follows() {
        let mut scene = UiScene::new();
        let (mut root, log) = probe(false);
        let input = UiInput { text_input: vec!["a".into()], ..UiInput::default() };

        let redraw = scene.frame_ref(&mut root, VIEW, &input);
        assert!(!redraw);
        assert_eq!(*log.borrow(), vec!["tick", "text:a"]);
        assert_eq!(scene.draw_list.len(), 1);
    }

    #[test]
    fn animating_widget_requests_redraw() {
        let mut scene = UiScene::new();
        let (mut root, _) = probe(true);
        assert!(scene.frame_ref(&mut root, VIEW, &UiInput::default()));
    }

    #[test]
    fn click_focuses_then_click_elsewhere_blurs() {
        let mut scene = UiScene::new();
        let (mut root, log) = probe(false);

        let _ = scene.frame_ref(&mut root, VIEW, &click_at(10.0, 10.0));
        assert_eq!(*log.borrow(), vec!["tick", "click", "gained"]);

        log.borrow_mut().clear();
        // The probe fills the viewport, so aim past it.
        let _ = scene.frame_ref(&mut root, VIEW, &click_at(150.0, 150.0));
        assert_eq!(*log.borrow(), vec!["tick", "click-outside", "lost"]);
    }

    #[test]
    fn tab_uses_previous_paint_and_escape_clears() {
        let mut scene = UiScene::new();
        let (mut root, log) = probe(false);
        let _ = scene.frame_ref(&mut root, VIEW, &UiInput::default());

        let tab = UiInput { keys_pressed: vec![(Key::Tab, Modifiers::default())], ..UiInput::default() };
        let _ = scene.frame_ref(&mut root, VIEW, &tab);
        assert!(log.borrow().contains(&"gained".to_string()));

        log.borrow_mut().clear();
        let esc = UiInput { keys_pressed: vec![(Key::Escape, Modifiers::default())], ..UiInput::default() };
        let _ = scene.frame_ref(&mut root, VIEW, &esc);
        assert_eq!(*log.borrow(), vec!["tick", "lost"]);
    }

    #[test]
    fn idle_input_has_no_events() {
        assert!(UiInput::default().is_idle());
        assert!(!click_at(0.0, 0.0).is_idle());
    }
}
