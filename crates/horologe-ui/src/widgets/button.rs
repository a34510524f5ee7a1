use horologe_engine::coords::{Rect, Vec2};
use horologe_engine::paint::Color;
use horologe_engine::scene::Stroke;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// A clickable widget that wraps any child content.
///
/// Visual state (hover, press) is read from `Painter` during `paint` so no
/// retained state is needed.
///
/// # Example
/// ```rust,ignore
/// Button::new(Text::new("+", font, 18.0, white))
///     .background(accent)
///     .hover_background(accent.with_alpha_factor(0.85))
///     .padding_all(6.0)
///     .corner_radius(4.0)
///     .on_click(move || model.borrow_mut().increment(StepperField::Days))
/// ```
pub struct Button {
    child: Element,
    on_click: Option<Box<dyn FnMut()>>,

    background: Color,
    hover_background: Color,
    press_background: Color,
    border: Option<Stroke>,
    corner_radius: f32,
    padding: Edges,
    min_width: f32,
    min_height: f32,
}

impl Button {
    pub fn new(child: impl Into<Element>) -> Self {
        Self {
            child: child.into(),
            on_click: None,
            background: Color::TRANSPARENT,
            hover_background: Color::TRANSPARENT,
            press_background: Color::TRANSPARENT,
            border: None,
            corner_radius: 0.0,
            padding: Edges::default(),
            min_width: 0.0,
            min_height: 0.0,
        }
    }

    /// Callback invoked when the button is clicked.
    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Sets all three backgrounds; override hover/press afterwards.
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self.hover_background = color;
        self.press_background = color;
        self
    }

    /// Background color when the cursor is over the button.
    pub fn hover_background(mut self, color: Color) -> Self {
        self.hover_background = color;
        self
    }

    /// Background color while the primary button is held.
    pub fn press_background(mut self, color: Color) -> Self {
        self.press_background = color;
        self
    }

    pub fn border(mut self, border: Stroke) -> Self {
        self.border = Some(border);
        self
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn padding_all(mut self, v: f32) -> Self {
        self.padding = Edges::all(v);
        self
    }

    pub fn min_size(mut self, width: f32, height: f32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }
}

impl Widget for Button {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner = constraints.shrink(self.padding);
        let child_size = self.child.measure(inner, ctx);
        let w = (child_size.x + self.padding.h()).max(self.min_width);
        let h = (child_size.y + self.padding.v()).max(self.min_height);
        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let bg = if painter.is_pressed(rect) {
            self.press_background
        } else if painter.is_hovered(rect) {
            self.hover_background
        } else {
            self.background
        };

        painter.rounded_rect(rect, self.corner_radius, Some(bg), self.border);

        // Center the content; the button may be stretched wider than it.
        let inner = inset_rect(rect, self.padding);
        let ctx = painter.layout_ctx();
        let size = self.child.measure(Constraints::loose(inner.size), &ctx);
        let origin = Vec2::new(
            inner.origin.x + ((inner.size.x - size.x) * 0.5).max(0.0),
            inner.origin.y + ((inner.size.y - size.y) * 0.5).max(0.0),
        );
        self.child.paint(painter, Rect { origin, size });
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        if let UiEvent::Click { pos } = event {
            if rect.contains(*pos) {
                if let Some(f) = &mut self.on_click {
                    f();
                }
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use horologe_engine::text::FontSystem;

    use super::*;

    /// Fixed-size leaf; zero size acts as a row spacer.
    struct Block(Vec2);

    impl Widget for Block {
        fn measure(&self, c: Constraints, _ctx: &LayoutCtx) -> Vec2 {
            c.constrain(self.0)
        }

        fn paint(&self, _painter: &mut Painter, _rect: Rect) {}
    }

    #[test]
    fn click_inside_fires_and_consumes() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let mut button = Button::new(Block(Vec2::zero())).on_click(move || counter.set(counter.get() + 1));

        let fonts = FontSystem::new();
        let ctx = LayoutCtx::measure_only(&fonts, 1.0);
        let rect = Rect::new(0.0, 0.0, 40.0, 20.0);

        let inside = button.on_event(&UiEvent::Click { pos: Vec2::new(5.0, 5.0) }, rect, &ctx);
        let outside = button.on_event(&UiEvent::Click { pos: Vec2::new(50.0, 5.0) }, rect, &ctx);
        assert!(inside.is_consumed());
        assert!(!outside.is_consumed());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn measure_honors_padding_and_min_size() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx::measure_only(&fonts, 1.0);
        let button = Button::new(Block(Vec2::new(10.0, 10.0))).padding_all(4.0).min_size(30.0, 0.0);
        let size = button.measure(Constraints::loose(Vec2::new(100.0, 100.0)), &ctx);
        assert_eq!(size, Vec2::new(30.0, 18.0));
    }
}
