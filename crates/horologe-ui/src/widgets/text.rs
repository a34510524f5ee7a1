use std::cell::RefCell;
use std::rc::Rc;

use horologe_engine::coords::{Rect, Vec2};
use horologe_engine::paint::Color;
use horologe_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

#[derive(Debug, Clone)]
enum Source {
    Static(String),
    /// Read at measure and paint time, so the owner can change it between frames.
    Shared(Rc<RefCell<String>>),
}

/// A single-run text widget.
///
/// Wrapping follows the width constraint from the parent.
///
/// # Example
/// ```rust,ignore
/// let label = Rc::new(RefCell::new(String::from("15 Jul 00:00")));
/// Text::shared(label.clone(), font, 16.0, Color::BLACK)
/// ```
#[derive(Debug, Clone)]
pub struct Text {
    source: Source,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
}

impl Text {
    pub fn new(text: impl Into<String>, font: FontId, size: f32, color: Color) -> Self {
        Self { source: Source::Static(text.into()), font, size, color }
    }

    /// Text whose content is owned elsewhere and may change at any time.
    pub fn shared(text: Rc<RefCell<String>>, font: FontId, size: f32, color: Color) -> Self {
        Self { source: Source::Shared(text), font, size, color }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Current content.
    pub fn content(&self) -> String {
        match &self.source {
            Source::Static(s) => s.clone(),
            Source::Shared(s) => s.borrow().clone(),
        }
    }
}

impl Widget for Text {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let max_w = constraints.max.x.is_finite().then_some(constraints.max.x);
        let size = ctx.fonts.measure_text_scaled(&self.content(), self.font, self.size, max_w, ctx.scale);
        constraints.constrain(size)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let max_w = (rect.size.x > 0.0).then_some(rect.size.x);
        painter.text(self.content(), self.font, self.size, self.color, rect.origin, max_w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_text_follows_its_owner() {
        let label = Rc::new(RefCell::new(String::from("a")));
        let text = Text::shared(label.clone(), FontId::from_index(0), 12.0, Color::BLACK);
        assert_eq!(text.content(), "a");
        *label.borrow_mut() = "b".into();
        assert_eq!(text.content(), "b");
    }
}
