mod circle;
mod rounded_rect;
mod segment;
mod text;

pub use circle::CircleCmd;
pub use rounded_rect::RoundedRectCmd;
pub use segment::SegmentCmd;
pub use text::TextCmd;

use crate::paint::Color;

/// Outline centered on a shape's edge: half inside, half outside.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }

    #[inline]
    pub(crate) fn is_visible(&self) -> bool {
        self.width > 0.0 && self.color.a > 0.0
    }
}
