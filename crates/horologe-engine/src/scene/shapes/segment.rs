use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Straight line with round caps (a capsule).
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentCmd {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
    pub color: Color,
}

impl DrawList {
    pub fn push_segment(&mut self, z: ZIndex, from: Vec2, to: Vec2, width: f32, color: Color) {
        if width <= 0.0 || !from.is_finite() || !to.is_finite() {
            return;
        }
        self.push(z, DrawCmd::Segment(SegmentCmd { from, to, width, color }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::scene::Stroke;

    #[test]
    fn degenerate_shapes_are_not_recorded() {
        let mut list = DrawList::new();
        list.push_segment(ZIndex(0), Vec2::zero(), Vec2::new(f32::NAN, 0.0), 2.0, Color::BLACK);
        list.push_segment(ZIndex(0), Vec2::zero(), Vec2::new(1.0, 0.0), 0.0, Color::BLACK);
        list.push_circle(ZIndex(0), Vec2::zero(), 5.0, None, None);
        list.push_circle(ZIndex(0), Vec2::zero(), 5.0, None, Some(Stroke::new(0.0, Color::BLACK)));
        list.push_rounded_rect(ZIndex(0), Rect::new(0.0, 0.0, 0.0, 10.0), 2.0, Some(Color::BLACK), None);
        assert!(list.is_empty());
    }

    #[test]
    fn rounded_rect_radius_is_clamped() {
        let mut list = DrawList::new();
        list.push_rounded_rect(ZIndex(0), Rect::new(0.0, 0.0, 40.0, 10.0), 50.0, Some(Color::WHITE), None);
        match &list.items()[0].cmd {
            DrawCmd::RoundedRect(r) => assert_eq!(r.radius, 5.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn circle_outer_radius_includes_half_stroke() {
        let mut list = DrawList::new();
        list.push_circle(ZIndex(0), Vec2::zero(), 10.0, None, Some(Stroke::new(4.0, Color::BLACK)));
        match &list.items()[0].cmd {
            DrawCmd::Circle(c) => assert_eq!(c.outer_radius(), 12.0),
            other => panic!("unexpected {other:?}"),
        }
    }
}
