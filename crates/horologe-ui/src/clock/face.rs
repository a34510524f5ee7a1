use horologe_engine::coords::{Rect, Vec2};
use horologe_engine::paint::Color;
use horologe_engine::scene::Stroke;

use crate::painter::Painter;

use super::animator::HandAngles;

/// Colors and line weight of the clock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClockStyle {
    /// Rim, hub and hand thickness in logical pixels.
    pub stroke_width: f32,
    pub face_color: Color,
    /// Used for the rim, the hub and both hands.
    pub rim_color: Color,
}

impl Default for ClockStyle {
    fn default() -> Self {
        Self {
            stroke_width: 4.0,
            face_color: Color::WHITE,
            rim_color: Color::from_rgb_hex(0xFF4081),
        }
    }
}

/// Radii and hand lengths derived from the bounds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClockGeometry {
    pub center: Vec2,
    pub rim_radius: f32,
    pub face_radius: f32,
    /// Radius of the hub the hands start from.
    pub screw_radius: f32,
    pub hour_length: f32,
    pub minute_length: f32,
}

impl ClockGeometry {
    pub fn new(bounds: Rect, stroke_width: f32) -> Self {
        let rim_radius = bounds.min_side() / 2.0 - stroke_width;
        let face_radius = rim_radius - stroke_width;
        Self {
            center: bounds.center(),
            rim_radius,
            face_radius,
            screw_radius: stroke_width * 2.0,
            hour_length: 0.5 * face_radius,
            minute_length: 0.7 * face_radius,
        }
    }

    /// `false` when the bounds leave no room for a face around the hub.
    pub fn is_drawable(&self) -> bool {
        self.rim_radius > 0.0 && self.face_radius > self.screw_radius
    }

    /// Hand from the hub edge outwards, rotated clockwise by `angle` degrees
    /// from 12 o'clock.
    pub fn hand(&self, angle: f32, length: f32) -> (Vec2, Vec2) {
        let dir = Vec2::from_dial_angle(angle);
        let from = self.center + dir * self.screw_radius;
        let to = self.center + dir * (self.screw_radius + length);
        (from, to)
    }
}

/// Records one clock frame: rim, face, hub, hour hand, minute hand.
pub fn paint_clock(painter: &mut Painter, bounds: Rect, angles: HandAngles, style: &ClockStyle) {
    let geo = ClockGeometry::new(bounds, style.stroke_width);
    if !geo.is_drawable() {
        return;
    }
    let rim = Stroke::new(style.stroke_width, style.rim_color);

    painter.stroke_circle(geo.center, geo.rim_radius, rim);
    painter.fill_circle(geo.center, geo.face_radius, style.face_color);
    painter.stroke_circle(geo.center, geo.screw_radius, rim);

    let (from, to) = geo.hand(angles.hour, geo.hour_length);
    painter.segment(from, to, style.stroke_width, style.rim_color);
    let (from, to) = geo.hand(angles.minute, geo.minute_length);
    painter.segment(from, to, style.stroke_width, style.rim_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use horologe_engine::scene::{DrawCmd, DrawList};
    use horologe_engine::text::FontSystem;

    const EPS: f32 = 1e-3;

    fn record(bounds: Rect, angles: HandAngles) -> DrawList {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        {
            let mut p = Painter::new(&mut list, &fonts, None, None, Vec2::zero(), false, 1.0);
            paint_clock(&mut p, bounds, angles, &ClockStyle::default());
        }
        list
    }

    #[test]
    fn geometry_follows_bounds_and_stroke() {
        let g = ClockGeometry::new(Rect::new(0.0, 0.0, 200.0, 300.0), 4.0);
        assert_eq!(g.center, Vec2::new(100.0, 150.0));
        assert_eq!(g.rim_radius, 96.0);
        assert_eq!(g.face_radius, 92.0);
        assert_eq!(g.screw_radius, 8.0);
        assert_eq!(g.hour_length, 46.0);
        assert!((g.minute_length - 64.4).abs() < EPS);
    }

    #[test]
    fn paints_three_circles_then_two_segments() {
        let mut list = record(Rect::new(0.0, 0.0, 200.0, 200.0), HandAngles::default());
        let kinds: Vec<&str> = list
            .iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Circle(_) => "circle",
                DrawCmd::Segment(_) => "segment",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["circle", "circle", "circle", "segment", "segment"]);

        let radii: Vec<f32> = list
            .items()
            .iter()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Circle(c) => Some(c.radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![96.0, 92.0, 8.0]);

        // Rim and hub are outlines, the face is filled.
        let DrawCmd::Circle(face) = &list.items()[1].cmd else { panic!("face") };
        assert!(face.fill.is_some() && face.stroke.is_none());
        let DrawCmd::Circle(rim) = &list.items()[0].cmd else { panic!("rim") };
        assert!(rim.fill.is_none() && rim.stroke.is_some());
    }

    #[test]
    fn hands_start_at_hub_and_point_along_their_angle() {
        let list = record(
            Rect::new(0.0, 0.0, 200.0, 200.0),
            HandAngles { hour: 0.0, minute: 90.0 },
        );
        let segs: Vec<_> = list
            .items()
            .iter()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Segment(s) => Some(s.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(segs.len(), 2);

        // Hour hand straight up from the hub edge.
        let hour = &segs[0];
        assert!((hour.from.x - 100.0).abs() < EPS && (hour.from.y - 92.0).abs() < EPS);
        assert!((hour.to.x - 100.0).abs() < EPS && (hour.to.y - 46.0).abs() < EPS);

        // Minute hand at 3 o'clock: rightwards, on the horizontal axis.
        let minute = &segs[1];
        assert!((minute.from.y - 100.0).abs() < EPS);
        assert!((minute.to.y - 100.0).abs() < EPS);
        assert!((minute.to.x - (100.0 + 8.0 + 64.4)).abs() < EPS);
    }

    #[test]
    fn degenerate_bounds_draw_nothing() {
        let list = record(Rect::new(0.0, 0.0, 10.0, 10.0), HandAngles::default());
        assert!(list.is_empty());
        let list = record(Rect::new(0.0, 0.0, 0.0, 0.0), HandAngles::default());
        assert!(list.is_empty());
    }

    #[test]
    fn hub_larger_than_face_draws_nothing() {
        let bounds = Rect::new(0.0, 0.0, 20.0, 20.0);
        let geo = ClockGeometry::new(bounds, 4.0);
        assert!(geo.face_radius > 0.0);
        assert!(geo.screw_radius > geo.face_radius);
        assert!(!geo.is_drawable());
        assert!(record(bounds, HandAngles::default()).is_empty());
    }
}
