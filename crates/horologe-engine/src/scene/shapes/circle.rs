use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Stroke;

/// Filled and/or stroked circle.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl CircleCmd {
    /// Radius of the outermost painted pixel.
    #[inline]
    pub fn outer_radius(&self) -> f32 {
        self.radius + self.stroke.map_or(0.0, |s| s.width * 0.5)
    }
}

impl DrawList {
    /// Records a circle. Nothing is recorded when both `fill` and `stroke` are empty.
    pub fn push_circle(
        &mut self,
        z: ZIndex,
        center: Vec2,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    ) {
        let stroke = stroke.filter(Stroke::is_visible);
        if (fill.is_none() && stroke.is_none()) || radius <= 0.0 {
            return;
        }
        self.push(z, DrawCmd::Circle(CircleCmd { center, radius, fill, stroke }));
    }
}
