use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Stroke;

/// Rectangle with a uniform corner radius.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    /// Clamped to half the shorter side when recorded.
    pub radius: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl DrawList {
    pub fn push_rounded_rect(
        &mut self,
        z: ZIndex,
        rect: Rect,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    ) {
        let rect = rect.normalized();
        let stroke = stroke.filter(Stroke::is_visible);
        if rect.is_empty() || (fill.is_none() && stroke.is_none()) {
            return;
        }
        let radius = radius.clamp(0.0, rect.min_side() * 0.5);
        self.push(z, DrawCmd::RoundedRect(RoundedRectCmd { rect, radius, fill, stroke }));
    }
}
