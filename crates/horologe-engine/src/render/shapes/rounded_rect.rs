use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList, RoundedRectCmd};

use super::common::{InstancedQuads, QuadPipelineDesc};

/// Renderer for `DrawCmd::RoundedRect`.
pub struct RoundedRectRenderer {
    quads: InstancedQuads<RoundedRectInstance>,
}

impl Default for RoundedRectRenderer {
    fn default() -> Self {
        Self {
            quads: InstancedQuads::new(QuadPipelineDesc {
                name: "rounded rect",
                shader: include_str!("shaders/rounded_rect.wgsl"),
                instance_attrs: &RoundedRectInstance::ATTRS,
                textured: false,
            }),
        }
    }
}

impl RoundedRectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.quads.prepare(ctx);

        for item in draw_list.iter_in_paint_order() {
            if let DrawCmd::RoundedRect(cmd) = &item.cmd {
                self.quads.push(RoundedRectInstance::from_cmd(cmd), item.clip_rect);
            }
        }

        self.quads.flush(ctx, target);
    }
}

/// Per-instance data (56 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RoundedRectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    /// `.x` corner radius, `.y` stroke width.
    radius_stroke: [f32; 2],
    fill: [f32; 4],
    stroke: [f32; 4],
}

impl RoundedRectInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x4,
        5 => Float32x4
    ];

    fn from_cmd(cmd: &RoundedRectCmd) -> Self {
        let (stroke_width, stroke) = cmd
            .stroke
            .map_or((0.0, [0.0; 4]), |s| (s.width.max(0.0), s.color.to_array()));
        Self {
            origin: [cmd.rect.origin.x, cmd.rect.origin.y],
            size: [cmd.rect.size.x, cmd.rect.size.y],
            radius_stroke: [cmd.radius, stroke_width],
            fill: cmd.fill.map_or([0.0; 4], |c| c.to_array()),
            stroke,
        }
    }
}
