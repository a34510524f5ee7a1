use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{CircleCmd, DrawCmd, DrawList};

use super::common::{InstancedQuads, QuadPipelineDesc};

/// Renderer for `DrawCmd::Circle`: antialiased fill plus a ring centered on the radius.
pub struct CircleRenderer {
    quads: InstancedQuads<CircleInstance>,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self {
            quads: InstancedQuads::new(QuadPipelineDesc {
                name: "circle",
                shader: include_str!("shaders/circle.wgsl"),
                instance_attrs: &CircleInstance::ATTRS,
                textured: false,
            }),
        }
    }
}

impl CircleRenderer {
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
            if let DrawCmd::Circle(cmd) = &item.cmd {
                self.quads.push(CircleInstance::from_cmd(cmd), item.clip_rect);
            }
        }

        self.quads.flush(ctx, target);
    }
}

/// Per-instance data (48 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    /// `.x` radius, `.y` stroke width.
    radius_stroke: [f32; 2],
    fill: [f32; 4],
    stroke: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x4,
        4 => Float32x4
    ];

    fn from_cmd(cmd: &CircleCmd) -> Self {
        let (stroke_width, stroke) = cmd
            .stroke
            .map_or((0.0, [0.0; 4]), |s| (s.width.max(0.0), s.color.to_array()));
        Self {
            center: [cmd.center.x, cmd.center.y],
            radius_stroke: [cmd.radius, stroke_width],
            fill: cmd.fill.map_or([0.0; 4], |c| c.to_array()),
            stroke,
        }
    }
}
