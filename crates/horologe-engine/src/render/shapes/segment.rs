use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList, SegmentCmd};

use super::common::{InstancedQuads, QuadPipelineDesc};

/// Renderer for `DrawCmd::Segment`: round-capped lines such as clock hands.
pub struct SegmentRenderer {
    quads: InstancedQuads<SegmentInstance>,
}

impl Default for SegmentRenderer {
    fn default() -> Self {
        Self {
            quads: InstancedQuads::new(QuadPipelineDesc {
                name: "segment",
                shader: include_str!("shaders/segment.wgsl"),
                instance_attrs: &SegmentInstance::ATTRS,
                textured: false,
            }),
        }
    }
}

impl SegmentRenderer {
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
            if let DrawCmd::Segment(cmd) = &item.cmd {
                self.quads.push(SegmentInstance::from_cmd(cmd), item.clip_rect);
            }
        }

        self.quads.flush(ctx, target);
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SegmentInstance {
    from: [f32; 2],
    to: [f32; 2],
    /// `.x` half the line width; `.y` unused.
    half_width: [f32; 2],
    color: [f32; 4],
}

impl SegmentInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x4
    ];

    fn from_cmd(cmd: &SegmentCmd) -> Self {
        Self {
            from: [cmd.from.x, cmd.from.y],
            to: [cmd.to.x, cmd.to.y],
            half_width: [cmd.width * 0.5, 0.0],
            color: cmd.color.to_array(),
        }
    }
}
