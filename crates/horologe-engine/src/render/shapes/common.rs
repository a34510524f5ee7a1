//! Pipeline plumbing shared by the shape renderers.
//!
//! Every shape is drawn as one instanced unit quad per command. The vertex
//! shader expands the quad from per-instance data in logical pixels and maps
//! it to NDC through the viewport uniform at group 0, binding 0.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::{Rect, Viewport};
use crate::render::{RenderCtx, RenderTarget};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    viewport: [f32; 2],
    _pad: [f32; 2],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    pos: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Static description of one shape pipeline.
pub(super) struct QuadPipelineDesc {
    /// Short name used in GPU object labels.
    pub name: &'static str,
    pub shader: &'static str,
    /// Per-instance attributes, starting at shader location 1.
    pub instance_attrs: &'static [wgpu::VertexAttribute],
    /// Adds a filterable texture (binding 1) and sampler (binding 2) to group 0.
    pub textured: bool,
}

/// Instanced-quad pipeline with its buffers and a per-frame instance batch.
///
/// Renderers push instances with the clip they were recorded under, then
/// call [`InstancedQuads::flush`]; runs of equal clips share one draw call.
pub(super) struct InstancedQuads<I: Pod> {
    desc: QuadPipelineDesc,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    instances: Vec<I>,
    clips: Vec<Option<Rect>>,
}

impl<I: Pod> InstancedQuads<I> {
    pub(super) fn new(desc: QuadPipelineDesc) -> Self {
        Self {
            desc,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            quad_vbo: None,
            quad_ibo: None,
            instance_vbo: None,
            instance_capacity: 0,
            instances: Vec::new(),
            clips: Vec::new(),
        }
    }

    pub(super) fn push(&mut self, instance: I, clip: Option<Rect>) {
        self.instances.push(instance);
        self.clips.push(clip);
    }

    /// Builds the pipeline for the current surface format if needed.
    ///
    /// Returns `true` when the bind group was invalidated and textured
    /// pipelines must call [`InstancedQuads::bind_texture`] again.
    pub(super) fn prepare(&mut self, ctx: &RenderCtx<'_>) -> bool {
        self.ensure_static_buffers(ctx);

        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            if !self.desc.textured && self.bind_group.is_none() {
                self.bind_untextured(ctx);
            }
            return false;
        }

        self.build_pipeline(ctx);
        if !self.desc.textured {
            self.bind_untextured(ctx);
        }
        true
    }

    /// Rebuilds the bind group around `view`/`sampler` (textured pipelines only).
    pub(super) fn bind_texture(
        &mut self,
        ctx: &RenderCtx<'_>,
        view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) {
        debug_assert!(self.desc.textured);
        let (Some(bgl), Some(ubo)) = (self.bind_group_layout.as_ref(), self.viewport_ubo.as_ref())
        else {
            return;
        };

        let label = format!("horologe {} bind group", self.desc.name);
        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label.as_str()),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
    }

    /// Uploads the batch, records one render pass and empties the batch.
    pub(super) fn flush(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if self.instances.is_empty() {
            return;
        }

        self.write_viewport_uniform(ctx);
        self.ensure_instance_capacity(ctx, self.instances.len());

        if let (Some(pipeline), Some(bind_group), Some(quad_vbo), Some(quad_ibo), Some(instance_vbo)) = (
            self.pipeline.as_ref(),
            self.bind_group.as_ref(),
            self.quad_vbo.as_ref(),
            self.quad_ibo.as_ref(),
            self.instance_vbo.as_ref(),
        ) {
            ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&self.instances));

            let label = format!("horologe {} pass", self.desc.name);
            let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(label.as_str()),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.set_vertex_buffer(0, quad_vbo.slice(..));
            rpass.set_vertex_buffer(1, instance_vbo.slice(..));
            rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

            for (range, clip) in clip_runs(&self.clips) {
                if let Some((sx, sy, sw, sh)) =
                    logical_clip_to_scissor(clip, ctx.viewport, ctx.scale_factor)
                {
                    rpass.set_scissor_rect(sx, sy, sw, sh);
                    rpass.draw_indexed(0..6, 0, range);
                }
            }
        }

        self.instances.clear();
        self.clips.clear();
    }

    fn build_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let name = self.desc.name;

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(format!("horologe {name} shader").as_str()),
            source: wgpu::ShaderSource::Wgsl(self.desc.shader.into()),
        });

        let mut entries = vec![wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(
                    std::mem::size_of::<ViewportUniform>() as u64,
                ),
            },
            count: None,
        }];
        if self.desc.textured {
            entries.push(wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            });
            entries.push(wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            });
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(format!("horologe {name} bgl").as_str()),
            entries: &entries,
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(format!("horologe {name} pipeline layout").as_str()),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<I>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: self.desc.instance_attrs,
        };

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(format!("horologe {name} pipeline").as_str()),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), instance_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(format!("horologe {name} viewport ubo").as_str()),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::debug!("built {name} pipeline for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = None;
    }

    fn bind_untextured(&mut self, ctx: &RenderCtx<'_>) {
        let (Some(bgl), Some(ubo)) = (self.bind_group_layout.as_ref(), self.viewport_ubo.as_ref())
        else {
            return;
        };
        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(format!("horologe {} bind group", self.desc.name).as_str()),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() }],
        }));
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }
        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(format!("horologe {} quad vbo", self.desc.name).as_str()),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(format!("horologe {} quad ibo", self.desc.name).as_str()),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn write_viewport_uniform(&self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        let uniform = ViewportUniform { viewport: ctx.viewport.as_uniform(), _pad: [0.0; 2] };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&uniform));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(64);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(format!("horologe {} instance vbo", self.desc.name).as_str()),
            size: (new_cap * std::mem::size_of::<I>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

/// Splits instance indices into maximal runs sharing one clip rect.
fn clip_runs(clips: &[Option<Rect>]) -> Vec<(std::ops::Range<u32>, Option<Rect>)> {
    let mut runs = Vec::new();
    let mut start = 0usize;
    for i in 1..=clips.len() {
        if i == clips.len() || clips[i] != clips[start] {
            runs.push((start as u32..i as u32, clips[start]));
            start = i;
        }
    }
    runs
}

/// Converts a logical clip to a physical scissor `(x, y, w, h)`, clamped to
/// the viewport. `None` clip means the full viewport; an empty result means
/// nothing is visible and the draw should be skipped.
pub(super) fn logical_clip_to_scissor(
    clip: Option<Rect>,
    viewport: Viewport,
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let phys_vw = (viewport.width * scale).max(1.0) as u32;
    let phys_vh = (viewport.height * scale).max(1.0) as u32;

    let (x, y, w, h) = match clip {
        None => (0, 0, phys_vw, phys_vh),
        Some(r) => {
            let max = r.max();
            let x = ((r.origin.x * scale).max(0.0) as u32).min(phys_vw);
            let y = ((r.origin.y * scale).max(0.0) as u32).min(phys_vh);
            let x2 = ((max.x * scale).max(0.0) as u32).min(phys_vw);
            let y2 = ((max.y * scale).max(0.0) as u32).min(phys_vh);
            (x, y, x2.saturating_sub(x), y2.saturating_sub(y))
        }
    };

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_clip_covers_physical_viewport() {
        let s = logical_clip_to_scissor(None, Viewport::new(100.0, 50.0), 2.0);
        assert_eq!(s, Some((0, 0, 200, 100)));
    }

    #[test]
    fn clip_is_scaled_and_clamped() {
        let clip = Some(Rect::new(80.0, -10.0, 40.0, 30.0));
        let s = logical_clip_to_scissor(clip, Viewport::new(100.0, 100.0), 1.0);
        assert_eq!(s, Some((80, 0, 20, 20)));
    }

    #[test]
    fn empty_clip_skips_draw() {
        let clip = Some(Rect::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(logical_clip_to_scissor(clip, Viewport::new(10.0, 10.0), 1.0), None);
    }

    #[test]
    fn clip_runs_group_neighbours() {
        let a = Some(Rect::new(0.0, 0.0, 1.0, 1.0));
        let runs = clip_runs(&[None, None, a, a, None]);
        assert_eq!(runs, vec![(0..2, None), (2..4, a), (4..5, None)]);
    }

    #[test]
    fn clip_runs_empty() {
        assert!(clip_runs(&[]).is_empty());
    }
}
