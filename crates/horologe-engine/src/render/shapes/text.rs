use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::common::{InstancedQuads, QuadPipelineDesc};

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1;

/// Atlas region of one rasterized glyph.
#[derive(Debug, Copy, Clone)]
struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Shelf packer for the glyph atlas: fills rows left to right, top to bottom.
#[derive(Debug)]
struct ShelfPacker {
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl Default for ShelfPacker {
    fn default() -> Self {
        Self { cursor_x: GLYPH_PADDING, cursor_y: GLYPH_PADDING, row_height: 0, full: false }
    }
}

impl ShelfPacker {
    /// Reserves a `w x h` slot and returns its top-left corner.
    fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full || w + 2 * GLYPH_PADDING > ATLAS_SIZE {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > ATLAS_SIZE {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > ATLAS_SIZE {
            self.full = true;
            return None;
        }

        let slot = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(slot)
    }
}

/// Renderer for `DrawCmd::Text`.
///
/// Glyphs are laid out and rasterized at the window scale factor so text
/// stays sharp on high-DPI displays, then cached in an R8 atlas keyed by
/// fontdue's `GlyphRasterConfig` (font, glyph, pixel size).
pub struct TextRenderer {
    quads: InstancedQuads<GlyphInstance>,

    atlas: Option<(wgpu::Texture, wgpu::TextureView)>,
    sampler: Option<wgpu::Sampler>,
    packer: ShelfPacker,
    glyphs: HashMap<GlyphRasterConfig, CachedGlyph>,
    warned_full: bool,

    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            quads: InstancedQuads::new(QuadPipelineDesc {
                name: "text",
                shader: include_str!("shaders/text.wgsl"),
                instance_attrs: &GlyphInstance::ATTRS,
                textured: true,
            }),
            atlas: None,
            sampler: None,
            packer: ShelfPacker::default(),
            glyphs: HashMap::new(),
            warned_full: false,
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        let rebound = self.quads.prepare(ctx);
        let created = self.ensure_atlas(ctx);
        if rebound || created {
            if let (Some((_, view)), Some(sampler)) = (self.atlas.as_ref(), self.sampler.as_ref()) {
                self.quads.bind_texture(ctx, view, sampler);
            }
        }

        let scale = ctx.scale_factor.max(0.01);

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Text(cmd) = &item.cmd else { continue };

            let Some(font) = fonts.get(cmd.font) else {
                log::warn!("text renderer: unknown {:?}, skipping", cmd.font);
                continue;
            };

            let color = cmd.color.to_array();

            self.layout.reset(&LayoutSettings {
                x: cmd.origin.x * scale,
                y: cmd.origin.y * scale,
                max_width: cmd.max_width.map(|w| w * scale),
                ..LayoutSettings::default()
            });
            self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

            for g in self.layout.glyphs() {
                if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                    continue;
                }

                let cached = match self.glyphs.get(&g.key) {
                    Some(c) => *c,
                    None => {
                        let (metrics, bitmap) = font.rasterize_config(g.key);
                        let Some(c) = place_glyph(
                            ctx,
                            self.atlas.as_ref().map(|(t, _)| t),
                            &mut self.packer,
                            &bitmap,
                            metrics.width as u32,
                            metrics.height as u32,
                        ) else {
                            if self.packer.full && !self.warned_full {
                                log::warn!("glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); some glyphs are dropped");
                                self.warned_full = true;
                            }
                            continue;
                        };
                        self.glyphs.insert(g.key, c);
                        c
                    }
                };

                let instance = GlyphInstance {
                    dst_min: [g.x / scale, g.y / scale],
                    dst_max: [(g.x + g.width as f32) / scale, (g.y + g.height as f32) / scale],
                    uv_min: cached.uv_min,
                    uv_max: cached.uv_max,
                    color,
                };
                self.quads.push(instance, item.clip_rect);
            }
        }

        self.quads.flush(ctx, target);
    }

    /// Creates the atlas texture and sampler on first use. Returns `true` if created.
    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>) -> bool {
        if self.atlas.is_some() {
            return false;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("horologe glyph atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("horologe glyph sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));

        self.atlas = Some((texture, view));
        self.packer = ShelfPacker::default();
        self.glyphs.clear();
        true
    }
}

fn place_glyph(
    ctx: &RenderCtx<'_>,
    atlas: Option<&wgpu::Texture>,
    packer: &mut ShelfPacker,
    bitmap: &[u8],
    w: u32,
    h: u32,
) -> Option<CachedGlyph> {
    let atlas = atlas?;
    if w == 0 || h == 0 {
        return None;
    }
    let (gx, gy) = packer.allocate(w, h)?;

    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: atlas,
            mip_level: 0,
            origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
            aspect: wgpu::TextureAspect::All,
        },
        bitmap,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(w),
            rows_per_image: Some(h),
        },
        wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
    );

    let size = ATLAS_SIZE as f32;
    Some(CachedGlyph {
        uv_min: [gx as f32 / size, gy as f32 / size],
        uv_max: [(gx + w) as f32 / size, (gy + h) as f32 / size],
    })
}

/// Per-instance data (48 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x2,
        5 => Float32x4
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packer_fills_rows_then_wraps() {
        let mut p = ShelfPacker::default();
        let a = p.allocate(600, 10).unwrap();
        let b = p.allocate(600, 20).unwrap();
        assert_eq!(a, (1, 1));
        // 1 + 600 + 1 + 600 > 1024, so the second glyph starts a new row.
        assert_eq!(b, (1, 12));
        let c = p.allocate(10, 5).unwrap();
        assert_eq!(c, (602, 12));
    }

    #[test]
    fn packer_reports_full() {
        let mut p = ShelfPacker::default();
        assert!(p.allocate(1000, 1000).is_some());
        assert!(p.allocate(1000, 100).is_none());
        assert!(p.full);
        assert!(p.allocate(1, 1).is_none());
    }

    #[test]
    fn oversized_glyph_is_rejected_without_filling() {
        let mut p = ShelfPacker::default();
        assert!(p.allocate(ATLAS_SIZE, 4).is_none());
        assert!(!p.full);
    }
}
