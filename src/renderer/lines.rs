//! Line-list pipeline: members, node markers and axes drawn as flat-colored
//! lines with depth testing.

use wgpu::util::DeviceExt;

use crate::camera::{Camera, CameraUniform};
use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTexture;
use crate::options::rgb;
use crate::scene::{LineVertex, Scene};

/// Initial vertex capacity.
const INITIAL_VERTICES: usize = 4096;

/// Standard depth-stencil state for the line pass.
fn depth_stencil_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DepthTexture::FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Clear color for `background` (`0xRRGGBB`, sRGB-encoded). An sRGB
/// target re-encodes on store, so the value is linearized first.
fn clear_color(background: u32, srgb_target: bool) -> wgpu::Color {
    let [r, g, b] = rgb(background).map(|c| {
        let c = f64::from(c);
        if srgb_target {
            srgb_to_linear(c)
        } else {
            c
        }
    });
    wgpu::Color { r, g, b, a: 1.0 }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Draws the scene's line vertices from the controlled camera.
pub struct LineRenderer {
    pipeline: wgpu::RenderPipeline,
    vertices: TypedBuffer<LineVertex>,
    uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    depth: DepthTexture,
}

impl LineRenderer {
    /// Create the pipeline and GPU resources for `context`'s surface.
    pub fn new(context: &RenderContext) -> Self {
        let device = &context.device;
        let uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Camera Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("Camera Bind Group"),
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../../assets/shaders/lines.wgsl").into(),
            ),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Line Pipeline Layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[LineVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.format(),
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let (width, height) = context.size();
        Self {
            pipeline,
            vertices: TypedBuffer::with_capacity(
                device,
                "Line Vertices",
                INITIAL_VERTICES,
                wgpu::BufferUsages::VERTEX,
            ),
            uniform,
            camera_buffer,
            camera_bind_group,
            depth: DepthTexture::new(device, width, height),
        }
    }

    /// Recreate the depth target for a new surface size.
    pub fn resize(&mut self, context: &RenderContext) {
        let (width, height) = context.size();
        self.depth = DepthTexture::new(&context.device, width, height);
    }

    /// Upload scene vertices if they changed since the last upload.
    pub fn sync_scene(&mut self, context: &RenderContext, scene: &mut Scene) {
        if !scene.is_dirty() {
            return;
        }
        let _ = self
            .vertices
            .write(&context.device, &context.queue, scene.vertices());
        scene.mark_rendered();
    }

    /// Upload the camera's view-projection.
    pub fn update_camera(&mut self, queue: &wgpu::Queue, camera: &Camera) {
        self.uniform.update_view_proj(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }

    /// Clear to `background` (`0xRRGGBB`) and draw all lines into `view`.
    pub fn render(
        &self,
        context: &RenderContext,
        view: &wgpu::TextureView,
        background: u32,
    ) {
        let clear = clear_color(background, context.format().is_srgb());
        let mut encoder = context.create_encoder();
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Line Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            if !self.vertices.is_empty() {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.camera_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertices.buffer().slice(..));
                pass.draw(0..self.vertices.count() as u32, 0..1);
            }
        }
        context.submit(encoder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_is_linearized_for_srgb_targets() {
        let srgb = clear_color(0x20_20_20, true);
        // #20 is about 1.4% linear intensity.
        assert!((srgb.r - 0.014_444).abs() < 1e-5);
        assert_eq!(srgb.r, srgb.g);
        assert_eq!(srgb.a, 1.0);

        let unorm = clear_color(0x20_20_20, false);
        assert!((unorm.r - 32.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn linearization_keeps_the_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-12);
    }
}
