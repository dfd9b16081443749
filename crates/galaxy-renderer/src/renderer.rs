//! Star rendering: vertex buffer upload and the point-sprite draw

use galaxy_physics::ParticleField;
use glam::{Mat4, Vec2};

use crate::camera::CameraUniform;
use crate::error::RenderError;
use crate::palette::StarPalette;
use crate::shader::StarShaderSource;
use crate::sprite::QUAD_CORNERS;
use crate::vertex::{StarVertex, StarVertexBuffer};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Vertices per star sprite (two triangles)
const SPRITE_VERTICES: u32 = QUAD_CORNERS.len() as u32;

/// Device limits for the star pipeline: wgpu defaults, except that the vertex
/// buffer may grow as large as the adapter allows.
pub fn required_limits(adapter_limits: &wgpu::Limits) -> wgpu::Limits {
    wgpu::Limits {
        max_buffer_size: adapter_limits.max_buffer_size,
        ..wgpu::Limits::default()
    }
}

/// Most stars, attractor included, one vertex buffer can hold under `limits`.
pub fn max_stars(limits: &wgpu::Limits) -> usize {
    (limits.max_buffer_size / StarVertex::STRIDE) as usize
}

/// Owns every GPU resource needed to draw a [`ParticleField`].
///
/// Holds no camera state; view and projection come in with each draw.
pub struct StarRenderer {
    render_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::TextureView,
    surface_config: wgpu::SurfaceConfiguration,

    staging: StarVertexBuffer,
    vertex_buffer: wgpu::Buffer,
    /// Stars the vertex buffer can hold
    capacity: usize,
    /// Stars written by the last upload
    star_count: u32,
    max_buffer_size: u64,
    clear_color: wgpu::Color,
}

impl StarRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_config: &wgpu::SurfaceConfiguration,
        shader: &StarShaderSource,
        palette: StarPalette,
    ) -> Self {
        log::info!("Initializing StarRenderer...");

        // Create camera buffer
        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(device, surface_config);

        let module = shader.create_module(device);

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[
                    // Camera (Uniform) - Binding 0
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Star Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Star Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some(shader.vertex_entry.as_ref()),
                buffers: &[StarVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some(shader.fragment_entry.as_ref()),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = Self::create_vertex_buffer(device, 1);

        log::info!("✓ Star pipeline created");

        Self {
            render_pipeline,
            camera_buffer,
            camera_bind_group,
            depth_texture,
            surface_config: surface_config.clone(),
            staging: StarVertexBuffer::new(palette),
            vertex_buffer,
            capacity: 1,
            star_count: 0,
            max_buffer_size: device.limits().max_buffer_size,
            clear_color: palette.clear_color(),
        }
    }

    fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Star Vertex Buffer"),
            size: StarVertexBuffer::byte_len(capacity),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        depth_texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub fn resize(&mut self, device: &wgpu::Device, new_config: &wgpu::SurfaceConfiguration) {
        self.surface_config = new_config.clone();
        self.depth_texture = Self::create_depth_texture(device, new_config);
    }

    /// Copy every star of `field` into the vertex buffer.
    ///
    /// The buffer grows when the field outgrows it. Fields larger than the
    /// device's maximum buffer size are rejected and leave the previous
    /// contents in place.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        field: &ParticleField,
    ) -> Result<(), RenderError> {
        let stars = field.len();
        let bytes = StarVertexBuffer::byte_len(stars);
        if bytes > self.max_buffer_size {
            return Err(RenderError::FieldTooLarge {
                stars,
                bytes,
                max_bytes: self.max_buffer_size,
            });
        }

        if stars > self.capacity {
            log::info!("Growing star vertex buffer: {} -> {} stars", self.capacity, stars);
            self.vertex_buffer = Self::create_vertex_buffer(device, stars);
            self.capacity = stars;
        }

        self.staging.sync(field);
        queue.write_buffer(&self.vertex_buffer, 0, self.staging.as_bytes());
        self.star_count = stars as u32;
        Ok(())
    }

    /// Draw the last uploaded stars into `surface_view`.
    pub fn draw(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_view: &wgpu::TextureView,
        view: Mat4,
        projection: Mat4,
    ) {
        let viewport = Vec2::new(
            self.surface_config.width as f32,
            self.surface_config.height as f32,
        );
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::new(view, projection, viewport)]),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Star Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if self.star_count > 0 {
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(
                    0,
                    self.vertex_buffer
                        .slice(..StarVertexBuffer::byte_len(self.star_count as usize)),
                );
                render_pass.draw(0..SPRITE_VERTICES, 0..self.star_count);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    /// Upload `field`, then draw.
    ///
    /// The frame is drawn even when the upload fails, showing the stars of the
    /// last successful upload. The upload error is still returned.
    pub fn sync_and_draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_view: &wgpu::TextureView,
        field: &ParticleField,
        view: Mat4,
        projection: Mat4,
    ) -> Result<(), RenderError> {
        let uploaded = self.upload(device, queue, field);
        self.draw(device, queue, surface_view, view, projection);
        uploaded
    }

    /// CPU copy of what the last upload wrote to the GPU
    pub fn staging(&self) -> &StarVertexBuffer {
        &self.staging
    }

    pub fn star_count(&self) -> u32 {
        self.star_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_physics::MAX_STAR_COUNT;

    #[test]
    fn test_default_limits_cap_star_count() {
        let limits = wgpu::Limits::default();
        assert_eq!(max_stars(&limits), (256 << 20) / 28);
        assert!(max_stars(&limits) < MAX_STAR_COUNT + 1);
    }

    #[test]
    fn test_required_limits_follow_adapter_buffer_size() {
        let adapter = wgpu::Limits {
            max_buffer_size: 1 << 30,
            ..wgpu::Limits::default()
        };
        let limits = required_limits(&adapter);
        assert_eq!(limits.max_buffer_size, 1 << 30);
        assert_eq!(
            limits.max_bind_groups,
            wgpu::Limits::default().max_bind_groups
        );
        // Largest generated field plus the attractor
        assert!(max_stars(&limits) >= MAX_STAR_COUNT + 1);
    }

    #[test]
    fn test_max_stars_matches_byte_len() {
        let limits = wgpu::Limits {
            max_buffer_size: 1000,
            ..wgpu::Limits::default()
        };
        let stars = max_stars(&limits);
        assert!(StarVertexBuffer::byte_len(stars) <= 1000);
        assert!(StarVertexBuffer::byte_len(stars + 1) > 1000);
    }
}
