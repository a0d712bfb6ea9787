//! Additive billboard-quad particle pipeline.
//!
//! Each particle is a camera-facing quad expanded in the vertex shader
//! from a shared corner strip plus a per-particle position. The instance
//! buffer is preallocated for the cloud's fixed count and rewritten every
//! frame; additive blending with no depth write matches the soft glow of
//! the rest of the scene.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::options::ColorOptions;
use crate::render::context::RenderContext;
use crate::render::{additive_target, depth_stencil_state};

/// World-space half-extent of a particle quad.
const PARTICLE_SIZE: f32 = 0.04;
/// Base particle opacity.
const PARTICLE_ALPHA: f32 = 0.7;

/// Per-particle instance: world position + alpha.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ParticleInstance {
    center_alpha: [f32; 4],
}

/// Style uniform for the particle pass.
/// NOTE: Must match the WGSL `ParticleStyle` layout (16 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ParticleStyle {
    color: [f32; 3],
    size: f32,
}

/// Instance buffer for one particle cloud.
pub struct ParticleBatch {
    instance_buffer: wgpu::Buffer,
    capacity: u32,
    count: u32,
}

impl ParticleBatch {
    /// Preallocate room for `max_particles`.
    #[must_use]
    pub fn new(context: &RenderContext, max_particles: usize) -> Self {
        let capacity = max_particles.max(1) as u32;
        let instance_buffer =
            context.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Particle Instance Buffer"),
                size: u64::from(capacity)
                    * size_of::<ParticleInstance>() as u64,
                usage: wgpu::BufferUsages::VERTEX
                    | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        Self {
            instance_buffer,
            capacity,
            count: 0,
        }
    }

    /// Upload this frame's particle positions.
    pub fn write_positions(
        &mut self,
        queue: &wgpu::Queue,
        positions: &[Vec3],
    ) {
        let n = positions.len().min(self.capacity as usize);
        if n < positions.len() {
            log::debug!(
                "particle overflow: {} > capacity {}",
                positions.len(),
                self.capacity
            );
        }
        self.count = n as u32;
        if n == 0 {
            return;
        }
        let instances: Vec<ParticleInstance> = positions[..n]
            .iter()
            .map(|p| ParticleInstance {
                center_alpha: [p.x, p.y, p.z, PARTICLE_ALPHA],
            })
            .collect();
        queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&instances),
        );
    }
}

/// Pipeline for the additive particle pass.
pub struct ParticleRenderer {
    pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    style_bind_group: wgpu::BindGroup,
}

impl ParticleRenderer {
    /// Build the particle pipeline against the camera layout.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        colors: &ColorOptions,
    ) -> Self {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/scene_particles.wgsl"
        ));

        // Triangle-strip corners in quad space.
        let corners: [[f32; 2]; 4] =
            [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]];
        let quad_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Particle Quad Buffer"),
                contents: bytemuck::cast_slice(&corners),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let style = ParticleStyle {
            color: colors.accent,
            size: PARTICLE_SIZE,
        };
        let style_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Particle Style Buffer"),
                contents: bytemuck::cast_slice(&[style]),
                usage: wgpu::BufferUsages::UNIFORM,
            },
        );
        let style_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Particle Style Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );
        let style_bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &style_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: style_buffer.as_entire_binding(),
                    }],
                    label: Some("Particle Style Bind Group"),
                });

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Particle Pipeline Layout"),
                bind_group_layouts: &[camera_layout, &style_layout],
                push_constant_ranges: &[],
            },
        );

        let quad_layout = wgpu::VertexBufferLayout {
            array_stride: (size_of::<f32>() * 2)
                as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0, // corner
            }],
        };
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<ParticleInstance>()
                as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 0,
                shader_location: 1, // center + alpha
            }],
        };

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Particle Render Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[quad_layout, instance_layout],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[additive_target(context.format())],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleStrip,
                    ..Default::default()
                },
                depth_stencil: Some(depth_stencil_state(false)),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        Self {
            pipeline,
            quad_buffer,
            style_bind_group,
        }
    }

    /// Draw one particle batch.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        batch: &'a ParticleBatch,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        if batch.count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.style_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
        render_pass.set_vertex_buffer(1, batch.instance_buffer.slice(..));
        render_pass.draw(0..4, 0..batch.count);
    }
}
