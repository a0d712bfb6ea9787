//! Instanced solid-mesh pipeline.
//!
//! A [`MeshBatch`] owns one unit mesh plus preallocated instance
//! buffers. The optional wireframe outline is derived from the same mesh
//! and written from the same model matrices as the solid, which keeps
//! the two rotating in lock-step.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::render::context::RenderContext;
use crate::render::geometry::{MeshData, MeshVertex};
use crate::render::{alpha_target, depth_stencil_state};

/// Per-instance data shared by the mesh and line pipelines.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshInstance {
    /// Model matrix (column-major).
    pub model: [[f32; 4]; 4],
    /// RGB tint + alpha.
    pub tint: [f32; 4],
    /// `[emissive, 0, 0, 0]`.
    pub params: [f32; 4],
}

impl MeshInstance {
    /// Build an instance from a transform, tint and emissive strength.
    #[must_use]
    pub fn new(
        model: glam::Mat4,
        color: [f32; 3],
        alpha: f32,
        emissive: f32,
    ) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            tint: [color[0], color[1], color[2], alpha],
            params: [emissive, 0.0, 0.0, 0.0],
        }
    }
}

/// Vertex buffer layout for unit meshes.
pub(crate) fn mesh_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<MeshVertex>()
            as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0, // position
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1, // normal
            },
        ],
    }
}

/// Instance buffer layout shared by the mesh and line pipelines
/// (4x4 matrix as four vec4s + tint + params).
pub(crate) fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<MeshInstance>()
            as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 0,
                shader_location: 2, // model matrix col 0
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 16,
                shader_location: 3, // model matrix col 1
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 32,
                shader_location: 4, // model matrix col 2
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 48,
                shader_location: 5, // model matrix col 3
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 64,
                shader_location: 6, // tint
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 80,
                shader_location: 7, // params
            },
        ],
    }
}

/// One unit mesh with its instance buffer and optional outline geometry.
///
/// The outline carries its own tint, so it gets a second instance
/// buffer — but both buffers are written from the same model matrices in
/// one call, which is what keeps solid and wireframe in lock-step.
pub struct MeshBatch {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    edge_vertex_buffer: Option<wgpu::Buffer>,
    edge_vertex_count: u32,
    instance_buffer: wgpu::Buffer,
    outline_instance_buffer: Option<wgpu::Buffer>,
    capacity: u32,
    count: u32,
}

impl MeshBatch {
    /// Upload a unit mesh (and optional outline line list) and
    /// preallocate room for `max_instances` transforms.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        label: &str,
        mesh: &MeshData,
        outline: Option<&[Vec3]>,
        max_instances: usize,
    ) -> Self {
        let vertex_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertex Buffer")),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        let index_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Index Buffer")),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        let edge_vertex_buffer = outline.map(|lines| {
            let points: Vec<[f32; 3]> =
                lines.iter().map(|p| p.to_array()).collect();
            context.device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{label} Outline Buffer")),
                    contents: bytemuck::cast_slice(&points),
                    usage: wgpu::BufferUsages::VERTEX,
                },
            )
        });

        let capacity = max_instances.max(1) as u32;
        let instance_size = u64::from(capacity)
            * size_of::<MeshInstance>() as u64;
        let instance_buffer =
            context.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("{label} Instance Buffer")),
                size: instance_size,
                usage: wgpu::BufferUsages::VERTEX
                    | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        let outline_instance_buffer = outline.map(|_| {
            context.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("{label} Outline Instance Buffer")),
                size: instance_size,
                usage: wgpu::BufferUsages::VERTEX
                    | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            edge_vertex_buffer,
            edge_vertex_count: outline.map_or(0, |l| l.len() as u32),
            instance_buffer,
            outline_instance_buffer,
            capacity,
            count: 0,
        }
    }

    /// Upload this frame's instances. `solid` and `outline` must come
    /// from the same model matrices; only their tints differ. Overflow
    /// beyond the preallocated capacity is truncated and logged rather
    /// than reallocating mid-frame.
    pub fn write_instances(
        &mut self,
        queue: &wgpu::Queue,
        solid: &[MeshInstance],
        outline: &[MeshInstance],
    ) {
        let n = solid.len().min(self.capacity as usize);
        if n < solid.len() {
            log::debug!(
                "instance overflow: {} > capacity {}",
                solid.len(),
                self.capacity
            );
        }
        self.count = n as u32;
        if n > 0 {
            queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&solid[..n]),
            );
        }
        if let Some(buffer) = &self.outline_instance_buffer {
            let m = outline.len().min(n);
            if m > 0 {
                queue.write_buffer(
                    buffer,
                    0,
                    bytemuck::cast_slice(&outline[..m]),
                );
            }
        }
    }

    /// Instances uploaded for the current frame.
    #[must_use]
    pub fn instance_count(&self) -> u32 {
        self.count
    }

    /// Outline line-list buffer and its instance buffer, if this batch
    /// carries an outline.
    pub(crate) fn outline(
        &self,
    ) -> Option<(&wgpu::Buffer, u32, &wgpu::Buffer)> {
        match (&self.edge_vertex_buffer, &self.outline_instance_buffer) {
            (Some(edges), Some(instances)) => {
                Some((edges, self.edge_vertex_count, instances))
            }
            _ => None,
        }
    }
}

/// Pipeline for lit, alpha-blended instanced meshes.
pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
}

impl MeshRenderer {
    /// Build the mesh pipeline against the camera/lighting layouts.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/scene_mesh.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Mesh Pipeline Layout"),
                bind_group_layouts: &[camera_layout, lighting_layout],
                push_constant_ranges: &[],
            },
        );

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Mesh Render Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[mesh_vertex_layout(), instance_layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[alpha_target(context.format())],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(depth_stencil_state(true)),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        Self { pipeline }
    }

    /// Draw one batch's solid geometry.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        batch: &'a MeshBatch,
        camera_bind_group: &'a wgpu::BindGroup,
        lighting_bind_group: &'a wgpu::BindGroup,
    ) {
        if batch.count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, lighting_bind_group, &[]);
        render_pass.set_vertex_buffer(0, batch.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, batch.instance_buffer.slice(..));
        render_pass.set_index_buffer(
            batch.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..batch.index_count, 0, 0..batch.count);
    }
}
