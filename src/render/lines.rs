//! Instanced line-list pipeline.
//!
//! Draws unlit, fogged, alpha-blended lines: wireframe outlines (fed by a
//! [`MeshBatch`]'s shared instance buffer), helix/network links, flow
//! curves and the backdrop grid. Lines test depth but never write it.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::render::context::RenderContext;
use crate::render::mesh::{instance_layout, MeshBatch, MeshInstance};
use crate::render::{alpha_target, depth_stencil_state};

/// Vertex layout for bare line-list points.
fn line_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: (size_of::<f32>() * 3)
            as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0, // position
        }],
    }
}

/// A standalone line list with its own instance buffer.
pub struct LineBatch {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    instance_buffer: wgpu::Buffer,
    capacity: u32,
    count: u32,
}

impl LineBatch {
    /// Upload a line list (pairs of points) and preallocate
    /// `max_instances` transforms.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        label: &str,
        lines: &[Vec3],
        max_instances: usize,
    ) -> Self {
        let points: Vec<[f32; 3]> =
            lines.iter().map(|p| p.to_array()).collect();
        let vertex_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Line Buffer")),
                contents: bytemuck::cast_slice(&points),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        let capacity = max_instances.max(1) as u32;
        let instance_buffer =
            context.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("{label} Line Instance Buffer")),
                size: u64::from(capacity)
                    * size_of::<MeshInstance>() as u64,
                usage: wgpu::BufferUsages::VERTEX
                    | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        Self {
            vertex_buffer,
            vertex_count: lines.len() as u32,
            instance_buffer,
            capacity,
            count: 0,
        }
    }

    /// Upload this frame's instances (same overflow policy as
    /// [`MeshBatch::write_instances`]).
    pub fn write_instances(
        &mut self,
        queue: &wgpu::Queue,
        instances: &[MeshInstance],
    ) {
        let n = instances.len().min(self.capacity as usize);
        if n < instances.len() {
            log::debug!(
                "line instance overflow: {} > capacity {}",
                instances.len(),
                self.capacity
            );
        }
        self.count = n as u32;
        if n > 0 {
            queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&instances[..n]),
            );
        }
    }
}

/// Pipeline for unlit fogged line lists.
pub struct LineRenderer {
    pipeline: wgpu::RenderPipeline,
}

impl LineRenderer {
    /// Build the line pipeline against the camera/lighting layouts.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/scene_lines.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Line Pipeline Layout"),
                bind_group_layouts: &[camera_layout, lighting_layout],
                push_constant_ranges: &[],
            },
        );

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Line Render Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[line_vertex_layout(), instance_layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[alpha_target(context.format())],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::LineList,
                    ..Default::default()
                },
                depth_stencil: Some(depth_stencil_state(false)),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        Self { pipeline }
    }

    /// Draw a standalone line batch.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        batch: &'a LineBatch,
        camera_bind_group: &'a wgpu::BindGroup,
        lighting_bind_group: &'a wgpu::BindGroup,
    ) {
        if batch.count == 0 || batch.vertex_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, lighting_bind_group, &[]);
        render_pass.set_vertex_buffer(0, batch.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, batch.instance_buffer.slice(..));
        render_pass.draw(0..batch.vertex_count, 0..batch.count);
    }

    /// Draw a mesh batch's wireframe outline. The outline instances were
    /// written from the same model matrices as the solid's, so the two
    /// passes can never drift apart.
    pub fn draw_outline<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        batch: &'a MeshBatch,
        camera_bind_group: &'a wgpu::BindGroup,
        lighting_bind_group: &'a wgpu::BindGroup,
    ) {
        let Some((edge_buffer, edge_count, instance_buffer)) =
            batch.outline()
        else {
            return;
        };
        if batch.instance_count() == 0 || edge_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, lighting_bind_group, &[]);
        render_pass.set_vertex_buffer(0, edge_buffer.slice(..));
        render_pass.set_vertex_buffer(1, instance_buffer.slice(..));
        render_pass.draw(0..edge_count, 0..batch.instance_count());
    }
}
