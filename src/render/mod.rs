//! Rendering subsystems for the animated backdrop.
//!
//! Instanced mesh/line/particle pipelines over a shared camera/lighting
//! bind-group pair, plus the static gradient fallback pass. Geometry
//! buffers are immutable after creation; per-frame uploads touch only
//! instance data and particle positions.

pub mod context;
pub mod fallback;
pub mod geometry;
pub mod lighting;
pub mod lines;
pub mod mesh;
pub mod points;

pub use context::{RenderContext, RenderContextError};
pub use fallback::FallbackRenderer;
pub use lighting::{Light, Lighting, LightingUniform};
pub use lines::{LineBatch, LineRenderer};
pub use mesh::{MeshBatch, MeshInstance, MeshRenderer};
pub use points::{ParticleBatch, ParticleRenderer};

/// Standard depth-stencil state. Solid geometry writes depth; translucent
/// lines and particles only test against it.
pub(crate) fn depth_stencil_state(
    depth_write_enabled: bool,
) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: wgpu::TextureFormat::Depth32Float,
        depth_write_enabled,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Alpha-blended color target for the surface format.
pub(crate) fn alpha_target(
    format: wgpu::TextureFormat,
) -> Option<wgpu::ColorTargetState> {
    Some(wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        write_mask: wgpu::ColorWrites::ALL,
    })
}

/// Additive color target for the particle pass.
pub(crate) fn additive_target(
    format: wgpu::TextureFormat,
) -> Option<wgpu::ColorTargetState> {
    Some(wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        }),
        write_mask: wgpu::ColorWrites::ALL,
    })
}
