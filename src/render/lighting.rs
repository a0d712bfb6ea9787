//! Fixed light rig: flat ambient, three warm point lights and one
//! overhead spot, plus the linear fog band. Positions, colors and ranges
//! are constants of the rig; intensities and the fog band come from
//! [`LightingOptions`].

use wgpu::util::DeviceExt;

use crate::options::{ColorOptions, LightingOptions};
use crate::render::context::RenderContext;

/// One light slot in the rig uniform.
/// NOTE: Must match the WGSL `Light` struct layout exactly (64 bytes):
///
/// ```text
///   position: vec3<f32>   (offset 0,  align 16)
///   intensity: f32        (offset 12)
///   color: vec3<f32>      (offset 16)
///   range: f32            (offset 28)
///   direction: vec3<f32>  (offset 32)
///   cone_cos: f32         (offset 44)   <= -1 marks an omni light
///   penumbra: f32         (offset 48)
///   pad0..pad2: f32       (offset 52, 56, 60)
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Light {
    /// World-space position.
    pub position: [f32; 3],
    /// Scalar intensity.
    pub intensity: f32,
    /// Light color.
    pub color: [f32; 3],
    /// Cutoff distance; contribution is zero beyond it.
    pub range: f32,
    /// Spot axis (normalized). Ignored for omni lights.
    pub direction: [f32; 3],
    /// Cosine of the spot half-angle; `<= -1` disables the cone.
    pub cone_cos: f32,
    /// Fraction of the cone softened from the edge inward.
    pub penumbra: f32,
    pub(crate) _pad: [f32; 3],
}

impl Light {
    /// An omni point light.
    fn point(
        position: [f32; 3],
        color: [f32; 3],
        intensity: f32,
        range: f32,
    ) -> Self {
        Self {
            position,
            intensity,
            color,
            range,
            direction: [0.0, -1.0, 0.0],
            cone_cos: -2.0,
            penumbra: 0.0,
            _pad: [0.0; 3],
        }
    }

    /// A cone-attenuated spot light aimed at the origin.
    fn spot(
        position: [f32; 3],
        color: [f32; 3],
        intensity: f32,
        range: f32,
        half_angle: f32,
        penumbra: f32,
    ) -> Self {
        let p = glam::Vec3::from(position);
        let direction = (-p).normalize_or_zero().to_array();
        Self {
            position,
            intensity,
            color,
            range,
            direction,
            cone_cos: half_angle.cos(),
            penumbra,
            _pad: [0.0; 3],
        }
    }
}

/// Rig uniform shared by the mesh and line shaders.
/// NOTE: Must match the WGSL `SceneLighting` layout (288 bytes):
/// a 16-byte header (ambient, fog_start, fog_end, pad), a padded
/// background vec3, then `array<Light, 4>`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Flat ambient term.
    pub ambient: f32,
    /// View distance at which fog starts.
    pub fog_start: f32,
    /// View distance at which fog fully obscures.
    pub fog_end: f32,
    pub(crate) _pad0: f32,
    /// Fog/background color.
    pub background: [f32; 3],
    pub(crate) _pad1: f32,
    /// The four rig lights.
    pub lights: [Light; 4],
}

impl LightingUniform {
    /// Build the rig from options: key, fill and under point lights plus
    /// the overhead spot, all in the scene's warm palette.
    #[must_use]
    pub fn new(options: &LightingOptions, colors: &ColorOptions) -> Self {
        Self {
            ambient: options.ambient,
            fog_start: options.fog_start,
            fog_end: options.fog_end,
            _pad0: 0.0,
            background: colors.background,
            _pad1: 0.0,
            lights: [
                Light::point(
                    [6.0, 6.0, 4.0],
                    colors.accent,
                    options.key_intensity,
                    25.0,
                ),
                Light::point(
                    [-6.0, 3.0, -6.0],
                    colors.accent_dim,
                    options.fill_intensity,
                    20.0,
                ),
                Light::point(
                    [0.0, -4.0, -8.0],
                    colors.accent,
                    options.under_intensity,
                    15.0,
                ),
                Light::spot(
                    [0.0, 12.0, 2.0],
                    colors.accent,
                    options.spot_intensity,
                    30.0,
                    0.4,
                    1.0,
                ),
            ],
        }
    }
}

/// GPU plumbing for the rig: uniform, buffer, layout and bind group
/// (bound at group 1 of the mesh and line pipelines).
pub struct Lighting {
    /// Current uniform contents.
    pub uniform: LightingUniform,
    /// Backing uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group.
    pub bind_group: wgpu::BindGroup,
}

impl Lighting {
    /// Create and upload the rig.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        options: &LightingOptions,
        colors: &ColorOptions,
    ) -> Self {
        let uniform = LightingUniform::new(options, colors);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Lighting Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Lighting Bind Group"),
                });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_gpu_sized() {
        assert_eq!(size_of::<Light>(), 64);
        assert_eq!(size_of::<LightingUniform>(), 32 + 4 * 64);
    }

    #[test]
    fn rig_has_three_omnis_and_one_spot() {
        let uniform = LightingUniform::new(
            &LightingOptions::default(),
            &ColorOptions::default(),
        );
        let omnis = uniform
            .lights
            .iter()
            .filter(|l| l.cone_cos <= -1.0)
            .count();
        assert_eq!(omnis, 3);
        let spot = uniform.lights[3];
        assert!((spot.cone_cos - 0.4_f32.cos()).abs() < 1e-6);
        // Spot aims from above toward the origin.
        assert!(spot.direction[1] < 0.0);
    }
}
