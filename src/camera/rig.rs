//! Parallax camera rig.
//!
//! Each frame the rig derives a goal pose from the latest input sample —
//! pointer offsets the eye laterally, scroll lowers both eye and look-at
//! target — and moves the eye toward it by a fixed-factor lerp. The lerp
//! factor stays constant, so the eye lags the goal smoothly and never
//! jumps, even when the input changes instantaneously.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::input::InputSample;
use crate::options::CameraOptions;
use crate::render::context::RenderContext;

// ---------------------------------------------------------------------------
// Pure rig state
// ---------------------------------------------------------------------------

/// The rig's pose, separated from GPU resources so the per-frame update
/// can be exercised without a device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigState {
    /// Current eye position.
    pub eye: Vec3,
    /// Current look-at target.
    pub target: Vec3,
}

impl RigState {
    /// Resting pose straight down the -z axis from `distance`.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, options.distance),
            target: Vec3::ZERO,
        }
    }

    /// Goal eye position for the given input sample.
    #[must_use]
    pub fn goal(input: &InputSample, options: &CameraOptions) -> Vec3 {
        Vec3::new(
            input.pointer.x * options.pointer_weight_x,
            -input.pointer.y * options.pointer_weight_y
                - input.scroll * options.scroll_descent,
            options.distance,
        )
    }

    /// Advance one frame: lerp the eye toward the goal, snap the target.
    pub fn advance(&mut self, input: &InputSample, options: &CameraOptions) {
        let goal = Self::goal(input, options);
        self.eye = self.eye.lerp(goal, options.smoothing);
        self.target =
            Vec3::new(0.0, -input.scroll * options.look_at_descent, 0.0);
    }
}

// ---------------------------------------------------------------------------
// GPU-backed rig
// ---------------------------------------------------------------------------

/// Camera rig with its uniform buffer and bind group.
pub struct CameraRig {
    state: RigState,
    camera: Camera,
    uniform: CameraUniform,
    /// Uniform buffer backing [`CameraUniform`].
    pub buffer: wgpu::Buffer,
    /// Bind group layout shared by every scene pipeline.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group bound at group 0 of every scene pipeline.
    pub bind_group: wgpu::BindGroup,
}

impl CameraRig {
    /// Create the rig at its resting pose.
    #[must_use]
    pub fn new(context: &RenderContext, options: &CameraOptions) -> Self {
        let state = RigState::new(options);
        let camera = Camera {
            eye: state.eye,
            target: state.target,
            up: Vec3::Y,
            aspect: context.config.width.max(1) as f32
                / context.config.height.max(1) as f32,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
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

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Camera Bind Group"),
                });

        Self {
            state,
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Advance the rig one frame toward the input-derived goal.
    pub fn advance(&mut self, input: &InputSample, options: &CameraOptions) {
        self.state.advance(input, options);
        self.camera.eye = self.state.eye;
        self.camera.target = self.state.target;
    }

    /// Upload the current pose to the GPU.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[
            self.uniform,
        ]));
    }

    /// Track a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Current pose (read-only).
    #[must_use]
    pub fn state(&self) -> RigState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    fn sample(px: f32, py: f32, scroll: f32) -> InputSample {
        InputSample {
            pointer: Vec2::new(px, py),
            scroll,
        }
    }

    #[test]
    fn goal_matches_parallax_weights() {
        let opts = CameraOptions::default();
        let goal = RigState::goal(&sample(1.0, 1.0, 0.5), &opts);
        assert!((goal.x - 0.6).abs() < 1e-6);
        assert!((goal.y - (-0.4 - 2.0)).abs() < 1e-6);
        assert_eq!(goal.z, 12.0);
    }

    #[test]
    fn eye_converges_monotonically_without_overshoot() {
        let opts = CameraOptions::default();
        let mut state = RigState::new(&opts);
        let input = sample(1.0, -1.0, 1.0);
        let goal = RigState::goal(&input, &opts);

        let mut previous = (state.eye - goal).length();
        for _ in 0..2000 {
            state.advance(&input, &opts);
            let distance = (state.eye - goal).length();
            assert!(
                distance <= previous + 1e-6,
                "distance to goal must not grow"
            );
            previous = distance;
        }
        assert!(previous < 1e-2, "eye should approach the goal");

        // No overshoot: each axis stays between start and goal.
        let mut state = RigState::new(&opts);
        let start = state.eye;
        for _ in 0..2000 {
            state.advance(&input, &opts);
            for axis in 0..3 {
                let (lo, hi) = if start[axis] <= goal[axis] {
                    (start[axis], goal[axis])
                } else {
                    (goal[axis], start[axis])
                };
                assert!(state.eye[axis] >= lo - 1e-6);
                assert!(state.eye[axis] <= hi + 1e-6);
            }
        }
    }

    #[test]
    fn target_tracks_scroll() {
        let opts = CameraOptions::default();
        let mut state = RigState::new(&opts);
        state.advance(&sample(0.0, 0.0, 1.0), &opts);
        assert_eq!(state.target, Vec3::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn instantaneous_input_change_does_not_jump_the_eye() {
        let opts = CameraOptions::default();
        let mut state = RigState::new(&opts);
        for _ in 0..100 {
            state.advance(&sample(1.0, 0.0, 0.0), &opts);
        }
        let before = state.eye;
        // Pointer snaps to the opposite corner; the eye may move at most
        // `smoothing` of the way to the new goal in one frame.
        state.advance(&sample(-1.0, 0.0, 0.0), &opts);
        let step = (state.eye - before).length();
        let span = 2.0 * opts.pointer_weight_x;
        assert!(step <= span * opts.smoothing + 1e-6);
    }
}
