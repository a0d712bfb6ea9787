use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection and parallax parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Resting distance of the eye from the origin along +z.
    pub distance: f32,
    /// Horizontal parallax weight applied to the pointer sample.
    pub pointer_weight_x: f32,
    /// Vertical parallax weight applied to the pointer sample.
    pub pointer_weight_y: f32,
    /// Eye descent, in world units, over the full scroll range.
    pub scroll_descent: f32,
    /// Look-at descent, in world units, over the full scroll range.
    pub look_at_descent: f32,
    /// Per-frame lerp factor toward the parallax goal. Kept well below 1
    /// so the eye converges monotonically and never overshoots.
    pub smoothing: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 50.0,
            znear: 0.1,
            zfar: 100.0,
            distance: 12.0,
            pointer_weight_x: 0.6,
            pointer_weight_y: 0.4,
            scroll_descent: 4.0,
            look_at_descent: 2.0,
            smoothing: 0.03,
        }
    }
}
