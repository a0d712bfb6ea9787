use std::f32::consts::PI;

use glam::{Mat4, Vec3};

/// Side length of the square backdrop grid.
pub const EXTENT: f32 = 40.0;
/// Subdivisions per side.
pub const DIVISIONS: u32 = 40;
/// Resting tilt of the grid plane.
pub const BASE_TILT: f32 = -PI / 3.0;

/// The wireframe backdrop plane. Geometry is a fixed subdivided plane;
/// only a subliminal tilt sway animates.
#[derive(Debug, Clone, Copy)]
pub struct Grid {
    /// Current tilt around x, advanced per frame.
    pub tilt: f32,
}

impl Grid {
    /// Grid at its resting tilt.
    #[must_use]
    pub fn generate() -> Self {
        Self { tilt: BASE_TILT }
    }

    /// World transform of the plane.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, -5.0, -10.0))
            * Mat4::from_rotation_x(self.tilt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_tilt_is_the_base_tilt() {
        assert_eq!(Grid::generate().tilt, BASE_TILT);
    }
}
