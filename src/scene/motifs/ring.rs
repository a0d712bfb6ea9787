use glam::{Mat4, Vec3};

/// An orbiting torus at a fixed height/depth with a fixed tilt. The sign
/// of `speed` selects the spin direction.
#[derive(Debug, Clone, Copy)]
pub struct Ring {
    /// Major radius of the torus.
    pub radius: f32,
    /// World height of the ring center.
    pub y: f32,
    /// World depth of the ring center.
    pub z: f32,
    /// Signed angular speed in radians per second of elapsed time.
    pub speed: f32,
    /// Fixed tilt around the x axis, in radians.
    pub tilt: f32,
    /// Current spin angle, advanced per frame.
    pub spin: f32,
}

impl Ring {
    /// Place a ring.
    #[must_use]
    pub fn new(radius: f32, y: f32, z: f32, speed: f32, tilt: f32) -> Self {
        Self {
            radius,
            y,
            z,
            speed,
            tilt,
            spin: 0.0,
        }
    }

    /// Model matrix: tilt first, then the animated spin within the
    /// tilted plane. The torus geometry bakes the major radius, so no
    /// scale is applied here.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.y, self.z))
            * Mat4::from_rotation_x(self.tilt)
            * Mat4::from_rotation_z(self.spin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_preserves_the_center() {
        let mut ring = Ring::new(3.0, 1.0, -8.0, 0.04, 1.2);
        ring.spin = 2.5;
        let center = ring.model_matrix().transform_point3(Vec3::ZERO);
        assert!((center - Vec3::new(0.0, 1.0, -8.0)).length() < 1e-6);
    }
}
