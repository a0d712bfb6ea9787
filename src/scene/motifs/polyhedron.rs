use glam::{EulerRot, Mat4, Vec3};

/// Which convex solid a [`Polyhedron`] shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolyhedronKind {
    /// 8-face solid, flat-shaded.
    Octahedron,
    /// 20-face solid subdivided once toward a sphere.
    Icosahedron,
}

/// A floating solid with a wireframe outline that rotates in lock-step
/// with it (both are drawn from the same instance transform).
#[derive(Debug, Clone)]
pub struct Polyhedron {
    /// Solid variant.
    pub kind: PolyhedronKind,
    /// Fixed world anchor.
    pub anchor: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// Angular speed in radians per second of elapsed time.
    pub speed: f32,
    /// Current rotation (XYZ euler), advanced per frame.
    pub rotation: Vec3,
    /// Current vertical oscillation offset (icosahedra only).
    pub lift: f32,
}

impl Polyhedron {
    /// Place a polyhedron. Speeds must differ between instances of the
    /// same kind so they never rotate in phase.
    #[must_use]
    pub fn new(
        kind: PolyhedronKind,
        anchor: Vec3,
        scale: f32,
        speed: f32,
    ) -> Self {
        Self {
            kind,
            anchor,
            scale,
            speed,
            rotation: Vec3::ZERO,
            lift: 0.0,
        }
    }

    /// Model matrix shared by the solid and its outline.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.anchor + Vec3::Y * self.lift)
            * Mat4::from_euler(
                EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            )
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_shares_the_solid_transform() {
        let mut p = Polyhedron::new(
            PolyhedronKind::Octahedron,
            Vec3::new(-5.0, 3.0, -7.0),
            0.7,
            0.12,
        );
        p.rotation = Vec3::new(0.3, 1.1, 0.0);
        // One matrix feeds both draw calls, so lock-step holds trivially;
        // assert the matrix itself is deterministic for a fixed state.
        assert_eq!(p.model_matrix(), p.model_matrix());
    }

    #[test]
    fn lift_raises_the_anchor() {
        let mut p = Polyhedron::new(
            PolyhedronKind::Icosahedron,
            Vec3::new(1.0, 2.0, 3.0),
            1.0,
            0.1,
        );
        p.lift = 0.3;
        let world = p.model_matrix().transform_point3(Vec3::ZERO);
        assert!((world - Vec3::new(1.0, 2.3, 3.0)).length() < 1e-6);
    }
}
