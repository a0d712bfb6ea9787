use std::f32::consts::PI;

use glam::{Mat4, Vec3};

/// Strand radius of the helix.
const RADIUS: f32 = 1.8;
/// Vertical span covered by the strands.
const Y_MIN: f32 = -6.0;
const Y_SPAN: f32 = 12.0;
/// Depth of the helix axis in group-local space.
const DEPTH: f32 = -10.0;
/// Total turn parameter across all samples.
const TURNS: f32 = 4.0 * PI;
/// Every n-th sample gets a cross-strand connecting edge.
const LINK_STRIDE: usize = 3;

/// One point marker on a helix strand.
#[derive(Debug, Clone, Copy)]
pub struct HelixNode {
    /// Position in group-local space.
    pub position: Vec3,
    /// Strand index (0 or 1); selects the marker color.
    pub strand: u8,
}

/// Two phase-offset spiral strands with point markers and periodic
/// cross-strand links. Geometry is computed once; only the group yaw
/// animates.
#[derive(Debug, Clone)]
pub struct Helix {
    /// World anchor of the strand group.
    pub anchor: Vec3,
    /// Current group yaw, advanced per frame.
    pub yaw: f32,
    nodes: Vec<HelixNode>,
    links: Vec<[Vec3; 2]>,
}

impl Helix {
    /// Sample `samples` paired points along the two strands (π apart)
    /// and link every [`LINK_STRIDE`]-th pair across.
    #[must_use]
    pub fn generate(samples: usize) -> Self {
        let mut nodes = Vec::with_capacity(samples * 2);
        let mut links = Vec::with_capacity(samples / LINK_STRIDE + 1);
        for i in 0..samples {
            let t = i as f32 / samples as f32 * TURNS;
            let y = Y_MIN + i as f32 / samples as f32 * Y_SPAN;
            let a = Vec3::new(
                t.cos() * RADIUS,
                y,
                DEPTH + t.sin() * RADIUS,
            );
            let b = Vec3::new(
                (t + PI).cos() * RADIUS,
                y,
                DEPTH + (t + PI).sin() * RADIUS,
            );
            nodes.push(HelixNode {
                position: a,
                strand: 0,
            });
            nodes.push(HelixNode {
                position: b,
                strand: 1,
            });
            if i % LINK_STRIDE == 0 {
                links.push([a, b]);
            }
        }
        Self {
            anchor: Vec3::new(7.0, 0.0, 0.0),
            yaw: 0.0,
            nodes,
            links,
        }
    }

    /// Point markers in group-local space.
    #[must_use]
    pub fn nodes(&self) -> &[HelixNode] {
        &self.nodes
    }

    /// Cross-strand links in group-local space.
    #[must_use]
    pub fn links(&self) -> &[[Vec3; 2]] {
        &self.links
    }

    /// Group transform applied to markers and links alike.
    #[must_use]
    pub fn group_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.anchor) * Mat4::from_rotation_y(self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paired_markers_and_strided_links() {
        let helix = Helix::generate(30);
        assert_eq!(helix.nodes().len(), 60);
        // Links at i = 0, 3, ..., 27.
        assert_eq!(helix.links().len(), 10);
    }

    #[test]
    fn strands_are_half_a_turn_apart() {
        let helix = Helix::generate(30);
        for pair in helix.nodes().chunks(2) {
            let a = pair[0].position;
            let b = pair[1].position;
            assert_eq!(pair[0].strand, 0);
            assert_eq!(pair[1].strand, 1);
            assert!((a.y - b.y).abs() < 1e-6);
            // Opposite phase: the two markers mirror through the axis.
            let axis = Vec3::new(0.0, a.y, DEPTH);
            assert!(((a - axis) + (b - axis)).length() < 1e-4);
        }
    }

    #[test]
    fn markers_stay_on_the_strand_radius() {
        let helix = Helix::generate(30);
        for node in helix.nodes() {
            let p = node.position;
            let radial = (Vec3::new(p.x, 0.0, p.z - DEPTH)).length();
            assert!((radial - RADIUS).abs() < 1e-5);
            assert!(p.y >= Y_MIN - 1e-6);
            assert!(p.y <= Y_MIN + Y_SPAN + 1e-6);
        }
    }
}
