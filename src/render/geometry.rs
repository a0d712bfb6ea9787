//! Unit-geometry builders.
//!
//! Every mesh here is built exactly once per population and uploaded to
//! immutable vertex/index buffers; animation happens purely through
//! per-instance transforms. Wireframe outlines are derived from the same
//! mesh via [`edge_lines`], so a solid and its outline can never drift
//! apart topologically.

use std::collections::HashMap;

use glam::Vec3;

/// Vertex format shared by all solid meshes.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal.
    pub normal: [f32; 3],
}

/// An indexed triangle mesh.
#[derive(Debug, Clone)]
pub struct MeshData {
    /// Vertex list.
    pub vertices: Vec<MeshVertex>,
    /// Triangle indices into `vertices`.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Build a flat-shaded mesh: every face gets its own vertices carrying
/// the face normal.
fn flat_mesh(positions: &[Vec3], indices: &[u32]) -> MeshData {
    let mut vertices = Vec::with_capacity(indices.len());
    for tri in indices.chunks(3) {
        let a = positions[tri[0] as usize];
        let b = positions[tri[1] as usize];
        let c = positions[tri[2] as usize];
        let normal = (b - a).cross(c - a).normalize_or_zero();
        for p in [a, b, c] {
            vertices.push(MeshVertex {
                position: p.to_array(),
                normal: normal.to_array(),
            });
        }
    }
    let indices = (0..vertices.len() as u32).collect();
    MeshData { vertices, indices }
}

/// Unit octahedron (radius 1), flat-shaded. 8 faces.
#[must_use]
pub fn octahedron() -> MeshData {
    let positions = [
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ];
    // CCW winding for outward-facing normals.
    let indices: [u32; 24] = [
        0, 2, 4, 2, 1, 4, 1, 3, 4, 3, 0, 4, //
        2, 0, 5, 1, 2, 5, 3, 1, 5, 0, 3, 5,
    ];
    flat_mesh(&positions, &indices)
}

/// Unit icosphere with the given subdivision level, smooth-shaded.
/// Level 0 = icosahedron (20 triangles, 12 vertices); level 1 = 80
/// triangles, 42 vertices.
#[must_use]
pub fn icosphere(subdivisions: u32) -> MeshData {
    // Golden ratio for icosahedron vertices
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let inv_len = 1.0 / (1.0 + phi * phi).sqrt();

    let mut positions: Vec<Vec3> = vec![
        Vec3::new(-1.0, phi, 0.0) * inv_len,
        Vec3::new(1.0, phi, 0.0) * inv_len,
        Vec3::new(-1.0, -phi, 0.0) * inv_len,
        Vec3::new(1.0, -phi, 0.0) * inv_len,
        Vec3::new(0.0, -1.0, phi) * inv_len,
        Vec3::new(0.0, 1.0, phi) * inv_len,
        Vec3::new(0.0, -1.0, -phi) * inv_len,
        Vec3::new(0.0, 1.0, -phi) * inv_len,
        Vec3::new(phi, 0.0, -1.0) * inv_len,
        Vec3::new(phi, 0.0, 1.0) * inv_len,
        Vec3::new(-phi, 0.0, -1.0) * inv_len,
        Vec3::new(-phi, 0.0, 1.0) * inv_len,
    ];

    #[rustfmt::skip]
    let mut indices: Vec<u32> = vec![
        0, 5, 11,   0, 1, 5,    0, 7, 1,    0, 10, 7,   0, 11, 10,
        1, 9, 5,    5, 4, 11,   11, 2, 10,  10, 6, 7,   7, 8, 1,
        3, 4, 9,    3, 2, 4,    3, 6, 2,    3, 8, 6,    3, 9, 8,
        4, 5, 9,    2, 11, 4,   6, 10, 2,   8, 7, 6,    9, 1, 8,
    ];

    let mut midpoint_cache: HashMap<(u32, u32), u32> = HashMap::new();
    for _ in 0..subdivisions {
        let mut next = Vec::with_capacity(indices.len() * 4);
        for tri in indices.chunks(3) {
            let (v0, v1, v2) = (tri[0], tri[1], tri[2]);
            let a = midpoint(&mut positions, &mut midpoint_cache, v0, v1);
            let b = midpoint(&mut positions, &mut midpoint_cache, v1, v2);
            let c = midpoint(&mut positions, &mut midpoint_cache, v2, v0);
            next.extend_from_slice(&[v0, a, c]);
            next.extend_from_slice(&[v1, b, a]);
            next.extend_from_slice(&[v2, c, b]);
            next.extend_from_slice(&[a, b, c]);
        }
        indices = next;
    }

    // Unit sphere: normal = position.
    let vertices = positions
        .iter()
        .map(|&p| MeshVertex {
            position: p.to_array(),
            normal: p.to_array(),
        })
        .collect();

    MeshData { vertices, indices }
}

/// Get or create the spherified midpoint of an edge.
fn midpoint(
    positions: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    v0: u32,
    v1: u32,
) -> u32 {
    let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
    if let Some(&idx) = cache.get(&key) {
        return idx;
    }
    let mid = ((positions[v0 as usize] + positions[v1 as usize]) * 0.5)
        .normalize();
    let idx = positions.len() as u32;
    positions.push(mid);
    let _ = cache.insert(key, idx);
    idx
}

/// Torus in the XY plane with the given major/minor radii and segment
/// counts, smooth-shaded.
#[must_use]
pub fn torus(
    major: f32,
    minor: f32,
    radial_segments: u32,
    tubular_segments: u32,
) -> MeshData {
    let mut vertices = Vec::with_capacity(
        ((radial_segments + 1) * (tubular_segments + 1)) as usize,
    );
    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * std::f32::consts::TAU;
        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * std::f32::consts::TAU;
            let normal = Vec3::new(
                v.cos() * u.cos(),
                v.cos() * u.sin(),
                v.sin(),
            );
            let center = Vec3::new(u.cos(), u.sin(), 0.0) * major;
            vertices.push(MeshVertex {
                position: (center + normal * minor).to_array(),
                normal: normal.to_array(),
            });
        }
    }

    let ring = radial_segments + 1;
    let mut indices =
        Vec::with_capacity((tubular_segments * radial_segments * 6) as usize);
    for i in 0..tubular_segments {
        for j in 0..radial_segments {
            let a = i * ring + j;
            let b = (i + 1) * ring + j;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }

    MeshData { vertices, indices }
}

/// Axis-aligned box centered on the origin, flat-shaded.
#[must_use]
pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
    let positions = [
        Vec3::new(-x, -y, -z),
        Vec3::new(x, -y, -z),
        Vec3::new(x, y, -z),
        Vec3::new(-x, y, -z),
        Vec3::new(-x, -y, z),
        Vec3::new(x, -y, z),
        Vec3::new(x, y, z),
        Vec3::new(-x, y, z),
    ];
    // CCW from outside per face.
    let indices: [u32; 36] = [
        4, 5, 6, 4, 6, 7, // +z
        1, 0, 3, 1, 3, 2, // -z
        5, 1, 2, 5, 2, 6, // +x
        0, 4, 7, 0, 7, 3, // -x
        7, 6, 2, 7, 2, 3, // +y
        0, 1, 5, 0, 5, 4, // -y
    ];
    flat_mesh(&positions, &indices)
}

/// Quantize a position for edge-identity comparisons across duplicated
/// flat-shading vertices.
fn quantize(p: [f32; 3]) -> (i64, i64, i64) {
    let q = |v: f32| (v * 1.0e4).round() as i64;
    (q(p[0]), q(p[1]), q(p[2]))
}

/// Extract the wireframe outline of a mesh: every unique edge whose
/// adjacent faces meet at more than `threshold_deg`, plus boundary
/// edges. Returns a line list (pairs of points).
#[must_use]
pub fn edge_lines(mesh: &MeshData, threshold_deg: f32) -> Vec<Vec3> {
    type Key = ((i64, i64, i64), (i64, i64, i64));

    let cos_threshold = threshold_deg.to_radians().cos();
    let mut edges: HashMap<Key, (Vec3, Vec3, Vec<Vec3>)> = HashMap::new();

    for tri in mesh.indices.chunks(3) {
        let a = Vec3::from(mesh.vertices[tri[0] as usize].position);
        let b = Vec3::from(mesh.vertices[tri[1] as usize].position);
        let c = Vec3::from(mesh.vertices[tri[2] as usize].position);
        let normal = (b - a).cross(c - a).normalize_or_zero();
        for (p, q) in [(a, b), (b, c), (c, a)] {
            let (kp, kq) = (quantize(p.to_array()), quantize(q.to_array()));
            let key = if kp < kq { (kp, kq) } else { (kq, kp) };
            edges
                .entry(key)
                .or_insert_with(|| (p, q, Vec::new()))
                .2
                .push(normal);
        }
    }

    let mut lines = Vec::new();
    let mut keys: Vec<Key> = edges.keys().copied().collect();
    // Deterministic output order regardless of hash iteration.
    keys.sort_unstable();
    for key in keys {
        let (p, q, normals) = &edges[&key];
        let crease = normals.len() < 2
            || normals.iter().enumerate().any(|(i, n0)| {
                normals[i + 1..].iter().any(|n1| n0.dot(*n1) < cos_threshold)
            });
        if crease {
            lines.push(*p);
            lines.push(*q);
        }
    }
    lines
}

/// Wireframe lines of a subdivided square plane in the XY plane,
/// centered on the origin. Returns a line list (pairs of points).
#[must_use]
pub fn grid_lines(extent: f32, divisions: u32) -> Vec<Vec3> {
    let half = extent / 2.0;
    let step = extent / divisions as f32;
    let mut lines = Vec::with_capacity(((divisions + 1) * 4) as usize);
    for i in 0..=divisions {
        let offset = -half + i as f32 * step;
        lines.push(Vec3::new(offset, -half, 0.0));
        lines.push(Vec3::new(offset, half, 0.0));
        lines.push(Vec3::new(-half, offset, 0.0));
        lines.push(Vec3::new(half, offset, 0.0));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octahedron_is_eight_flat_faces() {
        let mesh = octahedron();
        assert_eq!(mesh.triangle_count(), 8);
        assert_eq!(mesh.vertices.len(), 24);
        // Outward normals: every face normal points away from the origin.
        for tri in mesh.indices.chunks(3) {
            let v = mesh.vertices[tri[0] as usize];
            let centroid: Vec3 = tri
                .iter()
                .map(|&i| Vec3::from(mesh.vertices[i as usize].position))
                .sum::<Vec3>()
                / 3.0;
            assert!(centroid.dot(Vec3::from(v.normal)) > 0.0);
        }
    }

    #[test]
    fn octahedron_outline_has_twelve_edges() {
        let lines = edge_lines(&octahedron(), 1.0);
        assert_eq!(lines.len(), 24);
    }

    #[test]
    fn icosphere_counts_match_subdivision() {
        let base = icosphere(0);
        assert_eq!(base.vertices.len(), 12);
        assert_eq!(base.triangle_count(), 20);
        let level1 = icosphere(1);
        assert_eq!(level1.vertices.len(), 42);
        assert_eq!(level1.triangle_count(), 80);
    }

    #[test]
    fn icosphere_vertices_lie_on_the_unit_sphere() {
        for v in icosphere(2).vertices {
            let len = Vec3::from(v.position).length();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn icosphere_outline_includes_every_edge() {
        // Spherified neighbors are never coplanar, so E = 3F/2.
        let lines = edge_lines(&icosphere(1), 1.0);
        assert_eq!(lines.len(), 120 * 2);
    }

    #[test]
    fn cuboid_outline_skips_coplanar_diagonals() {
        let lines = edge_lines(&cuboid(0.4, 1.0, 0.4), 1.0);
        assert_eq!(lines.len(), 12 * 2);
    }

    #[test]
    fn torus_counts_match_segments() {
        let mesh = torus(3.0, 0.02, 8, 80);
        assert_eq!(mesh.vertices.len(), 9 * 81);
        assert_eq!(mesh.triangle_count(), 8 * 80 * 2);
        // Every vertex sits `minor` away from the major circle.
        for v in &mesh.vertices {
            let p = Vec3::from(v.position);
            let ring = Vec3::new(p.x, p.y, 0.0).normalize_or_zero() * 3.0;
            assert!(((p - ring).length() - 0.02).abs() < 1e-4);
        }
    }

    #[test]
    fn grid_lines_cover_both_directions() {
        let lines = grid_lines(40.0, 40);
        // 41 vertical + 41 horizontal segments, two points each.
        assert_eq!(lines.len(), 41 * 2 * 2);
        for p in &lines {
            assert!(p.x.abs() <= 20.0 + 1e-5);
            assert!(p.y.abs() <= 20.0 + 1e-5);
            assert_eq!(p.z, 0.0);
        }
    }
}
