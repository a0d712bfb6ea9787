use glam::{Mat4, Vec3};
use rand::Rng;

/// Scatter volume for network nodes.
const X_SPAN: f32 = 14.0;
const Y_SPAN: f32 = 10.0;
const Z_MIN: f32 = -14.0;
const Z_SPAN: f32 = 8.0;

/// A proximity graph: nodes scattered in a volume, linked whenever their
/// pairwise distance is below a threshold.
///
/// The O(N²) pass runs once at construction; N is small and fixed. Only
/// the group yaw animates afterwards.
#[derive(Debug, Clone)]
pub struct NetworkGraph {
    /// Current group yaw, advanced per frame.
    pub yaw: f32,
    nodes: Vec<Vec3>,
    edges: Vec<(usize, usize)>,
}

impl NetworkGraph {
    /// Scatter `count` nodes and link every pair closer than `threshold`.
    pub fn generate<R: Rng>(
        count: usize,
        threshold: f32,
        rng: &mut R,
    ) -> Self {
        let nodes: Vec<Vec3> = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-0.5..0.5) * X_SPAN,
                    rng.random_range(-0.5..0.5) * Y_SPAN,
                    Z_MIN + rng.random_range(0.0..Z_SPAN),
                )
            })
            .collect();

        let mut edges = Vec::new();
        for i in 0..nodes.len() {
            for j in i + 1..nodes.len() {
                if nodes[i].distance(nodes[j]) < threshold {
                    edges.push((i, j));
                }
            }
        }

        Self {
            yaw: 0.0,
            nodes,
            edges,
        }
    }

    /// Node positions in group-local space.
    #[must_use]
    pub fn nodes(&self) -> &[Vec3] {
        &self.nodes
    }

    /// Undirected edges as `(i, j)` with `i < j`.
    #[must_use]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Group transform applied to nodes and edges alike.
    #[must_use]
    pub fn group_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn edges_are_exactly_the_close_pairs() {
        let mut rng = StdRng::seed_from_u64(21);
        let graph = NetworkGraph::generate(14, 6.0, &mut rng);
        let nodes = graph.nodes();
        for i in 0..nodes.len() {
            for j in i + 1..nodes.len() {
                let close = nodes[i].distance(nodes[j]) < 6.0;
                let linked = graph.edges().contains(&(i, j));
                assert_eq!(close, linked, "pair ({i}, {j})");
            }
        }
    }

    #[test]
    fn edge_set_is_symmetric_by_construction() {
        let mut rng = StdRng::seed_from_u64(22);
        let graph = NetworkGraph::generate(14, 6.0, &mut rng);
        for &(i, j) in graph.edges() {
            assert!(i < j);
            // The reversed pair is the same undirected edge; it must not
            // appear as a second entry.
            assert!(!graph.edges().contains(&(j, i)));
        }
    }

    #[test]
    fn generation_is_deterministic_under_a_fixed_seed() {
        let a = NetworkGraph::generate(14, 6.0, &mut StdRng::seed_from_u64(5));
        let b = NetworkGraph::generate(14, 6.0, &mut StdRng::seed_from_u64(5));
        assert_eq!(a.nodes, b.nodes);
        assert_eq!(a.edges, b.edges);
    }

    #[test]
    fn nodes_stay_in_the_scatter_volume() {
        let mut rng = StdRng::seed_from_u64(23);
        let graph = NetworkGraph::generate(14, 6.0, &mut rng);
        for n in graph.nodes() {
            assert!(n.x.abs() <= X_SPAN / 2.0);
            assert!(n.y.abs() <= Y_SPAN / 2.0);
            assert!(n.z >= Z_MIN && n.z <= Z_MIN + Z_SPAN);
        }
    }
}
