//! The motif population for one mount.
//!
//! A [`Scene`] is built once per mount (and rebuilt when the viewport
//! class changes), owns every motif as a closed tagged-variant set, and
//! is advanced by the stateless per-frame update in [`animate`].

pub mod animate;
pub mod motifs;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::options::SceneOptions;
use crate::viewport::ViewportClass;
use motifs::{
    BarField, FlowCurves, Grid, Helix, NetworkGraph, ParticleCloud,
    Polyhedron, PolyhedronKind, Ring,
};

/// One scene object. A closed set: adding a motif kind means adding a
/// variant here plus its arm in [`animate::advance`] and in the render
/// binding layer.
#[derive(Debug, Clone)]
pub enum Motif {
    /// Floating solid with a lock-step wireframe outline.
    Polyhedron(Polyhedron),
    /// Orbiting torus.
    Ring(Ring),
    /// Twin spiral strands with markers and cross links.
    Helix(Helix),
    /// Field of rising bars.
    Bars(BarField),
    /// Upward particle stream.
    Particles(ParticleCloud),
    /// Proximity node graph.
    Network(NetworkGraph),
    /// Bundle of flowing curves.
    Flows(FlowCurves),
    /// Wireframe backdrop plane.
    Grid(Grid),
}

/// The animated scene population.
pub struct Scene {
    class: ViewportClass,
    objects: Vec<Motif>,
    rng: StdRng,
}

impl Scene {
    /// Build the population for a viewport class.
    ///
    /// Every class gets the grid, the particle stream (budget by class)
    /// and the flow curves. Full viewports add the bar field, the
    /// network, the helix, four polyhedra and two rings; compact
    /// viewports add exactly two polyhedra and omit the heavier motifs
    /// to bound per-frame cost.
    #[must_use]
    pub fn populate(class: ViewportClass, options: &SceneOptions) -> Self {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut objects = vec![
            Motif::Grid(Grid::generate()),
            Motif::Particles(ParticleCloud::generate(
                options.particle_count(class),
                &mut rng,
            )),
            Motif::Flows(FlowCurves::generate(options.flow_curves)),
        ];

        match class {
            ViewportClass::Full => {
                objects.push(Motif::Bars(BarField::generate(
                    options.bar_count,
                    &mut rng,
                )));
                objects.push(Motif::Network(NetworkGraph::generate(
                    options.network_nodes,
                    options.link_threshold,
                    &mut rng,
                )));
                objects.push(Motif::Helix(Helix::generate(
                    options.helix_samples,
                )));
                objects.push(Motif::Polyhedron(Polyhedron::new(
                    PolyhedronKind::Octahedron,
                    Vec3::new(-5.0, 3.0, -7.0),
                    0.7,
                    0.12,
                )));
                objects.push(Motif::Polyhedron(Polyhedron::new(
                    PolyhedronKind::Octahedron,
                    Vec3::new(4.0, -2.0, -9.0),
                    0.5,
                    0.18,
                )));
                objects.push(Motif::Polyhedron(Polyhedron::new(
                    PolyhedronKind::Icosahedron,
                    Vec3::new(-3.0, -1.0, -6.0),
                    0.6,
                    0.10,
                )));
                objects.push(Motif::Polyhedron(Polyhedron::new(
                    PolyhedronKind::Icosahedron,
                    Vec3::new(6.0, 2.0, -11.0),
                    0.8,
                    0.08,
                )));
                objects.push(Motif::Ring(Ring::new(
                    3.0, 1.0, -8.0, 0.04, 1.2,
                )));
                objects.push(Motif::Ring(Ring::new(
                    4.5, -2.0, -12.0, -0.03, 0.8,
                )));
            }
            ViewportClass::Compact => {
                objects.push(Motif::Polyhedron(Polyhedron::new(
                    PolyhedronKind::Octahedron,
                    Vec3::new(-3.0, 2.0, -7.0),
                    0.5,
                    0.10,
                )));
                objects.push(Motif::Polyhedron(Polyhedron::new(
                    PolyhedronKind::Icosahedron,
                    Vec3::new(3.0, -1.0, -8.0),
                    0.5,
                    0.08,
                )));
            }
        }

        Self {
            class,
            objects,
            rng,
        }
    }

    /// The viewport class this population was built for.
    #[must_use]
    pub fn class(&self) -> ViewportClass {
        self.class
    }

    /// The population in draw order.
    #[must_use]
    pub fn objects(&self) -> &[Motif] {
        &self.objects
    }

    /// Number of scene objects.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Split borrow for the animator: objects and the respawn RNG.
    pub(crate) fn parts_mut(&mut self) -> (&mut [Motif], &mut StdRng) {
        (&mut self.objects, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count<F: Fn(&Motif) -> bool>(scene: &Scene, pred: F) -> usize {
        scene.objects().iter().filter(|m| pred(m)).count()
    }

    fn seeded() -> SceneOptions {
        SceneOptions {
            seed: Some(42),
            ..SceneOptions::default()
        }
    }

    #[test]
    fn full_population_has_the_entire_motif_set() {
        let scene = Scene::populate(ViewportClass::Full, &seeded());
        assert_eq!(count(&scene, |m| matches!(m, Motif::Bars(_))), 1);
        assert_eq!(count(&scene, |m| matches!(m, Motif::Network(_))), 1);
        assert_eq!(count(&scene, |m| matches!(m, Motif::Helix(_))), 1);
        assert_eq!(count(&scene, |m| matches!(m, Motif::Ring(_))), 2);
        assert_eq!(
            count(&scene, |m| matches!(m, Motif::Polyhedron(_))),
            4
        );
        assert_eq!(count(&scene, |m| matches!(m, Motif::Grid(_))), 1);
        assert_eq!(count(&scene, |m| matches!(m, Motif::Flows(_))), 1);
        let particles = scene.objects().iter().find_map(|m| match m {
            Motif::Particles(p) => Some(p.len()),
            _ => None,
        });
        assert_eq!(particles, Some(250));
    }

    #[test]
    fn compact_population_is_reduced() {
        let scene = Scene::populate(ViewportClass::Compact, &seeded());
        assert_eq!(count(&scene, |m| matches!(m, Motif::Bars(_))), 0);
        assert_eq!(count(&scene, |m| matches!(m, Motif::Network(_))), 0);
        assert_eq!(count(&scene, |m| matches!(m, Motif::Helix(_))), 0);
        assert_eq!(count(&scene, |m| matches!(m, Motif::Ring(_))), 0);
        assert_eq!(
            count(&scene, |m| matches!(m, Motif::Polyhedron(_))),
            2
        );
        let particles = scene.objects().iter().find_map(|m| match m {
            Motif::Particles(p) => Some(p.len()),
            _ => None,
        });
        assert_eq!(particles, Some(80));
    }

    #[test]
    fn same_kind_polyhedra_never_share_a_speed() {
        for class in [ViewportClass::Full, ViewportClass::Compact] {
            let scene = Scene::populate(class, &seeded());
            let polys: Vec<&Polyhedron> = scene
                .objects()
                .iter()
                .filter_map(|m| match m {
                    Motif::Polyhedron(p) => Some(p),
                    _ => None,
                })
                .collect();
            for (i, a) in polys.iter().enumerate() {
                for b in &polys[i + 1..] {
                    if a.kind == b.kind {
                        assert!((a.speed - b.speed).abs() > 1e-6);
                    }
                }
            }
        }
    }

    #[test]
    fn rings_spin_in_opposite_directions() {
        let scene = Scene::populate(ViewportClass::Full, &seeded());
        let speeds: Vec<f32> = scene
            .objects()
            .iter()
            .filter_map(|m| match m {
                Motif::Ring(r) => Some(r.speed),
                _ => None,
            })
            .collect();
        assert_eq!(speeds.len(), 2);
        assert!(speeds[0] * speeds[1] < 0.0);
    }

    #[test]
    fn seeded_population_is_reproducible() {
        let a = Scene::populate(ViewportClass::Full, &seeded());
        let b = Scene::populate(ViewportClass::Full, &seeded());
        for (ma, mb) in a.objects().iter().zip(b.objects()) {
            match (ma, mb) {
                (Motif::Network(na), Motif::Network(nb)) => {
                    assert_eq!(na.nodes(), nb.nodes());
                    assert_eq!(na.edges(), nb.edges());
                }
                (Motif::Particles(pa), Motif::Particles(pb)) => {
                    assert_eq!(pa.positions(), pb.positions());
                }
                _ => {}
            }
        }
    }
}
