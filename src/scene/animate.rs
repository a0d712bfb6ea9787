//! Stateless per-frame scene update.
//!
//! [`advance`] is invoked once per rendered frame with the elapsed time
//! in seconds (monotonic). It mutates only transform/opacity fields and
//! the particle position array; geometry is never touched. Particle
//! climb is a per-frame step; every other motion is a direct function
//! of `t`.

use rand::rngs::StdRng;

use crate::scene::motifs::{
    Bar, BarField, FlowCurves, Grid, NetworkGraph, ParticleCloud,
    Polyhedron, PolyhedronKind, CEILING, FLOOR, GRID_BASE_TILT,
};
use crate::scene::{Motif, Scene};

/// Secondary rotation rate of octahedra relative to their primary spin.
const OCTA_PITCH_RATIO: f32 = 0.6;
/// Icosahedron sway: tilt frequency/amplitude and bob frequency/amplitude.
const ICOSA_TILT_RATE: f32 = 0.3;
const ICOSA_TILT_AMPLITUDE: f32 = 0.15;
const ICOSA_BOB_RATE: f32 = 0.4;
const ICOSA_BOB_AMPLITUDE: f32 = 0.3;
/// Helix group yaw rate.
const HELIX_YAW_RATE: f32 = 0.06;
/// Bar pulse frequency and resting fraction of the max height.
const BAR_PULSE_RATE: f32 = 0.3;
const BAR_REST_FRACTION: f32 = 0.4;
/// Network group sway frequency/amplitude.
const NETWORK_SWAY_RATE: f32 = 0.05;
const NETWORK_SWAY_AMPLITUDE: f32 = 0.08;
/// Flow curve opacity base, swing and frequency.
const FLOW_OPACITY_BASE: f32 = 0.08;
const FLOW_OPACITY_SWING: f32 = 0.08;
const FLOW_PULSE_RATE: f32 = 0.4;
/// Grid sway frequency/amplitude around its base tilt.
const GRID_SWAY_RATE: f32 = 0.05;
const GRID_SWAY_AMPLITUDE: f32 = 0.02;
/// Particle lateral drift frequencies/amplitudes (per frame).
const DRIFT_X_RATE: f32 = 0.5;
const DRIFT_X_STEP: f32 = 0.003;
const DRIFT_Z_RATE: f32 = 0.3;
const DRIFT_Z_STEP: f32 = 0.002;

/// Advance every scene object to elapsed time `t` (seconds).
pub fn advance(scene: &mut Scene, t: f32) {
    let (objects, rng) = scene.parts_mut();
    for object in objects {
        match object {
            Motif::Polyhedron(p) => update_polyhedron(p, t),
            Motif::Ring(r) => r.spin = t * r.speed,
            Motif::Helix(h) => h.yaw = t * HELIX_YAW_RATE,
            Motif::Bars(field) => update_bars(field, t),
            Motif::Particles(cloud) => update_particles(cloud, t, rng),
            Motif::Network(graph) => update_network(graph, t),
            Motif::Flows(flows) => update_flows(flows, t),
            Motif::Grid(grid) => update_grid(grid, t),
        }
    }
}

fn update_polyhedron(p: &mut Polyhedron, t: f32) {
    match p.kind {
        PolyhedronKind::Octahedron => {
            p.rotation.y = t * p.speed;
            p.rotation.x = t * p.speed * OCTA_PITCH_RATIO;
        }
        PolyhedronKind::Icosahedron => {
            p.rotation.y = t * p.speed;
            p.rotation.z = (t * ICOSA_TILT_RATE).sin() * ICOSA_TILT_AMPLITUDE;
            p.lift = (t * ICOSA_BOB_RATE).sin() * ICOSA_BOB_AMPLITUDE;
        }
    }
}

fn update_bars(field: &mut BarField, t: f32) {
    for bar in &mut field.bars {
        bar.height = bar_height(bar, t);
    }
}

/// Height of a bar at time `t`: oscillates between the resting fraction
/// and the full max height.
fn bar_height(bar: &Bar, t: f32) -> f32 {
    bar.max_height
        * (BAR_REST_FRACTION
            + (1.0 - BAR_REST_FRACTION)
                * (t * BAR_PULSE_RATE + bar.phase).sin().abs())
}

fn update_particles(cloud: &mut ParticleCloud, t: f32, rng: &mut StdRng) {
    for i in 0..cloud.positions.len() {
        let phase = cloud.phases[i];
        let p = &mut cloud.positions[i];
        p.y += cloud.velocities[i];
        p.x += (t * DRIFT_X_RATE + phase).sin() * DRIFT_X_STEP;
        p.z += (t * DRIFT_Z_RATE + phase).cos() * DRIFT_Z_STEP;
        if p.y > CEILING {
            // Wrap-and-respawn: back to the floor at a fresh lateral
            // position. The cloud's length never changes.
            let (x, z) = ParticleCloud::spawn_lateral(rng);
            *p = glam::Vec3::new(x, FLOOR, z);
        }
    }
}

fn update_network(graph: &mut NetworkGraph, t: f32) {
    graph.yaw = (t * NETWORK_SWAY_RATE).sin() * NETWORK_SWAY_AMPLITUDE;
}

fn update_flows(flows: &mut FlowCurves, t: f32) {
    for curve in &mut flows.curves {
        curve.opacity = FLOW_OPACITY_BASE
            + FLOW_OPACITY_SWING * (t * FLOW_PULSE_RATE + curve.phase).sin();
    }
}

fn update_grid(grid: &mut Grid, t: f32) {
    grid.tilt =
        GRID_BASE_TILT + (t * GRID_SWAY_RATE).sin() * GRID_SWAY_AMPLITUDE;
}

#[cfg(test)]
mod tests {
    use crate::options::SceneOptions;
    use crate::viewport::ViewportClass;

    use super::*;

    fn seeded_scene(class: ViewportClass) -> Scene {
        let options = SceneOptions {
            seed: Some(1234),
            ..SceneOptions::default()
        };
        Scene::populate(class, &options)
    }

    fn particle_snapshot(scene: &Scene) -> (usize, Vec<glam::Vec3>) {
        let cloud = scene
            .objects()
            .iter()
            .find_map(|m| match m {
                Motif::Particles(p) => Some(p),
                _ => None,
            })
            .unwrap();
        (cloud.len(), cloud.positions().to_vec())
    }

    #[test]
    fn particles_stay_in_the_wrap_band_forever() {
        let mut scene = seeded_scene(ViewportClass::Full);
        let (initial_count, _) = particle_snapshot(&scene);
        for frame in 0..5000 {
            advance(&mut scene, frame as f32 / 60.0);
        }
        let (count, positions) = particle_snapshot(&scene);
        assert_eq!(count, initial_count, "particle count must not change");
        for p in positions {
            assert!(p.y >= FLOOR && p.y <= CEILING, "y out of band: {p}");
        }
    }

    #[test]
    fn particles_climb_between_wraps() {
        let mut scene = seeded_scene(ViewportClass::Compact);
        let (_, before) = particle_snapshot(&scene);
        advance(&mut scene, 0.0);
        let (_, after) = particle_snapshot(&scene);
        for (a, b) in before.iter().zip(&after) {
            // Either the particle climbed or it wrapped to the floor.
            assert!(b.y > a.y || (b.y - FLOOR).abs() < 1e-6);
        }
    }

    #[test]
    fn bar_heights_pulse_within_their_band() {
        let mut scene = seeded_scene(ViewportClass::Full);
        for frame in 0..600 {
            let t = frame as f32 / 60.0;
            advance(&mut scene, t);
            for object in scene.objects() {
                if let Motif::Bars(field) = object {
                    for bar in &field.bars {
                        assert!(bar.height >= bar.max_height * 0.4 - 1e-5);
                        assert!(bar.height <= bar.max_height + 1e-5);
                    }
                }
            }
        }
    }

    #[test]
    fn flow_opacity_oscillates_in_range() {
        let mut scene = seeded_scene(ViewportClass::Full);
        for frame in 0..600 {
            advance(&mut scene, frame as f32 / 30.0);
            for object in scene.objects() {
                if let Motif::Flows(flows) = object {
                    for curve in &flows.curves {
                        assert!(curve.opacity >= 0.0 - 1e-6);
                        assert!(curve.opacity <= 0.16 + 1e-6);
                    }
                }
            }
        }
    }

    #[test]
    fn time_driven_transforms_are_functions_of_t() {
        // Re-running advance at the same t must land on the same
        // transforms for every non-particle motif.
        let mut a = seeded_scene(ViewportClass::Full);
        let mut b = seeded_scene(ViewportClass::Full);
        advance(&mut a, 3.7);
        for t in [0.5, 1.9, 3.7] {
            advance(&mut b, t);
        }
        for (ma, mb) in a.objects().iter().zip(b.objects()) {
            match (ma, mb) {
                (Motif::Polyhedron(pa), Motif::Polyhedron(pb)) => {
                    assert_eq!(pa.rotation, pb.rotation);
                    assert_eq!(pa.lift, pb.lift);
                }
                (Motif::Ring(ra), Motif::Ring(rb)) => {
                    assert_eq!(ra.spin, rb.spin);
                }
                (Motif::Helix(ha), Motif::Helix(hb)) => {
                    assert_eq!(ha.yaw, hb.yaw);
                }
                (Motif::Grid(ga), Motif::Grid(gb)) => {
                    assert_eq!(ga.tilt, gb.tilt);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn geometry_is_never_reallocated_by_advance() {
        let mut scene = seeded_scene(ViewportClass::Full);
        let fingerprint = |scene: &Scene| {
            scene
                .objects()
                .iter()
                .map(|m| match m {
                    Motif::Helix(h) => (h.nodes().len(), h.links().len()),
                    Motif::Network(n) => (n.nodes().len(), n.edges().len()),
                    Motif::Flows(f) => (
                        f.curves.len(),
                        f.curves.iter().map(|c| c.points.len()).sum(),
                    ),
                    Motif::Particles(p) => (p.len(), 0),
                    Motif::Bars(b) => (b.bars.len(), 0),
                    _ => (0, 0),
                })
                .collect::<Vec<_>>()
        };
        let before = fingerprint(&scene);
        for frame in 0..1000 {
            advance(&mut scene, frame as f32 / 60.0);
        }
        assert_eq!(fingerprint(&scene), before);
    }
}
