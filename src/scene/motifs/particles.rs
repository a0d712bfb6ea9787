use glam::Vec3;
use rand::Rng;

/// Wrap band: particles climb from the floor and respawn there after
/// crossing the ceiling.
pub const CEILING: f32 = 8.0;
/// Lower edge of the wrap band.
pub const FLOOR: f32 = -8.0;

/// Horizontal spawn span (centered on x = 0).
const X_SPAN: f32 = 20.0;
/// Depth spawn span.
const Z_SPAN: f32 = 16.0;
/// Depth spawn center.
const Z_CENTER: f32 = -4.0;
/// Per-frame climb speed band.
const SPEED_BASE: f32 = 0.005;
const SPEED_SPAN: f32 = 0.015;

/// An upward particle stream with lateral sine drift.
///
/// Positions are the only per-frame mutable geometry in the scene; the
/// backing vectors are allocated once and never grow or shrink.
#[derive(Debug, Clone)]
pub struct ParticleCloud {
    pub(crate) positions: Vec<Vec3>,
    pub(crate) velocities: Vec<f32>,
    pub(crate) phases: Vec<f32>,
}

impl ParticleCloud {
    /// Scatter `count` particles inside the spawn volume with sampled
    /// per-particle speed and drift phase.
    pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut velocities = Vec::with_capacity(count);
        let mut phases = Vec::with_capacity(count);
        for _ in 0..count {
            let (x, z) = Self::spawn_lateral(rng);
            positions.push(Vec3::new(
                x,
                rng.random_range(FLOOR..CEILING),
                z,
            ));
            velocities.push(SPEED_BASE + rng.random_range(0.0..SPEED_SPAN));
            phases.push(rng.random_range(0.0..std::f32::consts::TAU));
        }
        Self {
            positions,
            velocities,
            phases,
        }
    }

    /// Fresh lateral placement, used at spawn and at every respawn.
    pub(crate) fn spawn_lateral<R: Rng>(rng: &mut R) -> (f32, f32) {
        (
            rng.random_range(-0.5..0.5) * X_SPAN,
            rng.random_range(-0.5..0.5) * Z_SPAN + Z_CENTER,
        )
    }

    /// Number of particles; invariant for the cloud's lifetime.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// `true` when the cloud holds no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Current particle positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn spawn_volume_respects_the_wrap_band() {
        let mut rng = StdRng::seed_from_u64(11);
        let cloud = ParticleCloud::generate(250, &mut rng);
        assert_eq!(cloud.len(), 250);
        for p in cloud.positions() {
            assert!(p.y >= FLOOR && p.y <= CEILING);
            assert!(p.x >= -X_SPAN / 2.0 && p.x <= X_SPAN / 2.0);
            assert!(p.z >= Z_CENTER - Z_SPAN / 2.0);
            assert!(p.z <= Z_CENTER + Z_SPAN / 2.0);
        }
    }

    #[test]
    fn speeds_and_phases_are_sampled_per_particle() {
        let mut rng = StdRng::seed_from_u64(12);
        let cloud = ParticleCloud::generate(50, &mut rng);
        for v in &cloud.velocities {
            assert!(*v >= SPEED_BASE && *v < SPEED_BASE + SPEED_SPAN);
        }
        // Continuous sampling: expect no exact duplicates in 50 draws.
        let mut phases = cloud.phases.clone();
        phases.sort_by(f32::total_cmp);
        for pair in phases.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn generation_is_deterministic_under_a_fixed_seed() {
        let a = ParticleCloud::generate(80, &mut StdRng::seed_from_u64(9));
        let b = ParticleCloud::generate(80, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.velocities, b.velocities);
        assert_eq!(a.phases, b.phases);
    }
}
