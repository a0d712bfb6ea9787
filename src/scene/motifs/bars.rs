use glam::{Mat4, Vec3};
use rand::Rng;

/// Horizontal spacing between bars.
const SPACING: f32 = 1.1;
/// Leftmost bar position.
const X_MIN: f32 = -6.0;
/// Depth band the bars are scattered in.
const Z_MIN: f32 = -12.0;
const Z_SPAN: f32 = 4.0;
/// Max-height band.
const HEIGHT_BASE: f32 = 1.5;
const HEIGHT_SPAN: f32 = 3.5;
/// Phase step between neighboring bars.
const PHASE_STEP: f32 = 0.4;

/// One vertical bar. `height` is recomputed per frame; everything else is
/// fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct Bar {
    /// Group-local x position.
    pub x: f32,
    /// Group-local z position.
    pub z: f32,
    /// Upper bound of the animated height.
    pub max_height: f32,
    /// Indexed phase offset; distinct per bar so the field ripples
    /// instead of pumping in unison.
    pub phase: f32,
    /// Current height, advanced per frame.
    pub height: f32,
}

impl Bar {
    /// Group-local model matrix. The unit bar mesh is centered on its
    /// origin, so the pivot is re-centered to `height / 2` to make the
    /// bar grow from its base.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(self.x, self.height / 2.0, self.z))
            * Mat4::from_scale(Vec3::new(1.0, self.height.max(0.0), 1.0))
    }
}

/// A field of rising bars anchored below the camera line.
#[derive(Debug, Clone)]
pub struct BarField {
    /// World anchor of the field.
    pub anchor: Vec3,
    /// The bars, left to right.
    pub bars: Vec<Bar>,
}

impl BarField {
    /// Scatter `count` bars on a fixed x raster with random depth and
    /// max-height.
    pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Self {
        let bars = (0..count)
            .map(|i| Bar {
                x: X_MIN + i as f32 * SPACING,
                z: Z_MIN + rng.random_range(0.0..Z_SPAN),
                max_height: HEIGHT_BASE
                    + rng.random_range(0.0..HEIGHT_SPAN),
                phase: i as f32 * PHASE_STEP,
                height: 0.0,
            })
            .collect();
        Self {
            anchor: Vec3::new(0.0, -4.0, -6.0),
            bars,
        }
    }

    /// World transform of the whole field.
    #[must_use]
    pub fn group_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.anchor)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn phases_are_pairwise_distinct() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = BarField::generate(12, &mut rng);
        for (i, a) in field.bars.iter().enumerate() {
            for b in &field.bars[i + 1..] {
                assert!((a.phase - b.phase).abs() > 1e-6);
            }
        }
    }

    #[test]
    fn placement_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(2);
        let field = BarField::generate(12, &mut rng);
        assert_eq!(field.bars.len(), 12);
        for bar in &field.bars {
            assert!(bar.z >= Z_MIN && bar.z < Z_MIN + Z_SPAN);
            assert!(bar.max_height >= HEIGHT_BASE);
            assert!(bar.max_height < HEIGHT_BASE + HEIGHT_SPAN);
        }
    }

    #[test]
    fn pivot_recentering_grows_from_the_base() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = BarField::generate(1, &mut rng);
        let bar = &mut field.bars[0];
        bar.height = 2.0;
        let m = bar.model_matrix();
        // Bottom face of the unit bar (y = -0.5) lands on the base plane.
        let bottom = m.transform_point3(Vec3::new(0.0, -0.5, 0.0));
        let top = m.transform_point3(Vec3::new(0.0, 0.5, 0.0));
        assert!(bottom.y.abs() < 1e-6);
        assert!((top.y - 2.0).abs() < 1e-6);
    }
}
