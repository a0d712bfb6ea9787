use std::f32::consts::TAU;

use glam::Vec3;

/// Waypoints sampled per curve before smoothing.
const WAYPOINTS: usize = 21;
/// Points per curve after spline resampling.
const RESAMPLED: usize = 60;
/// Horizontal span of every curve.
const X_MIN: f32 = -10.0;
const X_SPAN: f32 = 20.0;
/// Vertical wave amplitude.
const AMPLITUDE: f32 = 1.2;
/// Vertical offset between consecutive curves.
const Y_STEP: f32 = 1.8;
const Y_BASE: f32 = -3.0;
/// Depth offset between consecutive curves.
const Z_BASE: f32 = -8.0;
const Z_STEP: f32 = -0.8;
/// Opacity phase step between consecutive curves.
const PHASE_STEP: f32 = 0.8;

/// One smooth horizontal curve. Geometry is static; only `opacity`
/// animates.
#[derive(Debug, Clone)]
pub struct FlowCurve {
    /// Resampled polyline points.
    pub points: Vec<Vec3>,
    /// Indexed opacity phase, distinct per curve.
    pub phase: f32,
    /// Current opacity, advanced per frame.
    pub opacity: f32,
}

/// A bundle of flowing curves, vertically stacked and phase-shifted.
#[derive(Debug, Clone)]
pub struct FlowCurves {
    /// The curves, bottom to top.
    pub curves: Vec<FlowCurve>,
}

impl FlowCurves {
    /// Build `count` curves from sinusoidal waypoints resampled through a
    /// Catmull-Rom-tangent Hermite spline.
    #[must_use]
    pub fn generate(count: usize) -> Self {
        let curves = (0..count)
            .map(|i| {
                let fi = i as f32;
                let y_base = Y_BASE + fi * Y_STEP;
                let z = Z_BASE + fi * Z_STEP;
                let waypoints: Vec<Vec3> = (0..WAYPOINTS)
                    .map(|w| {
                        let t = w as f32 / (WAYPOINTS - 1) as f32;
                        Vec3::new(
                            X_MIN + t * X_SPAN,
                            y_base + (t * TAU + fi).sin() * AMPLITUDE,
                            z,
                        )
                    })
                    .collect();
                FlowCurve {
                    points: resample(&waypoints, RESAMPLED),
                    phase: fi * PHASE_STEP,
                    opacity: 0.08,
                }
            })
            .collect();
        Self { curves }
    }
}

/// Resample a polyline through cubic Hermite segments with
/// Catmull-Rom-style tangents (half the neighbor chord, one-sided at the
/// ends).
fn resample(waypoints: &[Vec3], samples: usize) -> Vec<Vec3> {
    let n = waypoints.len();
    if n < 2 || samples < 2 {
        return waypoints.to_vec();
    }

    let tangents: Vec<Vec3> = (0..n)
        .map(|i| {
            if i == 0 {
                waypoints[1] - waypoints[0]
            } else if i == n - 1 {
                waypoints[n - 1] - waypoints[n - 2]
            } else {
                (waypoints[i + 1] - waypoints[i - 1]) * 0.5
            }
        })
        .collect();

    (0..samples)
        .map(|s| {
            let u = s as f32 / (samples - 1) as f32 * (n - 1) as f32;
            let seg = (u.floor() as usize).min(n - 2);
            let t = u - seg as f32;
            hermite_point(
                waypoints[seg],
                tangents[seg],
                waypoints[seg + 1],
                tangents[seg + 1],
                t,
            )
        })
        .collect()
}

/// Cubic Hermite basis evaluation.
fn hermite_point(p0: Vec3, m0: Vec3, p1: Vec3, m1: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    p0 * (2.0 * t3 - 3.0 * t2 + 1.0)
        + m0 * (t3 - 2.0 * t2 + t)
        + p1 * (-2.0 * t3 + 3.0 * t2)
        + m1 * (t3 - t2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_has_stacked_phase_shifted_curves() {
        let flows = FlowCurves::generate(6);
        assert_eq!(flows.curves.len(), 6);
        for (i, curve) in flows.curves.iter().enumerate() {
            assert_eq!(curve.points.len(), RESAMPLED);
            assert!((curve.phase - i as f32 * PHASE_STEP).abs() < 1e-6);
        }
        // Pairwise distinct phases (desync requirement).
        for (i, a) in flows.curves.iter().enumerate() {
            for b in &flows.curves[i + 1..] {
                assert!((a.phase - b.phase).abs() > 1e-6);
            }
        }
    }

    #[test]
    fn resampling_interpolates_the_endpoints() {
        let flows = FlowCurves::generate(1);
        let points = &flows.curves[0].points;
        let first = points[0];
        let last = points[points.len() - 1];
        assert!((first.x - X_MIN).abs() < 1e-4);
        assert!((last.x - (X_MIN + X_SPAN)).abs() < 1e-4);
    }

    #[test]
    fn curves_stay_within_the_wave_band() {
        let flows = FlowCurves::generate(6);
        for (i, curve) in flows.curves.iter().enumerate() {
            let y_base = Y_BASE + i as f32 * Y_STEP;
            for p in &curve.points {
                // Hermite interpolation can slightly exceed the waypoint
                // band; allow a small margin.
                assert!((p.y - y_base).abs() <= AMPLITUDE * 1.1);
                assert!((p.z - (Z_BASE + i as f32 * Z_STEP)).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn hermite_hits_control_points() {
        let p0 = Vec3::ZERO;
        let p1 = Vec3::new(1.0, 2.0, 3.0);
        let m = Vec3::X;
        assert!((hermite_point(p0, m, p1, m, 0.0) - p0).length() < 1e-6);
        assert!((hermite_point(p0, m, p1, m, 1.0) - p1).length() < 1e-6);
    }
}
