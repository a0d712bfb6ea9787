//! Perspective camera and the parallax rig that drives it.

/// Core camera struct and GPU uniform types.
pub mod core;
/// Input-driven parallax rig with fixed-factor smoothing.
pub mod rig;

pub use rig::{CameraRig, RigState};
