use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Light-rig intensities and fog range. Light positions, colors and
/// ranges are fixed constants of the rig.
pub struct LightingOptions {
    /// Flat ambient term.
    pub ambient: f32,
    /// Key point light intensity (upper front).
    pub key_intensity: f32,
    /// Fill point light intensity (upper left, behind).
    pub fill_intensity: f32,
    /// Under-light intensity (below the bar field).
    pub under_intensity: f32,
    /// Overhead spot intensity.
    pub spot_intensity: f32,
    /// View distance at which fog starts.
    pub fog_start: f32,
    /// View distance at which fog fully obscures.
    pub fog_end: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient: 0.08,
            key_intensity: 0.6,
            fill_intensity: 0.3,
            under_intensity: 0.2,
            spot_intensity: 0.4,
            fog_start: 10.0,
            fog_end: 30.0,
        }
    }
}
