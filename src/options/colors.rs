use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Scene palette. All values are linear RGB in `[0, 1]`.
pub struct ColorOptions {
    /// Bright accent used for edges, particles and warm lights.
    pub accent: [f32; 3],
    /// Dimmed accent for secondary edges, links and fills.
    pub accent_dim: [f32; 3],
    /// Dark body color for solid meshes.
    pub charcoal: [f32; 3],
    /// Near-black body color for the polyhedra.
    pub ink: [f32; 3],
    /// Clear/background color, also the fog target.
    pub background: [f32; 3],
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            accent: [0.788, 0.659, 0.298],
            accent_dim: [0.545, 0.459, 0.208],
            charcoal: [0.078, 0.078, 0.078],
            ink: [0.055, 0.055, 0.055],
            background: [0.039, 0.039, 0.039],
        }
    }
}
