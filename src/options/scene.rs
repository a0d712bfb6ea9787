use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Population sizes and placement parameters for the animated scene.
pub struct SceneOptions {
    /// RNG seed for particle/network placement. `None` seeds from OS
    /// entropy on every mount; `Some` makes the population reproducible.
    pub seed: Option<u64>,
    /// Particle count for full viewports.
    pub particle_count_full: usize,
    /// Particle count for compact viewports.
    pub particle_count_compact: usize,
    /// Node count of the proximity network.
    pub network_nodes: usize,
    /// Maximum node distance, in world units, that still links two nodes.
    pub link_threshold: f32,
    /// Number of rising bars.
    pub bar_count: usize,
    /// Sample count per helix strand.
    pub helix_samples: usize,
    /// Number of flowing curves.
    pub flow_curves: usize,
    /// Virtual document height as a multiple of the viewport height.
    pub scroll_pages: f32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            seed: None,
            particle_count_full: 250,
            particle_count_compact: 80,
            network_nodes: 14,
            link_threshold: 6.0,
            bar_count: 12,
            helix_samples: 30,
            flow_curves: 6,
            scroll_pages: 5.0,
        }
    }
}

impl SceneOptions {
    /// Particle budget for the given viewport class.
    #[must_use]
    pub fn particle_count(&self, class: crate::ViewportClass) -> usize {
        match class {
            crate::ViewportClass::Full => self.particle_count_full,
            crate::ViewportClass::Compact => self.particle_count_compact,
        }
    }
}
