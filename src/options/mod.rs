//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (camera parallax, lighting, palette, scene
//! population) are consolidated here. Options serialize to/from TOML for
//! presets; every sub-struct uses `#[serde(default)]` so a partial file
//! that only overrides one section still parses.

mod camera;
mod colors;
mod lighting;
mod scene;

use std::path::Path;

pub use camera::CameraOptions;
pub use colors::ColorOptions;
pub use lighting::LightingOptions;
pub use scene::SceneOptions;
use serde::{Deserialize, Serialize};

use crate::error::BackdropError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection and parallax parameters.
    pub camera: CameraOptions,
    /// Light-rig intensities and fog range.
    pub lighting: LightingOptions,
    /// Scene palette.
    pub colors: ColorOptions,
    /// Population sizes and placement parameters.
    pub scene: SceneOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, BackdropError> {
        let content =
            std::fs::read_to_string(path).map_err(BackdropError::Io)?;
        toml::from_str(&content)
            .map_err(|e| BackdropError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), BackdropError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| BackdropError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(BackdropError::Io)?;
        }
        std::fs::write(path, content).map_err(BackdropError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[scene]
seed = 7
particle_count_full = 100
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.scene.seed, Some(7));
        assert_eq!(opts.scene.particle_count_full, 100);
        // Everything else should be default
        assert_eq!(opts.scene.particle_count_compact, 80);
        assert_eq!(opts.camera.smoothing, 0.03);
        assert_eq!(opts.lighting.ambient, 0.08);
    }

    #[test]
    fn seed_defaults_to_entropy() {
        let opts: Options = toml::from_str("").unwrap();
        assert_eq!(opts.scene.seed, None);
    }

    #[test]
    fn particle_count_follows_viewport_class() {
        let opts = SceneOptions::default();
        assert_eq!(opts.particle_count(crate::ViewportClass::Full), 250);
        assert_eq!(opts.particle_count(crate::ViewportClass::Compact), 80);
    }
}
