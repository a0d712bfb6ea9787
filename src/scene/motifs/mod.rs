//! Procedural motif generators.
//!
//! Each generator builds one visual motif's static placement and
//! animation parameters exactly once per population. Per-frame code only
//! mutates the transform fields (`rotation`, `yaw`, `tilt`, `height`,
//! `opacity`, particle positions) — never the generated geometry.
//! Instances of the same kind are desynchronized at construction through
//! distinct speeds, indexed phases, or sampled offsets.

mod bars;
mod flow;
mod grid;
mod helix;
mod network;
mod particles;
mod polyhedron;
mod ring;

pub use bars::{Bar, BarField};
pub use flow::{FlowCurve, FlowCurves};
pub use grid::{
    Grid, BASE_TILT as GRID_BASE_TILT, DIVISIONS as GRID_DIVISIONS,
    EXTENT as GRID_EXTENT,
};
pub use helix::{Helix, HelixNode};
pub use network::NetworkGraph;
pub use particles::{ParticleCloud, CEILING, FLOOR};
pub use polyhedron::{Polyhedron, PolyhedronKind};
pub use ring::Ring;
