// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! GPU-accelerated procedural 3D backdrop engine built on wgpu.
//!
//! Backdrop renders a continuously animated decorative scene — floating
//! polyhedra, an upward particle stream, orbiting rings, a twin-strand
//! helix, rising bars, a proximity network, flowing curves and a
//! wireframe grid — behind a scrollable host surface, with camera
//! parallax driven by pointer position and scroll progress.
//!
//! # Key entry points
//!
//! - [`engine::BackdropEngine`] - the rendering engine
//! - [`scene::Scene`] - the motif population for one mount
//! - [`options::Options`] - runtime configuration (camera, lighting,
//!   colors, scene population)
//! - [`viewer::Viewer`] - standalone winit window (feature `viewer`)
//!
//! # Degradation policy
//!
//! At construction the engine probes once for a hardware-accelerated
//! adapter ([`capability::detect`]). Without one it draws a static
//! gradient and never starts the frame loop. With one, the viewport is
//! classified [`ViewportClass::Full`] or [`ViewportClass::Compact`]
//! (re-evaluated on resize) and the population is scaled to match:
//! compact viewports drop the heavier motifs entirely and shrink the
//! particle budget.
//!
//! # Architecture
//!
//! Motif geometry is generated once per population; the per-frame path
//! ([`scene::animate::advance`]) mutates only transforms, opacities and
//! particle positions, then uploads instance data into preallocated
//! buffers. Input trackers are plain latest-wins samples read by the
//! frame loop, never the other way around.

pub mod capability;
pub mod camera;
pub mod engine;
pub mod error;
pub mod input;
pub mod options;
pub mod render;
pub mod scene;
pub mod util;
pub mod viewport;

#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::BackdropEngine;
pub use error::BackdropError;
pub use input::{InputEvent, InputSample, InputState};
pub use viewport::{classify, ViewportClass};

#[cfg(feature = "viewer")]
pub use viewer::Viewer;
