//! Ambient particle-network backdrop for documentation pages.
//!
//! A fixed number of particles drift across a full-viewport canvas, bouncing
//! off its edges, and every pair closer than a connection distance is joined
//! by a faint line. The page creates one [`ParticleNetwork`], starts it,
//! forwards its dark/light flag and stops it on teardown.

pub mod canvas;
pub mod color;
pub mod config;
pub mod controller;
pub mod particle;
pub mod renderer;
pub mod simulation;
mod timer;
mod utils;
pub mod web;

use wasm_bindgen::prelude::*;

pub use crate::color::Color;
pub use crate::config::{NetworkOptions, Palette, RenderConfig};
pub use crate::controller::{Controller, Phase, Viewport};
pub use crate::particle::{Particle, ParticleStore};
pub use crate::renderer::{FrameStats, Surface};
pub use crate::web::ParticleNetwork;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Installs the panic hook and routes logging to the console at `info`.
#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logging(log::Level::Info);
}

/// Same as `initialize`, with the log level given by name ("trace" enables
/// per-frame console timers).
#[wasm_bindgen]
pub fn initialize_with_level(level: &str) {
    utils::set_panic_hook();
    utils::init_logging(utils::parse_level(level));
}
