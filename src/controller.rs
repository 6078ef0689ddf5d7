//! Lifecycle of one particle network: sizing the surface, seeding the store,
//! producing frames and tearing everything down.
//!
//! The controller is driven from outside. The browser binding calls
//! [`Controller::tick`] from `requestAnimationFrame` and
//! [`Controller::resize`] from the window's `resize` event; both run on the
//! same thread, so the controller needs no locking.

use crate::config::{NetworkOptions, RenderConfig};
use crate::particle::{Particle, ParticleStore};
use crate::renderer::{self, FrameStats, Surface};
use crate::simulation;
use crate::timer::Timer;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

// Used only when the platform has no entropy source
const FALLBACK_SEED: u64 = 0x5eed_0f_9a_7710;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Running,
    Terminated,
}

/// Drawing-surface size in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

pub struct Controller<S: Surface> {
    surface: Option<S>,
    options: NetworkOptions,
    render_config: RenderConfig,
    store: ParticleStore,
    viewport: Viewport,
    phase: Phase,
    frames: u64,
    rng: StdRng,
}

impl<S: Surface> Controller<S> {
    /// A controller with no surface stays a no-op; it never leaves
    /// `Uninitialized`.
    pub fn new(surface: Option<S>, options: NetworkOptions, dark_mode: bool) -> Controller<S> {
        Controller::with_rng(surface, options, dark_mode, rng_from(OsRng))
    }

    pub fn with_rng(
        surface: Option<S>,
        options: NetworkOptions,
        dark_mode: bool,
        rng: StdRng,
    ) -> Controller<S> {
        let render_config = RenderConfig::new(&options, dark_mode);
        Controller {
            surface,
            options,
            render_config,
            store: ParticleStore::new(),
            viewport: Viewport::default(),
            phase: Phase::Uninitialized,
            frames: 0,
            rng,
        }
    }

    /// Sizes the surface to the viewport and seeds the particles. Only the
    /// first successful call has an effect.
    pub fn activate(&mut self, width: u32, height: u32) -> bool {
        if self.phase != Phase::Uninitialized {
            return self.is_running();
        }
        if self.surface.is_none() {
            log::debug!("particle network: no drawing surface, staying idle");
            return false;
        }

        self.apply_viewport(width, height);
        self.phase = Phase::Running;
        log::info!(
            "particle network: running {} particles at {}x{}",
            self.store.len(),
            width,
            height
        );
        true
    }

    /// Runs one simulation step and paints the result. Returns `None` when
    /// not running or when the surface rejected a draw call.
    pub fn tick(&mut self) -> Option<FrameStats> {
        if self.phase != Phase::Running {
            return None;
        }
        let surface = self.surface.as_mut()?;
        let width = self.viewport.width as f64;
        let height = self.viewport.height as f64;

        {
            let _timer = Timer::new("ParticleNetwork::step");
            simulation::step(self.store.as_mut_slice(), width, height);
        }

        let _timer = Timer::new("ParticleNetwork::render");
        self.frames += 1;
        match renderer::render_frame(surface, self.store.as_slice(), width, height, &self.render_config) {
            Ok(stats) => Some(stats),
            Err(err) => {
                log::warn!("particle network: frame {} not drawn: {:?}", self.frames, err);
                None
            }
        }
    }

    /// Adopts new viewport dimensions. Particles are reseeded, not rescaled.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.phase != Phase::Running {
            return;
        }
        self.apply_viewport(width, height);
        log::debug!(
            "particle network: resized to {}x{}, reseeded {} particles",
            width,
            height,
            self.store.len()
        );
    }

    /// Swaps the render snapshot; particles and phase are untouched.
    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        if self.render_config.dark_mode != dark_mode {
            self.render_config = RenderConfig::new(&self.options, dark_mode);
            log::debug!("particle network: dark mode {}", dark_mode);
        }
    }

    /// Releases the surface for good. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.phase == Phase::Terminated {
            return;
        }
        self.phase = Phase::Terminated;
        self.surface = None;
        log::info!("particle network: stopped after {} frames", self.frames);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn particles(&self) -> &[Particle] {
        self.store.as_slice()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render_config
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    fn apply_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Viewport { width, height };
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(width, height);
        }
        self.store.seed(
            &mut self.rng,
            self.options.particle_count,
            width as f64,
            height as f64,
            self.render_config.speed,
        );
    }
}

/// Seeds a `StdRng` from `source`, falling back to a fixed seed instead of
/// panicking when the source fails.
fn rng_from<R: RngCore>(source: R) -> StdRng {
    StdRng::from_rng(source).unwrap_or_else(|err| {
        log::warn!("particle network: no entropy ({}), using a fixed seed", err);
        StdRng::seed_from_u64(FALLBACK_SEED)
    })
}
