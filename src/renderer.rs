// Renderer that turns the particle store into one complete frame: a cleared
// surface, a dot per particle and a line between every pair of particles
// closer than the connection distance.

use crate::color::Color;
use crate::config::RenderConfig;
use crate::particle::Particle;
use wasm_bindgen::JsValue;

/// Drawing target for the renderer. The browser implementation wraps a
/// `CanvasRenderingContext2d`; tests record the calls instead.
pub trait Surface {
    /// Sets the backing resolution in pixels.
    fn resize(&mut self, width: u32, height: u32);

    fn clear(&mut self, width: f64, height: f64);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> Result<(), JsValue>;

    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        width: f64,
        color: Color,
    ) -> Result<(), JsValue>;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub edges: usize,
}

/// Indices `j > i` of the particles strictly closer to particle `i` than
/// `threshold`.
pub fn neighbours<'a>(
    particles: &'a [Particle],
    i: usize,
    threshold: f64,
) -> impl Iterator<Item = usize> + 'a {
    (i + 1..particles.len()).filter(move |&j| particles[i].distance_to(&particles[j]) < threshold)
}

/// Every index pair `(i, j)` with `i < j` whose particles are strictly closer
/// than `threshold`. Each unordered pair is checked exactly once.
pub fn connections<'a>(
    particles: &'a [Particle],
    threshold: f64,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    (0..particles.len()).flat_map(move |i| neighbours(particles, i, threshold).map(move |j| (i, j)))
}

/// Clears the surface and paints the network. Particle `i` is drawn first,
/// followed by its edges to every later particle.
pub fn render_frame<S: Surface + ?Sized>(
    surface: &mut S,
    particles: &[Particle],
    width: f64,
    height: f64,
    config: &RenderConfig,
) -> Result<FrameStats, JsValue> {
    surface.clear(width, height);

    let mut stats = FrameStats {
        particles: particles.len(),
        edges: 0,
    };
    for (i, p) in particles.iter().enumerate() {
        surface.fill_circle(p.pos[0], p.pos[1], config.particle_radius, config.particle_color)?;

        for j in neighbours(particles, i, config.connection_distance) {
            surface.stroke_line(p.pos, particles[j].pos, config.line_width, config.line_color)?;
            stats.edges += 1;
        }
    }
    Ok(stats)
}
