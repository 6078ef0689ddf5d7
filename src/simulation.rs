// Advances every particle by one tick and bounces it off the viewport edges

use crate::particle::Particle;

/// Moves each particle by its velocity. A particle that ends up outside
/// `[0, width]` (or `[0, height]`) has that velocity component negated; its
/// position is left where it landed and the flipped velocity carries it back
/// on the next tick.
pub fn step(particles: &mut [Particle], width: f64, height: f64) {
    for particle in particles.iter_mut() {
        particle.pos[0] += particle.vel[0];
        particle.pos[1] += particle.vel[1];
        if particle.pos[0] < 0.0 || particle.pos[0] > width {
            particle.vel[0] *= -1.0;
        }
        if particle.pos[1] < 0.0 || particle.pos[1] > height {
            particle.vel[1] *= -1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ParticleStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn moves_by_velocity() {
        let mut particles = [Particle::new(10.0, 20.0, 0.5, -0.25)];
        step(&mut particles, 100.0, 100.0);
        assert_eq!(particles[0], Particle::new(10.5, 19.75, 0.5, -0.25));
    }

    #[test]
    fn zero_speed_is_stationary() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut store = ParticleStore::new();
        store.seed(&mut rng, 45, 800.0, 600.0, 0.0);
        let before = store.as_slice().to_vec();

        for _ in 0..100 {
            step(store.as_mut_slice(), 800.0, 600.0);
        }
        assert_eq!(before.as_slice(), store.as_slice());
    }

    #[test]
    fn reflects_past_right_edge() {
        let mut particles = [Particle::new(801.0, 300.0, 2.0, 0.0)];
        step(&mut particles, 800.0, 600.0);
        assert_eq!(particles[0].vel[0], -2.0);
        assert_eq!(particles[0].pos[0], 803.0);
    }

    #[test]
    fn overshoot_is_carried_back_next_tick() {
        let mut particles = [Particle::new(799.5, 300.0, 1.0, 0.0)];
        step(&mut particles, 800.0, 600.0);
        assert_eq!(particles[0].pos[0], 800.5);
        assert_eq!(particles[0].vel[0], -1.0);

        step(&mut particles, 800.0, 600.0);
        assert_eq!(particles[0].pos[0], 799.5);
        assert_eq!(particles[0].vel[0], -1.0);
    }

    #[test]
    fn reflects_past_top_and_left_edges() {
        let mut particles = [Particle::new(0.1, 0.1, -0.25, -0.25)];
        step(&mut particles, 800.0, 600.0);
        assert_eq!(particles[0].vel, [0.25, 0.25]);
    }

    #[test]
    fn boundary_itself_is_inside() {
        let mut particles = [Particle::new(799.0, 599.0, 1.0, 1.0)];
        step(&mut particles, 800.0, 600.0);
        assert_eq!(particles[0].vel, [1.0, 1.0]);
    }

    #[test]
    fn step_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut a = ParticleStore::new();
        a.seed(&mut rng, 45, 640.0, 480.0, 3.0);
        let mut b = a.clone();

        for _ in 0..500 {
            step(a.as_mut_slice(), 640.0, 480.0);
            step(b.as_mut_slice(), 640.0, 480.0);
        }
        assert_eq!(a.as_slice(), b.as_slice());
    }
}
