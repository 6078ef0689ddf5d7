// Particle state: position and velocity of each point, and the store that
// owns the whole batch and reseeds it wholesale

use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
        }
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        vecmath::vec2_len(vecmath::vec2_sub(self.pos, other.pos))
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> ParticleStore {
        ParticleStore::default()
    }

    /// Replaces every particle with `count` fresh ones. Positions are uniform
    /// over `[0, width) x [0, height)`, each velocity component uniform over
    /// `[-speed / 2, speed / 2)`.
    pub fn seed<R: Rng>(
        &mut self,
        rng: &mut R,
        count: usize,
        width: f64,
        height: f64,
        speed: f64,
    ) {
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let pos_x = rng.gen::<f64>() * width;
            let pos_y = rng.gen::<f64>() * height;
            let vel_x = (rng.gen::<f64>() - 0.5) * speed;
            let vel_y = (rng.gen::<f64>() - 0.5) * speed;
            self.particles.push(Particle::new(pos_x, pos_y, vel_x, vel_y));
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn seed_fills_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut store = ParticleStore::new();
        store.seed(&mut rng, 45, 800.0, 600.0, 0.25);

        assert_eq!(store.len(), 45);
        for p in store.iter() {
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= 800.0, "x out of range: {:?}", p);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= 600.0, "y out of range: {:?}", p);
            assert!(p.vel[0].abs() <= 0.125, "vx too fast: {:?}", p);
            assert!(p.vel[1].abs() <= 0.125, "vy too fast: {:?}", p);
        }
    }

    #[test]
    fn reseed_discards_previous_batch() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut store = ParticleStore::new();
        store.seed(&mut rng, 45, 800.0, 600.0, 0.25);
        let before = store.as_slice().to_vec();

        store.seed(&mut rng, 10, 400.0, 300.0, 0.25);
        assert_eq!(store.len(), 10);
        assert!(store.iter().all(|p| p.pos[0] <= 400.0 && p.pos[1] <= 300.0));
        assert_ne!(&before[..10], store.as_slice());
    }

    #[test]
    fn seed_with_zero_count_or_area() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut store = ParticleStore::new();
        store.seed(&mut rng, 0, 800.0, 600.0, 0.25);
        assert!(store.is_empty());

        store.seed(&mut rng, 5, 0.0, 0.0, 0.0);
        assert_eq!(store.len(), 5);
        assert!(store.iter().all(|p| *p == Particle::new(0.0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Particle::new(0.0, 0.0, 0.0, 0.0);
        let b = Particle::new(3.0, 4.0, 1.0, 1.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }
}
