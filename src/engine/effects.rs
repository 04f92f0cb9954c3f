//! Decorative state: the wake behind the boat and wind streak particles.
//!
//! Nothing here feeds back into the physics.

use std::collections::VecDeque;

use rand::Rng;

use crate::engine::models::{Boat, Wind};
use crate::engine::vector::Vector2D;
use crate::engine::wind::wind_vector;

pub const WAKE_LENGTH: usize = 50;
/// Seconds between wake samples
pub const WAKE_INTERVAL: f32 = 0.1;

pub const MAX_PARTICLES: usize = 400;
pub const TRAIL_LENGTH: usize = 12;
/// Trails shift once every this many frames
const TRAIL_FRAME_STRIDE: u64 = 3;
/// Half extents of the spawn box around the boat, m
const SPAWN_HALF_WIDTH: f32 = 80.0;
const SPAWN_HALF_HEIGHT: f32 = 60.0;
/// Particles farther than this from the boat are recycled
const PARTICLE_RANGE: f32 = 100.0;

/// Recent stern positions, newest first.
#[derive(Debug, Clone, Default)]
pub struct Wake {
    pub points: VecDeque<Vector2D>,
    since_last_point: f32,
}

impl Wake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, boat: &Boat, dt: f32) {
        self.since_last_point += dt;
        if self.since_last_point < WAKE_INTERVAL {
            return;
        }
        self.since_last_point = 0.0;
        self.points.push_front(boat.position);
        self.points.truncate(WAKE_LENGTH);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindParticle {
    pub position: Vector2D,
    /// Newest first
    pub trail: [Vector2D; TRAIL_LENGTH],
    pub alive: bool,
}

impl WindParticle {
    fn respawn_at(&mut self, position: Vector2D) {
        self.position = position;
        self.trail = [position; TRAIL_LENGTH];
        self.alive = true;
    }
}

/// Streaks drifting with the true wind around the boat.
#[derive(Debug, Clone)]
pub struct WindParticles {
    pub particles: Vec<WindParticle>,
    frame: u64,
    elapsed: f32,
}

impl WindParticles {
    pub fn new(count: usize) -> Self {
        let dead = WindParticle {
            position: Vector2D::ZERO,
            trail: [Vector2D::ZERO; TRAIL_LENGTH],
            alive: false,
        };
        Self {
            particles: vec![dead; count.min(MAX_PARTICLES)],
            frame: 0,
            elapsed: 0.0,
        }
    }

    fn spawn_point<R: Rng>(boat: &Boat, rng: &mut R) -> Vector2D {
        let along_x = rng.gen_range(-SPAWN_HALF_WIDTH..=SPAWN_HALF_WIDTH);
        let along_y = rng.gen_range(-SPAWN_HALF_HEIGHT..=SPAWN_HALF_HEIGHT);
        let offset = match rng.gen_range(0..4) {
            0 => Vector2D::new(along_x, SPAWN_HALF_HEIGHT),
            1 => Vector2D::new(SPAWN_HALF_WIDTH, along_y),
            2 => Vector2D::new(along_x, -SPAWN_HALF_HEIGHT),
            _ => Vector2D::new(-SPAWN_HALF_WIDTH, along_y),
        };
        boat.position + offset
    }

    pub fn update<R: Rng>(&mut self, boat: &Boat, wind: &Wind, dt: f32, rng: &mut R) {
        let true_wind = wind_vector(wind);
        let cross_wind = Vector2D::new(-true_wind.y, true_wind.x);
        self.frame += 1;
        self.elapsed += dt;
        let shift_trails = self.frame % TRAIL_FRAME_STRIDE == 0;

        for (i, particle) in self.particles.iter_mut().enumerate() {
            if !particle.alive {
                particle.respawn_at(Self::spawn_point(boat, rng));
            }

            let wobble = (self.elapsed * 2.0 + i as f32).sin() * 0.1;
            particle.position += (true_wind + cross_wind * wobble) * dt;

            if shift_trails {
                particle.trail.rotate_right(1);
                particle.trail[0] = particle.position;
            }

            if (particle.position - boat.position).magnitude() > PARTICLE_RANGE {
                particle.alive = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_wake_samples_at_interval() {
        let mut wake = Wake::new();
        let mut boat = Boat::new();

        wake.update(&boat, 0.05);
        assert!(wake.points.is_empty());
        wake.update(&boat, 0.06);
        assert_eq!(wake.points.len(), 1);

        for i in 0..200 {
            boat.position = Vector2D::new(i as f32, 0.0);
            wake.update(&boat, 0.1);
        }
        assert_eq!(wake.points.len(), WAKE_LENGTH);
        assert_eq!(wake.points[0], Vector2D::new(199.0, 0.0));
    }

    #[test]
    fn test_particles_drift_downwind() {
        let mut rng = StdRng::seed_from_u64(3);
        let boat = Boat::new();
        let wind = Wind::new(10.0, 0.0);
        let mut field = WindParticles::new(50);

        field.update(&boat, &wind, 0.0, &mut rng);
        let start: Vec<f32> = field.particles.iter().map(|p| p.position.y).collect();
        field.update(&boat, &wind, 0.5, &mut rng);

        for (particle, y0) in field.particles.iter().zip(start) {
            if particle.alive {
                assert!(particle.position.y < y0);
            }
        }
    }

    #[test]
    fn test_particles_recycle_out_of_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut boat = Boat::new();
        let wind = Wind::new(10.0, 0.0);
        let mut field = WindParticles::new(20);
        field.update(&boat, &wind, 0.016, &mut rng);

        boat.position = Vector2D::new(1000.0, 1000.0);
        field.update(&boat, &wind, 0.016, &mut rng);
        assert!(field.particles.iter().all(|p| !p.alive));

        field.update(&boat, &wind, 0.016, &mut rng);
        for particle in &field.particles {
            assert!((particle.position - boat.position).magnitude() <= PARTICLE_RANGE + 1.0);
        }
    }

    #[test]
    fn test_trails_shift_every_third_frame() {
        let mut rng = StdRng::seed_from_u64(5);
        let boat = Boat::new();
        let wind = Wind::new(10.0, 0.0);
        let mut field = WindParticles::new(1);

        field.update(&boat, &wind, 0.1, &mut rng);
        field.update(&boat, &wind, 0.1, &mut rng);
        let p = &field.particles[0];
        assert_eq!(p.trail[0], p.trail[1]);

        field.update(&boat, &wind, 0.1, &mut rng);
        let p = &field.particles[0];
        assert_eq!(p.trail[0], p.position);
        assert_ne!(p.trail[0], p.trail[1]);
    }
}
