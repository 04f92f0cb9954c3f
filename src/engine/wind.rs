use std::f32::consts::TAU;

use crate::engine::angles::normalize_angle;
use crate::engine::config::WindConfig;
use crate::engine::models::Wind;
use crate::engine::vector::Vector2D;

/// World-frame velocity of the true wind.
///
/// `direction` is where the wind blows from, so the vector points the other way.
pub fn wind_vector(wind: &Wind) -> Vector2D {
    Vector2D::new(
        -wind.speed * wind.direction.sin(),
        -wind.speed * wind.direction.cos(),
    )
}

/// Wind felt aboard: true wind minus boat velocity.
pub fn apparent_wind(wind: &Wind, boat_velocity: Vector2D) -> Vector2D {
    wind_vector(wind) - boat_velocity
}

/// Swings the wind direction sinusoidally around a base bearing.
#[derive(Debug, Clone, PartialEq)]
pub struct WindOscillator {
    pub base_direction: f32,
    /// seconds
    pub period: f32,
    /// radians
    pub swing: f32,
    pub elapsed: f32,
}

impl WindOscillator {
    pub fn new(base_direction: f32, period: f32, swing: f32) -> Self {
        Self {
            base_direction,
            period,
            swing,
            elapsed: 0.0,
        }
    }

    pub fn from_config(config: &WindConfig) -> Self {
        Self::new(config.direction, config.period, config.swing)
    }

    /// Direction offset from the base at the current elapsed time.
    pub fn offset(&self) -> f32 {
        if self.period <= 0.0 {
            return 0.0;
        }
        (self.elapsed / self.period * TAU).sin() * self.swing
    }

    pub fn advance(&mut self, dt: f32, wind: &mut Wind) {
        self.elapsed += dt;
        wind.direction = normalize_angle(self.base_direction + self.offset());
    }
}
