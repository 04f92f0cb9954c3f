use std::f32::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

use crate::engine::angles::normalize_angle;
use crate::engine::vector::Vector2D;

/// True wind, fixed for the duration of a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// m/s, never negative
    pub speed: f32,
    /// Compass bearing the wind blows FROM, radians in (−π, π]
    pub direction: f32,
}

impl Wind {
    pub fn new(speed: f32, direction: f32) -> Self {
        Self {
            speed: speed.max(0.0),
            direction: normalize_angle(direction),
        }
    }
}

/// Mutable state of the one boat in the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boat {
    /// World position, m
    pub position: Vector2D,
    /// World-frame velocity, m/s
    pub velocity: Vector2D,
    /// Bearing the bow points to, radians in (−π, π]
    pub heading: f32,
    /// Roll angle, recomputed every tick
    pub heel: f32,
    /// 0 = hauled in, 1 = eased fully
    pub sheet: f32,
    /// −1 = full left, +1 = full right
    pub rudder: f32,
    /// Hull length, m (rendering only)
    pub length: f32,
    /// Boom angle relative to the heading, radians in (−π, π]
    pub sail_angle: f32,
    /// Boom angular velocity, only used by the damped sail
    pub sail_angular_vel: f32,
}

impl Default for Boat {
    fn default() -> Self {
        Self::new()
    }
}

impl Boat {
    pub fn new() -> Self {
        Self {
            position: Vector2D::ZERO,
            velocity: Vector2D::ZERO,
            heading: FRAC_PI_4,
            heel: 0.0,
            sheet: 0.5,
            rudder: 0.0,
            length: 5.0,
            sail_angle: 0.0,
            sail_angular_vel: 0.0,
        }
    }

    /// Unit vector along the boat's centerline.
    pub fn heading_vector(&self) -> Vector2D {
        Vector2D::from_bearing(self.heading)
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    /// Signed speed along the heading; negative when making sternway.
    pub fn speed_along_heading(&self) -> f32 {
        self.velocity.dot(self.heading_vector())
    }

    pub fn set_sheet(&mut self, sheet: f32) {
        self.sheet = sheet.clamp(0.0, 1.0);
    }

    pub fn trim_sheet(&mut self, delta: f32) {
        self.set_sheet(self.sheet + delta);
    }

    pub fn set_rudder(&mut self, rudder: f32) {
        self.rudder = rudder.clamp(-1.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_wind_new_normalizes() {
        let wind = Wind::new(-3.0, 3.0 * PI);
        assert_eq!(wind.speed, 0.0);
        assert!(wind.direction > -PI && wind.direction <= PI);
    }

    #[test]
    fn test_boat_initial_state() {
        let boat = Boat::new();
        assert_eq!(boat.position, Vector2D::ZERO);
        assert_eq!(boat.velocity, Vector2D::ZERO);
        assert_approx_eq!(boat.heading, FRAC_PI_4);
        assert_eq!(boat.sheet, 0.5);
        assert_eq!(boat.rudder, 0.0);
    }

    #[test]
    fn test_controls_are_clamped() {
        let mut boat = Boat::new();
        boat.trim_sheet(2.0);
        assert_eq!(boat.sheet, 1.0);
        boat.trim_sheet(-5.0);
        assert_eq!(boat.sheet, 0.0);
        boat.set_rudder(-3.0);
        assert_eq!(boat.rudder, -1.0);
    }
}
