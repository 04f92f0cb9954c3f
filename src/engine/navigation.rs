use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::angles::normalize_angle;
use crate::engine::config::NavigationConfig;
use crate::engine::models::Boat;
use crate::engine::vector::Vector2D;

/// Closer than this the direction to a waypoint is meaningless
const MIN_VMG_DISTANCE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Vector2D,
    pub active: bool,
}

impl Default for Waypoint {
    fn default() -> Self {
        Self {
            position: Vector2D::ZERO,
            active: false,
        }
    }
}

impl Waypoint {
    pub fn new(position: Vector2D) -> Self {
        Self {
            position,
            active: true,
        }
    }
}

/// Compass bearing from `from` to `to`, radians in (−π, π].
pub fn bearing_to(from: Vector2D, to: Vector2D) -> f32 {
    normalize_angle((to - from).bearing())
}

/// Straight-line distance in meters.
pub fn distance_to(from: Vector2D, to: Vector2D) -> f32 {
    (to - from).magnitude()
}

/// Velocity made good: the part of the boat's velocity heading for the waypoint.
pub fn vmg(boat: &Boat, waypoint: &Waypoint) -> f32 {
    if !waypoint.active {
        return 0.0;
    }
    let offset = waypoint.position - boat.position;
    let dist = offset.magnitude();
    if dist < MIN_VMG_DISTANCE {
        return 0.0;
    }
    boat.velocity.dot(offset) / dist
}

/// Places waypoints at a random bearing and distance from the boat.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointSpawner {
    pub config: NavigationConfig,
    pub reached: u32,
}

impl WaypointSpawner {
    pub fn new(config: NavigationConfig) -> Self {
        Self { config, reached: 0 }
    }

    pub fn spawn<R: Rng>(&self, around: Vector2D, rng: &mut R) -> Waypoint {
        let bearing = rng.gen_range(-std::f32::consts::PI..std::f32::consts::PI);
        let (min, max) = (
            self.config.min_waypoint_distance,
            self.config.max_waypoint_distance,
        );
        let distance = if max > min { rng.gen_range(min..=max) } else { min };
        Waypoint::new(around + Vector2D::from_polar(distance, bearing))
    }

    /// Respawns the waypoint once the boat is inside the arrival radius.
    pub fn check_arrival<R: Rng>(
        &mut self,
        boat: &Boat,
        waypoint: &mut Waypoint,
        rng: &mut R,
    ) -> bool {
        if !waypoint.active {
            return false;
        }
        if distance_to(boat.position, waypoint.position) >= self.config.arrival_radius {
            return false;
        }

        self.reached += 1;
        *waypoint = self.spawn(boat.position, rng);
        info!(
            "Waypoint {} reached, next one {:.0} m away",
            self.reached,
            distance_to(boat.position, waypoint.position)
        );
        true
    }
}
