//! Sail trim and sail force.
//!
//! Sail angles are measured relative to the boat's heading: 0 points the boom
//! at the bow, ±π puts it on the centerline over the stern. The sheet limits
//! how far the boom may swing away from dead astern.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::engine::angles::normalize_angle;
use crate::engine::config::{PhysicsConfig, SailModel};
use crate::engine::models::Boat;
use crate::engine::vector::Vector2D;

/// Largest allowed swing away from dead astern for a given sheet setting.
pub fn sheet_limit(sheet: f32) -> f32 {
    sheet.clamp(0.0, 1.0) * FRAC_PI_2
}

/// How far a sail angle is from dead astern, in [0, π].
pub fn deviation_from_stern(sail_angle: f32) -> f32 {
    (sail_angle.abs() - PI).abs()
}

/// Angle the boom would take with the sheet slack.
///
/// Offset by π from the bearing the apparent wind travels towards, relative to the heading.
pub fn free_sail_angle(apparent_wind: Vector2D, heading: f32) -> f32 {
    let wind_relative_to_boat = normalize_angle(apparent_wind.bearing() - heading);
    normalize_angle(wind_relative_to_boat + PI)
}

/// Stops the boom against the sheet. Returns the angle and whether it was stopped.
pub fn clamp_to_sheet(sail_angle: f32, sheet: f32) -> (f32, bool) {
    let limit = sheet_limit(sheet);
    if deviation_from_stern(sail_angle) > limit {
        let stopped = if sail_angle > 0.0 { PI - limit } else { -PI + limit };
        (normalize_angle(stopped), true)
    } else {
        (sail_angle, false)
    }
}

/// Instantaneous trim: free-swing angle saturated by the sheet.
pub fn resolve_sail_angle(apparent_wind: Vector2D, heading: f32, sheet: f32) -> f32 {
    clamp_to_sheet(free_sail_angle(apparent_wind, heading), sheet).0
}

/// One explicit step of the damped boom, pulled towards `target`.
///
/// Hitting the sheet zeroes the angular velocity.
pub fn step_damped_sail(
    angle: f32,
    angular_vel: f32,
    target: f32,
    sheet: f32,
    spring: f32,
    damping: f32,
    dt: f32,
) -> (f32, f32) {
    let error = normalize_angle(target - angle);
    let angular_acc = spring * error - damping * angular_vel;
    let angular_vel = angular_vel + angular_acc * dt;
    let angle = normalize_angle(angle + angular_vel * dt);

    match clamp_to_sheet(angle, sheet) {
        (stopped, true) => (stopped, 0.0),
        (free, false) => (free, angular_vel),
    }
}

/// Resolves this tick's boom angle with the configured model and stores it on the boat.
pub fn update_sail(config: &PhysicsConfig, boat: &mut Boat, apparent_wind: Vector2D, dt: f32) -> f32 {
    let target = resolve_sail_angle(apparent_wind, boat.heading, boat.sheet);
    match config.sail_model {
        SailModel::Instantaneous => {
            boat.sail_angle = target;
            boat.sail_angular_vel = 0.0;
        }
        SailModel::Damped { spring, damping } => {
            let (angle, angular_vel) = step_damped_sail(
                boat.sail_angle,
                boat.sail_angular_vel,
                target,
                boat.sheet,
                spring,
                damping,
                dt,
            );
            boat.sail_angle = angle;
            boat.sail_angular_vel = angular_vel;
        }
    }
    boat.sail_angle
}

/// World-frame force of the sail at `sail_angle`.
///
/// Peaks when the apparent wind strikes the sail square on and vanishes when it
/// runs along the sail plane. Acts perpendicular to the sail on the side the wind hits.
pub fn sail_force(
    config: &PhysicsConfig,
    apparent_wind: Vector2D,
    heading: f32,
    sail_angle: f32,
) -> Vector2D {
    let apparent_speed = apparent_wind.magnitude();
    if apparent_speed < config.min_apparent_wind {
        return Vector2D::ZERO;
    }

    let sail_orientation = heading + sail_angle;
    let wind_to_sail = normalize_angle(apparent_wind.bearing() - sail_orientation);
    let efficiency = wind_to_sail.abs().sin();

    let magnitude = 0.5
        * config.sail_efficiency
        * config.sail_area
        * efficiency
        * apparent_speed
        * apparent_speed;
    let side = if wind_to_sail > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };

    Vector2D::from_polar(magnitude, sail_orientation + side)
}
