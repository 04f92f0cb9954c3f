use bevy::prelude::Resource;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::engine::angles::{deg_to_rad, normalize_angle};
use crate::engine::config::PhysicsConfig;
use crate::engine::heel::heel_angle;
use crate::engine::hull::hull_drag;
use crate::engine::models::{Boat, Wind};
use crate::engine::sail::{sail_force, update_sail};
use crate::engine::vector::Vector2D;
use crate::engine::wind::apparent_wind;
use crate::parsers::polars::PolarData;

/// Forces that acted on the boat during one tick, for display and debugging.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    pub apparent_wind: Vector2D,
    pub sail_force: Vector2D,
    /// Sail force after projection onto the centerline
    pub drive_force: Vector2D,
    pub drag_force: Vector2D,
}

#[derive(Debug, Clone, Default, Resource)]
pub struct PhysicsModel {
    pub config: PhysicsConfig,
}

impl PhysicsModel {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// Apparent wind on the boat as it is now. Not cached anywhere.
    pub fn apparent_wind(&self, boat: &Boat, wind: &Wind) -> Vector2D {
        apparent_wind(wind, boat.velocity)
    }

    /// Advances the boat by `dt` seconds.
    ///
    /// Sail force and heel come from the pre-update apparent wind and heading.
    /// Velocity is forced onto the heading axis after it is integrated and before
    /// position is, so no lateral drift reaches the position.
    pub fn step(&self, boat: &mut Boat, wind: &Wind, dt: f32) -> StepReport {
        let config = &self.config;
        let apparent = apparent_wind(wind, boat.velocity);

        let sail_angle = update_sail(config, boat, apparent, dt);
        let sail = sail_force(config, apparent, boat.heading, sail_angle);
        boat.heel = heel_angle(config, sail.magnitude(), sail_angle);

        // The hull does not let the sail push it sideways
        let axis = boat.heading_vector();
        let drive = axis * sail.dot(axis);

        let drag = hull_drag(config, boat.velocity);
        let acceleration = (drive + drag) * (1.0 / config.boat_mass);
        boat.velocity += acceleration * dt;

        // Keel: no leeway
        boat.velocity = axis * boat.velocity.dot(axis);

        boat.position += boat.velocity * dt;

        let speed = boat.velocity.magnitude();
        boat.heading =
            normalize_angle(boat.heading + boat.rudder * config.rudder_effectiveness * speed * dt);

        StepReport {
            apparent_wind: apparent,
            sail_force: sail,
            drive_force: drive,
            drag_force: drag,
        }
    }

    /// Runs from rest with a centred rudder and returns the signed speed along the heading.
    ///
    /// `true_wind_angle` is the heading relative to the wind direction.
    pub fn steady_state_speed(
        &self,
        true_wind_angle: f32,
        wind_speed: f32,
        sheet: f32,
        duration: f32,
        dt: f32,
    ) -> f32 {
        if !(dt > 0.0 && duration.is_finite()) {
            warn!("Cannot integrate with dt={} over {}s, reporting no speed", dt, duration);
            return 0.0;
        }

        let wind = Wind::new(wind_speed, 0.0);
        let mut boat = Boat::new();
        boat.heading = normalize_angle(true_wind_angle);
        boat.set_sheet(sheet);
        boat.rudder = 0.0;

        let steps = (duration / dt).round() as usize;
        for _ in 0..steps {
            self.step(&mut boat, &wind, dt);
        }
        boat.speed_along_heading()
    }

    /// Builds a speed polar by running every (TWA, TWS) pair to steady state.
    ///
    /// TWA in degrees, TWS in m/s, speeds in m/s.
    pub fn sweep_polar(
        &self,
        twa_deg: &[f32],
        tws: &[f32],
        sheet: f32,
        duration: f32,
        dt: f32,
    ) -> PolarData {
        info!(
            "Sweeping polar over {} angles x {} wind speeds ({}s per run)",
            twa_deg.len(),
            tws.len(),
            duration
        );

        let speeds: Vec<Vec<f32>> = twa_deg
            .par_iter()
            .map(|&twa| {
                let row: Vec<f32> = tws
                    .iter()
                    .map(|&speed| {
                        self.steady_state_speed(deg_to_rad(twa), speed, sheet, duration, dt)
                    })
                    .collect();
                debug!("TWA {}: {:?}", twa, row);
                row
            })
            .collect();

        PolarData {
            tws: tws.to_vec(),
            twa: twa_deg.to_vec(),
            speeds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::SailModel;
    use assert_approx_eq::assert_approx_eq;
    use std::f32::consts::{FRAC_PI_4, PI};

    const DT: f32 = 1.0 / 60.0;

    fn cross_track(boat: &Boat) -> f32 {
        boat.velocity.cross(boat.heading_vector())
    }

    #[test]
    fn test_keel_constraint_holds_every_tick() {
        let physics = PhysicsModel::default();
        for dir_step in 0..12 {
            let wind = Wind::new(12.0, -PI + dir_step as f32 * PI / 6.0 + 0.05);
            let mut boat = Boat::new();
            for _ in 0..300 {
                physics.step(&mut boat, &wind, DT);
                assert_approx_eq!(cross_track(&boat), 0.0, 1e-3);
            }
        }
    }

    #[test]
    fn test_keel_uses_heading_of_the_tick_when_turning() {
        let physics = PhysicsModel::default();
        let wind = Wind::new(12.0, 1.0);
        let mut boat = Boat::new();
        boat.rudder = 0.7;

        for _ in 0..600 {
            let axis = boat.heading_vector();
            physics.step(&mut boat, &wind, DT);
            assert_approx_eq!(boat.velocity.cross(axis), 0.0, 1e-3);
        }
    }

    #[test]
    fn test_keel_removes_existing_leeway() {
        let physics = PhysicsModel::default();
        let wind = Wind::new(0.0, 0.0);
        let mut boat = Boat::new();
        boat.heading = 0.0;
        boat.velocity = Vector2D::new(3.0, 2.0);

        physics.step(&mut boat, &wind, DT);
        assert_approx_eq!(boat.velocity.x, 0.0);
        assert!(boat.velocity.y > 0.0 && boat.velocity.y < 2.0);
    }

    #[test]
    fn test_reaches_steady_speed() {
        let physics = PhysicsModel::default();
        let wind = Wind::new(15.0, 0.0);
        let mut boat = Boat::new();
        boat.heading = FRAC_PI_4;
        boat.set_sheet(0.5);

        let mut speed_at_nine = 0.0;
        for tick in 1..=600 {
            physics.step(&mut boat, &wind, DT);
            if tick == 540 {
                speed_at_nine = boat.speed();
            }
        }

        let speed = boat.speed();
        assert!(speed.is_finite());
        assert!(speed > 1.0);
        assert_approx_eq!(speed, speed_at_nine, 1e-2);

        // Drive and drag balance at the terminal speed
        let report = physics.step(&mut boat.clone(), &wind, DT);
        let net = (report.drive_force + report.drag_force).magnitude();
        assert!(net < 0.01 * report.drag_force.magnitude());

        // Travelled along the heading axis, on the side the sail pushes towards
        assert_approx_eq!(boat.position.x, boat.position.y, 1e-2);
        let along = boat.position.dot(boat.heading_vector());
        assert!(along.abs() > 10.0);
        assert_eq!(along.signum(), boat.speed_along_heading().signum());
        assert_approx_eq!(boat.heading, FRAC_PI_4);
    }

    #[test]
    fn test_steady_state_rejects_bad_time_step() {
        let physics = PhysicsModel::default();
        assert_eq!(physics.steady_state_speed(FRAC_PI_4, 10.0, 0.5, 10.0, 0.0), 0.0);
        assert_eq!(physics.steady_state_speed(FRAC_PI_4, 10.0, 0.5, 10.0, -DT), 0.0);
        assert_eq!(physics.steady_state_speed(FRAC_PI_4, 10.0, 0.5, 10.0, f32::NAN), 0.0);
        assert_eq!(physics.steady_state_speed(FRAC_PI_4, 10.0, 0.5, f32::INFINITY, DT), 0.0);
        assert!(physics.steady_state_speed(FRAC_PI_4, 10.0, 0.5, 2.0, DT).abs() > 0.0);
    }

    #[test]
    fn test_centred_rudder_holds_heading() {
        let physics = PhysicsModel::default();
        let wind = Wind::new(10.0, 0.5);
        let mut boat = Boat::new();
        boat.velocity = boat.heading_vector() * 3.0;
        boat.rudder = 0.0;

        let heading = boat.heading;
        for _ in 0..120 {
            physics.step(&mut boat, &wind, DT);
            assert_eq!(boat.heading, heading);
        }
    }

    #[test]
    fn test_right_rudder_turns_right_with_speed() {
        let physics = PhysicsModel::default();
        let wind = Wind::new(0.0, 0.0);

        let mut boat = Boat::new();
        boat.velocity = boat.heading_vector() * 4.0;
        boat.rudder = 1.0;
        let before = boat.heading;
        physics.step(&mut boat, &wind, DT);
        let turn = boat.heading - before;
        assert!(turn > 0.0);
        let expected = physics.config.rudder_effectiveness * boat.speed() * DT;
        assert_approx_eq!(turn, expected, 1e-6);

        // Twice the speed, twice the turn
        let mut fast = Boat::new();
        fast.velocity = fast.heading_vector() * 8.0;
        fast.rudder = 1.0;
        physics.step(&mut fast, &wind, DT);
        assert!(fast.heading - before > 1.8 * turn);
    }

    #[test]
    fn test_no_steering_at_standstill() {
        let physics = PhysicsModel::default();
        let mut boat = Boat::new();
        boat.rudder = -1.0;
        physics.step(&mut boat, &Wind::new(0.0, 0.0), DT);
        assert_eq!(boat.heading, FRAC_PI_4);
    }

    #[test]
    fn test_heel_stays_capped() {
        let physics = PhysicsModel::default();
        for speed in [0.0, 5.0, 30.0, 200.0] {
            for dir_step in 0..8 {
                let wind = Wind::new(speed, -PI + dir_step as f32 * PI / 4.0 + 0.1);
                for sheet in [0.0, 0.5, 1.0] {
                    let mut boat = Boat::new();
                    boat.set_sheet(sheet);
                    for _ in 0..30 {
                        physics.step(&mut boat, &wind, DT);
                        assert!(boat.heel.abs() <= FRAC_PI_4);
                    }
                }
            }
        }
    }

    #[test]
    fn test_still_air_and_rest_stays_put() {
        let physics = PhysicsModel::default();
        let mut boat = Boat::new();
        let report = physics.step(&mut boat, &Wind::new(0.0, 0.0), DT);
        assert_eq!(report.sail_force, Vector2D::ZERO);
        assert_eq!(report.drag_force, Vector2D::ZERO);
        assert_eq!(boat.position, Vector2D::ZERO);
        assert_eq!(boat.heel, 0.0);
    }

    #[test]
    fn test_damped_sail_model_integrates() {
        let physics = PhysicsModel::new(PhysicsConfig {
            sail_model: SailModel::Damped { spring: 20.0, damping: 6.0 },
            ..PhysicsConfig::default()
        });
        let wind = Wind::new(15.0, 0.0);
        let mut boat = Boat::new();
        boat.heading = deg_to_rad(150.0);
        boat.set_sheet(1.0);

        for _ in 0..300 {
            physics.step(&mut boat, &wind, DT);
            assert!(boat.velocity.magnitude().is_finite());
            assert_approx_eq!(cross_track(&boat), 0.0, 1e-3);
        }
        assert!(boat.position.magnitude() > 1.0);
    }

    #[test]
    fn test_polar_sweep_shape() {
        let physics = PhysicsModel::default();
        let polar = physics.sweep_polar(&[0.0, 45.0, 90.0], &[5.0, 15.0], 0.5, 20.0, DT);
        assert_eq!(polar.twa.len(), 3);
        assert_eq!(polar.speeds.len(), 3);
        assert!(polar.speeds.iter().all(|row| row.len() == 2));

        // More wind, more speed
        for row in &polar.speeds {
            assert!(row[1].abs() > row[0].abs());
        }

        let direct = physics.steady_state_speed(FRAC_PI_4, 15.0, 0.5, 20.0, DT);
        assert_approx_eq!(polar.speeds[1][1], direct);
    }
}
