use std::f32::consts::FRAC_PI_4;

use crate::engine::config::PhysicsConfig;

/// Heel never exceeds 45°.
pub const MAX_HEEL: f32 = FRAC_PI_4;

/// Static heel from the sail load.
///
/// The sideways part of the sail force is `|F|·sin(sail_angle)`; its moment about
/// the centre of effort is balanced by a linear righting moment. Positive heel
/// goes with a positive sail angle. No memory across ticks.
pub fn heel_angle(config: &PhysicsConfig, sail_force_magnitude: f32, sail_angle: f32) -> f32 {
    let sideways_force = sail_force_magnitude * sail_angle.sin();
    let heeling_moment = sideways_force.abs() * config.sail_center_height;
    let heel = (heeling_moment / config.righting_constant).min(MAX_HEEL);
    if sail_angle > 0.0 { heel } else { -heel }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_heel_from_sideways_load() {
        let config = PhysicsConfig::default();
        // 1000 N fully sideways at 3 m against 10000 N·m/rad
        assert_approx_eq!(heel_angle(&config, 1000.0, FRAC_PI_2), 0.3, 1e-5);
        assert_approx_eq!(heel_angle(&config, 1000.0, -FRAC_PI_2), -0.3, 1e-5);
    }

    #[test]
    fn test_no_heel_with_sail_on_centerline() {
        let config = PhysicsConfig::default();
        assert_approx_eq!(heel_angle(&config, 5000.0, PI), 0.0, 1e-3);
        assert_eq!(heel_angle(&config, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_heel_is_capped() {
        let config = PhysicsConfig::default();
        for force in [1e3, 1e5, 1e7, f32::MAX] {
            for step in 0..32 {
                let angle = -PI + step as f32 * PI / 16.0;
                assert!(heel_angle(&config, force, angle).abs() <= MAX_HEEL);
            }
        }
        assert_approx_eq!(heel_angle(&config, 1e7, FRAC_PI_2), MAX_HEEL);
    }
}
