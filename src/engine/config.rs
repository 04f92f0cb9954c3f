use std::f32::consts::FRAC_PI_4;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

/// How the boom angle is resolved each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SailModel {
    /// The sail free-swings to the downwind side until stopped by the sheet.
    #[default]
    Instantaneous,
    /// The boom is a damped oscillator pulled towards the free-swing angle.
    Damped {
        /// Angular stiffness (1/s²).
        spring: f32,
        /// Angular damping (1/s).
        damping: f32,
    },
}

/// Tunable constants of the boat physics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// kg/m³
    pub water_density: f32,
    pub drag_coefficient: f32,
    /// Wetted cross-section, m²
    pub hull_area: f32,
    /// m²
    pub sail_area: f32,
    /// How much wind force translates to boat force
    pub sail_efficiency: f32,
    /// kg
    pub boat_mass: f32,
    /// rad/s per unit rudder at 1 m/s
    pub rudder_effectiveness: f32,
    /// Height of the sail's centre of effort, m
    pub sail_center_height: f32,
    /// Heeling moment per radian of heel, N·m/rad
    pub righting_constant: f32,
    /// Below this apparent wind speed (m/s) the sail produces no force
    pub min_apparent_wind: f32,
    /// Below this boat speed (m/s) the hull produces no drag
    pub min_drag_speed: f32,
    pub sail_model: SailModel,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            water_density: 1000.0,
            drag_coefficient: 0.01,
            hull_area: 2.0,
            sail_area: 8.0,
            sail_efficiency: 3.0,
            boat_mass: 50.0,
            rudder_effectiveness: 0.5,
            sail_center_height: 3.0,
            righting_constant: 10000.0,
            min_apparent_wind: 0.1,
            min_drag_speed: 0.01,
            sail_model: SailModel::Instantaneous,
        }
    }
}

/// Initial wind and its slow oscillation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    /// m/s
    pub speed: f32,
    /// Bearing the wind blows from, radians
    pub direction: f32,
    /// Oscillation period, seconds
    pub period: f32,
    /// Peak deviation from `direction`, radians
    pub swing: f32,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            speed: 15.0,
            direction: 0.0,
            period: 120.0,
            swing: FRAC_PI_4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub min_waypoint_distance: f32,
    pub max_waypoint_distance: f32,
    pub arrival_radius: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            min_waypoint_distance: 80.0,
            max_waypoint_distance: 150.0,
            arrival_radius: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Sheet units per second while a trim key is held
    pub sheet_rate: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self { sheet_rate: 0.5 }
    }
}

/// Everything the simulation driver needs, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct SimConfig {
    pub physics: PhysicsConfig,
    pub wind: WindConfig,
    pub navigation: NavigationConfig,
    pub controls: ControlConfig,
}
