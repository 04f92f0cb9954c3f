use std::path::Path;

use log::info;
use thiserror::Error;

use crate::engine::config::{SailModel, SimConfig};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn require(ok: bool, field: &'static str, reason: impl Into<String>) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: reason.into(),
        })
    }
}

impl SimConfig {
    /// Loads a config from JSON. Missing fields take their defaults.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        info!("Loading simulation config from {:?}", path.as_ref());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Rejects values that would make the integrator blow up or divide by zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        require(p.boat_mass > 0.0, "physics.boat_mass", "must be positive")?;
        require(p.righting_constant > 0.0, "physics.righting_constant", "must be positive")?;
        require(p.sail_area > 0.0, "physics.sail_area", "must be positive")?;
        require(p.hull_area > 0.0, "physics.hull_area", "must be positive")?;
        for (field, value) in [
            ("physics.water_density", p.water_density),
            ("physics.drag_coefficient", p.drag_coefficient),
            ("physics.sail_efficiency", p.sail_efficiency),
            ("physics.rudder_effectiveness", p.rudder_effectiveness),
            ("physics.sail_center_height", p.sail_center_height),
            ("physics.min_apparent_wind", p.min_apparent_wind),
            ("physics.min_drag_speed", p.min_drag_speed),
        ] {
            require(value >= 0.0, field, format!("must not be negative, got {}", value))?;
        }
        if let SailModel::Damped { spring, damping } = p.sail_model {
            require(spring >= 0.0, "physics.sail_model.spring", "must not be negative")?;
            require(damping >= 0.0, "physics.sail_model.damping", "must not be negative")?;
        }

        require(self.wind.speed >= 0.0, "wind.speed", "must not be negative")?;
        require(self.wind.period > 0.0, "wind.period", "must be positive")?;

        let nav = &self.navigation;
        require(
            nav.min_waypoint_distance >= 0.0,
            "navigation.min_waypoint_distance",
            "must not be negative",
        )?;
        require(
            nav.max_waypoint_distance >= nav.min_waypoint_distance,
            "navigation.max_waypoint_distance",
            format!(
                "{} is below the minimum {}",
                nav.max_waypoint_distance, nav.min_waypoint_distance
            ),
        )?;

        require(self.controls.sheet_rate >= 0.0, "controls.sheet_rate", "must not be negative")?;
        Ok(())
    }
}
