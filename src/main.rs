use bevy::prelude::*;
use log::{info, warn};
use sailing_sim::engine::config::SimConfig;
use sailing_sim::ui;

fn load_config() -> SimConfig {
    let Some(path) = std::env::args().nth(1) else {
        info!("No config file given, using built-in defaults");
        return SimConfig::default();
    };
    match SimConfig::load_json(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Could not use config {}: {}. Falling back to defaults.", path, e);
            SimConfig::default()
        }
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting sailing simulator...");
    let config = load_config();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Sailing Simulator".into(),
                resolution: (1200.0, 800.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ui::SimPlugin::new(config))
        .run();
}
