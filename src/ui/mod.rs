use bevy::{
    input::mouse::{MouseScrollUnit, MouseWheel},
    prelude::*,
};
use bevy_egui::{egui, EguiContexts, EguiPlugin};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::angles::{rad_to_deg, to_compass_degrees};
use crate::engine::config::SimConfig;
use crate::engine::effects::{Wake, WindParticles, MAX_PARTICLES};
use crate::engine::models::{Boat, Wind};
use crate::engine::navigation::{bearing_to, distance_to, vmg, Waypoint, WaypointSpawner};
use crate::engine::physics::{PhysicsModel, StepReport};
use crate::engine::wind::WindOscillator;

pub mod scene;

const MS_TO_KNOTS: f32 = 1.943844;
/// Meters per screen pixel at startup
const INITIAL_ZOOM: f32 = 0.1;

pub struct SimPlugin {
    pub config: SimConfig,
}

impl SimPlugin {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }
}

/// Everything the frame loop mutates. One boat, one wind.
#[derive(Resource)]
pub struct SimState {
    pub boat: Boat,
    pub wind: Wind,
    pub oscillator: WindOscillator,
    pub waypoint: Waypoint,
    pub spawner: WaypointSpawner,
    pub wake: Wake,
    pub particles: WindParticles,
    pub last_report: StepReport,
    pub paused: bool,
    pub rng: StdRng,
}

impl SimState {
    pub fn new(config: &SimConfig) -> Self {
        let boat = Boat::new();
        let mut rng = StdRng::from_entropy();
        let spawner = WaypointSpawner::new(config.navigation.clone());
        let waypoint = spawner.spawn(boat.position, &mut rng);

        Self {
            boat,
            wind: Wind::new(config.wind.speed, config.wind.direction),
            oscillator: WindOscillator::from_config(&config.wind),
            waypoint,
            spawner,
            wake: Wake::new(),
            particles: WindParticles::new(MAX_PARTICLES),
            last_report: StepReport::default(),
            paused: false,
            rng,
        }
    }
}

impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .insert_resource(self.config.clone())
            .insert_resource(PhysicsModel::new(self.config.physics.clone()))
            .insert_resource(SimState::new(&self.config))
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (control_input_system, simulation_tick_system, camera_follow_system).chain(),
            )
            .add_systems(
                Update,
                (
                    hud_system,
                    camera_zoom_system,
                    scene::render_water_system,
                    scene::render_wake_system,
                    scene::render_wind_particles_system,
                    scene::render_waypoint_system,
                    scene::render_boat_system,
                ),
            );
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_xyz(0.0, 0.0, 0.0).with_scale(Vec3::new(INITIAL_ZOOM, INITIAL_ZOOM, 1.0)),
    ));
}

/// Arrows or A/D steer, W/S (or up/down) trim the sheet.
fn control_input_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<SimConfig>,
    mut state: ResMut<SimState>,
) {
    let dt = time.delta_secs();
    let boat = &mut state.boat;

    let left = keyboard_input.pressed(KeyCode::ArrowLeft) || keyboard_input.pressed(KeyCode::KeyA);
    let right = keyboard_input.pressed(KeyCode::ArrowRight) || keyboard_input.pressed(KeyCode::KeyD);
    boat.set_rudder(if left {
        -1.0
    } else if right {
        1.0
    } else {
        0.0
    });

    let rate = config.controls.sheet_rate;
    if keyboard_input.pressed(KeyCode::KeyW) || keyboard_input.pressed(KeyCode::ArrowUp) {
        boat.trim_sheet(-rate * dt);
    }
    if keyboard_input.pressed(KeyCode::KeyS) || keyboard_input.pressed(KeyCode::ArrowDown) {
        boat.trim_sheet(rate * dt);
    }
}

fn simulation_tick_system(
    time: Res<Time>,
    physics: Res<PhysicsModel>,
    mut state: ResMut<SimState>,
) {
    if state.paused {
        return;
    }
    let dt = time.delta_secs();
    let SimState {
        boat,
        wind,
        oscillator,
        waypoint,
        spawner,
        wake,
        particles,
        last_report,
        rng,
        ..
    } = &mut *state;

    oscillator.advance(dt, wind);
    *last_report = physics.step(boat, wind, dt);
    spawner.check_arrival(boat, waypoint, rng);
    wake.update(boat, dt);
    particles.update(boat, wind, dt, rng);
}

fn camera_follow_system(
    state: Res<SimState>,
    mut q_camera: Query<&mut Transform, With<Camera2d>>,
) {
    if let Ok(mut transform) = q_camera.get_single_mut() {
        transform.translation.x = state.boat.position.x;
        transform.translation.y = state.boat.position.y;
    }
}

fn camera_zoom_system(
    mut q_camera: Query<&mut OrthographicProjection, With<Camera2d>>,
    mut scroll_evr: EventReader<MouseWheel>,
) {
    if let Ok(mut projection) = q_camera.get_single_mut() {
        for ev in scroll_evr.read() {
            let zoom_delta = match ev.unit {
                MouseScrollUnit::Line => -ev.y * 0.1,
                MouseScrollUnit::Pixel => -ev.y * 0.005,
            };
            let log_scale = projection.scale.ln() + zoom_delta;
            projection.scale = log_scale.exp().clamp(0.2, 5.0);
        }
    }
}

fn hud_system(
    mut contexts: EguiContexts,
    config: Res<SimConfig>,
    physics: Res<PhysicsModel>,
    mut state: ResMut<SimState>,
) {
    let mut reset = false;

    egui::Window::new("Sailing Simulator")
        .default_size([300.0, 420.0])
        .show(contexts.ctx_mut(), |ui| {
            let boat = &state.boat;
            let wind = &state.wind;

            ui.heading("Boat");
            let speed = boat.speed();
            ui.label(format!("Speed: {:.2} m/s ({:.1} kt)", speed, speed * MS_TO_KNOTS));
            ui.label(format!("Heading: {:.0}°", to_compass_degrees(boat.heading)));
            ui.label(format!("Heel: {:.1}°", rad_to_deg(boat.heel)));
            ui.label(format!("Sheet: {:.0}%", boat.sheet * 100.0));
            ui.label(format!("Sail angle: {:.0}°", rad_to_deg(boat.sail_angle)));
            ui.label(format!("Rudder: {:+.0}", boat.rudder));

            ui.separator();
            ui.heading("Wind");
            ui.label(format!(
                "True: {:.1} m/s from {:.0}°",
                wind.speed,
                to_compass_degrees(wind.direction)
            ));
            let apparent = physics.apparent_wind(boat, wind);
            ui.label(format!(
                "Apparent: {:.1} m/s towards {:.0}°",
                apparent.magnitude(),
                to_compass_degrees(apparent.bearing())
            ));

            ui.separator();
            ui.heading("Waypoint");
            if state.waypoint.active {
                ui.label(format!(
                    "Bearing: {:.0}°",
                    to_compass_degrees(bearing_to(boat.position, state.waypoint.position))
                ));
                ui.label(format!(
                    "Distance: {:.0} m",
                    distance_to(boat.position, state.waypoint.position)
                ));
                ui.label(format!("VMG: {:.2} m/s", vmg(boat, &state.waypoint)));
            }
            ui.label(format!("Reached: {}", state.spawner.reached));

            ui.separator();
            let report = &state.last_report;
            ui.collapsing("Forces", |ui| {
                ui.label(format!("Sail: {:.0} N", report.sail_force.magnitude()));
                ui.label(format!("Drive: {:.0} N", report.drive_force.magnitude()));
                ui.label(format!("Drag: {:.0} N", report.drag_force.magnitude()));
            });

            ui.horizontal(|ui| {
                let label = if state.paused { "Resume" } else { "Pause" };
                if ui.button(label).clicked() {
                    state.paused = !state.paused;
                }
                if ui.button("Reset").clicked() {
                    reset = true;
                }
            });
            ui.label("A/D steer, W/S trim sheet, scroll to zoom");
        });

    if reset {
        info!("Resetting simulation");
        *state = SimState::new(&config);
    }
}
