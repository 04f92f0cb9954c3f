use bevy::prelude::*;

use crate::engine::models::Boat;
use crate::engine::physics::PhysicsModel;
use crate::engine::vector::Vector2D;
use crate::ui::SimState;

/// Spacing of the water grid, m
const GRID_SPACING: f32 = 10.0;
const GRID_EXTENT: f32 = 120.0;
const BEAM: f32 = 1.8;

/// World point of a boat-frame offset: `fore` along the centerline, `side` to starboard.
fn boat_point(boat: &Boat, fore: f32, side: f32) -> Vec2 {
    let forward = boat.heading_vector();
    let starboard = Vector2D::from_bearing(boat.heading + std::f32::consts::FRAC_PI_2);
    (boat.position + forward * fore + starboard * side).into()
}

/// Water grid that scrolls under the boat
pub fn render_water_system(state: Res<SimState>, mut gizmos: Gizmos) {
    let color = Color::srgba(0.6, 0.8, 1.0, 0.15);
    let center = state.boat.position;
    let start_x = ((center.x - GRID_EXTENT) / GRID_SPACING).floor() * GRID_SPACING;
    let start_y = ((center.y - GRID_EXTENT) / GRID_SPACING).floor() * GRID_SPACING;

    let mut x = start_x;
    while x <= center.x + GRID_EXTENT {
        gizmos.line_2d(
            Vec2::new(x, center.y - GRID_EXTENT),
            Vec2::new(x, center.y + GRID_EXTENT),
            color,
        );
        x += GRID_SPACING;
    }

    let mut y = start_y;
    while y <= center.y + GRID_EXTENT {
        gizmos.line_2d(
            Vec2::new(center.x - GRID_EXTENT, y),
            Vec2::new(center.x + GRID_EXTENT, y),
            color,
        );
        y += GRID_SPACING;
    }
}

/// Hull, mast lean, boom and a telltale for the apparent wind
pub fn render_boat_system(state: Res<SimState>, physics: Res<PhysicsModel>, mut gizmos: Gizmos) {
    let boat = &state.boat;
    let half_length = boat.length / 2.0;
    // Seen from above, a heeled hull looks narrower
    let half_beam = BEAM / 2.0 * boat.heel.cos();

    let hull = [
        boat_point(boat, half_length, 0.0),
        boat_point(boat, 0.0, half_beam),
        boat_point(boat, -half_length, half_beam * 0.7),
        boat_point(boat, -half_length, -half_beam * 0.7),
        boat_point(boat, 0.0, -half_beam),
        boat_point(boat, half_length, 0.0),
    ];
    gizmos.linestrip_2d(hull, Color::srgb(0.95, 0.95, 0.9));

    let mast_fore = half_length * 0.3;
    let mast = boat_point(boat, mast_fore, 0.0);
    let masthead = boat_point(boat, mast_fore, 4.0 * boat.heel.sin());
    gizmos.line_2d(mast, masthead, Color::srgb(0.5, 0.4, 0.3));
    gizmos.circle_2d(mast, 0.15, Color::srgb(0.5, 0.4, 0.3));

    let boom_end = mast
        + Vec2::from(Vector2D::from_polar(boat.length * 0.6, boat.heading + boat.sail_angle));
    gizmos.line_2d(mast, boom_end, Color::WHITE);

    let apparent = physics.apparent_wind(boat, &state.wind).normalized();
    gizmos.arrow_2d(
        masthead,
        masthead + Vec2::from(apparent) * 3.0,
        Color::srgb(1.0, 0.3, 0.3),
    );
}

pub fn render_wake_system(state: Res<SimState>, mut gizmos: Gizmos) {
    if state.wake.points.len() < 2 {
        return;
    }
    gizmos.linestrip_2d(
        state.wake.points.iter().map(|p| Vec2::from(*p)),
        Color::srgba(1.0, 1.0, 1.0, 0.4),
    );
}

pub fn render_wind_particles_system(state: Res<SimState>, mut gizmos: Gizmos) {
    let color = Color::srgba(1.0, 1.0, 1.0, 0.25);
    for particle in state.particles.particles.iter().filter(|p| p.alive) {
        gizmos.linestrip_2d(particle.trail.iter().map(|p| Vec2::from(*p)), color);
    }
}

/// Marker on the waypoint and a line to it from the boat
pub fn render_waypoint_system(state: Res<SimState>, mut gizmos: Gizmos) {
    if !state.waypoint.active {
        return;
    }
    let target = Vec2::from(state.waypoint.position);
    gizmos.circle_2d(target, 3.0, Color::srgb(1.0, 0.1, 0.1));
    gizmos.circle_2d(target, 1.0, Color::srgb(1.0, 0.1, 0.1));
    gizmos.line_2d(
        Vec2::from(state.boat.position),
        target,
        Color::srgba(1.0, 1.0, 0.0, 0.5),
    );
}
