use crate::engine::config::PhysicsConfig;
use crate::engine::vector::Vector2D;

/// Quadratic hull drag, opposing the velocity.
pub fn hull_drag(config: &PhysicsConfig, velocity: Vector2D) -> Vector2D {
    let speed = velocity.magnitude();
    if speed < config.min_drag_speed {
        return Vector2D::ZERO;
    }

    let drag_magnitude =
        0.5 * config.water_density * config.drag_coefficient * config.hull_area * speed * speed;
    -velocity.normalized() * drag_magnitude
}
