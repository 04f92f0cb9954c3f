use std::f32::consts::{PI, TAU};

pub fn deg_to_rad(deg: f32) -> f32 {
    deg * PI / 180.0
}

pub fn rad_to_deg(rad: f32) -> f32 {
    rad * 180.0 / PI
}

/// Wraps an angle into (−π, π].
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return angle;
    }
    let mut wrapped = angle % TAU;
    if wrapped > PI {
        wrapped -= TAU;
    } else if wrapped <= -PI {
        wrapped += TAU;
    }
    wrapped
}

/// Converts an angle in radians to compass degrees in [0, 360).
pub fn to_compass_degrees(angle: f32) -> f32 {
    let deg = rad_to_deg(angle) % 360.0;
    if deg < 0.0 { deg + 360.0 } else { deg }
}

/// Angle between the bow and the wind's source, radians in [0, π].
///
/// Port and starboard tacks give the same value, matching how polars are tabulated.
pub fn true_wind_angle(heading: f32, wind_direction: f32) -> f32 {
    normalize_angle(heading - wind_direction).abs()
}
