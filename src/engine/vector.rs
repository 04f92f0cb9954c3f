use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A 2D world-frame quantity (position, velocity or force).
///
/// +y is north and bearings are measured clockwise from north, so a unit
/// vector for bearing `a` is `(sin a, cos a)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along a compass bearing (radians).
    pub fn from_bearing(bearing: f32) -> Self {
        Self::new(bearing.sin(), bearing.cos())
    }

    /// Vector of the given length along a compass bearing.
    pub fn from_polar(magnitude: f32, bearing: f32) -> Self {
        Self::from_bearing(bearing) * magnitude
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Zero-length input yields the zero vector.
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self::new(self.x / mag, self.y / mag)
        } else {
            Self::ZERO
        }
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z of the 3D cross).
    pub fn cross(&self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Compass bearing this vector points towards, in (−π, π].
    pub fn bearing(&self) -> f32 {
        self.x.atan2(self.y)
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s)
    }
}

impl Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<Vector2D> for bevy::math::Vec2 {
    fn from(v: Vector2D) -> Self {
        bevy::math::Vec2::new(v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_arithmetic() {
        let a = Vector2D::new(1.0, 2.0);
        let b = Vector2D::new(3.0, -1.0);
        assert_eq!(a + b, Vector2D::new(4.0, 1.0));
        assert_eq!(a - b, Vector2D::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vector2D::new(2.0, 4.0));
        assert_eq!(-a, Vector2D::new(-1.0, -2.0));
        assert_approx_eq!(a.dot(b), 1.0);
        assert_approx_eq!(a.cross(b), -7.0);
    }

    #[test]
    fn test_magnitude_and_normalize() {
        let v = Vector2D::new(3.0, 4.0);
        assert_approx_eq!(v.magnitude(), 5.0);
        let n = v.normalized();
        assert_approx_eq!(n.magnitude(), 1.0);
        assert_approx_eq!(n.x, 0.6);

        // Degenerate input must not produce NaN
        assert_eq!(Vector2D::ZERO.normalized(), Vector2D::ZERO);
    }

    #[test]
    fn test_bearing_convention() {
        // North is +y, east is +x
        let north = Vector2D::from_bearing(0.0);
        assert_approx_eq!(north.x, 0.0);
        assert_approx_eq!(north.y, 1.0);

        let east = Vector2D::from_bearing(FRAC_PI_2);
        assert_approx_eq!(east.x, 1.0);
        assert_approx_eq!(east.y, 0.0);
        assert_approx_eq!(east.bearing(), FRAC_PI_2);

        let south = Vector2D::from_polar(2.0, PI);
        assert_approx_eq!(south.y, -2.0);
    }
}
