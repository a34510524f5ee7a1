use core::ops::{Add, Mul, Sub};

/// 2D vector in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector for a dial angle in degrees.
    ///
    /// 0° points to 12 o'clock and angles grow clockwise on screen
    /// (+Y is down), so 90° points to 3 o'clock.
    #[inline]
    pub fn from_dial_angle(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(sin, -cos)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 1e-5
    }

    #[test]
    fn dial_angle_zero_points_up() {
        assert!(close(Vec2::from_dial_angle(0.0), Vec2::new(0.0, -1.0)));
    }

    #[test]
    fn dial_angle_turns_clockwise() {
        assert!(close(Vec2::from_dial_angle(90.0), Vec2::new(1.0, 0.0)));
        assert!(close(Vec2::from_dial_angle(180.0), Vec2::new(0.0, 1.0)));
        assert!(close(Vec2::from_dial_angle(270.0), Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn dial_angle_is_periodic() {
        assert!(close(Vec2::from_dial_angle(540.0), Vec2::from_dial_angle(180.0)));
        assert!(close(Vec2::from_dial_angle(-90.0), Vec2::from_dial_angle(270.0)));
    }

    #[test]
    fn length_of_3_4() {
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
    }
}
