use std::fmt;
use std::ops::{Add, Sub};

use super::Fixed;

/// Absolute world coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Applies a relative adjustment.
    pub const fn offset_by(self, offset: PointOffset) -> Self {
        Self {
            x: self.x.wrapping_add(offset.dx),
            y: self.y.wrapping_add(offset.dy),
        }
    }

    /// Displaces this point by a fixed-point vector, truncating the fraction.
    pub const fn displaced(self, by: FixedPoint) -> Self {
        Self {
            x: self.x.wrapping_add(by.x.to_int()),
            y: self.y.wrapping_add(by.y.to_int()),
        }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.wrapping_add(rhs.x), self.y.wrapping_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.wrapping_sub(rhs.x), self.y.wrapping_sub(rhs.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Optional relative positional adjustment threaded through dispatch.
///
/// Spawned objects and sparks are placed at their anchor's location plus this
/// offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointOffset {
    pub dx: i32,
    pub dy: i32,
}

impl PointOffset {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// Fixed-point vector used for velocities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedPoint {
    pub x: Fixed,
    pub y: Fixed,
}

impl FixedPoint {
    pub const ZERO: Self = Self {
        x: Fixed::ZERO,
        y: Fixed::ZERO,
    };

    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Multiplies both components by `factor`.
    pub fn scaled(self, factor: Fixed) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Euclidean length, computed with an integer square root.
    pub fn magnitude(self) -> Fixed {
        let x = self.x.raw() as i64;
        let y = self.y.raw() as i64;
        let squared = (x * x + y * y) as u64;
        Fixed::from_raw(isqrt(squared).min(i32::MAX as u64) as i32)
    }

    /// Rescales the vector to `length` while keeping its direction.
    ///
    /// A zero vector stays zero.
    pub fn with_magnitude(self, length: Fixed) -> Self {
        let current = self.magnitude();
        match length.checked_div(current) {
            Some(factor) if current != Fixed::ZERO => self.scaled(factor),
            _ => Self::ZERO,
        }
    }

    /// Caps the magnitude at `limit`.
    pub fn capped(self, limit: Fixed) -> Self {
        if self.magnitude() > limit {
            self.with_magnitude(limit)
        } else {
            self
        }
    }
}

impl Add for FixedPoint {
    type Output = FixedPoint;
    fn add(self, rhs: FixedPoint) -> FixedPoint {
        FixedPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for FixedPoint {
    type Output = FixedPoint;
    fn sub(self, rhs: FixedPoint) -> FixedPoint {
        FixedPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Floor of the square root, Newton iteration on integers only.
fn isqrt(value: u64) -> u64 {
    if value < 2 {
        return value;
    }
    let mut x = value;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isqrt_floors() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(1 << 40), 1 << 20);
    }

    #[test]
    fn magnitude_of_three_four_is_five() {
        let v = FixedPoint::new(Fixed::from_int(3), Fixed::from_int(4));
        assert_eq!(v.magnitude(), Fixed::from_int(5));
    }

    #[test]
    fn capped_shrinks_long_vectors_only() {
        let v = FixedPoint::new(Fixed::from_int(6), Fixed::from_int(8));
        assert_eq!(v.capped(Fixed::from_int(20)), v);
        let capped = v.capped(Fixed::from_int(5));
        assert_eq!(capped.x, Fixed::from_int(3));
        assert_eq!(capped.y, Fixed::from_int(4));
    }

    #[test]
    fn offset_is_applied_componentwise() {
        let p = Point::new(10, -5).offset_by(PointOffset::new(-3, 7));
        assert_eq!(p, Point::new(7, 2));
    }
}
