use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Signed 24.8 fixed-point number (`1.0 == 256`).
///
/// All arithmetic wraps so that debug and release builds produce identical
/// results for replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Fixed(i32);

impl Fixed {
    pub const FRACTION_BITS: u32 = 8;
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1 << Self::FRACTION_BITS);

    /// Wraps a raw 24.8 value as stored in content.
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn from_int(value: i32) -> Self {
        Self(value.wrapping_shl(Self::FRACTION_BITS))
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Integer part, rounded toward negative infinity.
    #[inline]
    pub const fn to_int(self) -> i32 {
        self.0 >> Self::FRACTION_BITS
    }

    #[inline]
    pub const fn abs(self) -> Self {
        Self(self.0.wrapping_abs())
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiplies an integer quantity by this factor, truncating the fraction.
    #[inline]
    pub const fn scale_int(self, value: i32) -> i32 {
        ((value as i64 * self.0 as i64) >> Self::FRACTION_BITS) as i32
    }

    /// Fixed-point division; `None` when dividing by zero.
    pub const fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.0 == 0 {
            return None;
        }
        Some(Self((((self.0 as i64) << Self::FRACTION_BITS) / rhs.0 as i64) as i32))
    }

    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self(self.0.clamp(min.0, max.0))
    }
}

impl Add for Fixed {
    type Output = Fixed;
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Fixed) {
        *self = *self + rhs;
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Fixed) {
        *self = *self - rhs;
    }
}

impl Mul for Fixed {
    type Output = Fixed;
    fn mul(self, rhs: Fixed) -> Fixed {
        Fixed(((self.0 as i64 * rhs.0 as i64) >> Self::FRACTION_BITS) as i32)
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    fn neg(self) -> Fixed {
        Fixed(self.0.wrapping_neg())
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.0 as i64;
        let sign = if raw < 0 { "-" } else { "" };
        let magnitude = raw.unsigned_abs();
        let whole = magnitude >> Self::FRACTION_BITS;
        let frac = (magnitude & 0xff) * 1000 / 256;
        write!(f, "{sign}{whole}.{frac:03}")
    }
}

/// Half-open fixed-point interval `[minimum, minimum + range)` used by
/// randomized alterations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedRange {
    pub minimum: Fixed,
    pub range: Fixed,
}

impl FixedRange {
    pub const fn new(minimum: Fixed, range: Fixed) -> Self {
        Self { minimum, range }
    }

    pub const fn exact(value: Fixed) -> Self {
        Self {
            minimum: value,
            range: Fixed::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplication_keeps_eight_fraction_bits() {
        let half = Fixed::from_raw(128);
        let three = Fixed::from_int(3);
        assert_eq!((half * three).raw(), 384);
        assert_eq!((Fixed::from_raw(-128) * three).raw(), -384);
    }

    #[test]
    fn to_int_floors() {
        assert_eq!(Fixed::from_raw(383).to_int(), 1);
        assert_eq!(Fixed::from_raw(-1).to_int(), -1);
    }

    #[test]
    fn scale_int_applies_percentage() {
        // 0.25 of 400
        assert_eq!(Fixed::from_raw(64).scale_int(400), 100);
    }

    #[test]
    fn checked_div_rejects_zero() {
        assert_eq!(Fixed::ONE.checked_div(Fixed::ZERO), None);
        assert_eq!(
            Fixed::from_int(3).checked_div(Fixed::from_int(2)),
            Some(Fixed::from_raw(384))
        );
    }

    #[test]
    fn display_renders_decimal() {
        assert_eq!(Fixed::from_raw(384).to_string(), "1.500");
        assert_eq!(Fixed::from_raw(-64).to_string(), "-0.250");
    }
}
