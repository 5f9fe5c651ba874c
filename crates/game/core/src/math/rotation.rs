//! Integer trigonometry over whole degrees.
//!
//! Directions are stored as degrees in `0..360`. Sine and cosine come from a
//! quarter-wave table scaled by 256 so every platform agrees bit for bit.

use super::{Fixed, FixedPoint};

pub const FULL_CIRCLE: i32 = 360;

/// `sin(a) * 256` for `a` in `0..=90`.
const SINE_QUARTER: [i32; 91] = [
    0, 4, 9, 13, 18, 22, 27, 31, 36, 40, 44, 49, 53, 58, 62, 66, 71, 75, 79, 83, 88, 92, 96, 100,
    104, 108, 112, 116, 120, 124, 128, 132, 136, 139, 143, 147, 150, 154, 158, 161, 165, 168, 171,
    175, 178, 181, 184, 187, 190, 193, 196, 199, 202, 204, 207, 210, 212, 215, 217, 219, 222, 224,
    226, 228, 230, 232, 234, 236, 237, 239, 241, 242, 243, 245, 246, 247, 248, 249, 250, 251, 252,
    253, 254, 254, 255, 255, 255, 256, 256, 256, 256,
];

/// Folds any angle into `0..360`.
#[inline]
pub const fn normalize(degrees: i32) -> i32 {
    degrees.rem_euclid(FULL_CIRCLE)
}

pub fn sin(degrees: i32) -> Fixed {
    let a = normalize(degrees) as usize;
    let raw = match a {
        0..=90 => SINE_QUARTER[a],
        91..=180 => SINE_QUARTER[180 - a],
        181..=270 => -SINE_QUARTER[a - 180],
        _ => -SINE_QUARTER[360 - a],
    };
    Fixed::from_raw(raw)
}

pub fn cos(degrees: i32) -> Fixed {
    sin(degrees.wrapping_add(90))
}

/// Unit vector pointing along `degrees` (0 is +x, 90 is +y).
pub fn unit_vector(degrees: i32) -> FixedPoint {
    FixedPoint::new(cos(degrees), sin(degrees))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_negative_angles() {
        assert_eq!(normalize(-90), 270);
        assert_eq!(normalize(720), 0);
        assert_eq!(normalize(359), 359);
    }

    #[test]
    fn quadrants_follow_sign_rules() {
        assert_eq!(sin(0).raw(), 0);
        assert_eq!(sin(90).raw(), 256);
        assert_eq!(sin(150).raw(), 128);
        assert_eq!(sin(210).raw(), -128);
        assert_eq!(sin(330).raw(), -128);
        assert_eq!(cos(0).raw(), 256);
        assert_eq!(cos(180).raw(), -256);
    }

    #[test]
    fn unit_vector_for_right_angle_points_up() {
        let v = unit_vector(90);
        assert_eq!(v.x, Fixed::ZERO);
        assert_eq!(v.y, Fixed::ONE);
    }
}
