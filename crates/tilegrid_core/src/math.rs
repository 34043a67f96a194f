//! Fixed-point math utilities for deterministic simulation.
//!
//! Spell modifiers are tuned as percentages but applied as fixed-point
//! multipliers so every client truncates identically.

use fixed::types::I32F32;

/// Fixed-point number type for all simulation math.
///
/// Uses 32 bits for integer part and 32 bits for fractional part.
pub type Fixed = I32F32;

/// Convert a percentage (100 = 100%) into a fixed-point multiplier.
#[must_use]
pub fn percent(value: u16) -> Fixed {
    Fixed::from_num(value) / Fixed::from_num(100)
}

/// Scale a small unsigned amount by a fixed-point factor.
///
/// The result is truncated toward zero and saturates at `u8::MAX`.
#[must_use]
pub fn scale_amount(amount: u8, factor: Fixed) -> u8 {
    let scaled = (Fixed::from_num(amount) * factor).to_num::<i64>();
    scaled.clamp(0, i64::from(u8::MAX)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_conversion() {
        assert_eq!(percent(100), Fixed::ONE);
        assert_eq!(percent(50), Fixed::from_num(0.5));
        assert_eq!(percent(250), Fixed::from_num(2.5));
        assert_eq!(percent(0), Fixed::ZERO);
    }

    #[test]
    fn test_scale_amount_truncates() {
        assert_eq!(scale_amount(10, percent(50)), 5);
        assert_eq!(scale_amount(7, percent(50)), 3);
        assert_eq!(scale_amount(3, percent(33)), 0);
        assert_eq!(scale_amount(10, percent(150)), 15);
    }

    #[test]
    fn test_scale_amount_saturates() {
        assert_eq!(scale_amount(200, percent(300)), u8::MAX);
        assert_eq!(scale_amount(0, percent(300)), 0);
    }
}
