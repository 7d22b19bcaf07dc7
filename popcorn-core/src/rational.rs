use std::fmt;

use serde::{Deserialize, Serialize};

/// Greatest common divisor of two integers, always non-negative.
///
/// Signs are normalised up front, so negative inputs terminate like positive
/// ones. `gcd(a, 0) == |a|` and `gcd(0, 0) == 0`. The result is unsigned
/// because `gcd(i64::MIN, 0)` does not fit in an `i64`.
#[inline]
pub fn gcd(a: i64, b: i64) -> u64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `true` when `gcd(|a|, |b|) == 1`.
#[inline]
pub fn is_coprime(a: i64, b: i64) -> bool {
    gcd(a, b) == 1
}

/// An ordered `numerator / denominator` pair.
///
/// No reduction or sign normalisation is applied; membership in a plot is
/// decided by [`is_coprime`], not by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ratio {
    pub numerator: i64,
    pub denominator: i64,
}

impl Ratio {
    #[inline]
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn is_coprime(self) -> bool {
        is_coprime(self.numerator, self.denominator)
    }
}

impl From<(i64, i64)> for Ratio {
    fn from((numerator, denominator): (i64, i64)) -> Self {
        Self::new(numerator, denominator)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_basic() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(17, 5), 1);
        assert_eq!(gcd(1, 1), 1);
    }

    #[test]
    fn gcd_is_symmetric() {
        for a in -30..=30 {
            for b in -30..=30 {
                assert_eq!(gcd(a, b), gcd(b, a), "gcd({a}, {b})");
            }
        }
    }

    #[test]
    fn gcd_with_zero_is_absolute_value() {
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(-7, 0), 7);
        assert_eq!(gcd(0, -9), 9);
        assert_eq!(gcd(0, 0), 0);
    }

    #[test]
    fn gcd_terminates_for_negative_inputs() {
        assert_eq!(gcd(-12, -18), 6);
        assert_eq!(gcd(12, -18), 6);
        assert_eq!(gcd(-3, 1), 1);
        assert_eq!(gcd(i64::MIN, 0), 1u64 << 63);
        assert_eq!(gcd(i64::MIN, -1), 1);
    }

    #[test]
    fn coprimality() {
        assert!(is_coprime(3, 4));
        assert!(is_coprime(-3, 4));
        assert!(is_coprime(0, 1));
        assert!(!is_coprime(0, 0));
        assert!(!is_coprime(2, 4));
        assert!(is_coprime(1, 0));
    }

    #[test]
    fn ratio_display() {
        assert_eq!(Ratio::new(3, 4).to_string(), "3 / 4");
        assert_eq!(Ratio::from((-1, 2)).to_string(), "-1 / 2");
    }
}
