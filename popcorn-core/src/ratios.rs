use std::iter::FusedIterator;

use crate::rational::{is_coprime, Ratio};

/// Upper bound on the numerator for a given denominator.
#[derive(Debug, Clone, Copy)]
pub enum NumeratorLimit {
    /// `i <= j`: the triangular enumeration of `[0, 1]`.
    Denominator,
    /// `i <= n` for every row.
    Constant(i64),
    Custom(fn(i64) -> i64),
}

impl NumeratorLimit {
    #[inline]
    pub fn max_for(self, denominator: i64) -> i64 {
        match self {
            Self::Denominator => denominator,
            Self::Constant(n) => n,
            Self::Custom(f) => f(denominator),
        }
    }
}

/// Lazy enumeration of coprime pairs `(i, j)`.
///
/// For each denominator `j` in `min_den..=max_den`, yields every numerator
/// `i` in `min_num..=limit(j)` with `gcd(i, j) == 1`. Order is increasing `j`,
/// then increasing `i`; colour schemes may rely on it. Cloning before the
/// first `next()` (or calling [`restart`](Self::restart)) replays the sequence.
#[derive(Debug, Clone)]
pub struct Ratios {
    min_num: i64,
    min_den: i64,
    max_den: i64,
    limit: NumeratorLimit,
    i: i64,
    j: i64,
    row_max: i64,
}

impl Ratios {
    pub fn new(min_num: i64, min_den: i64, limit: NumeratorLimit, max_den: i64) -> Self {
        Self {
            min_num,
            min_den,
            max_den,
            limit,
            i: min_num,
            j: min_den,
            row_max: limit.max_for(min_den),
        }
    }

    /// Rewind to the first pair.
    pub fn restart(&mut self) {
        *self = Self::new(self.min_num, self.min_den, self.limit, self.max_den);
    }
}

impl Iterator for Ratios {
    type Item = Ratio;

    fn next(&mut self) -> Option<Ratio> {
        loop {
            if self.j > self.max_den {
                return None;
            }
            if self.i > self.row_max {
                self.j += 1;
                self.i = self.min_num;
                self.row_max = self.limit.max_for(self.j);
                continue;
            }
            let i = self.i;
            self.i += 1;
            if is_coprime(i, self.j) {
                return Some(Ratio::new(i, self.j));
            }
        }
    }
}

impl FusedIterator for Ratios {}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(it: Ratios) -> Vec<(i64, i64)> {
        it.map(|r| (r.numerator, r.denominator)).collect()
    }

    #[test]
    fn triangular_enumeration() {
        let got = pairs(Ratios::new(0, 1, NumeratorLimit::Denominator, 5));
        assert_eq!(
            got,
            vec![
                (0, 1),
                (1, 1),
                (1, 2),
                (1, 3),
                (2, 3),
                (1, 4),
                (3, 4),
                (1, 5),
                (2, 5),
                (3, 5),
                (4, 5)
            ]
        );
    }

    #[test]
    fn constant_limit_is_symmetric() {
        let got = pairs(Ratios::new(-2, 1, NumeratorLimit::Constant(2), 2));
        assert_eq!(
            got,
            vec![(-2, 1), (-1, 1), (0, 1), (1, 1), (2, 1), (-1, 2), (1, 2)]
        );
    }

    #[test]
    fn custom_limit() {
        let got = pairs(Ratios::new(1, 1, NumeratorLimit::Custom(|j| 2 * j), 2));
        assert_eq!(got, vec![(1, 1), (2, 1), (1, 2), (3, 2)]);
    }

    #[test]
    fn empty_when_bounds_are_inverted() {
        assert_eq!(Ratios::new(0, 5, NumeratorLimit::Denominator, 4).count(), 0);
        assert_eq!(Ratios::new(3, 1, NumeratorLimit::Constant(2), 4).count(), 0);
    }

    #[test]
    fn restart_replays_sequence() {
        let mut it = Ratios::new(0, 1, NumeratorLimit::Denominator, 20);
        let first: Vec<_> = it.by_ref().take(10).collect();
        it.restart();
        let again: Vec<_> = it.take(10).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn ordering_is_by_denominator_then_numerator() {
        let all: Vec<_> = Ratios::new(-30, 1, NumeratorLimit::Constant(30), 30).collect();
        for w in all.windows(2) {
            let (a, b) = (w[0], w[1]);
            assert!(
                (a.denominator, a.numerator) < (b.denominator, b.numerator),
                "{a} then {b}"
            );
        }
    }

    #[test]
    fn fused_after_exhaustion() {
        let mut it = Ratios::new(0, 1, NumeratorLimit::Denominator, 1);
        assert_eq!(it.by_ref().count(), 2);
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }
}
