//! The [`Rate`] and [`Time`] scalar types.
//!
//! Both wrap an `f64` that is validated at construction: never NaN and
//! never negative. That makes a total order well defined, so both types
//! implement [`Ord`] and can key heaps and sorts directly.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rand::Rng;

use crate::error::{AdvanceError, ValueError};

fn check(quantity: &'static str, value: f64) -> Result<f64, ValueError> {
    if !value.is_finite() {
        return Err(ValueError::NonFinite { quantity, value });
    }
    if value < 0.0 {
        return Err(ValueError::Negative { quantity, value });
    }
    // Normalize -0.0 so equal values have equal bits.
    Ok(value + 0.0)
}

// ── Rate ────────────────────────────────────────────────────────

/// A propensity: the instantaneous probability per unit time that a
/// process fires.
///
/// A rate of zero means the process cannot be selected until its rate
/// changes. The sum of a collection of rates is the system's total rate;
/// a total of zero is the degenerate, terminal condition.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rate(f64);

impl Rate {
    /// The zero rate.
    pub const ZERO: Rate = Rate(0.0);

    /// Construct a rate from a finite, non-negative value.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError`] if `value` is NaN, infinite, or negative.
    pub fn new(value: f64) -> Result<Self, ValueError> {
        check("rate", value).map(Self)
    }

    /// The raw value in events per unit time.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether this rate is exactly zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Sum a collection of rates.
    pub fn total<I: IntoIterator<Item = Rate>>(rates: I) -> Rate {
        rates.into_iter().sum()
    }

    /// Draw an exponentially distributed waiting time with mean `1/rate`.
    ///
    /// Uses inversion: `-ln(U) / rate` with `U` uniform on `(0, 1]`.
    /// Consumes exactly one `f64` from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`AdvanceError::Degenerate`] for a zero rate (the mean
    /// interval is infinite) without consuming randomness, or
    /// [`AdvanceError::InvalidValue`] if the rate is so small that the
    /// interval overflows.
    pub fn sample_interval<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Time, AdvanceError> {
        if self.is_zero() {
            return Err(AdvanceError::Degenerate);
        }
        let u: f64 = rng.random();
        let interval = -(1.0 - u).ln() / self.0;
        Ok(Time::new(interval)?)
    }
}

impl Eq for Rate {}

impl PartialOrd for Rate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for Rate {
    type Output = Rate;

    fn add(self, rhs: Rate) -> Rate {
        Rate(self.0 + rhs.0)
    }
}

impl Sum for Rate {
    fn sum<I: Iterator<Item = Rate>>(iter: I) -> Rate {
        iter.fold(Rate::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Rate> for Rate {
    fn sum<I: Iterator<Item = &'a Rate>>(iter: I) -> Rate {
        iter.copied().sum()
    }
}

impl TryFrom<f64> for Rate {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Rate::new(value)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Time ────────────────────────────────────────────────────────

/// A simulation clock value.
///
/// Simulation time starts at [`Time::ZERO`] and never decreases over a
/// run. [`Time::NEVER`] is a sentinel for "not scheduled": the putative
/// firing time of a process whose rate is zero. It compares greater than
/// every finite time and cannot be produced by [`Time::new`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Time(f64);

impl Time {
    /// The initial clock value.
    pub const ZERO: Time = Time(0.0);

    /// The "never fires" sentinel.
    pub const NEVER: Time = Time(f64::INFINITY);

    /// Construct a time from a finite, non-negative value.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError`] if `value` is NaN, infinite, or negative.
    pub fn new(value: f64) -> Result<Self, ValueError> {
        check("time", value).map(Self)
    }

    /// The raw clock value.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether this is the [`Time::NEVER`] sentinel.
    #[inline]
    pub fn is_never(self) -> bool {
        self.0 == f64::INFINITY
    }

    /// Time elapsed since `earlier`, clamped at zero.
    pub fn since(self, earlier: Time) -> Time {
        if self.is_never() {
            return Time::NEVER;
        }
        Time((self.0 - earlier.0).max(0.0))
    }
}

impl Eq for Time {}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        Time(self.0 + rhs.0)
    }
}

impl TryFrom<f64> for Time {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Time::new(value)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            Rate::new(-1.0),
            Err(ValueError::Negative { quantity: "rate", .. })
        ));
        assert!(matches!(
            Rate::new(f64::NAN),
            Err(ValueError::NonFinite { quantity: "rate", .. })
        ));
        assert!(matches!(
            Rate::new(f64::INFINITY),
            Err(ValueError::NonFinite { .. })
        ));
        assert!(matches!(
            Time::new(-0.5),
            Err(ValueError::Negative { quantity: "time", .. })
        ));
        assert!(Time::new(f64::INFINITY).is_err());
    }

    #[test]
    fn negative_zero_is_normalized() {
        let r = Rate::new(-0.0).unwrap();
        assert!(r.is_zero());
        assert_eq!(r.value().to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn total_sums_rates() {
        let rates = [1.0, 2.5, 0.0, 4.0].map(|v| Rate::new(v).unwrap());
        assert_eq!(Rate::total(rates).value(), 7.5);
        assert_eq!(Rate::total(std::iter::empty()), Rate::ZERO);
        assert_eq!(rates.iter().sum::<Rate>().value(), 7.5);
    }

    #[test]
    fn ordering_ascending_and_descending() {
        let mut rates: Vec<Rate> = [3.0, 0.5, 2.0].iter().map(|&v| Rate::new(v).unwrap()).collect();
        rates.sort();
        assert_eq!(rates.iter().map(|r| r.value()).collect::<Vec<_>>(), vec![0.5, 2.0, 3.0]);
        rates.sort_by(|a, b| b.cmp(a));
        assert_eq!(rates.iter().map(|r| r.value()).collect::<Vec<_>>(), vec![3.0, 2.0, 0.5]);
    }

    #[test]
    fn never_sorts_after_finite_times() {
        let t = Time::new(1e300).unwrap();
        assert!(Time::NEVER > t);
        assert!(Time::NEVER.is_never());
        assert!(!t.is_never());
        assert_eq!(Time::NEVER.since(t), Time::NEVER);
    }

    #[test]
    fn time_arithmetic() {
        let a = Time::new(1.25).unwrap();
        let b = Time::new(0.75).unwrap();
        assert_eq!((a + b).value(), 2.0);
        assert_eq!(a.since(b).value(), 0.5);
        assert_eq!(b.since(a), Time::ZERO);
        assert!(Time::ZERO < b);
    }

    #[test]
    fn zero_rate_interval_is_degenerate() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            Rate::ZERO.sample_interval(&mut rng),
            Err(AdvanceError::Degenerate)
        );
    }

    #[test]
    fn interval_mean_and_median() {
        let rate = Rate::new(2.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(20210501);
        let n = 100_000;
        let mut samples: Vec<f64> = (0..n)
            .map(|_| rate.sample_interval(&mut rng).unwrap().value())
            .collect();

        let mean = samples.iter().sum::<f64>() / n as f64;
        samples.sort_by(f64::total_cmp);
        let median = samples[n / 2];

        assert!((mean - 0.5).abs() < 0.01, "mean {mean}");
        assert!((median - std::f64::consts::LN_2 / 2.0).abs() < 0.01, "median {median}");
    }

    proptest! {
        #[test]
        fn intervals_are_finite_and_non_negative(rate in 1e-6f64..1e6, seed in any::<u64>()) {
            let rate = Rate::new(rate).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..32 {
                let dt = rate.sample_interval(&mut rng).unwrap();
                prop_assert!(dt.value().is_finite());
                prop_assert!(dt >= Time::ZERO);
            }
        }

        #[test]
        fn valid_values_round_trip(v in 0.0f64..1e12) {
            prop_assert_eq!(Rate::new(v).unwrap().value(), v);
            prop_assert_eq!(Time::new(v).unwrap().value(), v);
        }
    }
}
