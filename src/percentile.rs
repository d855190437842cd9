//! Percentile configuration and the nearest-rank percentile estimator.
//!
//! The percentile is held as an exact `rust_decimal::Decimal` so that the rank
//! `p / 100 * (n - 1)` is computed without binary floating-point error. That
//! keeps the half-to-even tie rule exact: a fractional part of `.5` is detected
//! as `.5`, never as `.4999…`.

use crate::error::{EngineError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A percentile in the closed range `[0, 100]`.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use donation_analytics::Percentile;
///
/// let p = Percentile::from_str("50.5").unwrap();
/// assert_eq!(p.to_string(), "50.5");
/// assert!(Percentile::from_str("101").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percentile(Decimal);

impl Percentile {
    /// Lowest accepted percentile.
    pub const MIN: Self = Percentile(Decimal::ZERO);

    /// Highest accepted percentile.
    pub const MAX: Self = Percentile(Decimal::ONE_HUNDRED);

    /// Creates a percentile from a decimal, rejecting values outside `[0, 100]`.
    pub fn new(value: Decimal) -> Result<Self> {
        if value < Self::MIN.0 || value > Self::MAX.0 {
            return Err(EngineError::InvalidPercentile {
                value: value.to_string(),
                reason: "must be between 0 and 100".to_string(),
            });
        }
        Ok(Percentile(value.normalize()))
    }

    /// Reads the percentile from a file holding a single number.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Percentile::from_str(&contents)
    }

    /// Zero-based index into an ascending sequence of `len` elements.
    ///
    /// `len` must be non-zero.
    fn rank(&self, len: usize) -> usize {
        let last = len - 1;
        let exact = self.0 / Decimal::ONE_HUNDRED * Decimal::from(last);
        exact
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_usize()
            .map_or(last, |r| r.min(last))
    }
}

impl FromStr for Percentile {
    type Err = EngineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = Decimal::from_str(trimmed).map_err(|e| EngineError::InvalidPercentile {
            value: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        Percentile::new(value)
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Nearest-rank percentile of `amounts`.
///
/// The amounts are ranked over a sorted copy; the caller's slice keeps its
/// arrival order. Returns `None` for an empty slice.
///
/// ```
/// use std::str::FromStr;
/// use donation_analytics::{nearest_rank, Percentile};
///
/// let median = Percentile::from_str("50").unwrap();
/// assert_eq!(nearest_rank(&[300, 100, 200], median), Some(200));
/// ```
pub fn nearest_rank(amounts: &[i64], percentile: Percentile) -> Option<i64> {
    match amounts {
        [] => None,
        [only] => Some(*only),
        _ => {
            let mut sorted = amounts.to_vec();
            sorted.sort_unstable();
            Some(sorted[percentile.rank(sorted.len())])
        }
    }
}
