//! Running per-recipient statistics over repeat-donor contributions.

use crate::percentile::{nearest_rank, Percentile};
use std::collections::HashMap;
use std::fmt;

/// Aggregation bucket: recipient committee, 5-character zip code, calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipientKey {
    pub committee_id: String,
    pub zip_code: String,
    pub year: i32,
}

impl RecipientKey {
    pub fn new(committee_id: impl Into<String>, zip_code: impl Into<String>, year: i32) -> Self {
        RecipientKey {
            committee_id: committee_id.into(),
            zip_code: zip_code.into(),
            year,
        }
    }
}

/// Repeat-donor amounts received under one [`RecipientKey`].
///
/// # Invariants
///
/// - `amounts` is append-only and kept in arrival order
/// - `total` always equals the sum of `amounts`, widened so it cannot overflow
#[derive(Debug, Clone)]
pub struct RecipientAggregate {
    amounts: Vec<i64>,
    total: i128,
}

impl RecipientAggregate {
    /// Creates an aggregate holding a single amount.
    pub fn new(amount: i64) -> Self {
        RecipientAggregate {
            amounts: vec![amount],
            total: i128::from(amount),
        }
    }

    /// Appends an amount.
    pub fn push(&mut self, amount: i64) {
        self.amounts.push(amount);
        self.total += i128::from(amount);
    }

    /// Amounts in arrival order.
    pub fn amounts(&self) -> &[i64] {
        &self.amounts
    }

    /// Statistics over every amount appended so far.
    ///
    /// The percentile is recomputed over the full sequence on each call since
    /// a new amount can shift the rank of any earlier one. Returns `None` only
    /// for an aggregate without amounts.
    pub fn stats(&self, percentile: Percentile) -> Option<RecipientStats> {
        Some(RecipientStats {
            percentile_value: nearest_rank(&self.amounts, percentile)?,
            total: self.total,
            count: self.amounts.len(),
        })
    }
}

/// Running statistics for a bucket, as of the latest contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipientStats {
    pub percentile_value: i64,
    pub total: i128,
    pub count: usize,
}

impl fmt::Display for RecipientStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.percentile_value, self.total, self.count)
    }
}

/// All recipient buckets seen so far.
#[derive(Debug, Default)]
pub struct RecipientAggregator {
    recipients: HashMap<RecipientKey, RecipientAggregate>,
}

impl RecipientAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a repeat-donor amount to its bucket and returns the bucket's
    /// updated statistics.
    ///
    /// Always `Some`: a bucket is created holding the amount that created it.
    pub fn record_repeat_donation(
        &mut self,
        key: RecipientKey,
        amount: i64,
        percentile: Percentile,
    ) -> Option<RecipientStats> {
        self.recipients
            .entry(key)
            .and_modify(|aggregate| aggregate.push(amount))
            .or_insert_with(|| RecipientAggregate::new(amount))
            .stats(percentile)
    }

    /// Returns the aggregate for a bucket.
    pub fn get(&self, key: &RecipientKey) -> Option<&RecipientAggregate> {
        self.recipients.get(key)
    }

    /// Number of distinct buckets.
    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    /// Returns `true` if no repeat donation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }
}
