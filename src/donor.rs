//! Donor identity tracking.
//!
//! A donor is a contributor name plus a 5-character zip code. The ledger keeps
//! the earliest calendar year seen for each donor, which is all that is needed
//! to decide whether a later contribution comes from a repeat donor.

use std::collections::HashMap;

/// Per-donor state, kept for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DonorState {
    /// Earliest calendar year observed for this donor so far.
    pub min_year: i32,
}

impl DonorState {
    /// Creates state for a donor first seen in `year`.
    pub fn new(year: i32) -> Self {
        DonorState { min_year: year }
    }

    /// Registers a contribution in `year`.
    ///
    /// Returns `true` if an earlier calendar year has already been seen. A
    /// contribution older than everything seen lowers `min_year` but is not a
    /// repeat itself.
    pub fn observe(&mut self, year: i32) -> bool {
        let is_repeat = year > self.min_year;
        if year < self.min_year {
            self.min_year = year;
        }
        is_repeat
    }
}

/// Earliest contribution year per donor identity.
#[derive(Debug, Default)]
pub struct DonorLedger {
    donors: HashMap<String, DonorState>,
}

impl DonorLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a contribution and reports whether the donor is a repeat donor.
    ///
    /// The first contribution for an identity is never a repeat.
    pub fn record_donation(&mut self, donor: &str, year: i32) -> bool {
        match self.donors.get_mut(donor) {
            Some(state) => state.observe(year),
            None => {
                self.donors.insert(donor.to_string(), DonorState::new(year));
                false
            }
        }
    }

    /// Returns the state tracked for a donor.
    pub fn get(&self, donor: &str) -> Option<&DonorState> {
        self.donors.get(donor)
    }

    /// Number of distinct donor identities seen.
    pub fn len(&self) -> usize {
        self.donors.len()
    }

    /// Returns `true` if no donor has been recorded.
    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }
}
