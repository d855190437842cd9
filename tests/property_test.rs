//! Property tests for repeat-donor detection and order independence of the
//! final per-bucket statistics.

use donation_analytics::{
    nearest_rank, ContributionRecord, DonationAnalytics, DonorLedger, Percentile,
    RecipientStats,
};
use proptest::{collection::vec, prelude::*, sample::Index};
use rust_decimal::Decimal;
use std::collections::HashMap;

prop_compose! {
    /// Percentile with up to two decimal places in `[0, 100]`
    fn percentile()(hundredths in 0u32..=10_000) -> Percentile {
        Percentile::new(Decimal::new(hundredths as i64, 2)).unwrap()
    }
}

prop_compose! {
    /// A repeat donation: (donor, committee, zip, amount), always dated 2018
    fn repeat_donation()(
        donor in 0u8..6,
        committee in 0u8..3,
        zip in 0u8..2,
        amount in -500i64..5_000,
    ) -> (u8, u8, u8, i64) {
        (donor, committee, zip, amount)
    }
}

fn contribution(donor: u8, committee: u8, zip: u8, year: i32, amount: i64) -> ContributionRecord {
    ContributionRecord {
        committee_id: format!("C{committee:08}"),
        name: format!("DONOR, NUMBER {donor}"),
        zip_code: format!("{:05}", 10_000 + u32::from(zip)),
        year,
        amount,
    }
}

/// Feeds a 2017 contribution for every donor, then the 2018 repeat donations in
/// the given order. Returns the last statistics seen for each bucket.
fn final_stats(
    percentile: Percentile,
    donations: &[(u8, u8, u8, i64)],
) -> HashMap<(String, String, i32), RecipientStats> {
    let mut engine = DonationAnalytics::new(percentile);
    for donor in 0..6 {
        for zip in 0..2 {
            engine.process_contribution(contribution(donor, 0, zip, 2017, 1));
        }
    }
    for &(donor, committee, zip, amount) in donations {
        engine.process_contribution(contribution(donor, committee, zip, 2018, amount));
    }

    engine
        .summaries()
        .iter()
        .map(|s| {
            let key = (s.key.committee_id.clone(), s.key.zip_code.clone(), s.key.year);
            (key, s.stats)
        })
        .collect()
}

fn shuffled<T: Clone>(items: &[T], swaps: &[(Index, Index)]) -> Vec<T> {
    let mut items = items.to_vec();
    if !items.is_empty() {
        for (a, b) in swaps {
            let (a, b) = (a.index(items.len()), b.index(items.len()));
            items.swap(a, b);
        }
    }
    items
}

proptest! {
    #[test]
    fn first_record_is_never_repeat(
        years in vec((0u8..20, 1990i32..2030), 1..200),
    ) {
        let mut ledger = DonorLedger::new();
        let mut seen = std::collections::HashSet::new();
        for (donor, year) in years {
            let key = format!("DONOR {donor}12345");
            let is_repeat = ledger.record_donation(&key, year);
            if seen.insert(key) {
                prop_assert!(!is_repeat);
            }
        }
    }

    #[test]
    fn repeat_iff_year_after_earliest_seen(
        years in vec(1990i32..2030, 1..100),
    ) {
        let mut ledger = DonorLedger::new();
        let mut earliest: Option<i32> = None;
        for year in years {
            let expected = earliest.map_or(false, |min| year > min);
            prop_assert_eq!(ledger.record_donation("A12345", year), expected);
            earliest = Some(earliest.map_or(year, |min| min.min(year)));
        }
    }

    #[test]
    fn nearest_rank_selects_an_element(
        amounts in vec(-1_000i64..1_000, 1..100),
        p in percentile(),
    ) {
        let value = nearest_rank(&amounts, p).unwrap();
        prop_assert!(amounts.contains(&value));

        let mut sorted = amounts.clone();
        sorted.sort_unstable();
        prop_assert!(sorted[0] <= value && value <= sorted[sorted.len() - 1]);
    }

    #[test]
    fn nearest_rank_is_monotonic_in_percentile(
        amounts in vec(-1_000i64..1_000, 1..100),
        p1 in percentile(),
        p2 in percentile(),
    ) {
        let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        prop_assert!(nearest_rank(&amounts, lo) <= nearest_rank(&amounts, hi));
    }

    #[test]
    fn final_stats_are_independent_of_arrival_order(
        donations in vec(repeat_donation(), 1..150),
        swaps in vec(any::<(Index, Index)>(), 0..300),
        p in percentile(),
    ) {
        let reordered = shuffled(&donations, &swaps);
        prop_assert_eq!(final_stats(p, &donations), final_stats(p, &reordered));
    }

    #[test]
    fn one_summary_per_repeat_donation(
        donations in vec(repeat_donation(), 0..150),
        p in percentile(),
    ) {
        let mut engine = DonationAnalytics::new(p);
        for donor in 0..6 {
            for zip in 0..2 {
                prop_assert!(engine.process_contribution(contribution(donor, 0, zip, 2017, 1)).is_none());
            }
        }
        for &(donor, committee, zip, amount) in &donations {
            prop_assert!(engine.process_contribution(contribution(donor, committee, zip, 2018, amount)).is_some());
        }
        prop_assert_eq!(engine.summaries().len(), donations.len());

        let total: i128 = donations.iter().map(|d| i128::from(d.3)).sum();
        let reported: i128 = final_stats(p, &donations).values().map(|s| s.total).sum();
        prop_assert_eq!(reported, total);
    }
}
