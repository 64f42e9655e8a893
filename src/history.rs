use chrono::{Datelike, NaiveDate};
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::config::Catalog;
use crate::models::SignalAdjustment;

pub const HISTORY_MIN: f32 = 0.0;
pub const HISTORY_MAX: f32 = 0.35;

/// Normalized word set for similarity: NFC fold, lowercase, alphanumeric
/// tokens of length >= 3.
pub fn claim_tokens(s: &str) -> BTreeSet<String> {
    let folded: String = s.nfc().collect();
    let mut out = BTreeSet::new();
    for t in folded.split(|c: char| !c.is_alphanumeric()) {
        if t.chars().count() >= 3 {
            out.insert(t.to_lowercase());
        }
    }
    out
}

pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f32 {
    let union = a.union(b).count() as f32;
    if union == 0.0 {
        return 0.0;
    }
    a.intersection(b).count() as f32 / union
}

/// Word-overlap similarity of the claim against every catalog entry, taking
/// the best match. Catalog scans are the CPU bottleneck, so they run on the
/// rayon pool; the catalog itself is read-only.
pub fn historical_pattern(text: &str, catalog: &Catalog, today: NaiveDate) -> SignalAdjustment {
    if catalog.entries.is_empty() {
        return SignalAdjustment::neutral();
    }

    let tokens = claim_tokens(text);
    let best = catalog
        .entries
        .par_iter()
        .map(|entry| (jaccard(&tokens, &claim_tokens(&entry.text)), entry))
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let Some((similarity, entry)) = best else {
        return SignalAdjustment::neutral();
    };
    debug!(
        "Historical scan - best_similarity={:.2}, category={}",
        similarity, entry.category
    );

    let mut delta = 0.0f32;
    let mut reasons = Vec::new();

    if similarity > 0.6 {
        delta += 0.25;
        reasons.push(format!(
            "Closely matches a recurring debunked claim pattern (category: {})",
            entry.category
        ));
    } else if similarity >= 0.4 {
        delta += 0.15;
        reasons.push(format!(
            "Resembles a previously debunked claim (category: {})",
            entry.category
        ));
    }

    if similarity >= 0.4 {
        if let Some(season) = entry.seasonal {
            if season.contains_month(today.month()) {
                delta += 0.10;
                reasons.push(
                    "This claim pattern typically resurfaces in the current period".to_string(),
                );
            }
        }
    }

    SignalAdjustment::bounded(delta, HISTORY_MIN, HISTORY_MAX, reasons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Catalog;
    use crate::models::{HistoricalClaimRecord, Season};
    use proptest::prelude::*;

    fn catalog(entries: Vec<HistoricalClaimRecord>) -> Catalog {
        Catalog {
            version: "test".into(),
            entries,
        }
    }

    fn record(text: &str, seasonal: Option<Season>) -> HistoricalClaimRecord {
        HistoricalClaimRecord {
            text: text.into(),
            category: "test".into(),
            seasonal,
            sources: vec![],
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn near_identical_claim_gets_strong_adjustment() {
        let cat = catalog(vec![record(
            "banks will stop all withdrawals and freeze accounts tomorrow",
            None,
        )]);
        let out = historical_pattern(
            "banks will stop all withdrawals and freeze accounts tomorrow morning",
            &cat,
            day(2026, 3, 1),
        );
        assert!((out.delta - 0.25).abs() < 1e-6);
        assert!(out.reasons[0].contains("recurring"));
    }

    #[test]
    fn partial_overlap_gets_moderate_adjustment() {
        let cat = catalog(vec![record(
            "banks will stop all withdrawals and freeze accounts tomorrow",
            None,
        )]);
        let out = historical_pattern(
            "banks will stop withdrawals tomorrow across many branches",
            &cat,
            day(2026, 3, 1),
        );
        assert!((out.delta - 0.15).abs() < 1e-6, "delta {}", out.delta);
    }

    #[test]
    fn unrelated_claim_is_neutral() {
        let cat = catalog(vec![record("banks will stop withdrawals", None)]);
        let out = historical_pattern(
            "the cricket team announced its squad for the tour",
            &cat,
            day(2026, 3, 1),
        );
        assert_eq!(out.delta, 0.0);
        assert!(out.reasons.is_empty());
    }

    #[test]
    fn seasonal_bonus_applies_only_in_period() {
        let cat = catalog(vec![record(
            "ballot papers pre marked before election day discovered",
            Some(Season::ElectionPeriod),
        )]);
        let claim = "ballot papers pre marked before election day discovered again";
        let in_season = historical_pattern(claim, &cat, day(2026, 10, 15));
        let off_season = historical_pattern(claim, &cat, day(2026, 3, 15));
        assert!((in_season.delta - 0.35).abs() < 1e-6);
        assert!((off_season.delta - 0.25).abs() < 1e-6);
    }

    #[test]
    fn empty_catalog_is_neutral() {
        let out = historical_pattern("anything at all here", &catalog(vec![]), day(2026, 1, 1));
        assert_eq!(out.delta, 0.0);
    }

    proptest! {
        #[test]
        fn adjustment_stays_in_documented_range(text in ".{0,300}") {
            let cat = Catalog::default();
            let out = historical_pattern(&text, &cat, day(2026, 10, 15));
            prop_assert!(out.delta >= HISTORY_MIN && out.delta <= HISTORY_MAX);
        }

        #[test]
        fn jaccard_is_bounded_and_symmetric(a in ".{0,80}", b in ".{0,80}") {
            let (ta, tb) = (claim_tokens(&a), claim_tokens(&b));
            let s = jaccard(&ta, &tb);
            prop_assert!((0.0..=1.0).contains(&s));
            prop_assert_eq!(s, jaccard(&tb, &ta));
        }
    }
}
