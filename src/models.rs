use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Maximum characters of claim text carried into an `Analysis`.
pub const DISPLAY_TEXT_LIMIT: usize = 280;

/// Number of evidence links of each kind surfaced to callers.
pub const DISPLAY_LINK_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Fake,
    Real,
    Uncertain,
    Unanalyzable,
}

/// The text under evaluation. Immutable once created; the pipeline never
/// mutates a claim mid-flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub text: String,
    pub language: String,
    pub display_text: String,
}

impl Claim {
    pub fn new(text: &str, language: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            language: language.to_string(),
            display_text: truncate_chars(text.trim(), DISPLAY_TEXT_LIMIT),
        }
    }
}

fn truncate_chars(s: &str, limit: usize) -> String {
    if s.chars().count() <= limit {
        return s.to_string();
    }
    let mut out: String = s.chars().take(limit.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// One raw result from a general or fact-check search, before classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
}

/// A classified reference. Each link lands in exactly one of the support or
/// debunk collections; retrieval order is preserved within each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceLink {
    pub title: String,
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    pub confidence: f32, // [0.0, 1.0]
}

/// Output of one context analyzer: a bounded delta plus the reasons it fired.
/// Positive deltas push toward `fake`, negative toward `real`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalAdjustment {
    pub delta: f32,
    pub reasons: Vec<String>,
}

impl SignalAdjustment {
    /// Clamp on construction. The aggregator only sums and applies a final
    /// clamp; every delta is already within its documented range by the time
    /// it gets there.
    pub fn bounded(delta: f32, min: f32, max: f32, reasons: Vec<String>) -> Self {
        Self {
            delta: delta.clamp(min, max),
            reasons,
        }
    }

    /// Zero-impact value used when an analyzer's data source is unavailable.
    pub fn neutral() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpertVerdict {
    True,
    False,
    Misleading,
    Unverified,
}

/// One finding returned by an external fact-checker endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertFinding {
    pub source: String,
    pub verdict: ExpertVerdict,
    pub confidence: f32,
    #[serde(default)]
    pub published_date: Option<String>,
}

/// Calendar periods a catalogued claim tends to recur in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    NewYear,        // Jan
    AprilFestival,  // Apr
    Monsoon,        // May–Sep
    ElectionPeriod, // Oct–Nov
    YearEnd,        // Dec
}

impl Season {
    pub fn contains_month(self, month: u32) -> bool {
        match self {
            Season::NewYear => month == 1,
            Season::AprilFestival => month == 4,
            Season::Monsoon => (5..=9).contains(&month),
            Season::ElectionPeriod => month == 10 || month == 11,
            Season::YearEnd => month == 12,
        }
    }
}

/// A previously confirmed-false claim from the curated catalog. Read-only at
/// evaluation time; the curation process appends, the pipeline never does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalClaimRecord {
    pub text: String,
    pub category: String,
    #[serde(default)]
    pub seasonal: Option<Season>,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// The terminal artifact of one evaluation. Created once, never mutated; a
/// new claim in the same conversation produces a new `Analysis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub analysis_id: String,
    pub claim_text: String,
    pub language: String,
    pub verdict: Verdict,
    pub confidence: f32, // [0.0, 1.0]
    pub explanation: String,
    pub reasons: Vec<String>,
    pub support_links: Vec<EvidenceLink>,
    pub debunk_links: Vec<EvidenceLink>,
    pub evaluated_at: String, // ISO8601
}

pub fn analysis_id(claim_text: &str, language: &str) -> String {
    format!(
        "{:016x}",
        xxh3_64(format!("{}|{}", claim_text, language).as_bytes())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_text_is_bounded() {
        let long = "x".repeat(400);
        let claim = Claim::new(&long, "en");
        assert_eq!(claim.display_text.chars().count(), DISPLAY_TEXT_LIMIT);
        assert!(claim.display_text.ends_with('…'));
        let short = Claim::new("Banks closed tomorrow", "en");
        assert_eq!(short.display_text, "Banks closed tomorrow");
    }

    #[test]
    fn bounded_adjustment_clamps_both_ends() {
        let high = SignalAdjustment::bounded(0.9, -0.25, 0.30, vec![]);
        assert_eq!(high.delta, 0.30);
        let low = SignalAdjustment::bounded(-0.9, -0.25, 0.30, vec![]);
        assert_eq!(low.delta, -0.25);
        let inside = SignalAdjustment::bounded(0.1, -0.25, 0.30, vec![]);
        assert_eq!(inside.delta, 0.1);
    }

    #[test]
    fn analysis_id_is_stable() {
        assert_eq!(analysis_id("claim", "en"), analysis_id("claim", "en"));
        assert_ne!(analysis_id("claim", "en"), analysis_id("claim", "si"));
    }

    #[test]
    fn verdict_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Verdict::Fake).unwrap(), "\"fake\"");
        assert_eq!(
            serde_json::to_string(&Verdict::Unanalyzable).unwrap(),
            "\"unanalyzable\""
        );
    }

    #[test]
    fn season_month_ranges() {
        assert!(Season::Monsoon.contains_month(7));
        assert!(!Season::Monsoon.contains_month(12));
        assert!(Season::ElectionPeriod.contains_month(10));
    }
}
