use tracing::debug;

use crate::evidence::ClassifiedEvidence;
use crate::heuristics::BaseScore;
use crate::models::{SignalAdjustment, Verdict};

pub const FAKE_THRESHOLD: f32 = 0.65;
pub const REAL_THRESHOLD: f32 = 0.35;
pub const UNCERTAIN_CONFIDENCE: f32 = 0.50;
pub const UNANALYZABLE_CONFIDENCE: f32 = 0.30;
const CONFIDENCE_CAP: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
    pub score: f32,
    pub verdict: Verdict,
    pub confidence: f32,
}

fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Nonlinear confidence from distance to the neutral midpoint. The power
/// curve amplifies confidence toward the extremes; a linear mapping would
/// change calibration at the decision boundaries.
pub fn confidence_from(score: f32) -> f32 {
    let d = ((score - 0.5).abs() * 2.0).clamp(0.0, 1.0);
    (0.5 + 0.5 * d.powf(1.5)).min(CONFIDENCE_CAP)
}

/// Combine the base score and all pre-clamped adjustments, apply the
/// evidence-driven corrections in fixed order, and map to a verdict.
///
/// The corrections run sequentially with a clamp after each step; the order
/// (debunk, multi-support, trusted publisher) is load-bearing because each
/// step sees the previous clamp point.
pub fn aggregate(
    base: &BaseScore,
    adjustments: &[SignalAdjustment],
    evidence: &ClassifiedEvidence,
    trusted_publisher: bool,
) -> Scored {
    // Out-of-range deltas are a programming defect in their analyzer; the
    // widest documented range is [-0.3, 0.4].
    for adj in adjustments {
        debug_assert!(
            (-0.3..=0.4).contains(&adj.delta),
            "adjustment {} outside any documented analyzer range",
            adj.delta
        );
    }

    let sum: f32 = adjustments.iter().map(|a| a.delta).sum();
    let mut score = clamp01(base.score + sum);

    let debunk_count = evidence.debunk.len();
    if debunk_count > 0 {
        score = clamp01(score + 0.2 + 0.05 * debunk_count as f32);
    }
    if evidence.support.len() >= 3 && debunk_count == 0 {
        score = clamp01(score - 0.15);
    }
    if trusted_publisher {
        score = clamp01(score - 0.35);
    }

    let (verdict, confidence) = if base.insufficient {
        (Verdict::Unanalyzable, UNANALYZABLE_CONFIDENCE)
    } else if score >= FAKE_THRESHOLD {
        (Verdict::Fake, confidence_from(score))
    } else if score <= REAL_THRESHOLD {
        (Verdict::Real, confidence_from(score))
    } else {
        (Verdict::Uncertain, UNCERTAIN_CONFIDENCE)
    };

    debug!(
        "Aggregated - score={:.3}, verdict={:?}, confidence={:.2}",
        score, verdict, confidence
    );
    Scored {
        score,
        verdict,
        confidence,
    }
}
