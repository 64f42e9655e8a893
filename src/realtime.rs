use tracing::debug;

use crate::config::EngineConfig;
use crate::evidence::domain_of;
use crate::models::{SearchHit, SignalAdjustment};

pub const REALTIME_MIN: f32 = -0.3;
pub const REALTIME_MAX: f32 = 0.25;

/// True when the claim uses breaking/urgent framing. Checked before fan-out
/// so the corroboration search is only issued when it matters.
pub fn has_breaking_language(text: &str, cfg: &EngineConfig) -> bool {
    let lower = text.to_lowercase();
    cfg.lexicons.breaking.iter().any(|b| lower.contains(b.as_str()))
}

fn is_official_hit(hit: &SearchHit, cfg: &EngineConfig) -> bool {
    let host = domain_of(&hit.url);
    let official_domain = cfg
        .domains
        .official
        .iter()
        .any(|d| host == d.as_str() || host.ends_with(&format!(".{}", d)))
        || host.ends_with(".gov")
        || host.contains(".gov.");
    let title = hit.title.to_lowercase();
    official_domain
        || title.contains("official statement")
        || title.contains("press release")
        || title.contains("ministry")
}

fn is_breaking_confirmation(hit: &SearchHit, cfg: &EngineConfig) -> bool {
    let host = domain_of(&hit.url);
    let trusted = cfg
        .domains
        .trusted
        .iter()
        .any(|d| host == d.as_str() || host.ends_with(&format!(".{}", d)));
    let title = hit.title.to_lowercase();
    trusted && cfg.lexicons.breaking.iter().any(|b| title.contains(b.as_str()))
}

/// Breaking-news framing with nothing to back it is a fake signal; an
/// official statement in the corroboration results is a strong real signal.
pub fn realtime_corroboration(
    claim_text: &str,
    corroboration: &[SearchHit],
    cfg: &EngineConfig,
) -> SignalAdjustment {
    if !has_breaking_language(claim_text, cfg) {
        return SignalAdjustment::neutral();
    }

    let official = corroboration.iter().any(|h| is_official_hit(h, cfg));
    let confirmed = corroboration
        .iter()
        .any(|h| is_breaking_confirmation(h, cfg));
    debug!(
        "Real-time check - hits={}, official={}, confirmed={}",
        corroboration.len(),
        official,
        confirmed
    );

    if official {
        return SignalAdjustment::bounded(
            -0.25,
            REALTIME_MIN,
            REALTIME_MAX,
            vec!["Official statement found for this breaking claim".to_string()],
        );
    }
    if !confirmed {
        return SignalAdjustment::bounded(
            0.2,
            REALTIME_MIN,
            REALTIME_MAX,
            vec![
                "Breaking-news framing with no official statement or independent confirmation"
                    .to_string(),
            ],
        );
    }
    SignalAdjustment::bounded(
        0.0,
        REALTIME_MIN,
        REALTIME_MAX,
        vec!["Breaking claim corroborated by independent outlets".to_string()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn cfg() -> EngineConfig {
        EngineConfig::default()
    }

    fn hit(title: &str, url: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            url: url.to_string(),
            source: domain_of(url).to_string(),
            snippet: None,
            rating: None,
        }
    }

    #[test]
    fn non_breaking_claim_is_neutral() {
        let out = realtime_corroboration("The budget was presented in parliament", &[], &cfg());
        assert_eq!(out.delta, 0.0);
        assert!(out.reasons.is_empty());
    }

    #[test]
    fn unconfirmed_breaking_claim_is_penalized() {
        let out = realtime_corroboration("BREAKING: all schools closed forever", &[], &cfg());
        assert!((out.delta - 0.2).abs() < 1e-6);
    }

    #[test]
    fn official_statement_flips_the_signal() {
        let hits = vec![hit(
            "Official statement on school closures",
            "https://www.gov.lk/statements/schools",
        )];
        let out = realtime_corroboration("BREAKING: all schools closed", &hits, &cfg());
        assert!((out.delta - (-0.25)).abs() < 1e-6);
    }

    #[test]
    fn independent_breaking_confirmation_is_neutral_with_note() {
        let hits = vec![hit(
            "Breaking: schools to close during storm",
            "https://www.bbc.com/news/x",
        )];
        let out = realtime_corroboration("BREAKING: all schools closed", &hits, &cfg());
        assert_eq!(out.delta, 0.0);
        assert_eq!(out.reasons.len(), 1);
    }

    #[test]
    fn gov_tld_counts_as_official() {
        let h = hit("Advisory", "https://agency.gov/alert");
        assert!(is_official_hit(&h, &cfg()));
        let h2 = hit("Advisory", "https://moh.gov.sg/alert");
        assert!(is_official_hit(&h2, &cfg()));
    }
}
