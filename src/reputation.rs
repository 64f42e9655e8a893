use tracing::debug;

use crate::config::EngineConfig;
use crate::evidence::domain_of;
use crate::models::SignalAdjustment;

pub const REPUTATION_MIN: f32 = -0.25;
pub const REPUTATION_MAX: f32 = 0.30;

/// URLs cited in the claim text itself. The reputation scorer reads only
/// these, never retrieved evidence, so it stays independent of the searches.
pub fn extract_urls(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|t| t.starts_with("http://") || t.starts_with("https://") || t.starts_with("www."))
        .map(|t| t.trim_end_matches(['.', ',', ')', ']', '!', '?']).to_string())
        .collect()
}

fn has_digit_run(domain: &str, len: usize) -> bool {
    let mut run = 0usize;
    for c in domain.chars() {
        if c.is_ascii_digit() {
            run += 1;
            if run >= len {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

fn is_listed(host: &str, list: &[String]) -> bool {
    list.iter()
        .any(|d| host == d.as_str() || host.ends_with(&format!(".{}", d)))
}

/// Trust score for a single cited URL, in [0,1].
pub fn url_trust(url: &str, cfg: &EngineConfig) -> f32 {
    let host = domain_of(url);
    let mut trust = 0.5f32;

    if is_listed(host, &cfg.domains.trusted) || is_listed(host, &cfg.domains.official) {
        trust = 0.9;
    }
    if cfg
        .domains
        .suspicious_tlds
        .iter()
        .any(|t| host.ends_with(t.as_str()))
    {
        trust -= 0.3;
    }
    if host.chars().count() > 30 {
        trust -= 0.2;
    }
    if host.matches('-').count() > 2 {
        trust -= 0.15;
    }
    if has_digit_run(host, 3) {
        trust -= 0.1;
    }
    if url.starts_with("http://") {
        trust -= 0.2;
    } else if !url.starts_with("https://") {
        // Scheme-less citation: certificate can't be verified from the text.
        trust -= 0.15;
    }

    trust.clamp(0.0, 1.0)
}

/// Aggregate domain-trust heuristics over every URL cited in the claim.
/// No cited URLs means no signal, not suspicion.
pub fn source_reputation(text: &str, cfg: &EngineConfig) -> SignalAdjustment {
    let urls = extract_urls(text);
    if urls.is_empty() {
        return SignalAdjustment::neutral();
    }

    let overall =
        urls.iter().map(|u| url_trust(u, cfg)).sum::<f32>() / urls.len() as f32;
    debug!("Source reputation - urls={}, overall_trust={:.2}", urls.len(), overall);

    let (delta, reason) = if overall < 0.3 {
        (
            0.25,
            format!("Cited sources look unreliable (trust {:.2})", overall),
        )
    } else if overall <= 0.5 {
        (
            0.15,
            format!("Cited sources have weak credibility (trust {:.2})", overall),
        )
    } else if overall > 0.8 {
        (
            -0.2,
            format!("Cited sources are highly credible (trust {:.2})", overall),
        )
    } else {
        return SignalAdjustment::bounded(0.0, REPUTATION_MIN, REPUTATION_MAX, vec![]);
    };

    SignalAdjustment::bounded(delta, REPUTATION_MIN, REPUTATION_MAX, vec![reason])
}

/// True when the claim cites at least one pre-approved trusted publisher
/// directly. Drives the aggregator's one-shot strong reduction.
pub fn has_trusted_origin(text: &str, cfg: &EngineConfig) -> bool {
    extract_urls(text).iter().any(|u| {
        let host = domain_of(u);
        is_listed(host, &cfg.domains.trusted) || is_listed(host, &cfg.domains.official)
    })
}
