use unicode_normalization::UnicodeNormalization;

use crate::config::Lexicons;

/// Output of the linguistic pass: the base fake-likelihood score the rest of
/// the pipeline adjusts, plus the surface reasons that fired.
#[derive(Debug, Clone)]
pub struct BaseScore {
    pub score: f32, // [0.0, 1.0]
    pub reasons: Vec<String>,
    /// Sentinel: text too short to analyze. Forces `unanalyzable` downstream
    /// regardless of evidence or adjustments.
    pub insufficient: bool,
}

pub const MIN_ANALYZABLE_CHARS: usize = 15;

pub fn normalize(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

fn count_hits(haystack: &str, needles: &[String]) -> usize {
    needles
        .iter()
        .map(|n| haystack.matches(n.as_str()).count())
        .sum()
}

fn all_caps_runs(text: &str) -> usize {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() > 3 && t.chars().all(|c| c.is_uppercase()))
        .count()
}

/// Score raw claim text on surface features alone. Pure; starts neutral at
/// 0.5 and accumulates additive penalties and bonuses, clamped to [0,1].
pub fn linguistic_score(text: &str, lex: &Lexicons) -> BaseScore {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_ANALYZABLE_CHARS {
        return BaseScore {
            score: 0.5,
            reasons: vec!["Text too short for reliable analysis".to_string()],
            insufficient: true,
        };
    }

    let lower = normalize(trimmed);
    let char_len = trimmed.chars().count();
    let mut score = 0.5f32;
    let mut reasons = Vec::new();
    let mut penalty_fired = false;

    let sensational = count_hits(&lower, &lex.sensational);
    if sensational >= 3 {
        score += 0.20;
        penalty_fired = true;
        reasons.push(format!(
            "Heavy sensational language ({} trigger words)",
            sensational
        ));
    } else if sensational >= 1 {
        score += 0.10;
        penalty_fired = true;
        reasons.push(format!("Sensational language ({} trigger words)", sensational));
    }

    let exclamations = trimmed.matches('!').count();
    if exclamations >= 3 {
        score += 0.15;
        penalty_fired = true;
        reasons.push(format!("Excessive exclamation marks ({})", exclamations));
    }

    let caps_runs = all_caps_runs(trimmed);
    if caps_runs >= 3 {
        score += 0.08;
        penalty_fired = true;
        reasons.push(format!("Excessive all-caps words ({})", caps_runs));
    }

    if char_len < 100 {
        score += 0.10;
        penalty_fired = true;
        reasons.push("Very short claim with little verifiable detail".to_string());
    } else if char_len > 1000 {
        score -= 0.05;
        reasons.push("Long-form content with room for detail".to_string());
    }

    let attributed = lex.attribution.iter().any(|a| lower.contains(a.as_str()));
    if attributed {
        score -= 0.10;
        reasons.push("Contains attribution to a source".to_string());

        let named_outlet = lex
            .credible_outlets
            .iter()
            .any(|o| lower.contains(o.as_str()));
        let distinct_officials = lex
            .official_titles
            .iter()
            .filter(|t| lower.contains(t.as_str()))
            .count();
        // When both apply, only the stronger bonus is taken.
        if distinct_officials >= 2 {
            score -= 0.12;
            reasons.push(format!(
                "Cites multiple named officials ({})",
                distinct_officials
            ));
        } else if named_outlet {
            score -= 0.08;
            reasons.push("Cites a named credible outlet".to_string());
        }
    } else if char_len >= 120 {
        score += 0.15;
        penalty_fired = true;
        reasons.push("Substantial claim with no attribution to any source".to_string());
    }

    let vague = count_hits(&lower, &lex.vague_source);
    if vague >= 2 {
        score += 0.10;
        penalty_fired = true;
        reasons.push(format!("Vague sourcing phrases ({})", vague));
    }

    let emotional = count_hits(&lower, &lex.emotional);
    if emotional >= 3 {
        score += 0.10;
        penalty_fired = true;
        reasons.push(format!("Emotionally loaded wording ({} terms)", emotional));
    }

    let conspiracy = count_hits(&lower, &lex.conspiracy);
    if conspiracy >= 1 {
        score += 0.15;
        penalty_fired = true;
        reasons.push(format!("Conspiracy-style phrasing ({} phrases)", conspiracy));
    }

    score = score.clamp(0.0, 1.0);

    // The explanation must never be empty for a clean-looking claim.
    if !penalty_fired && score < 0.4 {
        reasons.push("No sensational or manipulative language detected".to_string());
        reasons.push("Writing style consistent with factual reporting".to_string());
    }

    BaseScore {
        score,
        reasons,
        insufficient: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Lexicons;

    fn lex() -> Lexicons {
        Lexicons::default()
    }

    #[test]
    fn short_text_is_sentinel() {
        let out = linguistic_score("Colombo", &lex());
        assert!(out.insufficient);
        assert_eq!(out.score, 0.5);
        assert_eq!(out.reasons.len(), 1);
    }

    #[test]
    fn sentinel_boundary_at_fifteen_chars() {
        assert!(linguistic_score("12345678901234", &lex()).insufficient);
        assert!(!linguistic_score("123456789012345", &lex()).insufficient);
    }

    #[test]
    fn breaking_style_claim_scores_high() {
        let out = linguistic_score(
            "BREAKING!!! Banks will STOP all withdrawals tomorrow!!!",
            &lex(),
        );
        assert!(!out.insufficient);
        // exclamation + short-text penalties plus missing attribution absent
        // (text < 120 chars) still push well past neutral
        assert!(out.score > 0.6, "score {}", out.score);
        assert!(out
            .reasons
            .iter()
            .any(|r| r.contains("exclamation")));
    }

    #[test]
    fn attributed_ministry_claim_scores_low() {
        let text = "According to the Health Ministry spokesperson and the minister of finance, \
                    the new vaccination program confirmed by officials starts next month across \
                    all districts of the country, as reported by Reuters.";
        let out = linguistic_score(text, &lex());
        assert!(out.score < 0.5, "score {}", out.score);
        assert!(out.reasons.iter().any(|r| r.contains("attribution")));
        assert!(out.reasons.iter().any(|r| r.contains("officials")));
    }

    #[test]
    fn clean_low_score_gets_generic_positive_reasons() {
        let text = "The central bank announced revised interest rates this morning, according to \
                    the official statement published on its website after the monetary policy \
                    review meeting that was held yesterday with senior economists in attendance \
                    and further guidance said to follow in the quarterly report.";
        let out = linguistic_score(text, &lex());
        if out.score < 0.4 {
            assert!(out.reasons.len() >= 2);
        }
        assert!(!out.reasons.is_empty());
    }

    #[test]
    fn all_caps_short_acronyms_ignored_but_runs_counted() {
        assert_eq!(all_caps_runs("WHO and UN met BBC"), 0);
        assert_eq!(all_caps_runs("STOP PANIC WITHDRAWALS NOW URGENT"), 4);
    }

    #[test]
    fn score_always_clamped() {
        let nasty = "SHOCKING!!! TERRIFYING!!! unbelievable secret exposed banned miracle \
                     cover-up wake up sheeple deadly panic crisis!!!";
        let out = linguistic_score(nasty, &lex());
        assert!(out.score <= 1.0 && out.score >= 0.0);
    }
}
