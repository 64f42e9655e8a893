use crate::models::Verdict;

pub const MAX_REASONS: usize = 12;
pub const MAX_REASON_CHARS: usize = 1600;

/// Reasons grouped by origin, assembled in fixed precedence order.
#[derive(Debug, Clone, Default)]
pub struct ReasonBundle {
    pub language_notes: Vec<String>,
    pub historical: Vec<String>,
    pub source_validation: Vec<String>,
    pub nlp: Vec<String>,
    pub expert: Vec<String>,
    pub evidence_summary: Vec<String>,
}

/// Flatten the bundle in precedence order, bounding the total. Whole entries
/// are dropped from the tail, never truncated mid-string; nothing is
/// deduplicated.
pub fn assemble(bundle: &ReasonBundle) -> Vec<String> {
    let ordered = bundle
        .language_notes
        .iter()
        .chain(&bundle.historical)
        .chain(&bundle.source_validation)
        .chain(&bundle.nlp)
        .chain(&bundle.expert)
        .chain(&bundle.evidence_summary);

    let mut out = Vec::new();
    let mut total_chars = 0usize;
    for reason in ordered {
        let len = reason.chars().count();
        if out.len() >= MAX_REASONS || total_chars + len > MAX_REASON_CHARS {
            break;
        }
        total_chars += len;
        out.push(reason.clone());
    }
    out
}

pub fn evidence_summary(support: usize, debunk: usize) -> String {
    format!(
        "Found {} supporting and {} debunking reference(s)",
        support, debunk
    )
}

fn verdict_phrase(verdict: Verdict, language: &str) -> &'static str {
    match (verdict, language) {
        (Verdict::Fake, "si") => "මෙම ප්‍රකාශය අසත්‍ය බව පෙනේ",
        (Verdict::Real, "si") => "මෙම ප්‍රකාශය සත්‍ය බව පෙනේ",
        (Verdict::Uncertain, "si") => "මෙම ප්‍රකාශය තහවුරු කළ නොහැක",
        (Verdict::Unanalyzable, "si") => "විශ්ලේෂණයට ප්‍රමාණවත් අන්තර්ගතයක් නැත",
        (Verdict::Fake, "ta") => "இந்த கூற்று தவறானதாக தெரிகிறது",
        (Verdict::Real, "ta") => "இந்த கூற்று உண்மையானதாக தெரிகிறது",
        (Verdict::Uncertain, "ta") => "இந்த கூற்றை உறுதிப்படுத்த முடியவில்லை",
        (Verdict::Unanalyzable, "ta") => "பகுப்பாய்வுக்கு போதுமான உள்ளடக்கம் இல்லை",
        (Verdict::Fake, _) => "This claim appears to be false",
        (Verdict::Real, _) => "This claim appears to be accurate",
        (Verdict::Uncertain, _) => "This claim could not be verified either way",
        (Verdict::Unanalyzable, _) => "There is not enough content to analyze this claim",
    }
}

/// Deterministic fallback used whenever the phrasing service is unavailable.
pub fn template_explanation(
    verdict: Verdict,
    confidence: f32,
    reasons: &[String],
    language: &str,
) -> String {
    let lead = verdict_phrase(verdict, language);
    let pct = (confidence * 100.0).round() as u32;
    let mut out = format!("{} ({}% confidence).", lead, pct);
    if let Some(top) = reasons.first() {
        out.push(' ');
        out.push_str(top);
        out.push('.');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn precedence_order_is_fixed() {
        let bundle = ReasonBundle {
            language_notes: vec!["lang".into()],
            historical: vec!["hist".into()],
            source_validation: vec!["src".into()],
            nlp: vec!["nlp".into()],
            expert: vec!["expert".into()],
            evidence_summary: vec!["evidence".into()],
        };
        assert_eq!(
            assemble(&bundle),
            vec!["lang", "hist", "src", "nlp", "expert", "evidence"]
        );
    }

    #[test]
    fn entry_count_is_bounded() {
        let bundle = ReasonBundle {
            nlp: (0..20).map(|i| format!("reason {}", i)).collect(),
            ..Default::default()
        };
        assert_eq!(assemble(&bundle).len(), MAX_REASONS);
    }

    #[test]
    fn char_budget_drops_whole_entries() {
        let bundle = ReasonBundle {
            nlp: vec!["a".repeat(1000), "b".repeat(1000), "c".repeat(100)],
            ..Default::default()
        };
        let out = assemble(&bundle);
        // second entry would blow the budget and is dropped along with
        // everything after it
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].chars().count(), 1000);
    }

    #[test]
    fn duplicates_are_kept() {
        let bundle = ReasonBundle {
            nlp: vec!["same".into(), "same".into()],
            ..Default::default()
        };
        assert_eq!(assemble(&bundle).len(), 2);
    }

    #[test]
    fn template_fallback_covers_languages() {
        let reasons = vec!["Excessive exclamation marks (5)".to_string()];
        let en = template_explanation(Verdict::Fake, 0.87, &reasons, "en");
        assert!(en.contains("false"));
        assert!(en.contains("87%"));
        let si = template_explanation(Verdict::Fake, 0.87, &reasons, "si");
        assert!(si.contains("87%"));
        let ta = template_explanation(Verdict::Unanalyzable, 0.30, &[], "ta");
        assert!(ta.contains("30%"));
    }

    #[test]
    fn template_is_deterministic() {
        let reasons = vec!["r1".to_string()];
        let a = template_explanation(Verdict::Uncertain, 0.5, &reasons, "en");
        let b = template_explanation(Verdict::Uncertain, 0.5, &reasons, "en");
        assert_eq!(a, b);
    }
}
