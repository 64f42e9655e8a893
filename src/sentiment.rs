use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::config::Lexicons;
use crate::models::SignalAdjustment;

pub const SENTIMENT_MIN: f32 = 0.0;
pub const SENTIMENT_MAX: f32 = 0.4;

/// Naive surface extraction of entities, year mentions and large numbers.
#[derive(Debug, Clone, Default)]
pub struct EntityScan {
    pub entities: Vec<String>,
    pub years: Vec<i32>,
    pub numbers: Vec<f64>,
}

pub fn scan_entities(text: &str) -> EntityScan {
    let mut scan = EntityScan::default();
    let mut current: Vec<&str> = Vec::new();

    for token in text.split_whitespace() {
        let word = token.trim_matches(|c: char| !c.is_alphanumeric());
        if word.is_empty() {
            continue;
        }

        if let Ok(year) = word.parse::<i32>() {
            if (1900..=2100).contains(&year) && word.chars().count() == 4 {
                scan.years.push(year);
            }
        }
        let digits: String = word.chars().filter(|c| *c != ',').collect();
        if digits.chars().all(|c| c.is_ascii_digit()) && !digits.is_empty() {
            if let Ok(n) = digits.parse::<f64>() {
                scan.numbers.push(n);
            }
        }

        // Capitalized runs of two or more words look like names.
        let capitalized = word.chars().next().is_some_and(|c| c.is_uppercase())
            && word.chars().any(|c| c.is_lowercase());
        if capitalized {
            current.push(word);
        } else {
            if current.len() >= 2 {
                scan.entities.push(current.join(" "));
            }
            current.clear();
        }
    }
    if current.len() >= 2 {
        scan.entities.push(current.join(" "));
    }
    scan
}

fn caps_ratio(text: &str) -> f32 {
    let alpha: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if alpha.is_empty() {
        return 0.0;
    }
    alpha.iter().filter(|c| c.is_uppercase()).count() as f32 / alpha.len() as f32
}

/// Emotional-manipulation score in [0,1]: a weighted blend of fear/anger
/// trigger density, capital-letter ratio and exclamation density.
pub fn manipulation_score(text: &str, lex: &Lexicons) -> f32 {
    let lower = text.to_lowercase();
    let words = text.split_whitespace().count().max(1);
    let hits: usize = lex
        .fear_anger_triggers
        .iter()
        .map(|t| lower.matches(t.as_str()).count())
        .sum();

    let trigger_component = (hits as f32 * 10.0 / words as f32).min(1.0);
    let caps_component = caps_ratio(text);
    let excl_component = (text.matches('!').count() as f32 / 3.0).min(1.0);

    0.5 * trigger_component + 0.3 * caps_component + 0.2 * excl_component
}

/// Emotional-manipulation and entity-plausibility adjustment, capped to
/// [0, 0.4]. Pure function of the claim text and the injected date.
pub fn sentiment_entities(text: &str, lex: &Lexicons, today: NaiveDate) -> SignalAdjustment {
    let mut delta = 0.0f32;
    let mut reasons = Vec::new();

    let manipulation = manipulation_score(text, lex);
    debug!("Sentiment scan - manipulation={:.2}", manipulation);
    if manipulation >= 0.6 {
        delta += 0.25;
        reasons.push(format!(
            "Strong emotional manipulation signals (score {:.2})",
            manipulation
        ));
    } else if manipulation >= 0.3 {
        delta += 0.12;
        reasons.push(format!(
            "Moderate emotional manipulation signals (score {:.2})",
            manipulation
        ));
    }

    let scan = scan_entities(text);
    let year_now = today.year();
    if scan
        .years
        .iter()
        .any(|y| *y < year_now - 10 || *y > year_now + 1)
    {
        delta += 0.10;
        reasons.push("References an implausible date for current news".to_string());
    }

    let implausible_number = scan.numbers.iter().any(|n| {
        *n > 1_000_000_000_000.0 || (*n >= 1_000_000_000.0 && n % 1_000_000_000.0 == 0.0)
    });
    if implausible_number {
        delta += 0.10;
        reasons.push("Cites an implausibly large or suspiciously round figure".to_string());
    }

    SignalAdjustment::bounded(delta, SENTIMENT_MIN, SENTIMENT_MAX, reasons)
}
