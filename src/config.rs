use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::models::{HistoricalClaimRecord, Season};

/// Word and phrase lists driving the linguistic and sentiment heuristics.
/// Injectable so curation can grow them without touching scoring logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicons {
    pub sensational: Vec<String>,
    pub emotional: Vec<String>,
    pub conspiracy: Vec<String>,
    pub vague_source: Vec<String>,
    pub attribution: Vec<String>,
    pub credible_outlets: Vec<String>,
    pub official_titles: Vec<String>,
    pub breaking: Vec<String>,
    pub debunk_keywords: Vec<String>,
    pub support_keywords: Vec<String>,
    pub fear_anger_triggers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainLists {
    pub trusted: Vec<String>,
    pub low_trust: Vec<String>,
    pub official: Vec<String>,
    pub suspicious_tlds: Vec<String>,
}

/// Historical-claims catalog. Versioned, read-only at evaluation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub version: String,
    pub entries: Vec<HistoricalClaimRecord>,
}

impl Catalog {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Reading catalog {}", path.display()))?;
        let catalog: Catalog = serde_json::from_str(&raw)
            .with_context(|| format!("Decoding catalog {}", path.display()))?;
        debug!(
            "Catalog loaded - version={}, entries={}",
            catalog.version,
            catalog.entries.len()
        );
        Ok(catalog)
    }
}

/// Everything the scoring engine reads at evaluation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub lexicons: Lexicons,
    pub domains: DomainLists,
    pub catalog: Catalog,
    pub call_timeout_ms: u64,
}

impl EngineConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Reading engine config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Decoding engine config {}", path.display()))
    }
}

/// Outbound endpoint settings for the HTTP adapters. Kept separate from
/// `EngineConfig` so scoring stays independent of transport concerns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub search_endpoint: String,
    pub factcheck_endpoint: String,
    pub expert_endpoints: Vec<String>,
    pub phrasing_endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    8_000
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Reading settings {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Decoding settings {}", path.display()))
    }
}

fn strings(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

impl Default for Lexicons {
    fn default() -> Self {
        Self {
            sensational: strings(&[
                "shocking", "unbelievable", "miracle", "secret", "exposed", "banned",
                "they don't want you to know", "doctors hate", "instantly", "guaranteed",
                "bombshell", "explosive", "stunning", "outrageous",
            ]),
            emotional: strings(&[
                "terrifying", "horrific", "devastating", "disgusting", "outrage",
                "furious", "heartbreaking", "tragic", "catastrophic", "alarming",
            ]),
            conspiracy: strings(&[
                "cover-up", "cover up", "deep state", "mainstream media won't",
                "wake up", "sheeple", "the truth they hide", "false flag",
                "new world order",
            ]),
            vague_source: strings(&[
                "sources say", "it is said", "people are saying", "reports suggest",
                "some claim", "rumor has it", "insiders reveal", "experts warn",
            ]),
            attribution: strings(&[
                "according to", "said", "stated", "announced", "confirmed by",
                "reported by", "told reporters", "in a statement",
            ]),
            credible_outlets: strings(&[
                "reuters", "associated press", "bbc", "afp", "al jazeera",
                "daily mirror", "ada derana", "news first",
            ]),
            official_titles: strings(&[
                "minister", "spokesperson", "director general", "secretary",
                "commissioner", "president", "governor", "chief",
            ]),
            breaking: strings(&[
                "breaking", "urgent", "just in", "happening now", "alert",
                "right now", "immediately",
            ]),
            debunk_keywords: strings(&[
                "debunk", "false", "hoax", "fake", "misleading", "fact check",
                "no evidence", "untrue", "myth",
            ]),
            support_keywords: strings(&[
                "confirmed", "official", "according to", "verified", "announced",
                "statement",
            ]),
            fear_anger_triggers: strings(&[
                "danger", "deadly", "panic", "crisis", "collapse", "riot",
                "threat", "destroy", "poison", "killer",
            ]),
        }
    }
}

impl Default for DomainLists {
    fn default() -> Self {
        Self {
            trusted: strings(&[
                "reuters.com", "apnews.com", "bbc.com", "bbc.co.uk", "afp.com",
                "aljazeera.com", "factcheck.org", "snopes.com", "politifact.com",
                "dailymirror.lk", "adaderana.lk", "newsfirst.lk", "who.int",
            ]),
            low_trust: strings(&[
                "beforeitsnews.com", "naturalnews.com", "infowars.com",
                "worldtruth.tv", "realrawnews.com",
            ]),
            official: strings(&[
                "gov.lk", "presidentsoffice.gov.lk", "health.gov.lk", "cbsl.gov.lk",
                "police.lk", "who.int",
            ]),
            suspicious_tlds: strings(&[".xyz", ".top", ".click", ".buzz", ".loan", ".win"]),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            version: "builtin-1".into(),
            entries: vec![
                HistoricalClaimRecord {
                    text: "banks will stop all withdrawals and freeze accounts tomorrow".into(),
                    category: "finance".into(),
                    seasonal: None,
                    sources: strings(&["https://www.cbsl.gov.lk"]),
                },
                HistoricalClaimRecord {
                    text: "drinking hot water with lemon cures viral infections".into(),
                    category: "health".into(),
                    seasonal: Some(Season::Monsoon),
                    sources: strings(&["https://www.who.int"]),
                },
                HistoricalClaimRecord {
                    text: "government will cut electricity island wide for three days".into(),
                    category: "utilities".into(),
                    seasonal: None,
                    sources: strings(&["https://www.gov.lk"]),
                },
                HistoricalClaimRecord {
                    text: "fuel stations will close permanently from next week".into(),
                    category: "fuel".into(),
                    seasonal: None,
                    sources: strings(&["https://www.gov.lk"]),
                },
                HistoricalClaimRecord {
                    text: "ballot papers pre marked before election day discovered".into(),
                    category: "election".into(),
                    seasonal: Some(Season::ElectionPeriod),
                    sources: strings(&["https://www.elections.gov.lk"]),
                },
            ],
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lexicons: Lexicons::default(),
            domains: DomainLists::default(),
            catalog: Catalog::default(),
            call_timeout_ms: default_timeout_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_nonempty() {
        let cfg = EngineConfig::default();
        assert!(!cfg.lexicons.sensational.is_empty());
        assert!(!cfg.domains.trusted.is_empty());
        assert!(!cfg.catalog.entries.is_empty());
    }

    #[test]
    fn config_round_trips_through_json() {
        let cfg = EngineConfig::default();
        let raw = serde_json::to_string(&cfg).unwrap();
        let back: EngineConfig = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.catalog.entries.len(), cfg.catalog.entries.len());
        assert_eq!(back.call_timeout_ms, cfg.call_timeout_ms);
    }
}
