use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::models::{EvidenceLink, SearchHit};

/// Outbound search seam. HTTP in production, in-memory fakes in tests.
pub trait EvidenceSource: Send + Sync {
    fn search(
        &self,
        query: &str,
        language: &str,
    ) -> impl std::future::Future<Output = Result<Vec<SearchHit>>> + Send;

    fn search_fact_checks(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<SearchHit>>> + Send;
}

pub struct HttpEvidenceSource {
    client: Client,
    search_endpoint: String,
    factcheck_endpoint: String,
}

impl HttpEvidenceSource {
    pub fn new(client: Client, search_endpoint: String, factcheck_endpoint: String) -> Self {
        Self {
            client,
            search_endpoint,
            factcheck_endpoint,
        }
    }

    async fn get_hits(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<SearchHit>> {
        let start = std::time::Instant::now();
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Request failed for {}", url))?
            .error_for_status()
            .with_context(|| format!("HTTP error for {}", url))?;
        let hits: Vec<SearchHit> = resp
            .json()
            .await
            .with_context(|| format!("Decoding JSON for {}", url))?;
        info!(
            "Search completed - endpoint={}, duration={:.2}s, hits={}",
            url,
            start.elapsed().as_secs_f32(),
            hits.len()
        );
        Ok(hits)
    }
}

impl EvidenceSource for HttpEvidenceSource {
    async fn search(&self, query: &str, language: &str) -> Result<Vec<SearchHit>> {
        debug!("General search - query_len={}, lang={}", query.len(), language);
        self.get_hits(&self.search_endpoint, &[("q", query), ("lang", language)])
            .await
    }

    async fn search_fact_checks(&self, query: &str) -> Result<Vec<SearchHit>> {
        debug!("Fact-check search - query_len={}", query.len());
        self.get_hits(&self.factcheck_endpoint, &[("q", query)]).await
    }
}

/// Offline stand-in: no evidence, never errors.
pub struct NullEvidenceSource;

impl EvidenceSource for NullEvidenceSource {
    async fn search(&self, _query: &str, _language: &str) -> Result<Vec<SearchHit>> {
        Ok(Vec::new())
    }

    async fn search_fact_checks(&self, _query: &str) -> Result<Vec<SearchHit>> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassifiedEvidence {
    pub support: Vec<EvidenceLink>,
    pub debunk: Vec<EvidenceLink>,
}

pub fn domain_of(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let host = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    host.strip_prefix("www.").unwrap_or(host)
}

fn domain_matches(url_or_source: &str, list: &[String]) -> bool {
    let host = domain_of(url_or_source);
    list.iter()
        .any(|d| host == d.as_str() || host.ends_with(&format!(".{}", d)))
}

const FALSE_RATINGS: [&str; 4] = ["false", "incorrect", "misleading", "pants on fire"];
const TRUE_RATINGS: [&str; 3] = ["true", "correct", "accurate"];

/// Partition raw results into support and debunk sets with per-link
/// confidence. Pure; retrieval order is preserved within each set.
///
/// A neutral result from an untrusted domain is dropped rather than counted
/// as support.
pub fn classify_links(
    general: &[SearchHit],
    fact_checks: &[SearchHit],
    cfg: &EngineConfig,
) -> ClassifiedEvidence {
    let mut out = ClassifiedEvidence::default();

    for hit in general {
        let trusted = domain_matches(&hit.url, &cfg.domains.trusted)
            || domain_matches(&hit.source, &cfg.domains.trusted);
        let low_trust = domain_matches(&hit.url, &cfg.domains.low_trust)
            || domain_matches(&hit.source, &cfg.domains.low_trust);

        let mut confidence = 0.5f32;
        if trusted {
            confidence = confidence.max(0.75);
        }
        if low_trust {
            confidence = confidence.min(0.25);
        }

        let text = format!(
            "{} {}",
            hit.title.to_lowercase(),
            hit.snippet.as_deref().unwrap_or("").to_lowercase()
        );
        let debunks = cfg
            .lexicons
            .debunk_keywords
            .iter()
            .any(|k| text.contains(k.as_str()));
        let supports = cfg
            .lexicons
            .support_keywords
            .iter()
            .any(|k| text.contains(k.as_str()));

        let link = |confidence: f32| EvidenceLink {
            title: hit.title.clone(),
            url: hit.url.clone(),
            source: hit.source.clone(),
            rating: None,
            snippet: hit.snippet.clone(),
            confidence,
        };

        match (debunks, supports) {
            (true, false) => out.debunk.push(link((confidence + 0.25).min(1.0))),
            (false, true) => out.support.push(link((confidence + 0.20).min(1.0))),
            _ if trusted => out.support.push(link(confidence)),
            _ => {
                debug!("Dropping neutral untrusted result - url={}", hit.url);
            }
        }
    }

    for hit in fact_checks {
        let rating = hit
            .rating
            .as_deref()
            .map(|r| r.to_lowercase())
            .unwrap_or_default();
        let link = |confidence: f32, rating: Option<String>| EvidenceLink {
            title: hit.title.clone(),
            url: hit.url.clone(),
            source: hit.source.clone(),
            rating,
            snippet: hit.snippet.clone(),
            confidence,
        };

        // false-family first: "incorrect" contains "correct"
        if FALSE_RATINGS.iter().any(|r| rating.contains(r)) {
            out.debunk.push(link(0.9, hit.rating.clone()));
        } else if !rating.is_empty() && TRUE_RATINGS.iter().any(|r| rating.contains(r)) {
            out.support.push(link(0.9, hit.rating.clone()));
        } else {
            // Un-rated or ambiguous fact-check hit: a caution flag, not support.
            out.debunk.push(link(0.85, hit.rating.clone()));
        }
    }

    debug!(
        "Evidence classified - support={}, debunk={}",
        out.support.len(),
        out.debunk.len()
    );
    out
}
