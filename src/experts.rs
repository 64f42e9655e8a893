use anyhow::{Context, Result};
use itertools::Itertools;
use reqwest::Client;
use tracing::{debug, warn};

use crate::models::{ExpertFinding, ExpertVerdict, SignalAdjustment};

pub const EXPERT_MIN: f32 = -0.3;
pub const EXPERT_MAX: f32 = 0.4;

/// Fact-checker network seam. HTTP in production, fixed findings in tests.
pub trait ExpertNetwork: Send + Sync {
    fn query(
        &self,
        claim: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ExpertFinding>>> + Send;
}

/// Queries every configured endpoint concurrently; endpoints that fail are
/// skipped so one dead checker never empties the whole result.
pub struct HttpExpertNetwork {
    client: Client,
    endpoints: Vec<String>,
}

impl HttpExpertNetwork {
    pub fn new(client: Client, endpoints: Vec<String>) -> Self {
        Self { client, endpoints }
    }

    async fn query_one(&self, endpoint: &str, claim: &str) -> Result<Vec<ExpertFinding>> {
        let resp = self
            .client
            .get(endpoint)
            .query(&[("claim", claim)])
            .send()
            .await
            .with_context(|| format!("Request failed for {}", endpoint))?
            .error_for_status()
            .with_context(|| format!("HTTP error for {}", endpoint))?;
        resp.json()
            .await
            .with_context(|| format!("Decoding JSON for {}", endpoint))
    }
}

impl ExpertNetwork for HttpExpertNetwork {
    async fn query(&self, claim: &str) -> Result<Vec<ExpertFinding>> {
        let tasks = self
            .endpoints
            .iter()
            .map(|e| self.query_one(e, claim));
        let results = futures::future::join_all(tasks).await;

        let mut findings = Vec::new();
        for (endpoint, result) in self.endpoints.iter().zip(results) {
            match result {
                Ok(mut batch) => findings.append(&mut batch),
                Err(e) => warn!("Expert endpoint unavailable - endpoint={}, error={:#}", endpoint, e),
            }
        }
        debug!(
            "Expert network - endpoints={}, findings={}",
            self.endpoints.len(),
            findings.len()
        );
        Ok(findings)
    }
}

/// Offline stand-in: no expert findings, never errors.
pub struct NullExpertNetwork;

impl ExpertNetwork for NullExpertNetwork {
    async fn query(&self, _claim: &str) -> Result<Vec<ExpertFinding>> {
        Ok(Vec::new())
    }
}

/// Fold expert findings into one bounded adjustment. A single false verdict
/// is a strong signal; misleading counts at half weight.
pub fn expert_corroboration(findings: &[ExpertFinding]) -> SignalAdjustment {
    if findings.is_empty() {
        return SignalAdjustment::neutral();
    }

    let false_count = findings
        .iter()
        .filter(|f| f.verdict == ExpertVerdict::False)
        .count();
    let misleading_count = findings
        .iter()
        .filter(|f| f.verdict == ExpertVerdict::Misleading)
        .count();
    let true_count = findings
        .iter()
        .filter(|f| f.verdict == ExpertVerdict::True)
        .count();

    let mut delta = 0.0f32;
    let mut reasons = Vec::new();

    if false_count >= 1 {
        delta += 0.3 + 0.05 * (false_count - 1) as f32;
        let sources = findings
            .iter()
            .filter(|f| f.verdict == ExpertVerdict::False)
            .map(|f| f.source.as_str())
            .join(", ");
        reasons.push(format!(
            "Rated false by {} fact-checker(s): {}",
            false_count, sources
        ));
    }
    if misleading_count >= 1 {
        delta += 0.15 + 0.05 * (misleading_count - 1) as f32;
        reasons.push(format!(
            "Rated misleading by {} fact-checker(s)",
            misleading_count
        ));
    }
    if true_count >= 1 {
        delta -= 0.2;
        let sources = findings
            .iter()
            .filter(|f| f.verdict == ExpertVerdict::True)
            .map(|f| f.source.as_str())
            .join(", ");
        reasons.push(format!(
            "Verified true by {} fact-checker(s): {}",
            true_count, sources
        ));
    }

    SignalAdjustment::bounded(delta, EXPERT_MIN, EXPERT_MAX, reasons)
}
