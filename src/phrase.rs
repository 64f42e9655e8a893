use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::explain::template_explanation;
use crate::models::Verdict;

/// Natural-language phrasing seam. The service only phrases the explanation;
/// the verdict and confidence are decided before it is ever called.
pub trait PhrasingService: Send + Sync {
    fn phrase(
        &self,
        verdict: Verdict,
        confidence: f32,
        reasons: &[String],
        language: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct HttpPhrasingService {
    client: Client,
    endpoint: String,
}

#[derive(Deserialize)]
struct PhraseResponse {
    text: String,
}

impl HttpPhrasingService {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

impl PhrasingService for HttpPhrasingService {
    async fn phrase(
        &self,
        verdict: Verdict,
        confidence: f32,
        reasons: &[String],
        language: &str,
    ) -> Result<String> {
        let start = std::time::Instant::now();
        debug!("Phrasing call starting - reasons={}", reasons.len());

        let body = json!({
            "verdict": verdict,
            "confidence": confidence,
            "reasons": reasons,
            "language": language,
        });
        let resp: PhraseResponse = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Request failed for {}", self.endpoint))?
            .error_for_status()
            .with_context(|| format!("HTTP error for {}", self.endpoint))?
            .json()
            .await
            .with_context(|| format!("Decoding JSON for {}", self.endpoint))?;

        info!(
            "Phrasing call completed - duration={:.2}s, response_length={} chars",
            start.elapsed().as_secs_f32(),
            resp.text.len()
        );
        Ok(resp.text)
    }
}

/// Deterministic template phrasing, used offline and as the fallback when
/// the HTTP service is down or times out.
pub struct TemplatePhrasing;

impl PhrasingService for TemplatePhrasing {
    async fn phrase(
        &self,
        verdict: Verdict,
        confidence: f32,
        reasons: &[String],
        language: &str,
    ) -> Result<String> {
        Ok(template_explanation(verdict, confidence, reasons, language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn template_phrasing_never_fails() {
        let out = TemplatePhrasing
            .phrase(Verdict::Fake, 0.9, &["reason".to_string()], "en")
            .await
            .unwrap();
        assert!(out.contains("false"));
    }
}
