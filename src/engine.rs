use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::aggregate::aggregate;
use crate::config::EngineConfig;
use crate::evidence::{classify_links, EvidenceSource, NullEvidenceSource};
use crate::experts::{expert_corroboration, ExpertNetwork, NullExpertNetwork};
use crate::explain::{assemble, evidence_summary, template_explanation, ReasonBundle};
use crate::heuristics::linguistic_score;
use crate::history::{claim_tokens, historical_pattern, jaccard};
use crate::models::{analysis_id, Analysis, Claim, EvidenceLink, DISPLAY_LINK_LIMIT};
use crate::phrase::{PhrasingService, TemplatePhrasing};
use crate::realtime::{has_breaking_language, realtime_corroboration};
use crate::reputation::{has_trusted_origin, source_reputation};
use crate::sentiment::sentiment_entities;

/// The claim-verification engine. Generic over its three outbound seams so
/// tests can substitute deterministic adapters.
pub struct Engine<S, X, P> {
    cfg: EngineConfig,
    source: S,
    experts: X,
    phrasing: P,
    call_timeout: Duration,
}

/// Heuristics-only engine with no outbound calls.
pub fn offline_engine(cfg: EngineConfig) -> Engine<NullEvidenceSource, NullExpertNetwork, TemplatePhrasing> {
    Engine::new(cfg, NullEvidenceSource, NullExpertNetwork, TemplatePhrasing)
}

fn build_query(text: &str) -> String {
    text.split_whitespace()
        .take(12)
        .collect::<Vec<_>>()
        .join(" ")
        .replace(['!', '?'], "")
}

impl<S, X, P> Engine<S, X, P>
where
    S: EvidenceSource,
    X: ExpertNetwork,
    P: PhrasingService,
{
    pub fn new(cfg: EngineConfig, source: S, experts: X, phrasing: P) -> Self {
        let call_timeout = Duration::from_millis(cfg.call_timeout_ms);
        Self {
            cfg,
            source,
            experts,
            phrasing,
            call_timeout,
        }
    }

    /// Resolve an outbound call to its neutral value on failure or timeout.
    /// Partial evidence never aborts an evaluation.
    async fn guarded<T, F>(&self, name: &str, fut: F, fallback: T) -> T
    where
        F: Future<Output = Result<T>>,
    {
        match timeout(self.call_timeout, fut).await {
            Ok(Ok(v)) => v,
            Ok(Err(e)) => {
                warn!("{} unavailable, using neutral value - error={:#}", name, e);
                fallback
            }
            Err(_) => {
                warn!(
                    "{} timed out after {:.2}s, using neutral value",
                    name,
                    self.call_timeout.as_secs_f32()
                );
                fallback
            }
        }
    }

    /// The single entry point. Always returns a complete `Analysis`;
    /// degradation (missing evidence, unavailable analyzers) stays internal.
    pub async fn evaluate(&self, text: &str, language: &str, prior: Option<&Analysis>) -> Analysis {
        let pipeline_start = std::time::Instant::now();
        let claim = Claim::new(text, language);
        info!(
            "Evaluation started - chars={}, language={}",
            claim.text.chars().count(),
            claim.language
        );

        let base = linguistic_score(&claim.text, &self.cfg.lexicons);
        if base.insufficient {
            // Sentinel: too short to analyze. No fan-out, no evidence.
            let scored = aggregate(&base, &[], &Default::default(), false);
            let reasons = base.reasons.clone();
            let explanation = self
                .guarded(
                    "Phrasing service",
                    self.phrasing
                        .phrase(scored.verdict, scored.confidence, &reasons, language),
                    template_explanation(scored.verdict, scored.confidence, &reasons, language),
                )
                .await;
            info!(
                "Evaluation completed - verdict={:?}, duration={:.2}s (insufficient content)",
                scored.verdict,
                pipeline_start.elapsed().as_secs_f32()
            );
            return self.finish(&claim, scored.verdict, scored.confidence, explanation, reasons, Vec::new(), Vec::new());
        }

        let query = build_query(&claim.text);
        let today = Utc::now().date_naive();
        let breaking = has_breaking_language(&claim.text, &self.cfg);

        // Every outbound call and every analyzer is independent of the
        // others, so the whole set fans out at once. Each secures its own
        // timeout and neutral fallback.
        let fan_out_start = std::time::Instant::now();
        let (general, fact_checks, findings, corroboration, history_adj, reputation_adj, sentiment_adj) = tokio::join!(
            self.guarded(
                "General search",
                self.source.search(&query, &claim.language),
                Vec::new(),
            ),
            self.guarded(
                "Fact-check search",
                self.source.search_fact_checks(&query),
                Vec::new(),
            ),
            self.guarded("Expert network", self.experts.query(&claim.text), Vec::new()),
            async {
                if breaking {
                    self.guarded(
                        "Corroboration search",
                        self.source
                            .search(&format!("{} official statement", query), &claim.language),
                        Vec::new(),
                    )
                    .await
                } else {
                    Vec::new()
                }
            },
            async { historical_pattern(&claim.text, &self.cfg.catalog, today) },
            async { source_reputation(&claim.text, &self.cfg) },
            async { sentiment_entities(&claim.text, &self.cfg.lexicons, today) },
        );
        debug!(
            "Fan-out completed - duration={:.2}s, general={}, fact_checks={}, findings={}",
            fan_out_start.elapsed().as_secs_f32(),
            general.len(),
            fact_checks.len(),
            findings.len()
        );

        let evidence = classify_links(&general, &fact_checks, &self.cfg);
        let expert_adj = expert_corroboration(&findings);
        let realtime_adj = realtime_corroboration(&claim.text, &corroboration, &self.cfg);
        let trusted_publisher = has_trusted_origin(&claim.text, &self.cfg);

        let adjustments = [
            history_adj.clone(),
            reputation_adj.clone(),
            sentiment_adj.clone(),
            expert_adj.clone(),
            realtime_adj.clone(),
        ];
        let scored = aggregate(&base, &adjustments, &evidence, trusted_publisher);

        let mut language_notes = Vec::new();
        if claim.language != "en" {
            language_notes.push(format!(
                "Evaluated on translated content (source language: {})",
                claim.language
            ));
        }
        if let Some(prev) = prior {
            let similarity = jaccard(&claim_tokens(&claim.text), &claim_tokens(&prev.claim_text));
            if similarity > 0.6 {
                language_notes
                    .push("Related to an earlier claim in this conversation".to_string());
            }
        }

        let mut source_validation = reputation_adj.reasons;
        source_validation.extend(realtime_adj.reasons);
        if trusted_publisher {
            source_validation
                .push("Content originates directly from a trusted publisher".to_string());
        }

        let mut nlp = base.reasons.clone();
        nlp.extend(sentiment_adj.reasons);

        let mut summary = Vec::new();
        if !evidence.support.is_empty() || !evidence.debunk.is_empty() {
            summary.push(evidence_summary(evidence.support.len(), evidence.debunk.len()));
        }

        let bundle = ReasonBundle {
            language_notes,
            historical: history_adj.reasons,
            source_validation,
            nlp,
            expert: expert_adj.reasons,
            evidence_summary: summary,
        };
        let reasons = assemble(&bundle);

        let explanation = self
            .guarded(
                "Phrasing service",
                self.phrasing
                    .phrase(scored.verdict, scored.confidence, &reasons, &claim.language),
                template_explanation(scored.verdict, scored.confidence, &reasons, &claim.language),
            )
            .await;

        info!(
            "Evaluation completed - verdict={:?}, score={:.3}, confidence={:.2}, duration={:.2}s",
            scored.verdict,
            scored.score,
            scored.confidence,
            pipeline_start.elapsed().as_secs_f32()
        );

        self.finish(
            &claim,
            scored.verdict,
            scored.confidence,
            explanation,
            reasons,
            evidence.support,
            evidence.debunk,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        claim: &Claim,
        verdict: crate::models::Verdict,
        confidence: f32,
        explanation: String,
        reasons: Vec<String>,
        mut support: Vec<EvidenceLink>,
        mut debunk: Vec<EvidenceLink>,
    ) -> Analysis {
        support.truncate(DISPLAY_LINK_LIMIT);
        debunk.truncate(DISPLAY_LINK_LIMIT);
        Analysis {
            analysis_id: analysis_id(&claim.text, &claim.language),
            claim_text: claim.display_text.clone(),
            language: claim.language.clone(),
            verdict,
            confidence,
            explanation,
            reasons,
            support_links: support,
            debunk_links: debunk,
            evaluated_at: Utc::now().to_rfc3339(),
        }
    }
}
