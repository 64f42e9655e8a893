//! Claim-verification scoring engine.
//!
//! Ingests claim text plus retrieved evidence and produces a discrete verdict
//! (`fake` / `real` / `uncertain` / `unanalyzable`), a calibrated confidence,
//! and an ordered explanation trail. Signals are computed independently,
//! fanned out concurrently, and combined in exactly one place (the
//! aggregator) under per-analyzer caps.

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod evidence;
pub mod experts;
pub mod explain;
pub mod heuristics;
pub mod history;
pub mod models;
pub mod phrase;
pub mod realtime;
pub mod reputation;
pub mod sentiment;

pub use config::{Catalog, EngineConfig, Settings};
pub use engine::{offline_engine, Engine};
pub use evidence::{EvidenceSource, HttpEvidenceSource, NullEvidenceSource};
pub use experts::{ExpertNetwork, HttpExpertNetwork, NullExpertNetwork};
pub use models::{Analysis, Claim, EvidenceLink, SearchHit, SignalAdjustment, Verdict};
pub use phrase::{HttpPhrasingService, PhrasingService, TemplatePhrasing};
