use anyhow::Result;
use clap::Parser;
use reqwest::Client;
use std::path::PathBuf;
use tracing::{debug, info};

use claimlens::{
    offline_engine, Catalog, Engine, EngineConfig, HttpEvidenceSource, HttpExpertNetwork,
    HttpPhrasingService, Settings,
};

/// claimlens - claim-verification scoring engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Claim text to evaluate
    claim: String,

    /// Language of the (already translated) claim text
    #[arg(short, long, default_value = "en")]
    language: String,

    /// Path to endpoint settings JSON (overrides CLAIMLENS_CONFIG)
    #[arg(short, long)]
    config: Option<String>,

    /// Path to historical-claims catalog JSON (overrides CLAIMLENS_CATALOG)
    #[arg(long)]
    catalog: Option<String>,

    /// Pretty-print the analysis JSON
    #[arg(long)]
    pretty: bool,

    /// Heuristics only: no outbound calls, template phrasing
    #[arg(long)]
    offline: bool,
}

fn resolve_path(cli: Option<&str>, env_key: &str) -> Option<PathBuf> {
    if let Some(p) = cli {
        return Some(PathBuf::from(p));
    }
    std::env::var(env_key).ok().map(PathBuf::from)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut cfg = EngineConfig::default();
    if let Some(path) = resolve_path(args.catalog.as_deref(), "CLAIMLENS_CATALOG") {
        cfg.catalog = Catalog::from_path(&path)?;
        info!(
            "Catalog loaded - version={}, entries={}",
            cfg.catalog.version,
            cfg.catalog.entries.len()
        );
    }

    let settings = if args.offline {
        None
    } else {
        match resolve_path(args.config.as_deref(), "CLAIMLENS_CONFIG") {
            Some(path) => Some(Settings::from_path(&path)?),
            None => {
                debug!("No endpoint settings found, running offline");
                None
            }
        }
    };

    let analysis = match settings {
        Some(settings) => {
            cfg.call_timeout_ms = settings.timeout_ms;
            let client = Client::builder().build()?;
            let engine = Engine::new(
                cfg,
                HttpEvidenceSource::new(
                    client.clone(),
                    settings.search_endpoint,
                    settings.factcheck_endpoint,
                ),
                HttpExpertNetwork::new(client.clone(), settings.expert_endpoints),
                HttpPhrasingService::new(client, settings.phrasing_endpoint),
            );
            engine.evaluate(&args.claim, &args.language, None).await
        }
        None => {
            let engine = offline_engine(cfg);
            engine.evaluate(&args.claim, &args.language, None).await
        }
    };

    let out = if args.pretty {
        serde_json::to_string_pretty(&analysis)?
    } else {
        serde_json::to_string(&analysis)?
    };
    println!("{}", out);
    Ok(())
}
