//! Claim Risk - Main Entry Point
//!
//! Loads the claims file and classifier once, then scores the claim IDs
//! given on the command line, or reads them from stdin one per line.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use claim_risk_core::api::commands::{self, OutputFormat};
use claim_risk_core::api::report;
use claim_risk_core::constants;
use claim_risk_core::logic::config::ScoringConfig;
use claim_risk_core::logic::features::LayoutInfo;
use claim_risk_core::logic::model;
use claim_risk_core::logic::records::ClaimStore;
use claim_risk_core::logic::scoring::ScoringEngine;

#[derive(Parser, Debug)]
#[command(name = "claim-risk", version, about = "Score auto-insurance claims for fraud risk")]
struct Cli {
    /// Claims CSV (overrides CLAIM_DATA_PATH)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Classifier artifact, .onnx or .json (overrides CLAIM_MODEL_PATH)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Expected SHA-256 of the model file (overrides CLAIM_MODEL_SHA256)
    #[arg(long)]
    model_sha256: Option<String>,

    /// Fraud threshold in [0, 1] (overrides CLAIM_RISK_THRESHOLD)
    #[arg(long)]
    threshold: Option<f32>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    json: bool,

    /// Print the fields the claims file must contain and exit
    #[arg(long)]
    required_fields: bool,

    /// Print the feature layout (version, hash, names) as JSON and exit
    #[arg(long)]
    layout: bool,

    /// Claim IDs to score; interactive when omitted
    claim_ids: Vec<String>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let cli = Cli::parse();

    if cli.required_fields {
        println!("{}", report::required_fields_help());
        return Ok(());
    }

    if cli.layout {
        let info = serde_json::to_string_pretty(&LayoutInfo::current())
            .context("Failed to serialize feature layout")?;
        println!("{}", info);
        return Ok(());
    }

    log::info!("Starting {} v{}...", constants::APP_NAME, constants::APP_VERSION);

    let config = ScoringConfig::from_env()
        .with_data_path(cli.data)
        .with_model_path(cli.model)
        .with_model_sha256(cli.model_sha256)
        .with_threshold(cli.threshold);
    log::debug!("Resolved config: {:?}", config);

    let store = ClaimStore::load(&config.data_path)
        .with_context(|| format!("Failed to load claims from {}", config.data_path.display()))?;

    let classifier = model::load_classifier(&config.model_path, config.model_sha256.as_deref())
        .with_context(|| format!("Failed to load model from {}", config.model_path.display()))?;

    let engine = ScoringEngine::new(store, classifier, config.threshold);
    log::info!(
        "Ready: {} claims from {}, {} model, threshold {}",
        engine.store().len(),
        engine.store().source().display(),
        engine.classifier().info().model_type,
        engine.threshold().base_threshold
    );
    let format = if cli.json { OutputFormat::Json } else { cli.format };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.claim_ids.is_empty() {
        let stdin = io::stdin();
        let prompt = stdin.is_terminal() && format == OutputFormat::Text;
        commands::run_interactive(&engine, stdin.lock(), &mut out, format, prompt)
            .context("Interactive session failed")?;
    } else {
        let stats = commands::run_batch(&engine, &cli.claim_ids, format, &mut out)
            .context("Failed to write results")?;
        log::info!(
            "Scored {} of {} claims ({} high risk)",
            stats.scored,
            cli.claim_ids.len(),
            stats.high_risk
        );
    }

    Ok(())
}
