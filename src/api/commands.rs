//! Commands - front-end entry points over the scoring engine
//!
//! Một claim ID vào, một báo cáo ra. Errors are printed and the session
//! keeps going; nothing here aborts the process.

use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};

use super::report;
use crate::logic::scoring::{RiskLevel, ScoreError, ScoreReport, ScoringEngine};

/// How results are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub scored: usize,
    pub high_risk: usize,
    pub not_found: usize,
    pub failed: usize,
}

impl SessionStats {
    fn record(&mut self, result: &Result<ScoreReport, ScoreError>) {
        match result {
            Ok(r) => {
                self.scored += 1;
                if r.risk_level == RiskLevel::High {
                    self.high_risk += 1;
                }
            }
            Err(ScoreError::NotFound { .. }) => self.not_found += 1,
            Err(ScoreError::Processing(_)) => self.failed += 1,
        }
    }
}

/// Words that end an interactive session
const EXIT_WORDS: &[&str] = &["quit", "exit"];

// ============================================================================
// SINGLE CLAIM
// ============================================================================

/// Score one claim and render it in the requested format
pub fn score_claim(
    engine: &ScoringEngine,
    claim_id: &str,
    format: OutputFormat,
) -> (String, Result<ScoreReport, ScoreError>) {
    let result = engine.score(claim_id);

    if let Err(e) = &result {
        log::warn!("Claim {}: {}", claim_id.trim(), e);
    }

    let rendered = match format {
        OutputFormat::Text => match &result {
            Ok(r) => report::render_report(r),
            Err(e) => report::render_error(e),
        },
        OutputFormat::Json => report::render_json(claim_id, &result).to_string(),
    };

    (rendered, result)
}

// ============================================================================
// BATCH (claim IDs from the command line)
// ============================================================================

pub fn run_batch<W: Write>(
    engine: &ScoringEngine,
    claim_ids: &[String],
    format: OutputFormat,
    out: &mut W,
) -> io::Result<SessionStats> {
    let mut stats = SessionStats::default();

    let claim_ids = claim_ids.iter().map(|id| id.trim()).filter(|id| !id.is_empty());

    for (i, claim_id) in claim_ids.enumerate() {
        let (rendered, result) = score_claim(engine, claim_id, format);
        stats.record(&result);

        if format == OutputFormat::Text && i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", rendered)?;
    }

    out.flush()?;
    Ok(stats)
}

// ============================================================================
// INTERACTIVE (one claim ID per line)
// ============================================================================

pub fn run_interactive<R: BufRead, W: Write>(
    engine: &ScoringEngine,
    input: R,
    out: &mut W,
    format: OutputFormat,
    prompt: bool,
) -> io::Result<SessionStats> {
    let mut stats = SessionStats::default();
    let mut lines = input.lines();

    loop {
        if prompt {
            write!(out, "Enter Claim ID: ")?;
            out.flush()?;
        }

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        let claim_id = line.trim();
        if claim_id.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&claim_id.to_lowercase().as_str()) {
            break;
        }

        let (rendered, result) = score_claim(engine, claim_id, format);
        stats.record(&result);

        writeln!(out, "{}", rendered)?;
        if format == OutputFormat::Text {
            writeln!(out)?;
        }
        out.flush()?;
    }

    log::info!(
        "Session ended: {} scored ({} high risk), {} not found, {} failed",
        stats.scored,
        stats.high_risk,
        stats.not_found,
        stats.failed
    );
    Ok(stats)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::{LogisticClassifier, LogisticModel, ThresholdConfig};
    use crate::logic::records::ClaimStore;

    const CLAIMS: &str = "\
Claim_ID,Total_Claim,Vehicle_Cost,Injury_Claim,Property_Claim,Accident_Severity
AB1,60000,18000,6000,12000,Major Damage
AB2,2000,500,500,500,Trivial Damage
AB3,,500,500,500,Trivial Damage
";

    const MODEL_JSON: &str = r#"{
        "intercept": 0.0,
        "categorical": { "Accident_Severity": { "Major Damage": 2.0, "Trivial Damage": -2.0 } }
    }"#;

    fn engine() -> ScoringEngine {
        let store = ClaimStore::from_reader(CLAIMS.as_bytes()).unwrap();
        let model: LogisticModel = serde_json::from_str(MODEL_JSON).unwrap();
        let classifier = LogisticClassifier::new(model, "<test>").unwrap();
        ScoringEngine::new(store, Box::new(classifier), ThresholdConfig::default()).with_reference_year(2025)
    }

    #[test]
    fn test_score_claim_text() {
        let (text, result) = score_claim(&engine(), "AB1", OutputFormat::Text);
        assert!(result.is_ok());
        assert!(text.contains("High fraud risk detected!"));
        assert!(text.contains("Fraud Probability: 88.1%"));
    }

    #[test]
    fn test_score_claim_json() {
        let (json, _) = score_claim(&engine(), "AB2", OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["report"]["risk_level"], "low");
    }

    #[test]
    fn test_run_batch() {
        let ids = vec!["AB1".to_string(), "NOPE".to_string(), "AB3".to_string()];
        let mut out = Vec::new();
        let stats = run_batch(&engine(), &ids, OutputFormat::Text, &mut out).unwrap();

        assert_eq!(
            stats,
            SessionStats { scored: 1, high_risk: 1, not_found: 1, failed: 1 }
        );

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Claim ID not found in database"));
        assert!(text.contains("Required value Total_Claim is empty"));
        assert!(text.contains(report::REQUIRED_COLUMNS_HINT));
    }

    #[test]
    fn test_run_batch_skips_blank_ids() {
        let store = ClaimStore::from_reader(
            "Claim_ID,Total_Claim,Vehicle_Cost,Injury_Claim,Property_Claim\n,1,1,1,1\nAB2,2000,500,500,500\n".as_bytes(),
        )
        .unwrap();
        let model: LogisticModel = serde_json::from_str(MODEL_JSON).unwrap();
        let classifier = LogisticClassifier::new(model, "<test>").unwrap();
        let engine = ScoringEngine::new(store, Box::new(classifier), ThresholdConfig::default());

        let ids = vec!["".to_string(), "   ".to_string(), " AB2 ".to_string()];
        let mut out = Vec::new();
        let stats = run_batch(&engine, &ids, OutputFormat::Json, &mut out).unwrap();

        assert_eq!(stats, SessionStats { scored: 1, ..Default::default() });
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("\"claim_id\":\"AB2\""));
    }

    #[test]
    fn test_run_interactive() {
        let input = "AB2\n\n  \nNOPE\nquit\nAB1\n";
        let mut out = Vec::new();
        let stats = run_interactive(&engine(), input.as_bytes(), &mut out, OutputFormat::Text, true).unwrap();

        // AB1 comes after "quit" and is never scored
        assert_eq!(stats.scored, 1);
        assert_eq!(stats.not_found, 1);
        assert_eq!(stats.high_risk, 0);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Enter Claim ID: "));
        assert!(text.contains("Results for Claim AB2"));
        assert!(!text.contains("Results for Claim AB1"));
    }

    #[test]
    fn test_run_interactive_eof() {
        let mut out = Vec::new();
        let stats = run_interactive(&engine(), "AB1\nAB2".as_bytes(), &mut out, OutputFormat::Json, false).unwrap();
        assert_eq!(stats.scored, 2);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        for line in text.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["ok"], true);
        }
    }
}
