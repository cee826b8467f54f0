//! Report Rendering - score results for a human reviewer
//!
//! Text layout mirrors the review screen: probability, verdict, action,
//! then the claim summary (amounts as currency, descriptive fields).

use crate::logic::features::layout::field;
use crate::logic::scoring::{RiskLevel, ScoreError, ScoreReport};

/// Shown under processing errors
pub const REQUIRED_COLUMNS_HINT: &str = "Please ensure your data contains all required columns";

/// Key fields listed in the help text
pub const REQUIRED_FIELDS: &[&str] = &[
    field::TOTAL_CLAIM,
    field::VEHICLE_COST,
    field::INJURY_CLAIM,
    field::PROPERTY_CLAIM,
    field::AUTO_YEAR,
    field::POLICY_STATE,
    field::ACCIDENT_STATE,
    field::ACCIDENT_TYPE,
];

// ============================================================================
// FORMATTING HELPERS
// ============================================================================

/// 0.724 → "72.4%"
pub fn format_percent(probability: f32) -> String {
    format!("{:.1}%", f64::from(probability) * 100.0)
}

/// 12345.678 → "$12,345.68"
pub fn format_currency(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("${}{}.{}", sign, grouped, frac_part)
}

// ============================================================================
// TEXT OUTPUT
// ============================================================================

pub fn render_report(report: &ScoreReport) -> String {
    let marker = match report.risk_level {
        RiskLevel::High => "[!]",
        RiskLevel::Low => "[ok]",
    };
    let s = &report.summary;

    let mut lines = vec![
        format!("Results for Claim {}", report.claim_id),
        format!("Fraud Probability: {}", format_percent(report.fraud_probability)),
        format!("{} {}", marker, report.risk_level.label()),
        format!("Recommended action: {}", report.recommended_action),
        String::new(),
        "Claim Summary".to_string(),
    ];

    let amounts = [
        ("Total Claim", s.total_claim),
        ("Vehicle Value", s.vehicle_cost),
        ("Injury Claim", s.injury_claim),
        ("Property Claim", s.property_claim),
    ];
    for (label, amount) in amounts {
        lines.push(format!("  {:<16}{}", format!("{}:", label), format_currency(amount)));
    }

    lines.push(String::new());
    lines.push(format!("  Automobile Model: {}, {}", s.auto_model, s.auto_make));
    lines.push(format!("  Automobile Year: {}", s.auto_year));
    lines.push(format!("  Policy State: {}", s.policy_state));
    lines.push(format!("  Location: {}, {}", s.accident_city, s.accident_state));
    lines.push(format!("  Accident Type: {}", s.accident_type));

    lines.join("\n")
}

pub fn render_error(error: &ScoreError) -> String {
    match error {
        ScoreError::NotFound { .. } => error.to_string(),
        ScoreError::Processing(_) => format!("{}\n{}", error, REQUIRED_COLUMNS_HINT),
    }
}

pub fn required_fields_help() -> String {
    let mut lines = vec![
        "Required Claim Data Fields".to_string(),
        "For this system to work, your claims data must include these key fields:".to_string(),
    ];
    lines.extend(REQUIRED_FIELDS.iter().map(|f| format!("- {}", f)));
    lines.push("- And all other features used in model training".to_string());
    lines.join("\n")
}

// ============================================================================
// JSON OUTPUT
// ============================================================================

pub fn render_json(claim_id: &str, result: &Result<ScoreReport, ScoreError>) -> serde_json::Value {
    match result {
        Ok(report) => serde_json::json!({
            "ok": true,
            "report": report,
        }),
        Err(e) => serde_json::json!({
            "ok": false,
            "claim_id": claim_id.trim(),
            "error": {
                "kind": e.kind(),
                "message": e.to_string(),
            },
        }),
    }
}

// ============================================================================
// TESTS
// ============================================================================
