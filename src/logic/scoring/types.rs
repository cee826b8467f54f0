//! Scoring Types
//!
//! Core types cho kết quả chấm điểm claim.
//! KHÔNG chứa logic lookup - chỉ data structures.

use serde::{Deserialize, Serialize};

use super::error::ProcessingError;
use crate::logic::features::layout::field;
use crate::logic::model::ThresholdConfig;
use crate::logic::records::ClaimRecord;

/// Placeholder for descriptive fields absent from the record
pub const UNKNOWN: &str = "Unknown";

// ============================================================================
// RISK LEVEL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Standard processing
    Low,
    /// Manual review
    High,
}

impl RiskLevel {
    pub fn from_probability(probability: f32, threshold: &ThresholdConfig) -> Self {
        if threshold.is_high_risk(probability) {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low fraud risk",
            RiskLevel::High => "High fraud risk detected!",
        }
    }

    pub fn recommended_action(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Standard processing",
            RiskLevel::High => "This claim requires manual review",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CLAIM SUMMARY (verbatim from the record, not the feature row)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimSummary {
    pub total_claim: f64,
    pub vehicle_cost: f64,
    pub injury_claim: f64,
    pub property_claim: f64,
    pub auto_model: String,
    pub auto_make: String,
    pub auto_year: String,
    pub policy_state: String,
    pub accident_city: String,
    pub accident_state: String,
    pub accident_type: String,
}

impl ClaimSummary {
    /// The four amounts are required; descriptive fields fall back to "Unknown".
    /// `columns` is the header of the file the record came from.
    pub fn from_record(record: &ClaimRecord, columns: &[String]) -> Result<Self, ProcessingError> {
        let amount = |name: &str| -> Result<f64, ProcessingError> {
            match record.get(name) {
                None if columns.iter().any(|c| c == name) => Err(ProcessingError::EmptyValue(name.to_string())),
                None => Err(ProcessingError::MissingColumn(name.to_string())),
                Some(value) => value.as_number().ok_or_else(|| ProcessingError::NotNumeric {
                    field: name.to_string(),
                    value: value.as_text(),
                }),
            }
        };

        Ok(Self {
            total_claim: amount(field::TOTAL_CLAIM)?,
            vehicle_cost: amount(field::VEHICLE_COST)?,
            injury_claim: amount(field::INJURY_CLAIM)?,
            property_claim: amount(field::PROPERTY_CLAIM)?,
            auto_model: record.text_or(field::AUTO_MODEL, UNKNOWN),
            auto_make: record.text_or(field::AUTO_MAKE, UNKNOWN),
            auto_year: record.text_or(field::AUTO_YEAR, UNKNOWN),
            policy_state: record.text_or(field::POLICY_STATE, UNKNOWN),
            accident_city: record.text_or(field::ACCIDENT_CITY, UNKNOWN),
            accident_state: record.text_or(field::ACCIDENT_STATE, UNKNOWN),
            accident_type: record.text_or(field::ACCIDENT_TYPE, UNKNOWN),
        })
    }
}

// ============================================================================
// SCORE REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub claim_id: String,
    /// Fraud-positive probability (0.0 - 1.0)
    pub fraud_probability: f32,
    pub risk_level: RiskLevel,
    pub recommended_action: String,
    pub threshold: f32,
    pub model_type: String,
    pub summary: ClaimSummary,
}
