//! Scoring Engine - lookup → prepare → predict → verdict
//!
//! Holds the claim store and classifier loaded at startup. Both are
//! read-only; every `score` call is independent of the previous ones.

use super::error::{ProcessingError, ScoreError};
use super::types::{ClaimSummary, RiskLevel, ScoreReport};
use crate::logic::features::{current_year, prepare_claim_data};
use crate::logic::model::{Classifier, ThresholdConfig};
use crate::logic::records::ClaimStore;

pub struct ScoringEngine {
    store: ClaimStore,
    classifier: Box<dyn Classifier>,
    threshold: ThresholdConfig,
    /// Fixed year for Vehicle_Age; current year when None
    reference_year: Option<i32>,
}

impl ScoringEngine {
    pub fn new(store: ClaimStore, classifier: Box<dyn Classifier>, threshold: ThresholdConfig) -> Self {
        Self {
            store,
            classifier,
            threshold,
            reference_year: None,
        }
    }

    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Score one claim by identifier
    pub fn score(&self, claim_id: &str) -> Result<ScoreReport, ScoreError> {
        let claim_id = claim_id.trim();
        if claim_id.is_empty() {
            return Err(ScoreError::NotFound { claim_id: String::new() });
        }

        let record = self.store.find(claim_id).ok_or_else(|| {
            log::info!("Claim {} not found", claim_id);
            ScoreError::NotFound { claim_id: claim_id.to_string() }
        })?;

        let year = self.reference_year.unwrap_or_else(current_year);
        let vector = prepare_claim_data(record, year)?;
        log::debug!("Prepared features for {}: {}", claim_id, vector.to_log_entry());

        let probabilities = self.classifier.predict_proba(&vector)?;
        if !probabilities.is_valid() {
            return Err(ProcessingError::InvalidProbability(probabilities.negative(), probabilities.positive()).into());
        }

        let fraud_probability = probabilities.positive();
        let risk_level = RiskLevel::from_probability(fraud_probability, &self.threshold);
        let summary = ClaimSummary::from_record(record, self.store.headers())?;

        log::info!(
            "Claim {} scored {:.3} → {} risk",
            claim_id,
            fraud_probability,
            risk_level
        );

        Ok(ScoreReport {
            claim_id: claim_id.to_string(),
            fraud_probability,
            risk_level,
            recommended_action: risk_level.recommended_action().to_string(),
            threshold: self.threshold.base_threshold,
            model_type: self.classifier.info().model_type.clone(),
            summary,
        })
    }

    pub fn store(&self) -> &ClaimStore {
        &self.store
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn threshold(&self) -> &ThresholdConfig {
        &self.threshold
    }
}

// ============================================================================
// TESTS
// ============================================================================
