//! Scoring errors - the two failure kinds a lookup can report

use crate::logic::features::FeatureError;
use crate::logic::model::InferenceError;

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("Claim ID not found in database")]
    NotFound { claim_id: String },

    #[error("Error processing claim: {0}")]
    Processing(#[from] ProcessingError),
}

impl ScoreError {
    pub fn kind(&self) -> &'static str {
        match self {
            ScoreError::NotFound { .. } => "not_found",
            ScoreError::Processing(_) => "processing_error",
        }
    }
}

/// Anything that goes wrong after the record was found
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Required value {0} is empty")]
    EmptyValue(String),

    #[error("Column {field} must be numeric, got '{value}'")]
    NotNumeric { field: String, value: String },

    #[error("Classifier returned invalid probabilities [{0}, {1}]")]
    InvalidProbability(f32, f32),
}

impl From<FeatureError> for ScoreError {
    fn from(e: FeatureError) -> Self {
        ScoreError::Processing(e.into())
    }
}

impl From<InferenceError> for ScoreError {
    fn from(e: InferenceError) -> Self {
        ScoreError::Processing(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ScoreError::NotFound { claim_id: "X".to_string() };
        assert_eq!(err.to_string(), "Claim ID not found in database");
        assert_eq!(err.kind(), "not_found");

        let err: ScoreError = ProcessingError::MissingColumn("Total_Claim".to_string()).into();
        assert_eq!(err.to_string(), "Error processing claim: Missing required column: Total_Claim");
        assert_eq!(err.kind(), "processing_error");
    }

    #[test]
    fn test_feature_error_converts() {
        let err: ScoreError = FeatureError::NotNumeric {
            field: "Auto_Year".to_string(),
            value: "old".to_string(),
        }
        .into();
        assert!(matches!(err, ScoreError::Processing(ProcessingError::Feature(_))));
    }
}
