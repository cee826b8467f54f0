//! Runtime Configuration
//!
//! Defaults from `constants.rs`, overridden by the environment, then by
//! command-line flags. Resolved once at startup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::logic::model::ThresholdConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Claims CSV
    pub data_path: PathBuf,
    /// Classifier artifact (.onnx / .json)
    pub model_path: PathBuf,
    /// Expected SHA-256 of the model, if any
    pub model_sha256: Option<String>,
    pub threshold: ThresholdConfig,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(constants::DEFAULT_DATA_PATH),
            model_path: PathBuf::from(constants::DEFAULT_MODEL_PATH),
            model_sha256: None,
            threshold: ThresholdConfig::default(),
        }
    }
}

impl ScoringConfig {
    /// Read from environment with fallback to defaults
    pub fn from_env() -> Self {
        Self {
            data_path: PathBuf::from(constants::get_data_path()),
            model_path: PathBuf::from(constants::get_model_path()),
            model_sha256: constants::get_model_sha256(),
            threshold: ThresholdConfig::new(constants::get_risk_threshold()),
        }
    }

    pub fn with_data_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.data_path = path;
        }
        self
    }

    pub fn with_model_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.model_path = path;
        }
        self
    }

    pub fn with_model_sha256(mut self, digest: Option<String>) -> Self {
        if digest.is_some() {
            self.model_sha256 = digest;
        }
        self
    }

    pub fn with_threshold(mut self, threshold: Option<f32>) -> Self {
        if let Some(value) = threshold {
            self.threshold = ThresholdConfig::new(value);
        }
        self
    }
}
