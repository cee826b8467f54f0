//! Model Metadata - sidecar describing how a classifier reads the feature row
//!
//! Optional JSON file next to the model (`<model>.meta.json`):
//!
//! ```json
//! {
//!   "model_type": "random_forest",
//!   "feature_version": 1,
//!   "layout_hash": 2882400000,
//!   "probability_output": "probabilities",
//!   "categories": { "Gender": ["FEMALE", "MALE"] },
//!   "unknown_category": -1.0
//! }
//! ```
//!
//! Categorical features are fed to the model as ordinal codes: the index of
//! the value in its `categories` list, or `unknown_category` when unseen.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::inference::InferenceError;
use crate::logic::features::layout::{self, FeatureKind, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
use crate::logic::features::FeatureVector;
use crate::logic::records::FieldValue;

fn default_unknown_category() -> f32 {
    -1.0
}

fn default_model_type() -> String {
    "unknown".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    #[serde(default = "default_model_type")]
    pub model_type: String,
    /// Layout the model was trained on (checked at load when present)
    #[serde(default)]
    pub feature_version: Option<u8>,
    #[serde(default)]
    pub layout_hash: Option<u32>,
    /// Column order used at training time (checked at load when present)
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    /// Name of the `float32[1, 2]` probabilities output. Last output if unset.
    #[serde(default)]
    pub probability_output: Option<String>,
    /// Ordinal vocabulary per categorical feature
    #[serde(default)]
    pub categories: HashMap<String, Vec<String>>,
    #[serde(default = "default_unknown_category")]
    pub unknown_category: f32,
}

impl Default for ModelMetadata {
    fn default() -> Self {
        Self {
            model_type: default_model_type(),
            feature_version: None,
            layout_hash: None,
            feature_names: None,
            probability_output: None,
            categories: HashMap::new(),
            unknown_category: default_unknown_category(),
        }
    }
}

impl ModelMetadata {
    /// Sidecar path for a model file (`model.onnx` → `model.meta.json`)
    pub fn sidecar_path(model_path: &Path) -> PathBuf {
        model_path.with_extension("meta.json")
    }

    /// Load metadata from JSON file and check it against the current layout
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| InferenceError::Metadata(format!("Failed to read {}: {}", path.display(), e)))?;

        let metadata: ModelMetadata = serde_json::from_str(&content)
            .map_err(|e| InferenceError::Metadata(format!("Failed to parse {}: {}", path.display(), e)))?;

        metadata.validate()?;
        log::info!("Model metadata loaded from: {}", path.display());
        Ok(metadata)
    }

    /// Sidecar if it exists, defaults otherwise
    pub fn load_for_model(model_path: &Path) -> Result<Self, InferenceError> {
        let sidecar = Self::sidecar_path(model_path);
        if sidecar.exists() {
            Self::load(&sidecar)
        } else {
            log::info!("No metadata sidecar at {}, using defaults", sidecar.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), InferenceError> {
        // Each declared field is checked on its own; an absent one matches
        if self.feature_version.is_some() || self.layout_hash.is_some() {
            layout::validate_layout(
                self.feature_version.unwrap_or(FEATURE_VERSION),
                self.layout_hash.unwrap_or_else(layout::layout_hash),
            )?;
        }

        if let Some(names) = &self.feature_names {
            let matches = names.len() == FEATURE_COUNT
                && names.iter().zip(layout::feature_names()).all(|(a, b)| a == b);
            if !matches {
                return Err(InferenceError::FeatureNames(format!(
                    "model declares {} features that do not match the {}-feature layout",
                    names.len(),
                    FEATURE_COUNT
                )));
            }
        }

        for name in self.categories.keys() {
            if layout::feature_kind(name) != Some(FeatureKind::Categorical) {
                return Err(InferenceError::Metadata(format!(
                    "categories given for {}, which is not a categorical feature",
                    name
                )));
            }
        }

        let uncovered = FEATURE_LAYOUT
            .iter()
            .filter(|spec| spec.kind == FeatureKind::Categorical && !self.categories.contains_key(spec.name))
            .count();
        if uncovered > 0 {
            log::warn!(
                "{} categorical features have no encoding, they will be sent as {}",
                uncovered,
                self.unknown_category
            );
        }

        Ok(())
    }

    /// Encode the feature row into the model's numeric input
    pub fn encode(&self, vector: &FeatureVector) -> Result<Vec<f32>, InferenceError> {
        let mut row = Vec::with_capacity(FEATURE_COUNT);

        for (spec, value) in FEATURE_LAYOUT.iter().zip(vector.values()) {
            let encoded = match (spec.kind, value) {
                (FeatureKind::Numeric, FieldValue::Number(n)) => *n as f32,
                (FeatureKind::Numeric, FieldValue::Text(s)) => {
                    return Err(InferenceError::Encoding(format!(
                        "{} holds text '{}' in a numeric slot",
                        spec.name, s
                    )));
                }
                (FeatureKind::Categorical, value) => self.category_code(spec.name, &value.as_text()),
            };
            row.push(encoded);
        }

        Ok(row)
    }

    fn category_code(&self, name: &str, value: &str) -> f32 {
        self.categories
            .get(name)
            .and_then(|vocab| vocab.iter().position(|v| v == value))
            .map(|i| i as f32)
            .unwrap_or(self.unknown_category)
    }
}

// ============================================================================
// TESTS
// ============================================================================
