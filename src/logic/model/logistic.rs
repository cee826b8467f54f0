//! Logistic Classifier - JSON-exported logistic regression
//!
//! Lightweight alternative to an ONNX artifact. Coefficients are read from
//! a JSON export of the trained model:
//!
//! ```json
//! {
//!   "model_type": "logistic_regression",
//!   "intercept": -2.1,
//!   "numeric": { "Total_Claim": { "weight": 0.8, "mean": 52000.0, "scale": 26000.0 } },
//!   "categorical": { "Accident_Severity": { "Major Damage": 2.3, "Minor Damage": -0.4 } }
//! }
//! ```
//!
//! logit = intercept + Σ weight · (x - mean) / scale + Σ weight[category]
//! Unseen categories contribute 0.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::inference::{ClassProbabilities, Classifier, InferenceError, ModelInfo};
use crate::logic::features::layout::{self, FeatureKind};
use crate::logic::features::{FeatureVector, FEATURE_COUNT};

fn default_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericTerm {
    pub weight: f64,
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    #[serde(default)]
    pub model_type: Option<String>,
    pub intercept: f64,
    #[serde(default)]
    pub numeric: HashMap<String, NumericTerm>,
    #[serde(default)]
    pub categorical: HashMap<String, HashMap<String, f64>>,
}

impl LogisticModel {
    /// Every term must name a layout feature of the right kind
    pub fn validate(&self) -> Result<(), InferenceError> {
        for (name, term) in &self.numeric {
            if layout::feature_kind(name) != Some(FeatureKind::Numeric) {
                return Err(InferenceError::Metadata(format!("{} is not a numeric feature", name)));
            }
            if !(term.scale > 0.0) {
                return Err(InferenceError::Metadata(format!("{} has non-positive scale {}", name, term.scale)));
            }
        }

        for name in self.categorical.keys() {
            if layout::feature_kind(name) != Some(FeatureKind::Categorical) {
                return Err(InferenceError::Metadata(format!("{} is not a categorical feature", name)));
            }
        }

        Ok(())
    }

    pub fn logit(&self, vector: &FeatureVector) -> Result<f64, InferenceError> {
        let mut z = self.intercept;

        for (name, term) in &self.numeric {
            let x = vector.number(name).ok_or_else(|| {
                InferenceError::Encoding(format!("{} has no numeric value", name))
            })?;
            z += term.weight * (x - term.mean) / term.scale;
        }

        for (name, weights) in &self.categorical {
            if let Some(value) = vector.text(name) {
                z += weights.get(&value).copied().unwrap_or(0.0);
            }
        }

        Ok(z)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

// ============================================================================
// CLASSIFIER
// ============================================================================

pub struct LogisticClassifier {
    model: LogisticModel,
    info: ModelInfo,
}

impl LogisticClassifier {
    pub fn new(model: LogisticModel, model_path: impl Into<String>) -> Result<Self, InferenceError> {
        model.validate()?;

        let info = ModelInfo {
            model_path: model_path.into(),
            model_type: model.model_type.clone().unwrap_or_else(|| "logistic_regression".to_string()),
            backend: "logistic (json)".to_string(),
            features: FEATURE_COUNT,
            loaded_at: chrono::Utc::now(),
        };

        Ok(Self { model, info })
    }

    /// Load coefficients từ JSON file
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        log::info!("Loading logistic model from: {}", path.display());

        if !path.exists() {
            return Err(InferenceError::ModelNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| InferenceError::Load(format!("Failed to read {}: {}", path.display(), e)))?;
        let model: LogisticModel = serde_json::from_str(&content)
            .map_err(|e| InferenceError::Load(format!("Failed to parse {}: {}", path.display(), e)))?;

        log::info!(
            "Logistic model loaded ({} numeric, {} categorical terms)",
            model.numeric.len(),
            model.categorical.len()
        );
        Self::new(model, path.display().to_string())
    }
}

impl Classifier for LogisticClassifier {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn predict_proba(&self, vector: &FeatureVector) -> Result<ClassProbabilities, InferenceError> {
        let p = sigmoid(self.model.logit(vector)?);
        Ok(ClassProbabilities([(1.0 - p) as f32, p as f32]))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::FeatureVectorBuilder;
    use std::io::Write;

    const MODEL_JSON: &str = r#"{
        "model_type": "logistic_regression",
        "intercept": -1.0,
        "numeric": {
            "Total_Claim": { "weight": 2.0, "mean": 1000.0, "scale": 500.0 }
        },
        "categorical": {
            "Accident_Severity": { "Major Damage": 3.0, "Trivial Damage": -2.0 }
        }
    }"#;

    fn model() -> LogisticModel {
        serde_json::from_str(MODEL_JSON).unwrap()
    }

    #[test]
    fn test_logit() {
        let model = model();

        // At the mean, unseen category → intercept only
        let vector = FeatureVectorBuilder::new().number("Total_Claim", 1000.0).build();
        assert!((model.logit(&vector).unwrap() - (-1.0)).abs() < 1e-12);

        let vector = FeatureVectorBuilder::new()
            .number("Total_Claim", 1500.0)
            .set("Accident_Severity", "Major Damage")
            .build();
        // -1 + 2 * 1 + 3
        assert!((model.logit(&vector).unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_predict_proba_sums_to_one() {
        let classifier = LogisticClassifier::new(model(), "<test>").unwrap();
        let vector = FeatureVectorBuilder::new()
            .number("Total_Claim", 1000.0)
            .set("Accident_Severity", "Major Damage")
            .build();

        let p = classifier.predict_proba(&vector).unwrap();
        assert!(p.is_valid());
        assert!((p.negative() + p.positive() - 1.0).abs() < 1e-6);
        // logit 2 → ~0.881
        assert!((p.positive() - 0.8808).abs() < 1e-3);
    }

    #[test]
    fn test_zero_logit_is_half() {
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn test_validate_rejects_wrong_kind() {
        let mut bad = model();
        bad.numeric.insert("Gender".to_string(), NumericTerm { weight: 1.0, mean: 0.0, scale: 1.0 });
        assert!(matches!(LogisticClassifier::new(bad, "<test>"), Err(InferenceError::Metadata(_))));

        let mut bad = model();
        bad.categorical.insert("State_Mismatch".to_string(), HashMap::new());
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_scale() {
        let mut bad = model();
        bad.numeric.insert("Witnesses".to_string(), NumericTerm { weight: 1.0, mean: 0.0, scale: 0.0 });
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(MODEL_JSON.as_bytes()).unwrap();

        let classifier = LogisticClassifier::load(file.path()).unwrap();
        assert_eq!(classifier.info().model_type, "logistic_regression");
        assert_eq!(classifier.info().features, FEATURE_COUNT);
    }

    #[test]
    fn test_load_missing_file() {
        let result = LogisticClassifier::load(Path::new("/nonexistent/model.json"));
        assert!(matches!(result, Err(InferenceError::ModelNotFound(_))));
    }
}
