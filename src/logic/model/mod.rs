//! Model Module - Fraud classifier
//!
//! Tách logic inference khỏi feature preparation.
//! The artifact is picked by extension: `.onnx` → ONNX Runtime,
//! `.json` → logistic coefficients.

pub mod inference;
pub mod metadata;
pub mod logistic;
pub mod guard;
pub mod threshold;

use std::path::Path;

// Re-export common types
pub use inference::{ClassProbabilities, Classifier, InferenceError, ModelInfo, OnnxClassifier};
pub use metadata::ModelMetadata;
pub use logistic::{LogisticClassifier, LogisticModel};
pub use threshold::ThresholdConfig;

/// Verify (when a digest is known) and load a classifier artifact
pub fn load_classifier(
    model_path: &Path,
    expected_sha256: Option<&str>,
) -> Result<Box<dyn Classifier>, InferenceError> {
    if !model_path.exists() {
        return Err(InferenceError::ModelNotFound(model_path.display().to_string()));
    }

    match guard::expected_checksum(model_path, expected_sha256) {
        Some(expected) => guard::verify_checksum(model_path, &expected)?,
        None => log::info!("No checksum configured for {}, skipping verification", model_path.display()),
    }

    let extension = model_path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let classifier: Box<dyn Classifier> = match extension.as_str() {
        "onnx" => {
            let metadata = ModelMetadata::load_for_model(model_path)?;
            Box::new(OnnxClassifier::load(model_path, metadata)?)
        }
        "json" => Box::new(LogisticClassifier::load(model_path)?),
        other => return Err(InferenceError::UnsupportedFormat(format!(".{}", other))),
    };

    let info = classifier.info();
    log::info!("Classifier ready: {} via {}", info.model_type, info.backend);
    Ok(classifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MODEL_JSON: &str = r#"{"intercept": 0.0, "numeric": {"Total_Claim": {"weight": 0.001}}}"#;

    fn write_model(dir: &Path, name: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(MODEL_JSON.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_json_classifier() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(dir.path(), "model.json");

        let classifier = load_classifier(&path, None).unwrap();
        assert_eq!(classifier.info().model_type, "logistic_regression");
    }

    #[test]
    fn test_load_with_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(dir.path(), "model.json");
        let digest = guard::sha256_hex(MODEL_JSON.as_bytes());

        assert!(load_classifier(&path, Some(&digest)).is_ok());

        let wrong = "0".repeat(64);
        assert!(matches!(load_classifier(&path, Some(&wrong)), Err(InferenceError::Checksum { .. })));
    }

    #[test]
    fn test_checksum_file_is_honoured() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(dir.path(), "model.json");
        std::fs::write(guard::checksum_path(&path), "deadbeef  model.json\n").unwrap();

        assert!(matches!(load_classifier(&path, None), Err(InferenceError::Checksum { .. })));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(dir.path(), "model.pkl");
        assert!(matches!(load_classifier(&path, None), Err(InferenceError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_model() {
        let result = load_classifier(Path::new("/nonexistent/model.onnx"), None);
        assert!(matches!(result, Err(InferenceError::ModelNotFound(_))));
    }
}
