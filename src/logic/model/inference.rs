//! Inference Engine - classifier trait + ONNX Runtime backend
//!
//! Load ONNX model một lần khi khởi động, chỉ đọc sau đó.
//! The classifier sees one prepared feature row and returns the
//! two-class probability pair; index 1 is the fraud-positive class.

use std::path::Path;

use ndarray::Array2;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;

use super::metadata::ModelMetadata;
use crate::logic::features::layout::LayoutMismatchError;
use crate::logic::features::{FeatureVector, FEATURE_COUNT};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Failed to load model: {0}")]
    Load(String),

    #[error("Unsupported model format: {0}")]
    UnsupportedFormat(String),

    #[error("Model checksum mismatch: expected {expected}, got {actual}")]
    Checksum { expected: String, actual: String },

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),

    #[error("Feature names mismatch: {0}")]
    FeatureNames(String),

    #[error("Invalid model metadata: {0}")]
    Metadata(String),

    #[error("Failed to encode features: {0}")]
    Encoding(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Invalid model output: {0}")]
    InvalidOutput(String),
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Two-class probabilities `[legitimate, fraud]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities(pub [f32; 2]);

impl ClassProbabilities {
    /// Fraud-positive probability (index 1)
    pub fn positive(&self) -> f32 {
        self.0[1]
    }

    pub fn negative(&self) -> f32 {
        self.0[0]
    }

    /// Both entries finite and inside [0, 1]
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|p| p.is_finite() && (0.0..=1.0).contains(p))
    }
}

/// Model info for logs / status output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_path: String,
    pub model_type: String,
    pub backend: String,
    pub features: usize,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trait cho classifiers (ONNX, logistic JSON, test stubs)
pub trait Classifier {
    fn info(&self) -> &ModelInfo;
    fn predict_proba(&self, vector: &FeatureVector) -> Result<ClassProbabilities, InferenceError>;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// ONNX classifier taking a `float32[1, 47]` row
pub struct OnnxClassifier {
    session: Mutex<Session>,
    metadata: ModelMetadata,
    info: ModelInfo,
}

impl OnnxClassifier {
    /// Load ONNX model từ file
    pub fn load(model_path: &Path, metadata: ModelMetadata) -> Result<Self, InferenceError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(InferenceError::ModelNotFound(model_path.display().to_string()));
        }

        let session = Session::builder()
            .map_err(|e| InferenceError::Load(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::Load(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| InferenceError::Load(format!("Failed to load model: {}", e)))?;

        log::info!("ONNX model loaded successfully");
        Ok(Self::with_session(session, metadata, model_path.display().to_string()))
    }

    fn with_session(session: Session, metadata: ModelMetadata, model_path: String) -> Self {
        let info = ModelInfo {
            model_path,
            model_type: metadata.model_type.clone(),
            backend: "ONNX Runtime (CPU)".to_string(),
            features: FEATURE_COUNT,
            loaded_at: chrono::Utc::now(),
        };

        Self {
            session: Mutex::new(session),
            metadata,
            info,
        }
    }
}

impl Classifier for OnnxClassifier {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn predict_proba(&self, vector: &FeatureVector) -> Result<ClassProbabilities, InferenceError> {
        let start_time = std::time::Instant::now();

        let row = self.metadata.encode(vector)?;
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), row)
            .map_err(|e| InferenceError::Encoding(format!("Array error: {}", e)))?;

        let mut session = self.session.lock();

        let output_name = match &self.metadata.probability_output {
            Some(name) => name.clone(),
            None => session.outputs.last()
                .map(|o| o.name.clone())
                .ok_or_else(|| InferenceError::InvalidOutput("No output defined".to_string()))?,
        };

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError::Inference(format!("Tensor error: {}", e)))?;

        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Inference(e.to_string()))?;

        let output = outputs.get(&output_name)
            .ok_or_else(|| InferenceError::InvalidOutput(format!("No output named {}", output_name)))?;

        let output_tensor = output.try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::InvalidOutput(format!("Extract error: {}", e)))?;

        let data = output_tensor.1;
        if data.len() < 2 {
            return Err(InferenceError::InvalidOutput(format!(
                "expected 2 class probabilities, got {}",
                data.len()
            )));
        }

        let probabilities = ClassProbabilities([data[0], data[1]]);
        log::debug!("ONNX inference took {}us", start_time.elapsed().as_micros());

        Ok(probabilities)
    }
}
