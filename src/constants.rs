//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Every value can be overridden from the environment (or a `.env` file)
//! and again from the command line.

/// Default claims file (CSV with a `Claim_ID` column)
pub const DEFAULT_DATA_PATH: &str = "Auto_Insurance_Fraud_Claims_File01.csv";

/// Default classifier artifact
///
/// `.onnx` is run through ONNX Runtime, `.json` is read as a logistic model.
pub const DEFAULT_MODEL_PATH: &str = "insurance_fraud_model.onnx";

/// Default fraud threshold (strictly greater means high risk)
pub const DEFAULT_RISK_THRESHOLD: f32 = 0.5;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Insurance Fraud Detection System";

// ============================================
// Environment variable names
// ============================================

pub const ENV_DATA_PATH: &str = "CLAIM_DATA_PATH";
pub const ENV_MODEL_PATH: &str = "CLAIM_MODEL_PATH";
pub const ENV_MODEL_SHA256: &str = "CLAIM_MODEL_SHA256";
pub const ENV_RISK_THRESHOLD: &str = "CLAIM_RISK_THRESHOLD";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get claims file path from environment or use default
pub fn get_data_path() -> String {
    std::env::var(ENV_DATA_PATH)
        .unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string())
}

/// Get model path from environment or use default
pub fn get_model_path() -> String {
    std::env::var(ENV_MODEL_PATH)
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get expected model checksum from environment (no default)
pub fn get_model_sha256() -> Option<String> {
    std::env::var(ENV_MODEL_SHA256)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Get risk threshold from environment or use default
pub fn get_risk_threshold() -> f32 {
    std::env::var(ENV_RISK_THRESHOLD)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RISK_THRESHOLD)
}
