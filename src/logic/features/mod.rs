//! Features Module - Feature Preparation Engine
//!
//! Tách logic chuẩn bị features khỏi record store và classifier.
//! Layout (schema) → Vector (typed row) → Prepare (copy + derived features).

pub mod layout;
pub mod vector;
pub mod prepare;

#[cfg(test)]
mod tests;

// Re-export common types
pub use layout::{
    feature_index, feature_kind, feature_name, FeatureKind, LayoutInfo, FEATURE_COUNT,
    FEATURE_LAYOUT, FEATURE_VERSION, MISSING_CATEGORY,
};
pub use vector::{FeatureError, FeatureExtractor, FeatureVector};
#[cfg(test)]
pub use vector::FeatureVectorBuilder;
pub use prepare::{current_year, prepare_claim_data};
