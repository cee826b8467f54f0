//! Feature Vector - Core data structure for classifier input
//!
//! **Versioned, schema-wide feature row**
//!
//! Every slot of `FEATURE_LAYOUT` always holds a value: `new()` seeds the
//! per-kind defaults, later steps only overwrite. `State_Mismatch` lives
//! next to the row, outside the layout, and is never sent to a classifier.

use serde::{Deserialize, Serialize};

use super::layout::{
    field, layout_hash, FeatureKind, FEATURE_LAYOUT, FEATURE_VERSION, MISSING_CATEGORY,
};
use crate::logic::records::{ClaimRecord, FieldValue};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureError {
    #[error("Column {field} must be numeric, got '{value}'")]
    NotNumeric { field: String, value: String },
}

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Values in order defined by FEATURE_LAYOUT
    values: Vec<FieldValue>,
    /// Extra schema-external flag (1 / 0), set by the derived step
    state_mismatch: Option<u8>,
}

impl FeatureVector {
    /// Full-width row with the default of every feature
    pub fn new() -> Self {
        let values = FEATURE_LAYOUT
            .iter()
            .map(|spec| default_value(spec.kind))
            .collect();

        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
            state_mismatch: None,
        }
    }

    /// Copy every record field that is part of the layout over its default
    pub fn apply_record(&mut self, record: &ClaimRecord) -> Result<(), FeatureError> {
        for (index, spec) in FEATURE_LAYOUT.iter().enumerate() {
            if let Some(value) = record.get(spec.name) {
                self.values[index] = coerce(spec.name, spec.kind, value)?;
            }
        }
        Ok(())
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index)
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<&FieldValue> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// Numeric value of a feature (None for unknown names or text slots)
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get_by_name(name).and_then(FieldValue::as_number)
    }

    /// Text value of a feature
    pub fn text(&self, name: &str) -> Option<String> {
        self.get_by_name(name).map(FieldValue::as_text)
    }

    /// Set feature by name, coerced to the feature's kind
    pub fn set_by_name(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<bool, FeatureError> {
        match super::layout::feature_index(name) {
            Some(index) => {
                let kind = FEATURE_LAYOUT[index].kind;
                self.values[index] = coerce(name, kind, &value.into())?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Set a numeric feature (derived features)
    pub fn set_number(&mut self, name: &str, value: f64) -> bool {
        match super::layout::feature_index(name) {
            Some(index) if FEATURE_LAYOUT[index].kind == FeatureKind::Numeric => {
                self.values[index] = FieldValue::Number(value);
                true
            }
            _ => false,
        }
    }

    pub fn state_mismatch(&self) -> Option<u8> {
        self.state_mismatch
    }

    pub fn set_state_mismatch(&mut self, mismatch: bool) {
        self.state_mismatch = Some(u8::from(mismatch));
    }

    /// Every key this vector carries: the layout, plus `State_Mismatch` once computed
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = FEATURE_LAYOUT.iter().map(|spec| spec.name).collect();
        if self.state_mismatch.is_some() {
            keys.push(field::STATE_MISMATCH);
        }
        keys
    }

    /// Named view in layout order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        FEATURE_LAYOUT.iter().map(|spec| spec.name).zip(self.values.iter())
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        let mut named: serde_json::Map<String, serde_json::Value> = self
            .iter()
            .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
            .collect();
        if let Some(flag) = self.state_mismatch {
            named.insert(field::STATE_MISMATCH.to_string(), serde_json::json!(flag));
        }

        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": named,
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

fn default_value(kind: FeatureKind) -> FieldValue {
    match kind {
        FeatureKind::Numeric => FieldValue::Number(0.0),
        FeatureKind::Categorical => FieldValue::Text(MISSING_CATEGORY.to_string()),
    }
}

fn coerce(name: &str, kind: FeatureKind, value: &FieldValue) -> Result<FieldValue, FeatureError> {
    match kind {
        FeatureKind::Numeric => value
            .as_number()
            .map(FieldValue::Number)
            .ok_or_else(|| FeatureError::NotNumeric {
                field: name.to_string(),
                value: value.as_text(),
            }),
        FeatureKind::Categorical => Ok(FieldValue::Text(value.as_text())),
    }
}

// ============================================================================
// FEATURE EXTRACTOR TRAIT
// ============================================================================

/// A derived-feature step, run after the record has been copied in
pub trait FeatureExtractor {
    /// Compute the feature(s) and update the vector
    fn extract(&self, vector: &mut FeatureVector);
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters (test fixtures)
#[cfg(test)]
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
}

#[cfg(test)]
impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self { vector: FeatureVector::new() }
    }

    pub fn number(mut self, name: &str, value: f64) -> Self {
        self.vector.set_number(name, value);
        self
    }

    /// Unknown names and values that do not fit the slot are ignored
    pub fn set(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        if let Err(e) = self.vector.set_by_name(name, value) {
            log::debug!("Builder ignored {}: {}", name, e);
        }
        self
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}

#[cfg(test)]
impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
