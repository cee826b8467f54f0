//! Claim Record - one row of the claims file
//!
//! Immutable once loaded. Fields are kept by column name; which of them
//! the classifier needs is decided later by the feature layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::value::FieldValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    claim_id: String,
    fields: BTreeMap<String, FieldValue>,
}

impl ClaimRecord {
    pub fn new(claim_id: impl Into<String>) -> Self {
        Self {
            claim_id: claim_id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn claim_id(&self) -> &str {
        &self.claim_id
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Numeric value of a field, if present and numeric
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    /// Text of a field, or `fallback` when absent
    pub fn text_or(&self, name: &str, fallback: &str) -> String {
        self.get(name)
            .map(FieldValue::as_text)
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
