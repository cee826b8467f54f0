//! Field Value - scalar cell of a claim record or feature vector

use serde::{Deserialize, Serialize};

/// Cells that read as "no value" in the claims file
const NULL_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A"];

/// A numeric or text scalar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Parse a raw cell. Returns None for empty / null-marker cells.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if NULL_MARKERS.contains(&raw) {
            return None;
        }

        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(FieldValue::Number(n)),
            _ => Some(FieldValue::Text(raw.to_string())),
        }
    }

    /// Numeric view. Text is accepted if it parses as a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Text view, numbers rendered the way the claims file writes them
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Whole numbers print without a trailing ".0" (2015, not 2015.0)
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}
