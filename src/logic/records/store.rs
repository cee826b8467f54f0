//! Claim Store - claims file loaded once at startup
//!
//! Read-only after `load`. Lookups return the first row whose `Claim_ID`
//! equals the requested identifier.

use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};

use super::record::ClaimRecord;
use super::value::FieldValue;
use crate::logic::features::layout::{self, field};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read claims file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Claims file {source_name} has no `{}` column", field::CLAIM_ID)]
    MissingIdColumn { source_name: String },
}

// ============================================================================
// STORE
// ============================================================================

#[derive(Debug, Clone)]
pub struct ClaimStore {
    source: PathBuf,
    headers: Vec<String>,
    records: Vec<ClaimRecord>,
}

impl ClaimStore {
    /// Load a claims CSV from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        log::info!("Loading claims from: {}", path.display());

        let reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
        Self::from_csv(reader, path.to_path_buf())
    }

    /// Load claims CSV from any reader (in-memory data, stdin, tests)
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, StoreError> {
        let reader = ReaderBuilder::new().trim(Trim::All).from_reader(rdr);
        Self::from_csv(reader, PathBuf::from("<memory>"))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, source: PathBuf) -> Result<Self, StoreError> {
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let id_index = headers
            .iter()
            .position(|h| h == field::CLAIM_ID)
            .ok_or_else(|| StoreError::MissingIdColumn {
                source_name: source.display().to_string(),
            })?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let claim_id = row.get(id_index).unwrap_or_default().to_string();

            let mut record = ClaimRecord::new(claim_id);
            for (name, cell) in headers.iter().zip(row.iter()) {
                if let Some(value) = FieldValue::parse(cell) {
                    record.insert(name.clone(), value);
                }
            }
            records.push(record);
        }

        let store = Self { source, headers, records };
        store.log_summary();
        Ok(store)
    }

    fn log_summary(&self) {
        log::info!(
            "Loaded {} claims ({} columns) from {}",
            self.records.len(),
            self.headers.len(),
            self.source.display()
        );

        let missing = self.missing_schema_columns();
        if !missing.is_empty() {
            log::warn!(
                "Claims file lacks {} model columns, they will use defaults: {}",
                missing.len(),
                missing.join(", ")
            );
        }

        let mut seen = HashSet::new();
        let duplicates = self.records.iter().filter(|r| !seen.insert(r.claim_id())).count();
        if duplicates > 0 {
            log::warn!("{} duplicate Claim_ID rows, lookups use the first match", duplicates);
        }
    }

    /// First record whose `Claim_ID` matches
    pub fn find(&self, claim_id: &str) -> Option<&ClaimRecord> {
        self.records.iter().find(|r| r.claim_id() == claim_id)
    }

    /// Layout features that have no column in this file
    pub fn missing_schema_columns(&self) -> Vec<&'static str> {
        layout::feature_names()
            .filter(|name| !self.headers.iter().any(|h| h == name))
            .collect()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
