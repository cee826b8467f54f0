//! Scoring Module - claim lookup flow
//!
//! Tra cứu claim, chuẩn bị features, gọi classifier, đưa ra verdict.
//!
//! ## Structure
//! - `types`: RiskLevel, ClaimSummary, ScoreReport
//! - `error`: ScoreError (NotFound / Processing)
//! - `engine`: ScoringEngine (explicit store + classifier handles)

pub mod types;
pub mod error;
pub mod engine;

pub use types::{ClaimSummary, RiskLevel, ScoreReport, UNKNOWN};
pub use error::{ProcessingError, ScoreError};
pub use engine::ScoringEngine;
