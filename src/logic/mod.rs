//! Logic Module - Business Logic & Engines
//!
//! - `config/` - Resolved runtime configuration
//! - `records/` - Claims file (record store)
//! - `features/` - Feature preparation (layout, vector, derived features)
//! - `model/` - Classifier loading and inference (ONNX, logistic JSON)
//! - `scoring/` - Lookup → prepare → predict → verdict

pub mod config;
pub mod records;
pub mod features;
pub mod model;
pub mod scoring;
