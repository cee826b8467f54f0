//! Records Module - Claims data source
//!
//! - `value`: FieldValue (numeric / text cell)
//! - `record`: ClaimRecord (one row, keyed by column name)
//! - `store`: ClaimStore (claims file, loaded once, first-match lookup)

pub mod value;
pub mod record;
pub mod store;

pub use value::FieldValue;
pub use record::ClaimRecord;
pub use store::{ClaimStore, StoreError};
