//! Claim Risk - Core Service
//!
//! Claim lookup, feature preparation and fraud scoring for auto-insurance
//! claims. The `claim-risk` binary is a thin front end over [`api::commands`].

pub mod constants;
pub mod logic;
pub mod api;
