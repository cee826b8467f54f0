//! API Module - front-end surface
//!
//! - `commands`: batch / interactive scoring sessions
//! - `report`: text and JSON rendering

pub mod commands;
pub mod report;
