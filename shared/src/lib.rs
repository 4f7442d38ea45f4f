//! Shared types and models for the stock tracker
//!
//! This crate holds the inventory ledger and advisory rules shared between
//! the backend service and the browser (via WASM).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
