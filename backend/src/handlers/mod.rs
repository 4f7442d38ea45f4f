//! HTTP handlers

pub mod auth;
pub mod health;
pub mod items;
pub mod movements;
pub mod pricing;
pub mod scan;
pub mod stock;

pub use auth::{login, logout, register, session};
pub use health::health_check;
pub use items::{create_item, get_item, list_items, update_item};
pub use movements::{list_movements, record_movement};
pub use pricing::preview;
pub use scan::resolve_scan;
pub use stock::{stock_table, suggestions};
