//! Business logic services for the stock tracker

pub mod auth;
pub mod items;
pub mod ledger;
pub mod reporting;
pub mod suggestion;

pub use auth::AuthService;
pub use items::ItemService;
pub use ledger::LedgerService;
pub use reporting::ReportingService;
pub use suggestion::SuggestionService;
