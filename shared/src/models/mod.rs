//! Domain models for the stock tracker

mod item;
mod movement;
mod pricing;
mod state;
mod status;
mod suggestion;
mod user;

pub use item::*;
pub use movement::*;
pub use pricing::*;
pub use state::*;
pub use status::*;
pub use suggestion::*;
pub use user::*;
