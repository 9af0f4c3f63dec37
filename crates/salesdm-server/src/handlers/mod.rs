//! Request handlers

mod dm;
mod health;

pub use dm::{simulate_dm, DmRequest, DmResponse, MAX_ID_CHARS, MAX_TEXT_CHARS};
pub use health::{health, metrics, HealthReport};
