//! CLI command handlers

pub mod ask;
pub mod catalog;
pub mod search;
pub mod serve;
pub mod status;
