//! LLM integration
//!
//! Provides:
//! - A client trait and HTTP implementation for the completion endpoint
//! - Prompt assembly and fallback handling for customer replies

mod client;
mod responder;

pub use client::{extract_reply, APIMetrics, HttpLLMClient, LLMClient, MetricsSnapshot};
pub use responder::{
    fallback_reply, SalesResponder, GENERIC_ERROR_REPLY, TIMEOUT_REPLY, UNAVAILABLE_REPLY,
};
