//! Process-wide request counters

use chrono::{DateTime, Utc};
use salesdm_core::llm::MetricsSnapshot;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Service start time and processed-request counter, created once at startup
#[derive(Debug)]
pub struct ServiceMetrics {
    started: Instant,
    start_time: DateTime<Utc>,
    requests: AtomicU64,
}

/// Body of `GET /metrics`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub uptime_seconds: f64,
    pub total_requests: u64,
    pub requests_per_minute: f64,
    pub start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<MetricsSnapshot>,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            start_time: Utc::now(),
            requests: AtomicU64::new(0),
        }
    }

    /// Count one accepted request; returns the new total
    pub fn record_request(&self) -> u64 {
        self.requests.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn requests_processed(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn uptime_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn report(&self, llm: Option<MetricsSnapshot>) -> MetricsReport {
        let uptime = self.uptime_seconds();
        let total = self.requests_processed();
        MetricsReport {
            uptime_seconds: uptime,
            total_requests: total,
            requests_per_minute: requests_per_minute(total, uptime),
            start_time: self.start_time.to_rfc3339(),
            llm,
        }
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn requests_per_minute(total: u64, uptime_seconds: f64) -> f64 {
    if uptime_seconds > 0.0 {
        total as f64 / uptime_seconds * 60.0
    } else {
        0.0
    }
}
