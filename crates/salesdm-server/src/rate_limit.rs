//! Fixed-window per-IP request limiting

use crate::error::ApiError;
use axum::extract::ConnectInfo;
use axum::http::Extensions;
use dashmap::DashMap;
use salesdm_core::RateLimit;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Windows are pruned once the map grows past this many clients
const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Clone)]
pub struct IpLimiter {
    windows: Arc<DashMap<IpAddr, Window>>,
    limit: RateLimit,
}

#[derive(Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

impl IpLimiter {
    pub fn new(limit: RateLimit) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            limit,
        }
    }

    pub fn limit(&self) -> RateLimit {
        self.limit
    }

    /// Peer address from the connection, or loopback when none is attached
    pub fn client_ip(extensions: &Extensions) -> IpAddr {
        extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|c| c.0.ip())
            .unwrap_or(IpAddr::from([127, 0, 0, 1]))
    }

    /// Count a request from `ip`; on refusal returns the time until the
    /// window resets
    pub fn check(&self, ip: IpAddr, now: Instant) -> Result<(), Duration> {
        if self.windows.len() > PRUNE_THRESHOLD {
            let window = self.limit.window;
            self.windows
                .retain(|_, w| now.duration_since(w.started) < window);
        }

        let mut entry = self.windows.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= self.limit.window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count < self.limit.requests {
            entry.count += 1;
            Ok(())
        } else {
            Err(self
                .limit
                .window
                .saturating_sub(now.duration_since(entry.started)))
        }
    }

    /// Count a request from `ip` now, mapping refusal to a 429
    pub fn admit(&self, ip: IpAddr) -> Result<(), ApiError> {
        self.check(ip, Instant::now()).map_err(|retry_after| {
            tracing::warn!("Rate limit exceeded for {}", ip);
            ApiError::RateLimited {
                limit: self.limit.to_string(),
                retry_after,
            }
        })
    }
}
