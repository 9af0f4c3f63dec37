//! HTTP client for the external text-completion endpoint

use crate::config::LLMServiceConfig;
use crate::error::{Result, SalesDmError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Trait for LLM service clients
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Send a fully rendered prompt and return the model's reply text
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Endpoint identifier for logging
    fn endpoint(&self) -> &str;

    /// Request statistics, if the client tracks them
    fn metrics(&self) -> Option<MetricsSnapshot> {
        None
    }
}

/// API metrics for monitoring
#[derive(Debug, Default)]
pub struct APIMetrics {
    pub total_requests: AtomicU64,
    pub total_errors: AtomicU64,
    pub total_timeouts: AtomicU64,
    pub total_latency_ms: AtomicU64,
}

/// Snapshot of API metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub total_errors: u64,
    pub total_timeouts: u64,
    pub avg_latency_ms: f64,
}

/// Client for endpoints that accept `{"message": prompt}` and answer with
/// `{"response": ...}`, `{"message": ...}` or a bare JSON string
pub struct HttpLLMClient {
    http_client: reqwest::Client,
    config: LLMServiceConfig,
    metrics: APIMetrics,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    message: &'a str,
}

impl HttpLLMClient {
    /// Create new client from configuration
    pub fn new(config: LLMServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            config,
            metrics: APIMetrics::default(),
        })
    }

    fn map_transport_error(&self, e: reqwest::Error) -> SalesDmError {
        self.metrics.total_errors.fetch_add(1, Ordering::Relaxed);
        if e.is_timeout() {
            self.metrics.total_timeouts.fetch_add(1, Ordering::Relaxed);
            SalesDmError::LlmTimeout(self.config.timeout_secs)
        } else {
            SalesDmError::Http(e)
        }
    }
}

#[async_trait]
impl LLMClient for HttpLLMClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();
        self.metrics.total_requests.fetch_add(1, Ordering::Relaxed);

        let response = self
            .http_client
            .post(&self.config.url)
            .json(&CompletionRequest { message: prompt })
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !response.status().is_success() {
            self.metrics.total_errors.fetch_add(1, Ordering::Relaxed);
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SalesDmError::LlmStatus { status, body });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let elapsed = start.elapsed().as_millis() as u64;
        self.metrics
            .total_latency_ms
            .fetch_add(elapsed, Ordering::Relaxed);

        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            self.metrics.total_errors.fetch_add(1, Ordering::Relaxed);
            SalesDmError::Llm(format!("LLM service returned invalid JSON: {}", e))
        })?;

        extract_reply(value).inspect_err(|_| {
            self.metrics.total_errors.fetch_add(1, Ordering::Relaxed);
        })
    }

    fn endpoint(&self) -> &str {
        &self.config.url
    }

    fn metrics(&self) -> Option<MetricsSnapshot> {
        let total = self.metrics.total_requests.load(Ordering::Relaxed);
        Some(MetricsSnapshot {
            total_requests: total,
            total_errors: self.metrics.total_errors.load(Ordering::Relaxed),
            total_timeouts: self.metrics.total_timeouts.load(Ordering::Relaxed),
            avg_latency_ms: if total > 0 {
                self.metrics.total_latency_ms.load(Ordering::Relaxed) as f64 / total as f64
            } else {
                0.0
            },
        })
    }
}

/// Pull the reply text out of a decoded response body.
///
/// `response` wins over `message`; a bare string is used directly and any
/// other JSON value is rendered as JSON text.
pub fn extract_reply(value: serde_json::Value) -> Result<String> {
    use serde_json::Value;

    match value {
        Value::Object(map) => {
            let field = ["response", "message"]
                .into_iter()
                .find_map(|key| map.get(key).map(|v| (key, v)));
            match field {
                Some((_, Value::String(text))) => Ok(text.trim().to_string()),
                Some((key, other)) => Err(SalesDmError::Llm(format!(
                    "LLM field {:?} is not a string: {}",
                    key, other
                ))),
                None => Ok(Value::Object(map).to_string().trim().to_string()),
            }
        }
        Value::String(text) => Ok(text.trim().to_string()),
        other => Ok(other.to_string().trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_response_field() {
        let reply = extract_reply(json!({"response": "  سلام  ", "message": "x"})).unwrap();
        assert_eq!(reply, "سلام");
    }

    #[test]
    fn test_extract_message_field() {
        let reply = extract_reply(json!({"message": "hello\n"})).unwrap();
        assert_eq!(reply, "hello");
    }

    #[test]
    fn test_extract_bare_string() {
        assert_eq!(extract_reply(json!(" ok ")).unwrap(), "ok");
    }

    #[test]
    fn test_extract_other_shapes_are_stringified() {
        assert_eq!(extract_reply(json!({"text": 1})).unwrap(), r#"{"text":1}"#);
        assert_eq!(extract_reply(json!([1, 2])).unwrap(), "[1,2]");
        assert_eq!(extract_reply(json!(null)).unwrap(), "null");
    }

    #[test]
    fn test_extract_non_string_field_is_error() {
        let err = extract_reply(json!({"response": {"nested": true}})).unwrap_err();
        assert!(matches!(err, SalesDmError::Llm(_)));
    }

    #[test]
    fn test_new_client_reports_empty_metrics() {
        let client = HttpLLMClient::new(LLMServiceConfig::default()).unwrap();
        let snapshot = client.metrics().unwrap();
        assert_eq!(snapshot.total_requests, 0);
        assert_eq!(snapshot.avg_latency_ms, 0.0);
    }
}
