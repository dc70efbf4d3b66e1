// Path: crates/endpoint/src/transport.rs
//! A single-seed JSON-RPC 2.0 transport over `reqwest`.
//!
//! The retry-with-backoff loop below is one layer *below* the pool's seed
//! rotation: it absorbs a single seed's transient 429/5xx/timeout
//! blips before the pool gives up on that seed and rotates to the next one.

use relay_api::RpcError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::time::{sleep, Duration};

const HTTP_RETRIES: usize = 8;
const BASE_BACKOFF_MS: u64 = 50;

fn retry_delay(attempt: usize) -> Duration {
    Duration::from_millis(BASE_BACKOFF_MS.saturating_mul(1u64 << attempt).min(2_000))
}

/// A JSON-RPC 2.0 client bound to a single seed URL.
#[derive(Clone)]
pub struct JsonRpcTransport {
    url: String,
    client: reqwest::Client,
    next_id: std::sync::Arc<AtomicU64>,
}

#[derive(Serialize)]
struct Request<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(serde::Deserialize)]
struct Response<R> {
    #[serde(default)]
    result: Option<R>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(serde::Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl JsonRpcTransport {
    /// Binds a transport to a seed URL, e.g. `http://seed-1:10332`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
            next_id: std::sync::Arc::new(AtomicU64::new(1)),
        }
    }

    /// The seed URL this transport talks to, for logging and metrics.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Calls `method` with `params`, decoding the `result` field as `R`.
    pub async fn call<P, R>(&self, method: &str, params: P) -> Result<R, RpcError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = Request { jsonrpc: "2.0", id, method, params };

        let mut attempt = 0usize;
        let raw: JsonValue = loop {
            let resp = self.client.post(&self.url).json(&body).send().await;
            let resp = match resp {
                Ok(r) => r,
                Err(e) => {
                    if attempt < HTTP_RETRIES {
                        tracing::debug!(
                            target: "relay.endpoint",
                            event = "transport_retry",
                            seed = %self.url,
                            method,
                            attempt,
                            error = %e,
                        );
                        sleep(retry_delay(attempt)).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(RpcError::Transport(format!("{method} send failed after retries: {e}")));
                }
            };

            let status = resp.status();
            if status.as_u16() == 429 || status.is_server_error() {
                if attempt < HTTP_RETRIES {
                    sleep(retry_delay(attempt)).await;
                    attempt += 1;
                    continue;
                }
                return Err(RpcError::Transport(format!("{method} HTTP {} after retries", status.as_u16())));
            }
            if !status.is_success() {
                return Err(RpcError::Transport(format!("{method} HTTP {}", status.as_u16())));
            }

            break resp.json().await.map_err(|e| RpcError::Transport(format!("{method} decode: {e}")))?;
        };

        let parsed: Response<R> = serde_json::from_value(raw)?;
        if let Some(err) = parsed.error {
            return Err(RpcError::Application { code: err.code, message: err.message });
        }
        parsed
            .result
            .ok_or_else(|| RpcError::Transport(format!("{method} returned no result and no error")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_preserved() {
        let t = JsonRpcTransport::new("http://localhost:1234");
        assert_eq!(t.url(), "http://localhost:1234");
    }
}
