// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Fetch
//!
//! Domain interface for the HTTP collaborator.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Isolate the enrichment engine from any concrete HTTP client

// The engine only needs "GET this URL, give me the body". Everything else
// (TLS, pooling, proxies) belongs to the adapter in infrastructure/http.rs.

use serde_json::{Map, Value};
use std::time::Duration;
use url::Url;

/// Domain interface for fetching a document over HTTP.
pub trait HttpFetcher: Send + Sync {
    /// Issue a single GET and return the response body as text.
    fn fetch(&self, url: &Url, context: &FetchContext) -> Result<String, TransportError>;
}

/// Request options configured per origin and forwarded verbatim to the
/// fetcher. Only `timeout` and `headers` are checked, when the origin is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchContext {
    options: Map<String, Value>,
}

impl FetchContext {
    pub fn new(options: Map<String, Value>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    /// `timeout` in seconds, if configured as a positive number.
    pub fn timeout(&self) -> Option<Duration> {
        self.options
            .get("timeout")
            .and_then(Value::as_f64)
            .filter(|seconds| *seconds > 0.0)
            .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
    }

    /// String-valued entries of the `headers` mapping.
    pub fn headers(&self) -> Vec<(&str, &str)> {
        self.options
            .get("headers")
            .and_then(Value::as_object)
            .map(|headers| {
                headers
                    .iter()
                    .filter_map(|(name, value)| value.as_str().map(|value| (name.as_str(), value)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Errors reported by an [`HttpFetcher`]. These are logged by the engine and
/// never surfaced past it.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("Failed to read response body: {0}")]
    Body(String),
}
