// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP Fetcher Adapter
//!
//! Production [`HttpFetcher`] built on `reqwest`'s blocking client.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Perform the single GET the enrichment engine asks for
//! - **Integration:** Origin endpoint → response body → Decoder
//!
//! # Usage
//!
//! ```ignore
//! use attribute_enricher_core::infrastructure::http::ReqwestFetcher;
//!
//! let fetcher = ReqwestFetcher::builder()
//!     .user_agent("attrenrich/0.3")
//!     .default_timeout(Duration::from_secs(10))
//!     .build()?;
//! ```
//!
//! The blocking client owns its own runtime, so it must not be driven from
//! inside an async executor.

use crate::domain::fetch::{FetchContext, HttpFetcher, TransportError};
use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

const DEFAULT_USER_AGENT: &str = concat!("attrenrich/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Adapter
// ============================================================================

pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Create a fetcher with default client settings.
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Wrap a preconfigured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn builder() -> ReqwestFetcherBuilder {
        ReqwestFetcherBuilder::new()
    }
}

impl Default for ReqwestFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher for ReqwestFetcher {
    fn fetch(&self, url: &Url, context: &FetchContext) -> Result<String, TransportError> {
        let mut request = self.client.get(url.as_str());

        for (name, value) in context.headers() {
            request = request.header(name, value);
        }
        if let Some(timeout) = context.timeout() {
            request = request.timeout(timeout);
        }

        let response = request.send().map_err(|e| classify(e, context.timeout()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status { status: status.as_u16() });
        }

        response.text().map_err(|e| TransportError::Body(e.to_string()))
    }
}

fn classify(error: reqwest::Error, timeout: Option<Duration>) -> TransportError {
    match timeout {
        Some(timeout) if error.is_timeout() => TransportError::Timeout(timeout),
        _ => TransportError::Network(error.to_string()),
    }
}

// ============================================================================
// Builder Pattern
// ============================================================================

pub struct ReqwestFetcherBuilder {
    user_agent: Option<String>,
    default_timeout: Option<Duration>,
}

impl ReqwestFetcherBuilder {
    pub fn new() -> Self {
        Self {
            user_agent: None,
            default_timeout: None,
        }
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Timeout for origins whose context does not set one.
    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ReqwestFetcher, TransportError> {
        let mut builder = Client::builder().user_agent(
            self.user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        );
        if let Some(timeout) = self.default_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(ReqwestFetcher::with_client(client))
    }
}

impl Default for ReqwestFetcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
