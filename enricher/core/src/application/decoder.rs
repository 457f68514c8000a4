// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::errors::EnrichmentError;
use serde_json::Value;
use tracing::debug;

/// Parse a fetched body as JSON. Failures name the source URL.
pub fn decode(body: &str, url: &str) -> Result<Value, EnrichmentError> {
    serde_json::from_str(body).map_err(|e| {
        debug!(url, error = %e, "response is not valid JSON");
        EnrichmentError::Decode(url.to_string())
    })
}
