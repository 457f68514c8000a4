// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Single-attempt fetch with uniform error classification.

use crate::domain::errors::EnrichmentError;
use crate::domain::fetch::{FetchContext, HttpFetcher};
use tracing::debug;
use url::Url;

/// GET `url` once through `fetcher`.
///
/// Whatever the collaborator reports, the caller only sees
/// [`EnrichmentError::Fetch`] carrying `url` exactly as given; the transport
/// detail goes to the debug log.
pub fn fetch(fetcher: &dyn HttpFetcher, url: &str, context: &FetchContext) -> Result<String, EnrichmentError> {
    let parsed = Url::parse(url).map_err(|e| {
        debug!(url, error = %e, "external attribute source URL does not parse");
        EnrichmentError::Fetch(url.to_string())
    })?;

    debug!(url, "fetching external attribute source");
    fetcher.fetch(&parsed, context).map_err(|e| {
        debug!(url, error = %e, "external attribute source failed");
        EnrichmentError::Fetch(url.to_string())
    })
}
