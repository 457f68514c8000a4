// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Attribute Enrichment Filter
//!
//! The filter the authentication pipeline invokes. Configuration is validated
//! once in [`AttributeEnrichmentFilter::new`]; [`AttributeEnrichmentFilter::process`]
//! then walks the configured attributes in declared order:
//!
//! 1. resolve the request URL from the origin's `parameters`
//! 2. fetch the document (one attempt)
//! 3. decode it as JSON
//! 4. flatten it and read `jsonpath`
//! 5. merge the value into the attribute set
//!
//! Each step's failure aborts the call. Attributes merged before the failing
//! one stay merged.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Orchestrate validation, fetch, decode, lookup and merge

use crate::application::{decoder, fetcher};
use crate::domain::attributes::{AttributeSet, AttributeValue, ProcessingState};
use crate::domain::errors::EnrichmentError;
use crate::domain::fetch::{FetchContext, HttpFetcher};
use crate::domain::flatten::flatten;
use crate::domain::origin::{parse_origins, OriginSpec};
use crate::domain::parameters::{add_url_parameters, resolve_parameters};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub struct AttributeEnrichmentFilter {
    origins: Vec<(String, OriginSpec)>,
    fetcher: Arc<dyn HttpFetcher>,
}

impl AttributeEnrichmentFilter {
    /// Validate `config` and build the filter.
    ///
    /// This is the only place a [`EnrichmentError::Configuration`] can come from.
    pub fn new(config: &Value, fetcher: Arc<dyn HttpFetcher>) -> Result<Self, EnrichmentError> {
        let origins = parse_origins(config)?;
        debug!(attributes = origins.len(), "attribute enrichment filter configured");
        Ok(Self { origins, fetcher })
    }

    /// Configured attributes in processing order.
    pub fn origins(&self) -> &[(String, OriginSpec)] {
        &self.origins
    }

    /// Enrich `state.Attributes` in place.
    pub fn process(&self, state: &mut ProcessingState) -> Result<(), EnrichmentError> {
        let attributes = state.attributes.as_mut().ok_or_else(|| {
            EnrichmentError::Precondition("processing state has no 'Attributes'".to_string())
        })?;

        for (name, origin) in &self.origins {
            let url = Self::resolve_url(origin, attributes)?;
            let value = self.fetch_information(&url, &origin.jsonpath, &origin.context)?;
            merge(attributes, name, value, origin.replace);
            debug!(attribute = %name, replace = origin.replace, "external attribute merged");
        }

        Ok(())
    }

    /// Fetch `url` and return the value found at `jsonpath` in the flattened
    /// response.
    pub fn fetch_information(
        &self,
        url: &str,
        jsonpath: &str,
        context: &FetchContext,
    ) -> Result<String, EnrichmentError> {
        let body = fetcher::fetch(self.fetcher.as_ref(), url, context)?;
        let document = decoder::decode(&body, url)?;
        let flattened = flatten(&document, "");

        flattened
            .get(jsonpath)
            .map(str::to_string)
            .ok_or_else(|| EnrichmentError::InvalidPath(jsonpath.to_string()))
    }

    /// The configured URL verbatim, or the composed URL when parameters apply.
    fn resolve_url(origin: &OriginSpec, attributes: &AttributeSet) -> Result<String, EnrichmentError> {
        if origin.parameters.is_empty() {
            return Ok(origin.raw_url.clone());
        }
        let resolved = resolve_parameters(&origin.parameters, attributes)?;
        Ok(add_url_parameters(&origin.url, &resolved)?.to_string())
    }
}

/// Replace with `[value]` when `replace` is set or the attribute is new,
/// otherwise append.
fn merge(attributes: &mut AttributeSet, name: &str, value: String, replace: bool) {
    if !replace {
        if let Some(existing) = attributes.get_mut(name) {
            existing.push(value);
            return;
        }
    }
    attributes.insert(name.to_string(), AttributeValue::Multiple(vec![value]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fetch::TransportError;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use url::Url;

    /// Serves canned bodies by exact URL and records every request.
    #[derive(Default)]
    struct StaticFetcher {
        bodies: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl StaticFetcher {
        fn serving(entries: &[(&str, Value)]) -> Arc<Self> {
            Arc::new(Self {
                bodies: entries
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.to_string()))
                    .collect(),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl HttpFetcher for StaticFetcher {
        fn fetch(&self, url: &Url, _context: &FetchContext) -> Result<String, TransportError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.bodies
                .get(url.as_str())
                .cloned()
                .ok_or_else(|| TransportError::Status { status: 404 })
        }
    }

    fn state(attributes: Value) -> ProcessingState {
        serde_json::from_value(json!({ "Attributes": attributes })).unwrap()
    }

    fn multiple(values: &[&str]) -> AttributeValue {
        AttributeValue::Multiple(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_merge_policy() {
        let mut attributes = AttributeSet::new();

        merge(&mut attributes, "a", "x".to_string(), false);
        assert_eq!(attributes["a"], multiple(&["x"]));

        merge(&mut attributes, "a", "y".to_string(), false);
        assert_eq!(attributes["a"], multiple(&["x", "y"]));

        merge(&mut attributes, "a", "z".to_string(), true);
        assert_eq!(attributes["a"], multiple(&["z"]));

        attributes.insert("b".to_string(), AttributeValue::from("old"));
        merge(&mut attributes, "b", "new".to_string(), false);
        assert_eq!(attributes["b"], multiple(&["old", "new"]));

        attributes.insert("c".to_string(), AttributeValue::from("old"));
        merge(&mut attributes, "c", "new".to_string(), true);
        assert_eq!(attributes["c"], multiple(&["new"]));
    }

    #[test]
    fn test_configuration_errors_surface_at_construction() {
        let fetcher = StaticFetcher::serving(&[]);
        let err = AttributeEnrichmentFilter::new(
            &json!({ "test": { "url": "https://example.org", "jsonpath": "a", "test": "xx" } }),
            fetcher.clone(),
        )
        .err()
        .unwrap();
        assert_eq!(
            err,
            EnrichmentError::Configuration("Unknown flag in origin: 'test'".to_string())
        );
        assert!(fetcher.requests().is_empty());
    }

    #[test]
    fn test_missing_attributes_is_a_precondition_error() {
        let filter =
            AttributeEnrichmentFilter::new(&json!({}), StaticFetcher::serving(&[])).unwrap();
        let mut state = ProcessingState::default();
        assert!(matches!(
            filter.process(&mut state),
            Err(EnrichmentError::Precondition(_))
        ));
    }

    #[test]
    fn test_empty_config_leaves_state_unchanged() {
        let filter =
            AttributeEnrichmentFilter::new(&json!({}), StaticFetcher::serving(&[])).unwrap();
        let initial = state(json!({ "uid": "jdoe" }));
        let mut processed = initial.clone();
        filter.process(&mut processed).unwrap();
        assert_eq!(processed, initial);
    }

    #[test]
    fn test_parameters_chain_through_earlier_attributes() {
        let fetcher = StaticFetcher::serving(&[
            ("https://idp.example.org/ids?uid=jdoe", json!({ "id": 42 })),
            ("https://idp.example.org/mail/42", json!({ "mail": "jdoe@example.org" })),
        ]);
        let filter = AttributeEnrichmentFilter::new(
            &json!({
                "internalId": {
                    "url": "https://idp.example.org/ids",
                    "jsonpath": "id",
                    "parameters": { "uid": "uid" }
                },
                "mail": {
                    "url": "https://idp.example.org/mail",
                    "jsonpath": "mail",
                    "parameters": { "": "internalId" }
                }
            }),
            fetcher.clone(),
        )
        .unwrap();

        let mut state = state(json!({ "uid": "jdoe" }));
        filter.process(&mut state).unwrap();

        let attributes = state.attributes.unwrap();
        assert_eq!(attributes["internalId"], multiple(&["42"]));
        assert_eq!(attributes["mail"], multiple(&["jdoe@example.org"]));
        assert_eq!(
            fetcher.requests(),
            vec![
                "https://idp.example.org/ids?uid=jdoe".to_string(),
                "https://idp.example.org/mail/42".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_parameter_fails_before_fetching() {
        let fetcher = StaticFetcher::serving(&[]);
        let filter = AttributeEnrichmentFilter::new(
            &json!({
                "mail": {
                    "url": "https://idp.example.org/mail",
                    "jsonpath": "mail",
                    "parameters": { "uid": "uid" }
                }
            }),
            fetcher.clone(),
        )
        .unwrap();

        let mut state = state(json!({}));
        assert_eq!(
            filter.process(&mut state).unwrap_err(),
            EnrichmentError::MissingParameter("uid".to_string())
        );
        assert!(fetcher.requests().is_empty());
    }

    #[test]
    fn test_earlier_attributes_stay_merged_when_a_later_one_fails() {
        let fetcher = StaticFetcher::serving(&[(
            "https://example.org/first",
            json!({ "value": "one" }),
        )]);
        let filter = AttributeEnrichmentFilter::new(
            &json!({
                "first": { "url": "https://example.org/first", "jsonpath": "value" },
                "second": { "url": "https://example.org/second", "jsonpath": "value" }
            }),
            fetcher,
        )
        .unwrap();

        let mut state = state(json!({}));
        assert_eq!(
            filter.process(&mut state).unwrap_err(),
            EnrichmentError::Fetch("https://example.org/second".to_string())
        );
        let attributes = state.attributes.unwrap();
        assert_eq!(attributes["first"], multiple(&["one"]));
        assert!(!attributes.contains_key("second"));
    }

    #[test]
    fn test_fetch_information_invalid_path() {
        let fetcher = StaticFetcher::serving(&[(
            "https://example.org/",
            json!({ "data": [{ "username": "zpineiro" }] }),
        )]);
        let filter = AttributeEnrichmentFilter::new(&json!({}), fetcher).unwrap();
        let url = "https://example.org/";

        assert_eq!(
            filter
                .fetch_information(url, "data.0.username", &FetchContext::default())
                .unwrap(),
            "zpineiro"
        );
        assert_eq!(
            filter
                .fetch_information(url, "xx", &FetchContext::default())
                .unwrap_err(),
            EnrichmentError::InvalidPath("xx".to_string())
        );
    }

    #[test]
    fn test_errors_quote_the_configured_url() {
        let fetcher = StaticFetcher::serving(&[]);
        let filter = AttributeEnrichmentFilter::new(
            &json!({ "mail": { "url": "https://LOCALHOST:443/wrong path", "jsonpath": "mail" } }),
            fetcher.clone(),
        )
        .unwrap();

        let err = filter.process(&mut state(json!({}))).unwrap_err();
        assert_eq!(err, EnrichmentError::Fetch("https://LOCALHOST:443/wrong path".to_string()));
        assert!(err.to_string().contains("https://LOCALHOST:443/wrong path"));
        assert_eq!(fetcher.requests(), vec!["https://localhost/wrong%20path".to_string()]);
    }

    #[test]
    fn test_decode_error_quotes_url_without_trailing_slash() {
        let fetcher = Arc::new(StaticFetcher {
            bodies: HashMap::from([(
                "https://www.google.es/".to_string(),
                "<!doctype html><html></html>".to_string(),
            )]),
            requests: Mutex::new(Vec::new()),
        });
        let filter = AttributeEnrichmentFilter::new(
            &json!({ "test": { "url": "https://www.google.es", "jsonpath": "a" } }),
            fetcher,
        )
        .unwrap();

        assert_eq!(
            filter.process(&mut state(json!({}))).unwrap_err(),
            EnrichmentError::Decode("https://www.google.es".to_string())
        );
    }
}
