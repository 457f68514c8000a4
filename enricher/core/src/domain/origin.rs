// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Origin Specifications
//!
//! Parses and validates the per-attribute "external origin" blocks of a filter
//! configuration. Each block names the endpoint to query, the flattened path
//! to read from the JSON response, the merge policy, and optionally which
//! existing attributes feed the request URL.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Turn raw configuration values into immutable [`OriginSpec`]s
//!
//! # Configuration Format
//!
//! ```yaml
//! mail:
//!   url: https://directory.example.org/api/users
//!   jsonpath: data.0.email
//!   replace: false
//!   parameters:
//!     uid: uid
//!   context:
//!     timeout: 5
//! ```
//!
//! Validation is driven by [`ORIGIN_SCHEMA`]: every field of a block is looked
//! up in the table and checked by its validator exactly once. Unknown fields
//! are rejected.

use crate::domain::errors::EnrichmentError;
use crate::domain::fetch::FetchContext;
use http::{HeaderName, HeaderValue};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Key of the `parameters` entry whose attribute value is appended to the URL
/// path instead of the query string.
pub const PATH_PARAMETER: &str = "";

/// Structurally validated shape of a single configuration field.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Str(String),
    Bool(bool),
    /// Ordered string → string mapping (`parameters`).
    Map(Vec<(String, String)>),
    /// Opaque JSON object (`context`).
    Options(Map<String, Value>),
}

impl ConfigValue {
    fn into_str(self) -> Option<String> {
        match self {
            ConfigValue::Str(value) => Some(value),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    fn into_map(self) -> Option<Vec<(String, String)>> {
        match self {
            ConfigValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    fn into_options(self) -> Option<Map<String, Value>> {
        match self {
            ConfigValue::Options(options) => Some(options),
            _ => None,
        }
    }
}

type FieldValidator = fn(&Value) -> Result<ConfigValue, EnrichmentError>;

/// Recognized origin fields and their validators.
pub const ORIGIN_SCHEMA: &[(&str, FieldValidator)] = &[
    ("url", validate_url),
    ("replace", validate_replace),
    ("jsonpath", validate_jsonpath),
    ("parameters", validate_parameters),
    ("context", validate_context),
];

fn parse_absolute_url(raw: &str) -> Result<Url, EnrichmentError> {
    Url::parse(raw).map_err(|_| EnrichmentError::config(format!("'{}' is not a valid URL", raw)))
}

fn validate_url(value: &Value) -> Result<ConfigValue, EnrichmentError> {
    match value {
        Value::String(raw) if !raw.is_empty() => {
            parse_absolute_url(raw)?;
            Ok(ConfigValue::Str(raw.clone()))
        }
        _ => Err(EnrichmentError::config("url should be a non-empty string")),
    }
}

fn validate_replace(value: &Value) -> Result<ConfigValue, EnrichmentError> {
    value
        .as_bool()
        .map(ConfigValue::Bool)
        .ok_or_else(|| EnrichmentError::config("replace should be boolean"))
}

fn validate_jsonpath(value: &Value) -> Result<ConfigValue, EnrichmentError> {
    match value {
        Value::String(path) if !path.is_empty() => Ok(ConfigValue::Str(path.clone())),
        _ => Err(EnrichmentError::config("jsonpath should be a non-empty string")),
    }
}

fn validate_parameters(value: &Value) -> Result<ConfigValue, EnrichmentError> {
    let invalid = || EnrichmentError::config("parameters should be an associative array");
    match value {
        Value::Null => Ok(ConfigValue::Map(Vec::new())),
        Value::Object(entries) => entries
            .iter()
            .map(|(name, attribute)| {
                attribute
                    .as_str()
                    .map(|attribute| (name.clone(), attribute.to_string()))
                    .ok_or_else(invalid)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ConfigValue::Map),
        _ => Err(invalid()),
    }
}

fn validate_context(value: &Value) -> Result<ConfigValue, EnrichmentError> {
    let options = match value {
        Value::Null => return Ok(ConfigValue::Options(Map::new())),
        Value::Object(options) => options,
        _ => return Err(EnrichmentError::config("context should be an associative array")),
    };

    // The keys the HTTP adapter reads must not be able to fail mid-request.
    if let Some(timeout) = options.get("timeout") {
        timeout
            .as_f64()
            .filter(|seconds| *seconds > 0.0)
            .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
            .ok_or_else(|| {
                EnrichmentError::config(format!(
                    "context timeout should be a positive number of seconds, got {}",
                    timeout
                ))
            })?;
    }

    if let Some(headers) = options.get("headers") {
        let headers = headers.as_object().ok_or_else(|| {
            EnrichmentError::config("context headers should be an associative array")
        })?;
        for (name, value) in headers {
            HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                EnrichmentError::config(format!("invalid header name in context: '{}'", name))
            })?;
            value
                .as_str()
                .and_then(|value| HeaderValue::from_str(value).ok())
                .ok_or_else(|| {
                    EnrichmentError::config(format!(
                        "invalid value for header '{}' in context",
                        name
                    ))
                })?;
        }
    }

    Ok(ConfigValue::Options(options.clone()))
}

/// One configured external source for one target attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct OriginSpec {
    /// `url` exactly as configured; errors quote this form.
    pub raw_url: String,
    pub url: Url,
    pub jsonpath: String,
    pub replace: bool,
    /// Query-parameter name → source attribute name, in declared order.
    pub parameters: Vec<(String, String)>,
    pub context: FetchContext,
}

impl OriginSpec {
    /// Validate a raw origin block.
    pub fn from_value(raw: &Value) -> Result<Self, EnrichmentError> {
        let Value::Object(fields) = raw else {
            return Err(EnrichmentError::config("external origin should be an array"));
        };

        let mut validated: HashMap<&str, ConfigValue> = HashMap::with_capacity(fields.len());
        for (name, value) in fields {
            let (field, validate) = ORIGIN_SCHEMA
                .iter()
                .find(|(field, _)| *field == name.as_str())
                .ok_or_else(|| {
                    EnrichmentError::config(format!("Unknown flag in origin: '{}'", name))
                })?;
            validated.insert(*field, validate(value)?);
        }

        let url = validated
            .remove("url")
            .and_then(ConfigValue::into_str)
            .ok_or_else(|| EnrichmentError::config("origin is missing required field 'url'"))?;
        let jsonpath = validated
            .remove("jsonpath")
            .and_then(ConfigValue::into_str)
            .ok_or_else(|| {
                EnrichmentError::config("origin is missing required field 'jsonpath'")
            })?;

        let parsed = parse_absolute_url(&url)?;
        let parameters = validated
            .remove("parameters")
            .and_then(ConfigValue::into_map)
            .unwrap_or_default();
        if parsed.cannot_be_a_base() && parameters.iter().any(|(name, _)| name == PATH_PARAMETER) {
            return Err(EnrichmentError::config(format!(
                "'{}' cannot take a path parameter",
                url
            )));
        }

        Ok(Self {
            raw_url: url,
            url: parsed,
            jsonpath,
            replace: validated
                .get("replace")
                .and_then(ConfigValue::as_bool)
                .unwrap_or(false),
            parameters,
            context: validated
                .remove("context")
                .and_then(ConfigValue::into_options)
                .map(FetchContext::new)
                .unwrap_or_default(),
        })
    }
}

/// Validate a whole filter configuration, keeping the declared attribute order.
pub fn parse_origins(config: &Value) -> Result<Vec<(String, OriginSpec)>, EnrichmentError> {
    let Value::Object(entries) = config else {
        return Err(EnrichmentError::config("config should be an array"));
    };

    entries
        .iter()
        .map(|(attribute, origin)| Ok((attribute.clone(), OriginSpec::from_value(origin)?)))
        .collect()
}
