// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Parameter resolution.
//!
//! Maps an origin's `parameters` (query name → attribute name) onto the values
//! currently held in the attribute set, then folds them into the request URL.

use crate::domain::attributes::AttributeSet;
use crate::domain::errors::EnrichmentError;
use crate::domain::origin::PATH_PARAMETER;
use url::Url;

/// A query parameter with every value it should be sent with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParameter {
    pub name: String,
    pub values: Vec<String>,
}

/// Resolve every configured parameter against `attributes`, in declared order.
///
/// Fails on the first referenced attribute that is not present.
pub fn resolve_parameters(
    parameters: &[(String, String)],
    attributes: &AttributeSet,
) -> Result<Vec<ResolvedParameter>, EnrichmentError> {
    parameters
        .iter()
        .map(|(name, attribute)| {
            let value = attributes
                .get(attribute)
                .ok_or_else(|| EnrichmentError::MissingParameter(attribute.clone()))?;
            Ok(ResolvedParameter {
                name: name.clone(),
                values: value.values().into_iter().map(str::to_string).collect(),
            })
        })
        .collect()
}

/// Append `parameters` to `base`.
///
/// Named parameters become `application/x-www-form-urlencoded` query pairs
/// after any query already on `base`; a multi-valued parameter is repeated.
/// Values of the [`PATH_PARAMETER`] entry are appended as path segments.
pub fn add_url_parameters(
    base: &Url,
    parameters: &[ResolvedParameter],
) -> Result<Url, EnrichmentError> {
    let mut url = base.clone();

    let (path, query): (Vec<&ResolvedParameter>, Vec<&ResolvedParameter>) = parameters
        .iter()
        .partition(|parameter| parameter.name == PATH_PARAMETER);

    let path_values: Vec<&str> = path
        .iter()
        .flat_map(|parameter| parameter.values.iter().map(String::as_str))
        .collect();
    if !path_values.is_empty() {
        // Origins reject this at construction; only hand-built specs get here.
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| EnrichmentError::Fetch(base.to_string()))?;
        segments.pop_if_empty().extend(path_values);
    }

    if query.iter().any(|parameter| !parameter.values.is_empty()) {
        let mut pairs = url.query_pairs_mut();
        for parameter in query {
            for value in &parameter.values {
                pairs.append_pair(&parameter.name, value);
            }
        }
    }

    Ok(url)
}
