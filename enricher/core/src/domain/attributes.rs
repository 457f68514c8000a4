// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Attributes
//!
//! Identity attributes as carried by the authentication pipeline, and the
//! per-request state document that wraps them.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Attribute values, attribute sets and pipeline state

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Value of a single attribute: one string or an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Single(String),
    Multiple(Vec<String>),
}

impl AttributeValue {
    /// All values in order. A `Single` yields exactly one.
    pub fn values(&self) -> Vec<&str> {
        match self {
            AttributeValue::Single(value) => vec![value.as_str()],
            AttributeValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Append `value`, promoting a `Single` into a two-element sequence.
    pub fn push(&mut self, value: String) {
        match self {
            AttributeValue::Single(existing) => {
                let existing = std::mem::take(existing);
                *self = AttributeValue::Multiple(vec![existing, value]);
            }
            AttributeValue::Multiple(values) => values.push(value),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Single(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Single(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        AttributeValue::Multiple(values)
    }
}

/// Attribute name → value.
pub type AttributeSet = BTreeMap<String, AttributeValue>;

/// Request state handed to the filter by the authentication pipeline.
///
/// Only `Attributes` is interpreted; every other key is carried through
/// untouched so the state can be handed back to the pipeline as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingState {
    #[serde(rename = "Attributes", default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AttributeSet>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProcessingState {
    pub fn with_attributes(attributes: AttributeSet) -> Self {
        Self {
            attributes: Some(attributes),
            extra: Map::new(),
        }
    }
}
