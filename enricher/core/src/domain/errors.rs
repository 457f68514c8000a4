// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Enrichment error taxonomy.
//!
//! `Configuration` is only ever produced while a filter is being constructed.
//! Every other variant is produced by `process` and aborts the whole call;
//! nothing in the core catches or retries them.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrichmentError {
    #[error("{0}")]
    Configuration(String),

    #[error("AttributeEnricher: missing parameter attribute '{0}'")]
    MissingParameter(String),

    #[error("AttributeEnricher: failed to fetch '{0}'")]
    Fetch(String),

    #[error("AttributeEnricher: failed to decode response from '{0}'")]
    Decode(String),

    #[error("AttributeEnricher: invalid path '{0}'")]
    InvalidPath(String),

    #[error("AttributeEnricher: {0}")]
    Precondition(String),
}

impl EnrichmentError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
