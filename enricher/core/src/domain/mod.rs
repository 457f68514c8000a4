// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Enrichment Domain Layer
//!
//! Pure types and helpers of the attribute enricher. No I/O.
//!
//! | Module | Key Types |
//! |--------|-----------|
//! | [`attributes`] | `AttributeValue`, `AttributeSet`, `ProcessingState` |
//! | [`origin`] | `OriginSpec`, `ConfigValue`, `ORIGIN_SCHEMA` |
//! | [`flatten`] | `FlattenedResponse`, `flatten` |
//! | [`parameters`] | `ResolvedParameter`, `resolve_parameters` |
//! | [`fetch`] | `HttpFetcher`, `FetchContext`, `TransportError` |
//! | [`errors`] | `EnrichmentError` |

pub mod attributes;
pub mod errors;
pub mod fetch;
pub mod flatten;
pub mod origin;
pub mod parameters;

pub use attributes::*;
pub use errors::EnrichmentError;
pub use fetch::{FetchContext, HttpFetcher, TransportError};
pub use origin::OriginSpec;
