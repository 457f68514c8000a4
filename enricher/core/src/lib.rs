// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # `attribute-enricher-core`
//!
//! Authentication-pipeline filter that adds or replaces user attributes with
//! values read from external HTTP/JSON endpoints.
//!
//! ## Crate Layout
//!
//! | Module | Layer | Contents |
//! |--------|-------|----------|
//! | [`domain`] | Domain | Attributes, origin specs, flattening, errors, fetcher seam |
//! | [`application`] | Application | Decoder, fetcher, `AttributeEnrichmentFilter` |
//! | [`infrastructure`] | Infrastructure | `reqwest` adapter, URL composition, config loading |
//!
//! ## Usage
//!
//! ```ignore
//! let config = FilterConfigLoader::from_yaml_file("attrenrich.yaml")?;
//! let filter = AttributeEnrichmentFilter::new(&config, Arc::new(ReqwestFetcher::new()))?;
//! filter.process(&mut state)?;
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::enrichment::AttributeEnrichmentFilter;
pub use domain::*;
