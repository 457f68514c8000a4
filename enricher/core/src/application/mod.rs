// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod decoder;
pub mod enrichment;
pub mod fetcher;

pub use enrichment::AttributeEnrichmentFilter;
