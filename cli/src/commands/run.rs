// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Run the filter once against a state document.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use attribute_enricher_core::infrastructure::{FilterConfigLoader, ReqwestFetcher};
use attribute_enricher_core::{AttributeEnrichmentFilter, HttpFetcher, ProcessingState};

#[derive(Args, Debug)]
pub struct RunCommand {
    /// State document to enrich (JSON with an "Attributes" object); `-` reads stdin
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    pub state: String,

    /// Timeout in seconds for origins without their own `context.timeout`
    #[arg(long, env = "ATTRENRICH_TIMEOUT", value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

pub fn execute(command: RunCommand, config_override: Option<PathBuf>) -> Result<()> {
    let config = FilterConfigLoader::load_or_default(config_override)
        .context("Failed to load filter configuration")?;

    let mut fetcher = ReqwestFetcher::builder();
    if let Some(seconds) = command.timeout {
        fetcher = fetcher.default_timeout(Duration::from_secs(seconds));
    }
    let fetcher = fetcher.build().context("Failed to build HTTP client")?;

    let raw_state = read_state(&command.state)?;
    let state = enrich_state(&config, &raw_state, Arc::new(fetcher))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&state).context("Failed to serialize state")?
    );
    Ok(())
}

/// Build the filter from `config` and run it over the JSON state in `raw_state`.
pub fn enrich_state(
    config: &Value,
    raw_state: &str,
    fetcher: Arc<dyn HttpFetcher>,
) -> Result<ProcessingState> {
    let filter = AttributeEnrichmentFilter::new(config, fetcher)
        .context("Filter configuration is invalid")?;

    let mut state: ProcessingState =
        serde_json::from_str(raw_state).context("State document is not valid JSON")?;

    info!(attributes = filter.origins().len(), "enriching state");
    filter.process(&mut state).context("Attribute enrichment failed")?;

    Ok(state)
}

fn read_state(source: &str) -> Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read state from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read state file: {}", source))
    }
}
