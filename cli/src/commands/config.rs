// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use attribute_enricher_core::infrastructure::config_loader::CONFIG_PATH_ENV;
use attribute_enricher_core::infrastructure::{FilterConfigLoader, ReqwestFetcher};
use attribute_enricher_core::AttributeEnrichmentFilter;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

pub fn handle_command(command: ConfigCommand, config_override: Option<PathBuf>) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths),
        ConfigCommand::Validate { file } => validate(file.or(config_override)),
    }
}

fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        match &config_override {
            Some(path) => println!("  --config flag: {}", path.display()),
            None => println!("  --config flag: {}", "(not set)".dimmed()),
        }
        for (index, path) in FilterConfigLoader::candidate_paths().iter().enumerate() {
            let marker = if path.exists() { "found".green() } else { "missing".dimmed() };
            println!("  {}. {} [{}]", index + 1, path.display(), marker);
        }
        println!(
            "  ({} = {})",
            CONFIG_PATH_ENV,
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "(not set)".to_string())
        );
        println!();
    }

    let config = FilterConfigLoader::load_or_default(config_override)
        .context("Failed to load filter configuration")?;

    println!("{}", "Current configuration:".bold());
    println!(
        "{}",
        serde_json::to_string_pretty(&config).context("Failed to render configuration")?
    );

    Ok(())
}

fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = FilterConfigLoader::load_or_default(config_path)
        .context("Failed to load filter configuration")?;

    for line in describe(&config)? {
        println!("  {}", line);
    }

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

/// Construct the filter from `config` and summarize each configured attribute.
pub fn describe(config: &Value) -> Result<Vec<String>> {
    let filter = AttributeEnrichmentFilter::new(config, Arc::new(ReqwestFetcher::new()))
        .context("Configuration validation failed")?;

    Ok(filter
        .origins()
        .iter()
        .map(|(name, origin)| {
            let policy = if origin.replace { "replace" } else { "append" };
            let mut line = format!("{} ← {} [{}] ({})", name, origin.url, origin.jsonpath, policy);
            if !origin.parameters.is_empty() {
                let parameters: Vec<String> = origin
                    .parameters
                    .iter()
                    .map(|(query, attribute)| format!("{}={}", query, attribute))
                    .collect();
                line.push_str(&format!(" params: {}", parameters.join(", ")));
            }
            line
        })
        .collect())
}
