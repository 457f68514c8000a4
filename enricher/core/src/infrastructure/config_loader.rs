// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Filter Configuration Loader
//!
//! Reads the raw filter configuration (attribute name → origin block) from
//! YAML or JSON. The result is an unvalidated `serde_json::Value` with the
//! declared attribute order preserved; validation happens when the filter is
//! constructed from it.
//!
//! # Discovery Order
//!
//! 1. Explicit path (CLI `--config`)
//! 2. `ATTRENRICH_CONFIG_PATH` environment variable
//! 3. `./attrenrich.yaml` (working directory)
//! 4. `~/.attrenrich/config.yaml` (user home)
//! 5. `/etc/attrenrich/config.yaml` (system, Unix)

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "ATTRENRICH_CONFIG_PATH";

pub struct FilterConfigLoader;

impl FilterConfigLoader {
    /// Parse configuration from a YAML string (JSON is valid YAML).
    pub fn from_yaml_str(yaml: &str) -> Result<Value> {
        let config: Value = serde_yaml::from_str(yaml).context("Failed to parse filter configuration")?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Value> {
        serde_json::from_str(json).context("Failed to parse filter configuration JSON")
    }

    /// Load configuration from a file. `.json` files go through the JSON
    /// parser, anything else is treated as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read filter configuration: {:?}", path))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Candidate locations, highest precedence first, that exist on disk.
    pub fn discover() -> Option<PathBuf> {
        Self::candidate_paths().into_iter().find(|path| path.exists())
    }

    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            paths.push(PathBuf::from(path));
        }

        paths.push(PathBuf::from("./attrenrich.yaml"));

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".attrenrich").join("config.yaml"));
        }

        #[cfg(unix)]
        paths.push(PathBuf::from("/etc/attrenrich/config.yaml"));

        paths
    }

    /// Load from an explicit path (failing if it cannot be read), otherwise
    /// from the first discovered location, otherwise an empty configuration.
    pub fn load_or_default(cli_path: Option<PathBuf>) -> Result<Value> {
        if let Some(path) = cli_path {
            tracing::info!("Loading filter configuration from explicit path: {:?}", path);
            return Self::from_file(&path);
        }

        if let Some(path) = Self::discover() {
            tracing::info!("Loading filter configuration from discovered path: {:?}", path);
            Self::from_file(path)
        } else {
            tracing::warn!("No filter configuration found in standard locations. Using an empty configuration.");
            Ok(Value::Object(Default::default()))
        }
    }
}
