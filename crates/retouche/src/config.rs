//! Configuration file loading for retouche.
//!
//! Reads `retouche.config.json` from the current working directory, or the
//! file given with `--config`.

use retouche_core::TransformOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "retouche.config.json";

/// Top-level retouche configuration.
#[derive(Debug, Default, Deserialize)]
pub struct RetoucheConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default)]
    #[allow(dead_code)]
    pub schema: Option<String>,

    /// Transform options, at the top level of the file.
    #[serde(flatten)]
    pub options: TransformOptions,
}

/// Load the configuration from `path`, or from `retouche.config.json` in the
/// working directory. A missing file yields the defaults; an unreadable or
/// invalid one is reported and also yields the defaults.
pub fn load_config(path: Option<&Path>) -> RetoucheConfig {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(CONFIG_FILE_NAME),
    };

    if !config_path.exists() {
        if path.is_some() {
            tracing::warn!("Config file {} not found", config_path.display());
        }
        return RetoucheConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => {
                tracing::debug!("Loaded {}", config_path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", config_path.display(), e);
                RetoucheConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", config_path.display(), e);
            RetoucheConfig::default()
        }
    }
}
