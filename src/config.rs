//! Configuration file support for sbom-analyzer.
//!
//! Provides YAML-based configuration through `sbom-analyzer.config.yml` files,
//! including data structures, file loading, validation and merging with
//! command-line options.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;

use crate::cli::Args;
use sbom_analyzer::application::use_cases::{
    EnrichmentSettings, DEFAULT_BATCH_DELAY_MS, DEFAULT_BATCH_SIZE,
};
use sbom_analyzer::sbom_analysis::policies::ComponentPolicy;
use sbom_analyzer::shared::Result;

pub const CONFIG_FILENAME: &str = "sbom-analyzer.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub batch_size: Option<usize>,
    pub batch_delay_ms: Option<u64>,
    pub approved_licenses: Option<Vec<String>>,
    pub inactive_maintainers: Option<Vec<String>>,
    pub ignore_vulnerabilities: Option<Vec<IgnoreVulnerability>>,
    pub check_kev: Option<bool>,
    pub fail_below: Option<u8>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// A vulnerability id (or CVE alias) to drop from lookup results.
#[derive(Debug, Deserialize)]
pub struct IgnoreVulnerability {
    pub id: String,
    pub reason: Option<String>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    tracing::debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.batch_size == Some(0) {
        bail!(
            "Invalid config: batch_size must be at least 1.\n\n\
             💡 Hint: Remove the field to use the default of {}.",
            DEFAULT_BATCH_SIZE
        );
    }

    if let Some(fail_below) = config.fail_below {
        if fail_below > 100 {
            bail!(
                "Invalid config: fail_below must be between 0 and 100 (got {}).",
                fail_below
            );
        }
    }

    if let Some(ref ignored) = config.ignore_vulnerabilities {
        for (i, entry) in ignored.iter().enumerate() {
            if entry.id.trim().is_empty() {
                bail!(
                    "Invalid config: ignore_vulnerabilities[{}].id must not be empty.\n\n\
                     💡 Hint: Each ignore_vulnerabilities entry must have a non-empty 'id' field (e.g., \"CVE-2024-1234\").",
                    i
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!("Unknown config field '{}' will be ignored", key);
    }
}

/// Effective options after merging the config file with command-line flags
///
/// Command-line flags win over the config file; both fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub settings: EnrichmentSettings,
    pub approved_licenses: Option<Vec<String>>,
    pub inactive_maintainers: Vec<String>,
    pub check_kev: bool,
    pub offline: bool,
    pub fail_below: Option<u8>,
}

impl ResolvedOptions {
    pub fn resolve(args: &Args, config: Option<ConfigFile>) -> Self {
        let config = config.unwrap_or_default();

        let batch_size = args
            .batch_size
            .or(config.batch_size)
            .unwrap_or(DEFAULT_BATCH_SIZE);
        let batch_delay_ms = args
            .batch_delay_ms
            .or(config.batch_delay_ms)
            .unwrap_or(DEFAULT_BATCH_DELAY_MS);
        let ignored_ids: HashSet<String> = config
            .ignore_vulnerabilities
            .unwrap_or_default()
            .into_iter()
            .map(|entry| entry.id.trim().to_string())
            .collect();

        Self {
            settings: EnrichmentSettings {
                batch_size,
                batch_delay: Duration::from_millis(batch_delay_ms),
                ignored_ids,
            },
            approved_licenses: config.approved_licenses,
            inactive_maintainers: config.inactive_maintainers.unwrap_or_default(),
            check_kev: args.check_kev || config.check_kev.unwrap_or(false),
            offline: args.offline,
            fail_below: args.fail_below.or(config.fail_below),
        }
    }

    pub fn component_policy(&self) -> ComponentPolicy {
        ComponentPolicy::new(
            self.approved_licenses.clone(),
            self.inactive_maintainers.clone(),
        )
    }
}
