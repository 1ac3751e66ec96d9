//! Configuration file support for jartrim.
//!
//! Provides YAML-based configuration through `jartrim.config.yml` files,
//! including data structures, file loading, validation, and merging with
//! command-line arguments.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::outbound::process::{DEFAULT_INSTALLER, DEFAULT_INSTALLER_TIMEOUT};
use crate::application::dto::{VariantMode, DEFAULT_MAX_PARALLEL};
use crate::cli::{
    Args, DEFAULT_BUILD_DIR, DEFAULT_DESCRIPTOR, DEFAULT_REPORT_FILE, DEFAULT_RESULTS_FILE,
};
use crate::shared::Result;
use crate::trimming::domain::{ArtifactCoordinate, SelectionPolicy};
use crate::trimming::services::{VersionPolicy, DEFAULT_ARTIFACT_SUFFIX};

pub const CONFIG_FILENAME: &str = "jartrim.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub report: Option<PathBuf>,
    pub build_dir: Option<PathBuf>,
    pub trim: Option<Vec<String>>,
    pub ignore_scopes: Option<Vec<String>>,
    pub ignore_tests: Option<bool>,
    pub ignore_dependencies: Option<Vec<String>>,
    pub descriptor: Option<PathBuf>,
    pub specialized: Option<bool>,
    pub all_combinations: Option<bool>,
    pub skip: Option<bool>,
    pub publish: Option<bool>,
    pub installer: Option<String>,
    pub installer_timeout_secs: Option<u64>,
    pub repository: Option<String>,
    pub trimmed_dir: Option<PathBuf>,
    pub artifact_suffix: Option<String>,
    pub epoch_version: Option<bool>,
    pub trim_all_when_empty: Option<bool>,
    pub result_json: Option<PathBuf>,
    pub jobs: Option<usize>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
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
    if let Some(ref trim) = config.trim {
        for (i, coordinate) in trim.iter().enumerate() {
            if ArtifactCoordinate::parse(coordinate.trim()).is_err() {
                bail!(
                    "Invalid config: trim[{}] '{}' is not a valid coordinate.\n\n\
                     💡 Hint: Use group:artifact:version (e.g., \"org.acme:util:1.0\").",
                    i,
                    coordinate
                );
            }
        }
    }
    if config.installer_timeout_secs == Some(0) {
        bail!(
            "Invalid config: installer_timeout_secs must be greater than 0.\n\n\
             💡 Hint: Remove the field to use the default of {} seconds.",
            DEFAULT_INSTALLER_TIMEOUT.as_secs()
        );
    }
    if config.jobs == Some(0) {
        bail!("Invalid config: jobs must be at least 1.");
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Effective settings of one run, after merging CLI arguments over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub report: PathBuf,
    pub build_dir: PathBuf,
    pub trimmed_dir: Option<PathBuf>,
    pub trim: Vec<String>,
    pub ignore_scopes: Vec<String>,
    pub ignore_dependencies: Vec<String>,
    pub descriptor: PathBuf,
    pub variant_modes: Vec<VariantMode>,
    pub skip: bool,
    pub publish: bool,
    pub installer: String,
    pub installer_timeout: Duration,
    pub repository: Option<String>,
    pub artifact_suffix: String,
    pub version_policy: VersionPolicy,
    pub selection_policy: SelectionPolicy,
    pub result_json: Option<PathBuf>,
    pub jobs: usize,
}

impl Settings {
    /// CLI scalars override the config file; list options are merged and de-duplicated.
    pub fn merge(args: Args, config: Option<ConfigFile>) -> Self {
        let config = config.unwrap_or_default();

        let build_dir = args
            .build_dir
            .or(config.build_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIR));
        let report = args
            .report
            .or(config.report)
            .unwrap_or_else(|| build_dir.join(DEFAULT_REPORT_FILE));

        let mut ignore_scopes = merge_lists(config.ignore_scopes, args.ignore_scope);
        if args.ignore_tests || config.ignore_tests.unwrap_or(false) {
            ignore_scopes = merge_lists(Some(ignore_scopes), vec!["test".to_string()]);
        }

        let mut variant_modes = Vec::new();
        if args.specialized || config.specialized.unwrap_or(false) {
            variant_modes.push(VariantMode::Single);
        }
        if args.all_combinations || config.all_combinations.unwrap_or(false) {
            variant_modes.push(VariantMode::AllCombinations);
        }

        let result_json = match args.result_json {
            Some(Some(path)) => Some(path),
            Some(None) => Some(
                config
                    .result_json
                    .unwrap_or_else(|| build_dir.join(DEFAULT_RESULTS_FILE)),
            ),
            None => config.result_json,
        };

        Self {
            trimmed_dir: args.trimmed_dir.or(config.trimmed_dir),
            trim: merge_lists(config.trim, args.trim),
            ignore_scopes,
            ignore_dependencies: merge_lists(config.ignore_dependencies, args.ignore_dependency),
            descriptor: args
                .descriptor
                .or(config.descriptor)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DESCRIPTOR)),
            variant_modes,
            skip: args.skip || config.skip.unwrap_or(false),
            publish: !args.no_publish && config.publish.unwrap_or(true),
            installer: args
                .installer
                .or(config.installer)
                .unwrap_or_else(|| DEFAULT_INSTALLER.to_string()),
            installer_timeout: args
                .installer_timeout
                .or(config.installer_timeout_secs.map(Duration::from_secs))
                .unwrap_or(DEFAULT_INSTALLER_TIMEOUT),
            repository: args.repository.or(config.repository),
            artifact_suffix: args
                .artifact_suffix
                .or(config.artifact_suffix)
                .unwrap_or_else(|| DEFAULT_ARTIFACT_SUFFIX.to_string()),
            version_policy: if args.epoch_version || config.epoch_version.unwrap_or(false) {
                VersionPolicy::EpochSuffix
            } else {
                VersionPolicy::Keep
            },
            selection_policy: if args.trim_all_when_empty
                || config.trim_all_when_empty.unwrap_or(false)
            {
                SelectionPolicy::EmptyMeansAll
            } else {
                SelectionPolicy::ExplicitOnly
            },
            result_json,
            jobs: args.jobs.or(config.jobs).unwrap_or(DEFAULT_MAX_PARALLEL),
            report,
            build_dir,
        }
    }
}

/// Config entries first, then CLI entries, keeping the first occurrence of each.
fn merge_lists(config: Option<Vec<String>>, cli: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for item in config.unwrap_or_default().into_iter().chain(cli) {
        let item = item.trim().to_string();
        if !item.is_empty() && !merged.contains(&item) {
            merged.push(item);
        }
    }
    merged
}
