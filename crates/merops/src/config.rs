//! CLI configuration: TOML file plus environment, resolved against
//! global flags.
//!
//! The config file supplies defaults only; flags and `MERAKI_*` env vars
//! always win. The API key is never read from the file -- flag or env
//! only.

use std::path::PathBuf;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use secrecy::SecretString;
use serde::Deserialize;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// On-disk and `MEROPS_*` environment configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub org: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub concurrency: Option<usize>,
}

/// Path of the config file (`~/.config/merops/merops.toml` on Linux).
pub fn config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "merops")
        .map(|dirs| dirs.config_dir().join("merops.toml"))
        .unwrap_or_else(|| PathBuf::from("merops.toml"))
}

/// Load the config file and environment overrides; a missing or broken
/// file just yields defaults.
pub fn load_config() -> Config {
    Figment::new()
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("MEROPS_"))
        .extract()
        .unwrap_or_default()
}

/// Everything needed to build a task context for one run.
pub struct Resolved {
    pub org: String,
    pub api_key: SecretString,
    pub base_url: String,
    pub timeout: Duration,
    pub concurrency: usize,
}

/// Merge flags, environment, and config file into run settings.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let config = load_config();

    let org = global
        .org
        .clone()
        .or(config.org)
        .ok_or_else(|| CliError::MissingOrg {
            config_path: config_path().display().to_string(),
        })?;

    let api_key = global
        .api_key
        .clone()
        .map(SecretString::from)
        .ok_or(CliError::MissingApiKey)?;

    let base_url = global
        .base_url
        .clone()
        .or(config.base_url)
        .unwrap_or_else(|| merops_api::DEFAULT_BASE_URL.to_owned());

    let timeout_secs = global.timeout.or(config.timeout_secs).unwrap_or(30);
    if timeout_secs == 0 {
        return Err(CliError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    let concurrency = global
        .concurrency
        .or(config.concurrency)
        .unwrap_or(merops_core::fanout::DEFAULT_CONCURRENCY);
    if concurrency == 0 {
        return Err(CliError::Validation {
            field: "concurrency".into(),
            reason: "must be at least 1".into(),
        });
    }

    Ok(Resolved {
        org,
        api_key,
        base_url,
        timeout: Duration::from_secs(timeout_secs),
        concurrency,
    })
}
