//! Configuration management for apimeta
//!
//! Two optional YAML files are read and merged field by field, later wins:
//! 1. Global configuration in `~/.config/apimeta/config.yaml`, or the path in
//!    `APIMETA_CONFIG_PATH`
//! 2. Project configuration in `apimeta.yaml`
//!
//! ## Environment Variable Expansion
//!
//! Both files support environment variable expansion before parsing:
//! - `${VAR}` - Simple substitution
//! - `${VAR:-default}` - Use default if VAR is unset or empty
//! - `${VAR-default}` - Use default if VAR is unset
//! - `${VAR:+alt}` - Use alt if VAR is set and non-empty
//! - `${VAR+alt}` - Use alt if VAR is set

use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs, path::PathBuf};

use crate::constants::{
    CONFIG_PATH_ENV, DEFAULT_COMMAND_PREFIX, DEFAULT_LOG_LEVEL, GLOBAL_CONFIG_RELATIVE,
};
use crate::version::VersionToken;

/// Settings controlling where metadata comes from and how it is presented
///
/// # Example
///
/// ```yaml
/// metadataFile: ${APIMETA_METADATA_FILE:-}
/// defaultVersion: 2024-08-05
/// commandPrefix: atlas api
/// logLevel: info
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// JSON metadata table to use instead of the one built into the binary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_file: Option<String>,
    /// API version used when no `--version` is given, like a profile's `api_version`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_version: Option<String>,
    /// Prefix placed before the command id in rendered invocations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_prefix: Option<String>,
    /// Default tracing filter when `APIMETA_LOG` is unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Overlay `other` on top of `self`; non-empty fields in `other` win
    pub fn merge(self, other: AppConfig) -> AppConfig {
        fn pick(over: Option<String>, base: Option<String>) -> Option<String> {
            if non_empty(&over).is_some() {
                over
            } else {
                base
            }
        }

        AppConfig {
            metadata_file: pick(other.metadata_file, self.metadata_file),
            default_version: pick(other.default_version, self.default_version),
            command_prefix: pick(other.command_prefix, self.command_prefix),
            log_level: pick(other.log_level, self.log_level),
        }
    }

    /// Metadata file path, treating an empty expansion as unset
    pub fn metadata_path(&self) -> Option<PathBuf> {
        non_empty(&self.metadata_file).map(PathBuf::from)
    }

    pub fn default_version(&self) -> anyhow::Result<Option<VersionToken>> {
        match non_empty(&self.default_version) {
            Some(raw) => {
                let version = raw
                    .parse::<VersionToken>()
                    .context("invalid defaultVersion in configuration")?;
                Ok(Some(version))
            }
            None => Ok(None),
        }
    }

    pub fn command_prefix(&self) -> &str {
        non_empty(&self.command_prefix).unwrap_or(DEFAULT_COMMAND_PREFIX)
    }

    pub fn log_level(&self) -> &str {
        non_empty(&self.log_level).unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let preprocessed_data = preprocess_config(path)?;
    // An empty file deserializes as YAML null
    if preprocessed_data.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let cfg: AppConfig = serde_yaml::from_str(&preprocessed_data)
        .with_context(|| format!("parsing configuration {}", path.display()))?;
    Ok(cfg)
}

pub fn global_config_path() -> PathBuf {
    env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            p.push(GLOBAL_CONFIG_RELATIVE);
            p
        })
}

pub fn load_global_config() -> anyhow::Result<AppConfig> {
    let path = global_config_path();
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    load_config(&path).with_context(|| format!("reading global configuration {}", path.display()))
}

/// Global configuration overlaid with the project file at `project_path`, if present
pub fn load_effective_config(project_path: &Path) -> anyhow::Result<AppConfig> {
    let global = load_global_config()?;
    if !project_path.exists() {
        return Ok(global);
    }
    let project = load_config(project_path)?;
    Ok(global.merge(project))
}

pub fn save_config(cfg: &AppConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let data = serde_yaml::to_string(cfg)?;
    fs::write(path, data).with_context(|| format!("writing configuration {}", path.display()))?;
    Ok(())
}

pub fn expand_env_placeholders(input: &str) -> anyhow::Result<String> {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?:(:?[-+])([^}]*))?\}")?;
    let expanded = re.replace_all(input, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let op = caps.get(2).map_or("", |m| m.as_str());
        let val = caps.get(3).map_or("", |m| m.as_str());
        let var = env::var(var_name).ok();

        match (var.as_deref(), op) {
            (Some(v), "") => v.to_string(),                      // ${VAR}
            (Some(v), ":-") if !v.is_empty() => v.to_string(),   // ${VAR:-default}
            (_, ":-") => val.to_string(),
            (Some(v), "-") => v.to_string(),                     // ${VAR-default}
            (None, "-") => val.to_string(),
            (Some(v), ":+") if !v.is_empty() => val.to_string(), // ${VAR:+alt}
            (Some(_), "+") => val.to_string(),                   // ${VAR+alt}
            _ => String::new(),
        }
    });
    Ok(expanded.into_owned())
}

pub fn preprocess_config(path: &Path) -> anyhow::Result<String> {
    let raw_data = fs::read_to_string(path)
        .with_context(|| format!("reading configuration {}", path.display()))?;
    expand_env_placeholders(&raw_data)
}
