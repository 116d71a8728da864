use anyhow::Result;
use std::path::Path;

use crate::config::{save_config, AppConfig};
use crate::constants::{DEFAULT_COMMAND_PREFIX, DEFAULT_LOG_LEVEL, METADATA_FILE_ENV};

pub fn run(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    let cfg = AppConfig {
        metadata_file: Some(format!("${{{METADATA_FILE_ENV}:-}}")),
        default_version: None,
        command_prefix: Some(DEFAULT_COMMAND_PREFIX.into()),
        log_level: Some(DEFAULT_LOG_LEVEL.into()),
    };
    save_config(&cfg, config_path)?;
    println!("Created {}", config_path.display());
    Ok(())
}
