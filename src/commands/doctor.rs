use anyhow::{bail, Context as _, Result};
use tracing::debug;

use super::open_store;
use crate::config::AppConfig;

pub fn run(config: AppConfig) -> Result<()> {
    // 1) the configured default version must parse
    if let Some(version) = config.default_version()? {
        debug!(%version, "default API version");
    }

    // 2) the metadata table must load
    let store = open_store(&config).context("loading metadata table")?;
    if store.is_empty() {
        bail!("metadata table contains no commands");
    }

    // 3) and honour the generator contract
    let violations = store.validate();
    if !violations.is_empty() {
        for violation in &violations {
            println!(" - {violation}");
        }
        bail!("{} problem(s) found in the metadata table", violations.len());
    }

    println!("✅ doctor checks passed ({} commands)", store.len());
    Ok(())
}
