//! # apimeta
//!
//! Command-line front-end for the versioned command-metadata registry.
//!
//! ## Quick Start
//!
//! ```bash
//! # List documented commands
//! apimeta list
//!
//! # Resolve a command at a pinned API version
//! apimeta resolve createGroupCluster --version 2024-09-01
//!
//! # Print ready-to-run examples
//! apimeta example delete-federation-setting
//!
//! # Generate reStructuredText docs and include files
//! apimeta docs createGroupCluster --includes-dir docs/includes
//! ```
//!
//! ## Configuration
//!
//! - `apimeta.yaml` - Project configuration
//! - `~/.config/apimeta/config.yaml` - Global configuration (or `APIMETA_CONFIG_PATH`)
//!
//! Set `APIMETA_LOG` (e.g. `debug`) to control log output on stderr.

use anyhow::Result;
use api_metadata_cli::{commands, Cli};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cmd = cli.cmd.unwrap_or_else(|| {
        eprintln!("No command provided. Use --help to see available commands.");
        std::process::exit(1);
    });
    commands::run(cmd, &cli.config)
}
