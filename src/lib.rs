//! # API Metadata CLI Library
//!
//! Versioned command-metadata registry for a cloud database management API CLI.
//!
//! The generated metadata table maps every API command id to the usage text of
//! its parameters and to example invocations grouped by API version. This crate
//! loads that table once, resolves the examples that apply to a pinned API
//! version, and renders them as literal command lines or documentation.

use clap::Parser;
use std::path::PathBuf;

pub mod commands;
pub mod config;
pub mod constants;
pub mod docs;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod render;
pub mod resolver;
pub mod store;
pub mod version;

pub use error::{ExampleError, MetadataError, ResolveError, VersionParseError};
pub use metadata::{CommandMetadata, Example, ParameterMetadata, VersionedExamples};
pub use render::ExampleRenderer;
pub use resolver::{ResolvedMetadata, VersionResolver};
pub use store::MetadataStore;
pub use version::VersionToken;

/// Inspect API command metadata: parameter usage and versioned examples
///
/// Commands are addressed by their API operation id (`createGroupCluster`) or
/// its kebab-case form (`create-group-cluster`). Examples are resolved against a
/// pinned API version, falling back to the closest earlier version that has
/// examples.
#[derive(Parser)]
#[command(
    name = "apimeta",
    version,
    about = "Inspect versioned API command metadata and render examples",
    long_about = "Inspect the command metadata table of the cloud database API CLI.\n\nResolves parameter usage and example payloads for a command at a pinned API version,\nrenders examples as literal invocations, and generates reStructuredText documentation."
)]
pub struct Cli {
    /// Project configuration file
    #[arg(long, global = true, default_value = constants::APIMETA_CONFIG)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub cmd: Option<commands::Commands>,
}
