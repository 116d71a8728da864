use anyhow::{Context as _, Result};
use clap::{Subcommand, ValueEnum};
use convert_case::{Case, Casing};
use std::path::Path;
use tracing::{info, warn};

use crate::config::{load_effective_config, AppConfig};
use crate::logging;
use crate::resolver::{ResolvedMetadata, VersionResolver};
use crate::store::MetadataStore;
use crate::version::VersionToken;

pub mod completions;
pub mod docs;
pub mod doctor;
pub mod example;
pub mod init;
pub mod list;
pub mod resolve;
pub mod versions;

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Scaffold an apimeta.yaml in the current directory")]
    Init,
    #[command(about = "List commands in the metadata table with their latest example version")]
    List(list::ListArgs),
    #[command(about = "Show the API versions a command has examples for")]
    Versions(versions::VersionsArgs),
    #[command(
        about = "Resolve parameters and examples of a command at an API version (latest if omitted)"
    )]
    Resolve(resolve::ResolveArgs),
    #[command(about = "Print the resolved examples of a command as literal invocations")]
    Example(example::ExampleArgs),
    #[command(about = "Generate reStructuredText docs (options + examples) for a command")]
    Docs(docs::DocsArgs),
    #[command(about = "Validate configuration and the metadata table against the generator contract")]
    Doctor,
    #[command(about = "Emit shell completion scripts (bash/zsh/fish)")]
    Completions { shell: String },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

pub fn run(cmd: Commands, config_path: &Path) -> Result<()> {
    let config = load_effective_config(config_path)?;
    logging::init_tracing(config.log_level());

    match cmd {
        Commands::Init => init::run(config_path),
        Commands::Completions { shell } => completions::run(&shell),
        Commands::Doctor => doctor::run(config),
        Commands::List(args) => list::run(&Context::load(config)?, args),
        Commands::Versions(args) => versions::run(&Context::load(config)?, args),
        Commands::Resolve(args) => resolve::run(&Context::load(config)?, args),
        Commands::Example(args) => example::run(&Context::load(config)?, args),
        Commands::Docs(args) => docs::run(&Context::load(config)?, args),
    }
}

/// Configuration plus the metadata table, loaded once per invocation
pub struct Context {
    pub config: AppConfig,
    pub store: MetadataStore,
}

impl Context {
    pub fn load(config: AppConfig) -> Result<Self> {
        let store = open_store(&config)?;
        info!(commands = store.len(), "metadata table ready");
        Ok(Context { config, store })
    }

    pub fn resolver(&self) -> VersionResolver<'_> {
        VersionResolver::new(&self.store)
    }

    /// Invocation prefix for a command, e.g. `atlas api createGroupCluster`
    pub fn command_path(&self, id: &str) -> String {
        format!("{} {}", self.config.command_prefix(), id)
    }

    /// The version to resolve against: `--version` if given (empty means
    /// latest), else the configured default
    pub fn requested_version(&self, arg: Option<&str>) -> Result<Option<VersionToken>> {
        match arg {
            Some(raw) => Ok(VersionToken::parse_requested(raw)?),
            None => self.config.default_version(),
        }
    }
}

pub fn open_store(config: &AppConfig) -> Result<MetadataStore> {
    match config.metadata_path() {
        Some(path) => Ok(MetadataStore::load(&path)?),
        None => MetadataStore::embedded().context("loading built-in metadata table"),
    }
}

/// Accept both `createGroupCluster` and `create-group-cluster`
pub fn normalize_command_id(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.contains(['-', '_', ' ']) {
        trimmed.to_case(Case::Camel)
    } else {
        trimmed.to_string()
    }
}

/// Tell the user when the examples shown are not for the version they asked for
pub(crate) fn report_resolution(requested: Option<&VersionToken>, resolved: &ResolvedMetadata<'_>) {
    let id = resolved.command_id;
    match (requested, &resolved.resolved_version) {
        (Some(requested), Some(used)) if !resolved.exact => warn!(
            "no examples for {id} at version {requested}; showing examples from version {used}"
        ),
        (Some(requested), None) => warn!("no examples for {id} at version {requested} or earlier"),
        (None, None) => warn!("{id} has no examples for any dated API version"),
        _ => {}
    }
}
