//! The immutable command metadata table
//!
//! A [`MetadataStore`] is built once at start-up, either from the table
//! compiled into the binary or from a JSON file in the same format, and is
//! only ever read afterwards. It has no interior mutability, so a shared
//! reference (or an `Arc`) can be handed to any number of threads.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::MetadataError;
use crate::metadata::CommandMetadata;
use crate::version::VersionToken;

const EMBEDDED_METADATA: &str = include_str!("../data/metadata.json");

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MetadataStore {
    commands: BTreeMap<String, CommandMetadata>,
}

/// A breach of the generator's output contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractViolation {
    pub command: String,
    pub problem: String,
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.command, self.problem)
    }
}

impl MetadataStore {
    /// Parse the table compiled into this binary
    pub fn embedded() -> Result<Self, MetadataError> {
        Self::from_json_str(EMBEDDED_METADATA)
    }

    pub fn from_json_str(data: &str) -> Result<Self, MetadataError> {
        let store: MetadataStore = serde_json::from_str(data)?;
        debug!(commands = store.len(), "loaded metadata table");
        Ok(store)
    }

    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let data = fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    pub fn from_commands(commands: impl IntoIterator<Item = (String, CommandMetadata)>) -> Self {
        MetadataStore {
            commands: commands.into_iter().collect(),
        }
    }

    pub fn lookup(&self, id: &str) -> Option<&CommandMetadata> {
        self.commands.get(id)
    }

    /// Like [`MetadataStore::lookup`], also borrowing the stored id
    pub fn entry(&self, id: &str) -> Option<(&str, &CommandMetadata)> {
        self.commands
            .get_key_value(id)
            .map(|(id, meta)| (id.as_str(), meta))
    }

    /// Command ids in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandMetadata)> + '_ {
        self.commands.iter().map(|(id, meta)| (id.as_str(), meta))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Closest known ids to `id`, best match first
    pub fn suggest(&self, id: &str, limit: usize) -> Vec<String> {
        let matcher = SkimMatcherV2::default().ignore_case();
        let mut scored: Vec<(i64, &str)> = self
            .ids()
            .filter_map(|candidate| {
                matcher
                    .fuzzy_match(candidate, id)
                    .map(|score| (score, candidate))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }

    /// Check the table against what the generator promises to produce
    pub fn validate(&self) -> Vec<ContractViolation> {
        let mut violations = Vec::new();
        let mut report = |command: &str, problem: String| {
            violations.push(ContractViolation {
                command: command.to_string(),
                problem,
            })
        };

        for (id, meta) in self.iter() {
            for (name, param) in &meta.parameters {
                if param.usage.trim().is_empty() {
                    report(id, format!("parameter '{name}' has an empty usage string"));
                }
            }

            for (version, examples) in meta.examples.iter() {
                for example in examples {
                    if let Err(err) = example.check() {
                        report(id, format!("version {version}: {err}"));
                    }
                }

                if meta.only_private_preview && version != VersionToken::PrivatePreview {
                    report(
                        id,
                        format!("private-preview-only command has examples for version {version}"),
                    );
                }
            }
        }

        violations
    }
}
