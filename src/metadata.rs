//! Command metadata data model
//!
//! These types mirror the generated table: for every command id, the
//! version-independent parameter documentation and the per-version example
//! sets. Everything here is read-only once a [`crate::store::MetadataStore`]
//! has been built.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::error::{ExampleError, VersionParseError};
use crate::version::VersionToken;

/// Source label used by the generator for examples without a name
pub const UNLABELED_SOURCE: &str = "-";

/// Usage text for one flag/parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterMetadata {
    pub usage: String,
}

/// One illustrative invocation of a command
///
/// Empty strings in the generated table are read as absent values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub source: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// Literal JSON request body
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
    #[serde(default)]
    pub flags: BTreeMap<String, String>,
}

impl Example {
    /// Human label for the example, `None` for the `-` placeholder source
    pub fn label(&self) -> Option<&str> {
        if self.source == UNLABELED_SOURCE {
            return None;
        }
        Some(self.name.as_deref().unwrap_or(&self.source))
    }

    /// Check the shape the renderers rely on
    pub fn check(&self) -> Result<(), ExampleError> {
        let label = || self.name.clone().unwrap_or_else(|| self.source.clone());

        for name in self.flags.keys() {
            if name.is_empty() {
                return Err(ExampleError::EmptyFlagName { label: label() });
            }
            if name.chars().any(char::is_whitespace) {
                return Err(ExampleError::InvalidFlagName {
                    label: label(),
                    name: name.clone(),
                });
            }
        }

        if let Some(value) = &self.value {
            if let Err(error) = serde_json::from_str::<serde_json::Value>(value) {
                return Err(ExampleError::InvalidPayload {
                    label: label(),
                    error,
                });
            }
        }

        Ok(())
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Examples of a command keyed by API version
///
/// Dated versions live in a date-ordered map, so they are sorted and
/// duplicate-free by construction. Each sentinel has its own slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<Example>>",
    into = "BTreeMap<String, Vec<Example>>"
)]
pub struct VersionedExamples {
    dated: BTreeMap<NaiveDate, Vec<Example>>,
    preview: Option<Vec<Example>>,
    private_preview: Option<Vec<Example>>,
}

impl VersionedExamples {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used while constructing a table; a repeated version replaces the earlier list
    pub fn with(mut self, version: VersionToken, examples: Vec<Example>) -> Self {
        match version {
            VersionToken::Dated(date) => {
                self.dated.insert(date, examples);
            }
            VersionToken::Preview => self.preview = Some(examples),
            VersionToken::PrivatePreview => self.private_preview = Some(examples),
        }
        self
    }

    /// Examples stored under exactly `version`
    pub fn get(&self, version: &VersionToken) -> Option<&[Example]> {
        match version {
            VersionToken::Dated(date) => self.dated.get(date).map(Vec::as_slice),
            VersionToken::Preview => self.preview.as_deref(),
            VersionToken::PrivatePreview => self.private_preview.as_deref(),
        }
    }

    /// The most recent dated version; sentinels are never considered
    pub fn latest_dated(&self) -> Option<(VersionToken, &[Example])> {
        self.dated
            .iter()
            .next_back()
            .map(|(date, examples)| (VersionToken::Dated(*date), examples.as_slice()))
    }

    /// The greatest dated version strictly before `date`
    pub fn preceding(&self, date: NaiveDate) -> Option<(VersionToken, &[Example])> {
        self.dated
            .range(..date)
            .next_back()
            .map(|(date, examples)| (VersionToken::Dated(*date), examples.as_slice()))
    }

    /// All versions with their examples: dated ascending, then `preview`, then `private preview`
    pub fn iter(&self) -> impl Iterator<Item = (VersionToken, &[Example])> + '_ {
        let dated = self
            .dated
            .iter()
            .map(|(date, examples)| (VersionToken::Dated(*date), examples.as_slice()));
        let preview = self
            .preview
            .as_deref()
            .map(|examples| (VersionToken::Preview, examples));
        let private_preview = self
            .private_preview
            .as_deref()
            .map(|examples| (VersionToken::PrivatePreview, examples));
        dated.chain(preview).chain(private_preview)
    }

    pub fn versions(&self) -> Vec<VersionToken> {
        self.iter().map(|(version, _)| version).collect()
    }

    pub fn has_dated(&self) -> bool {
        !self.dated.is_empty()
    }

    /// Number of versions with an entry
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of examples across all versions
    pub fn example_count(&self) -> usize {
        self.iter().map(|(_, examples)| examples.len()).sum()
    }
}

impl TryFrom<BTreeMap<String, Vec<Example>>> for VersionedExamples {
    type Error = VersionParseError;

    fn try_from(raw: BTreeMap<String, Vec<Example>>) -> Result<Self, Self::Error> {
        raw.into_iter()
            .try_fold(
                VersionedExamples::new(),
                |acc, (key, examples)| -> Result<Self, Self::Error> {
                    Ok(acc.with(key.parse()?, examples))
                },
            )
    }
}

impl From<VersionedExamples> for BTreeMap<String, Vec<Example>> {
    fn from(value: VersionedExamples) -> Self {
        let mut out = BTreeMap::new();
        let VersionedExamples {
            dated,
            preview,
            private_preview,
        } = value;
        for (date, examples) in dated {
            out.insert(VersionToken::Dated(date).to_string(), examples);
        }
        if let Some(examples) = preview {
            out.insert(VersionToken::Preview.to_string(), examples);
        }
        if let Some(examples) = private_preview {
            out.insert(VersionToken::PrivatePreview.to_string(), examples);
        }
        out
    }
}

/// Everything the table knows about one command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandMetadata {
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterMetadata>,
    #[serde(default)]
    pub only_private_preview: bool,
    #[serde(default)]
    pub examples: VersionedExamples,
}
