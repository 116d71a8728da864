//! Version resolution for command metadata
//!
//! Given a command id and the API version a caller pinned (or none, meaning
//! "latest"), pick the example set that applies. Fallback only ever moves to an
//! older dated version: an example written for a newer release may use request
//! fields the pinned release does not have.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::ResolveError;
use crate::metadata::{CommandMetadata, Example, ParameterMetadata};
use crate::store::MetadataStore;
use crate::version::VersionToken;

const SUGGESTION_LIMIT: usize = 3;

/// The view of one command at one API version
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMetadata<'a> {
    pub command_id: &'a str,
    pub parameters: &'a BTreeMap<String, ParameterMetadata>,
    pub examples: &'a [Example],
    /// Version the examples were taken from, `None` when there are none
    pub resolved_version: Option<VersionToken>,
    /// Whether `resolved_version` is exactly the version requested
    pub exact: bool,
}

impl<'a> ResolvedMetadata<'a> {
    fn new(command_id: &'a str, meta: &'a CommandMetadata) -> Self {
        ResolvedMetadata {
            command_id,
            parameters: &meta.parameters,
            examples: &[],
            resolved_version: None,
            exact: false,
        }
    }

    fn with_examples(mut self, version: VersionToken, examples: &'a [Example], exact: bool) -> Self {
        self.resolved_version = Some(version);
        self.examples = examples;
        self.exact = exact;
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VersionResolver<'a> {
    store: &'a MetadataStore,
}

impl<'a> VersionResolver<'a> {
    pub fn new(store: &'a MetadataStore) -> Self {
        VersionResolver { store }
    }

    /// Resolve `id` at `requested`, where `None` means the latest dated version
    pub fn resolve(
        &self,
        id: &str,
        requested: Option<&VersionToken>,
    ) -> Result<ResolvedMetadata<'a>, ResolveError> {
        let (id, meta) = self.command(id)?;

        if let Some(version) = requested {
            if meta.only_private_preview && *version != VersionToken::PrivatePreview {
                return Err(ResolveError::GatedCommand {
                    id: id.to_string(),
                    requested: *version,
                });
            }
        }

        let resolved = ResolvedMetadata::new(id, meta);
        let examples = &meta.examples;

        let Some(version) = requested else {
            return Ok(match examples.latest_dated() {
                Some((latest, list)) => resolved.with_examples(latest, list, false),
                None => resolved,
            });
        };

        if let Some(list) = examples.get(version) {
            return Ok(resolved.with_examples(*version, list, true));
        }

        // Sentinels never borrow from another version
        let Some(date) = version.date() else {
            return Ok(resolved);
        };

        match examples.preceding(date) {
            Some((fallback, list)) => {
                debug!(
                    command = id,
                    requested = %version,
                    resolved = %fallback,
                    "no examples at requested version, using preceding version"
                );
                Ok(resolved.with_examples(fallback, list, false))
            }
            None => Ok(resolved),
        }
    }

    /// Every version the command has examples for, in resolution order
    pub fn supported_versions(&self, id: &str) -> Result<Vec<VersionToken>, ResolveError> {
        let (_, meta) = self.command(id)?;
        Ok(meta.examples.versions())
    }

    /// The version an unpinned resolution would pick
    pub fn latest_version(&self, id: &str) -> Result<Option<VersionToken>, ResolveError> {
        let (_, meta) = self.command(id)?;
        Ok(meta.examples.latest_dated().map(|(version, _)| version))
    }

    /// The stored id and metadata of `id`, with suggestions when it is unknown
    pub fn command(&self, id: &str) -> Result<(&'a str, &'a CommandMetadata), ResolveError> {
        self.store
            .entry(id)
            .ok_or_else(|| ResolveError::UnknownCommand {
                id: id.to_string(),
                suggestions: self.store.suggest(id, SUGGESTION_LIMIT),
            })
    }
}
