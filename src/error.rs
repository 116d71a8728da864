//! Error types for the metadata registry

use std::path::PathBuf;
use thiserror::Error;

use crate::version::VersionToken;

/// A string that is not a valid API version token
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "invalid API version '{input}': expected YYYY-MM-DD, 'preview' or 'private preview'"
)]
pub struct VersionParseError {
    pub input: String,
}

/// Failures returned by [`crate::resolver::VersionResolver`]
///
/// Both variants describe a static mismatch between the caller's request and
/// the loaded table, so they are surfaced to the user as-is and never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The command id does not exist in the table
    #[error("unknown command '{id}'{}", suggestion_hint(.suggestions))]
    UnknownCommand { id: String, suggestions: Vec<String> },

    /// A private-preview-only command was resolved against another version
    #[error(
        "command '{id}' requires the private-preview API version (requested '{requested}'); use --version \"private preview\""
    )]
    GatedCommand { id: String, requested: VersionToken },
}

fn suggestion_hint(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

/// Failures while loading a metadata table
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("reading metadata table {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing metadata table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An example that cannot be rendered
///
/// These are defects of the generated table, not user errors.
#[derive(Debug, Error)]
pub enum ExampleError {
    #[error("example '{label}' has an empty flag name")]
    EmptyFlagName { label: String },

    #[error("example '{label}' has flag name '{name}' containing whitespace")]
    InvalidFlagName { label: String, name: String },

    #[error("example '{label}' carries a payload that is not valid JSON: {error}")]
    InvalidPayload {
        label: String,
        error: serde_json::Error,
    },
}
