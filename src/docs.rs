//! reStructuredText documentation for API commands
//!
//! Every example of every version of a command becomes part of one
//! `Examples` section. Payloads and command lines are written to an includes
//! directory and pulled in with `literalinclude`, so they can be tested as
//! plain files. Commands that only exist in private preview are not documented.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::metadata::{CommandMetadata, ParameterMetadata, VersionedExamples, UNLABELED_SOURCE};
use crate::render::ExampleRenderer;

const TAB_INDENT: &str = "      ";

/// Snooty cannot render this table marker from API field descriptions
const TABLE_MARKER: &str = "|---|---|---|---|";

pub struct DocsRenderer {
    includes_local_path: PathBuf,
    includes_import_path: String,
}

impl DocsRenderer {
    /// `includes_local_path` is where files are written, `includes_import_path`
    /// is how the generated pages refer to that directory
    pub fn new(includes_local_path: impl Into<PathBuf>, includes_import_path: impl Into<String>) -> Self {
        DocsRenderer {
            includes_local_path: includes_local_path.into(),
            includes_import_path: includes_import_path.into(),
        }
    }

    pub fn includes_local_path(&self) -> &Path {
        &self.includes_local_path
    }

    /// Options and Examples sections for one command, `None` for private-preview-only commands
    pub fn render_command(&self, command_path: &str, meta: &CommandMetadata) -> Result<Option<String>> {
        if meta.only_private_preview {
            return Ok(None);
        }

        let mut page = render_options(&meta.parameters);
        let examples = self.build_examples(command_path, &meta.examples)?;
        if !examples.is_empty() {
            page.push('\n');
            page.push_str(&examples);
        }
        Ok(Some(page))
    }

    /// The `Examples` section; empty when the command has no examples
    pub fn build_examples(&self, command_path: &str, examples: &VersionedExamples) -> Result<String> {
        let total = examples.example_count();
        if total == 0 {
            return Ok(String::new());
        }

        fs::create_dir_all(&self.includes_local_path).with_context(|| {
            format!("creating includes directory {}", self.includes_local_path.display())
        })?;

        let file_prefix = command_path.replace(' ', "-");
        let tabs = total != 1;
        let indent = if tabs { TAB_INDENT } else { "" };

        let mut out = String::from("Examples\n--------\n\n");
        if tabs {
            out.push_str(".. tabs::\n\n");
        }

        let mut unnamed = 0;
        for (version, list) in examples.iter() {
            let renderer = ExampleRenderer::new(command_path).with_version(Some(version));
            let version_slug = version.slug();

            for example in list {
                example
                    .check()
                    .with_context(|| format!("example for {command_path} at version {version}"))?;
                let source = source_slug(&example.source);

                if tabs {
                    out.push_str("   .. tab:: ");
                    match &example.name {
                        Some(name) => out.push_str(name),
                        None => {
                            out.push_str("Example");
                            if unnamed > 0 {
                                out.push_str(&format!(" {unnamed}"));
                            }
                            unnamed += 1;
                        }
                    }
                    out.push_str(&format!("\n      :tabid: {version_slug}_{source}\n\n"));
                }

                if let Some(value) = &example.value {
                    if let Some(description) = &example.description {
                        out.push_str(&format!("{indent}{description}\n\n"));
                    }
                    out.push_str(&format!(
                        "{indent}Create the file below and save it as ``payload.json``\n\n"
                    ));

                    let payload_file = format!("{file_prefix}-{version_slug}-{source}-payload.json");
                    self.write_include(&payload_file, value)?;

                    out.push_str(&format!(
                        "{indent}   .. literalinclude:: {}/{payload_file}\n",
                        self.includes_import_path
                    ));
                    out.push_str(&format!("{indent}      :language: shell\n"));
                    out.push_str(&format!(
                        "{indent}After creating ``payload.json``, run the command below in the same directory.\n\n"
                    ));
                }

                let command_file = format!("{file_prefix}-{version_slug}-{source}.sh");
                self.write_include(&command_file, &format!("{}\n", renderer.command_line(example)))?;

                out.push_str(&format!(
                    "{indent}.. literalinclude:: {}/{command_file}\n",
                    self.includes_import_path
                ));
                out.push_str(&format!("{indent}   :language: shell\n"));
            }
        }

        Ok(out)
    }

    fn write_include(&self, file_name: &str, contents: &str) -> Result<()> {
        let path = self.includes_local_path.join(file_name);
        fs::write(&path, contents).with_context(|| format!("writing include file {}", path.display()))
    }
}

/// `Options` section listing each parameter with docs-safe usage text
pub fn render_options(parameters: &BTreeMap<String, ParameterMetadata>) -> String {
    let mut out = String::from("Options\n-------\n\n");
    if parameters.is_empty() {
        out.push_str("This command has no parameters.\n");
        return out;
    }

    out.push_str(".. list-table::\n   :header-rows: 1\n   :widths: 20 80\n\n");
    out.push_str("   * - Name\n     - Description\n");
    for (name, param) in parameters {
        let usage = sanitize_usage(&param.usage).split_whitespace().collect::<Vec<_>>().join(" ");
        out.push_str(&format!("   * - --{name}\n     - {usage}\n"));
    }
    out
}

/// Rewrite API descriptions into text the docs toolchain accepts
pub fn sanitize_usage(usage: &str) -> String {
    usage
        .replace(TABLE_MARKER, "")
        .replace("`<database>.<collection>`", "``<database>.<collection>``")
}

fn source_slug(source: &str) -> String {
    if source == UNLABELED_SOURCE {
        return "default".to_string();
    }
    source.replace(' ', "_").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Example;
    use tempfile::TempDir;

    fn example(source: &str, name: Option<&str>, value: Option<&str>) -> Example {
        Example {
            source: source.into(),
            name: name.map(String::from),
            description: Some("Describes the example".into()),
            value: value.map(String::from),
            flags: BTreeMap::from([("groupId".to_string(), "32b6e34b3d91647abb20e7b8".to_string())]),
        }
    }

    #[test]
    fn test_single_example_has_no_tabs() {
        let dir = TempDir::new().unwrap();
        let docs = DocsRenderer::new(dir.path(), "/includes");
        let examples = VersionedExamples::new()
            .with("2023-01-01".parse().unwrap(), vec![example("-", None, None)]);

        let out = docs.build_examples("atlas api listGroupClusters", &examples).unwrap();
        assert_eq!(
            out,
            "Examples\n--------\n\n\
             .. literalinclude:: /includes/atlas-api-listGroupClusters-2023-01-01-default.sh\n   \
             :language: shell\n"
        );

        let written =
            fs::read_to_string(dir.path().join("atlas-api-listGroupClusters-2023-01-01-default.sh"))
                .unwrap();
        assert_eq!(
            written,
            "atlas api listGroupClusters --version 2023-01-01 --groupId 32b6e34b3d91647abb20e7b8\n"
        );
    }

    #[test]
    fn test_multiple_examples_use_tabs() {
        let dir = TempDir::new().unwrap();
        let docs = DocsRenderer::new(dir.path(), "/includes");
        let examples = VersionedExamples::new()
            .with(
                "2024-10-23".parse().unwrap(),
                vec![
                    example("Cluster", Some("Cluster"), Some("{\"name\": \"a\"}")),
                    example("create cluster", None, Some("{\"name\": \"b\"}")),
                ],
            )
            .with("preview".parse().unwrap(), vec![example("-", None, None)]);

        let out = docs.build_examples("atlas api createGroupCluster", &examples).unwrap();
        assert!(out.starts_with("Examples\n--------\n\n.. tabs::\n\n"));
        assert!(out.contains("   .. tab:: Cluster\n      :tabid: 2024-10-23_cluster\n"));
        assert!(out.contains("   .. tab:: Example\n      :tabid: 2024-10-23_create_cluster\n"));
        assert!(out.contains("   .. tab:: Example 1\n      :tabid: preview_default\n"));
        assert!(out.contains("      Create the file below and save it as ``payload.json``"));

        let payload = fs::read_to_string(
            dir.path()
                .join("atlas-api-createGroupCluster-2024-10-23-create_cluster-payload.json"),
        )
        .unwrap();
        assert_eq!(payload, "{\"name\": \"b\"}");
        assert!(dir
            .path()
            .join("atlas-api-createGroupCluster-preview-default.sh")
            .exists());
    }

    #[test]
    fn test_private_preview_commands_are_skipped() {
        let dir = TempDir::new().unwrap();
        let docs = DocsRenderer::new(dir.path(), "/includes");
        let meta = CommandMetadata {
            only_private_preview: true,
            ..Default::default()
        };
        assert_eq!(docs.render_command("atlas api hidden", &meta).unwrap(), None);
    }

    #[test]
    fn test_no_examples_renders_options_only() {
        let dir = TempDir::new().unwrap();
        let docs = DocsRenderer::new(dir.path().join("inc"), "/includes");
        let meta = CommandMetadata::default();
        let page = docs.render_command("atlas api bare", &meta).unwrap().unwrap();
        assert_eq!(page, "Options\n-------\n\nThis command has no parameters.\n");
        assert!(!dir.path().join("inc").exists());
    }

    #[test]
    fn test_sanitize_usage() {
        assert_eq!(sanitize_usage("Collection name.|---|---|---|---|"), "Collection name.");
        assert_eq!(
            sanitize_usage("Namespace `<database>.<collection>` to read."),
            "Namespace ``<database>.<collection>`` to read."
        );
    }

    #[test]
    fn test_render_options_flattens_usage() {
        let params = BTreeMap::from([(
            "groupId".to_string(),
            ParameterMetadata {
                usage: "Project id.\n\n**NOTE**: same as group.".into(),
            },
        )]);
        let out = render_options(&params);
        assert!(out.contains("   * - --groupId\n     - Project id. **NOTE**: same as group.\n"));
    }
}
