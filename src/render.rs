//! Turning an [`Example`] into literal text
//!
//! Output layout:
//!
//! ```text
//! # <name or source>          (omitted for the "-" placeholder source)
//! # <description>             (when present)
//! <payload JSON>              (when present, followed by a blank line)
//! <command path> [--version <v>] --<flag> <value> ...
//! ```

use crate::error::ExampleError;
use crate::metadata::Example;
use crate::version::VersionToken;

const TAB_WIDTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleRenderer {
    command_path: String,
    version: Option<VersionToken>,
}

impl ExampleRenderer {
    /// `command_path` is the invocation prefix, e.g. `atlas api createGroupCluster`
    pub fn new(command_path: impl Into<String>) -> Self {
        ExampleRenderer {
            command_path: command_path.into(),
            version: None,
        }
    }

    /// Pin the rendered command to `version` with a `--version` flag
    pub fn with_version(mut self, version: Option<VersionToken>) -> Self {
        self.version = version;
        self
    }

    pub fn command_path(&self) -> &str {
        &self.command_path
    }

    /// Render `example`, panicking if the table handed us a malformed one
    pub fn render(&self, example: &Example) -> String {
        match self.try_render(example) {
            Ok(text) => text,
            Err(err) => panic!("malformed example in command metadata: {err}"),
        }
    }

    pub fn try_render(&self, example: &Example) -> Result<String, ExampleError> {
        example.check()?;

        let mut out = String::new();
        if let Some(label) = example.label() {
            out.push_str("# ");
            out.push_str(label);
            out.push('\n');
        }
        if let Some(description) = &example.description {
            out.push_str("# ");
            out.push_str(description);
            out.push('\n');
        }
        if let Some(value) = &example.value {
            out.push_str(&normalize_indentation(value));
            out.push_str("\n\n");
        }
        out.push_str(&self.command_line(example));
        out.push('\n');
        Ok(out)
    }

    /// The bare invocation: command path, optional version, then flags in name order
    pub fn command_line(&self, example: &Example) -> String {
        let mut line = self.command_path.clone();
        if let Some(version) = &self.version {
            line.push_str(" --version ");
            line.push_str(&version.shell_word());
        }
        for (name, value) in &example.flags {
            line.push_str(" --");
            line.push_str(name);
            line.push(' ');
            line.push_str(value);
        }
        line
    }
}

/// Strip the indentation shared by every non-blank line and trailing whitespace
///
/// Tabs are expanded first so mixed indentation dedents consistently. Nothing
/// else about the body changes.
pub fn normalize_indentation(body: &str) -> String {
    let lines: Vec<String> = body
        .lines()
        .map(|line| line.replace('\t', &" ".repeat(TAB_WIDTH)).trim_end().to_string())
        .collect();

    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return String::new();
    };
    let lines = &lines[first..=last];

    let indent = lines
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| if l.is_empty() { "" } else { &l[indent..] })
        .collect::<Vec<_>>()
        .join("\n")
}
