use anyhow::Result;
use clap::Args;
use std::fmt::Write as _;

use super::{normalize_command_id, report_resolution, Context, OutputFormat};
use crate::docs::sanitize_usage;
use crate::resolver::ResolvedMetadata;
use crate::version::VersionToken;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Command id, e.g. `createGroupCluster` or `create-group-cluster`
    pub command: String,

    /// API version: YYYY-MM-DD, "preview" or "private preview" (empty for latest)
    #[arg(long)]
    pub version: Option<String>,

    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

pub fn run(ctx: &Context, args: ResolveArgs) -> Result<()> {
    let id = normalize_command_id(&args.command);
    let requested = ctx.requested_version(args.version.as_deref())?;
    let resolved = ctx.resolver().resolve(&id, requested.as_ref())?;
    report_resolution(requested.as_ref(), &resolved);

    match args.output {
        OutputFormat::Text => print!("{}", describe(&resolved, requested.as_ref())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resolved)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&resolved)?),
    }
    Ok(())
}

/// Human-readable summary of a resolution
pub fn describe(resolved: &ResolvedMetadata<'_>, requested: Option<&VersionToken>) -> String {
    let mut out = String::new();
    let requested = requested.map_or_else(|| "latest".to_string(), ToString::to_string);
    let version = match (&resolved.resolved_version, resolved.exact) {
        (Some(v), true) => format!("{v} (exact)"),
        (Some(v), false) => format!("{v} (fallback)"),
        (None, _) => "none".to_string(),
    };

    let _ = writeln!(out, "command:    {}", resolved.command_id);
    let _ = writeln!(out, "requested:  {requested}");
    let _ = writeln!(out, "resolved:   {version}");
    let _ = writeln!(out, "examples:   {}", resolved.examples.len());
    for example in resolved.examples {
        let _ = writeln!(out, "  - {}", example.label().unwrap_or("(default)"));
    }

    if resolved.parameters.is_empty() {
        return out;
    }
    out.push_str("parameters:\n");
    let width = resolved.parameters.keys().map(String::len).max().unwrap_or(0);
    for (name, param) in resolved.parameters {
        let usage = sanitize_usage(&param.usage);
        let summary = usage.lines().next().unwrap_or("").trim();
        let _ = writeln!(out, "  --{name:<width$}  {summary}");
    }
    out
}
