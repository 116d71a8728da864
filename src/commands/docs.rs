use anyhow::{bail, Context as _, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use super::{normalize_command_id, Context};
use crate::docs::DocsRenderer;

#[derive(Args, Debug)]
pub struct DocsArgs {
    /// Command id, e.g. `createGroupCluster` or `create-group-cluster`
    pub command: String,

    /// Directory the payload and command include files are written to
    #[arg(long, default_value = "includes")]
    pub includes_dir: PathBuf,

    /// Path the generated page uses to reference the includes directory
    #[arg(long, default_value = "/includes")]
    pub import_path: String,

    /// Write the page to this file instead of stdout
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

pub fn run(ctx: &Context, args: DocsArgs) -> Result<()> {
    let id = normalize_command_id(&args.command);
    let (id, meta) = ctx.resolver().command(&id)?;
    let command_path = ctx.command_path(id);

    let renderer = DocsRenderer::new(&args.includes_dir, args.import_path);
    let Some(body) = renderer.render_command(&command_path, meta)? else {
        bail!("command '{id}' is only available in private preview and is not documented");
    };

    let underline = "=".repeat(command_path.chars().count());
    let page = format!(".. _{}:\n\n{command_path}\n{underline}\n\n{body}", command_path.replace(' ', "-"));

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, page).with_context(|| format!("writing {}", path.display()))?;
            info!(
                page = %path.display(),
                includes = %renderer.includes_local_path().display(),
                "docs written"
            );
            println!("Wrote {}", path.display());
        }
        None => print!("{page}"),
    }
    Ok(())
}
