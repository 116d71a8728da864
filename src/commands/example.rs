use anyhow::Result;
use clap::Args;

use super::{normalize_command_id, report_resolution, Context};
use crate::render::ExampleRenderer;

#[derive(Args, Debug)]
pub struct ExampleArgs {
    /// Command id, e.g. `createGroupCluster` or `create-group-cluster`
    pub command: String,

    /// API version: YYYY-MM-DD, "preview" or "private preview" (empty for latest)
    #[arg(long)]
    pub version: Option<String>,
}

pub fn run(ctx: &Context, args: ExampleArgs) -> Result<()> {
    let id = normalize_command_id(&args.command);
    let requested = ctx.requested_version(args.version.as_deref())?;
    let resolved = ctx.resolver().resolve(&id, requested.as_ref())?;
    report_resolution(requested.as_ref(), &resolved);

    if resolved.examples.is_empty() {
        println!("No examples available for {}", resolved.command_id);
        return Ok(());
    }

    // Pin each invocation to the version its example was written for
    let renderer = ExampleRenderer::new(ctx.command_path(resolved.command_id))
        .with_version(resolved.resolved_version);
    let rendered: Vec<String> = resolved
        .examples
        .iter()
        .map(|example| renderer.try_render(example))
        .collect::<Result<_, _>>()?;
    print!("{}", rendered.join("\n"));
    Ok(())
}
