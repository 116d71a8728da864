use anyhow::Result;
use clap::Args;

use super::{normalize_command_id, Context};

#[derive(Args, Debug)]
pub struct VersionsArgs {
    /// Command id, e.g. `createGroupCluster` or `create-group-cluster`
    pub command: String,
}

pub fn run(ctx: &Context, args: VersionsArgs) -> Result<()> {
    let id = normalize_command_id(&args.command);
    let resolver = ctx.resolver();
    let versions = resolver.supported_versions(&id)?;
    let latest = resolver.latest_version(&id)?;

    if versions.is_empty() {
        println!("{id} has no examples for any API version");
        return Ok(());
    }

    println!("Versions for {id}:");
    for version in versions {
        let marker = if Some(version) == latest { " (latest)" } else { "" };
        println!(" - {version}{marker}");
    }
    Ok(())
}
