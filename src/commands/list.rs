use anyhow::Result;
use clap::Args;

use super::Context;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Also show commands that only exist in the private preview
    #[arg(long)]
    pub include_private_preview: bool,
}

pub fn run(ctx: &Context, args: ListArgs) -> Result<()> {
    println!("Commands:");
    for (id, meta) in ctx.store.iter() {
        if meta.only_private_preview && !args.include_private_preview {
            continue;
        }

        let latest = meta
            .examples
            .latest_dated()
            .map_or_else(|| "none".to_string(), |(version, _)| version.to_string());
        let tag = if meta.only_private_preview { " [private preview]" } else { "" };
        println!(
            " - {id}{tag}: latest={latest} versions={} examples={}",
            meta.examples.len(),
            meta.examples.example_count()
        );
    }
    Ok(())
}
