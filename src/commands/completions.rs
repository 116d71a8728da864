use anyhow::{bail, Result};
use clap::CommandFactory;
use clap_complete::{
    generate,
    shells::{Bash, Fish, Zsh},
};
use std::io;

use crate::Cli;

const BIN_NAME: &str = "apimeta";

pub fn run(shell: &str) -> Result<()> {
    let mut cmd = Cli::command();
    match shell {
        "bash" => generate(Bash, &mut cmd, BIN_NAME, &mut io::stdout()),
        "zsh" => generate(Zsh, &mut cmd, BIN_NAME, &mut io::stdout()),
        "fish" => generate(Fish, &mut cmd, BIN_NAME, &mut io::stdout()),
        other => bail!("unsupported shell '{other}', choose: bash, zsh, fish"),
    }
    Ok(())
}
