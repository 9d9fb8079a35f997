//! Patch file inspection and validation.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

use voltio_config::Patch;

#[derive(Args)]
pub struct PatchArgs {
    #[command(subcommand)]
    command: PatchCommand,
}

#[derive(Subcommand)]
enum PatchCommand {
    /// Print the power-on patch as TOML
    Show,
    /// Write the power-on patch to a file
    Init {
        /// Destination path
        output: PathBuf,
    },
    /// Validate a patch file
    Check {
        /// Patch file to check
        file: PathBuf,
    },
}

pub fn run(args: PatchArgs) -> Result<()> {
    match args.command {
        PatchCommand::Show => {
            print!("{}", Patch::default().to_toml()?);
        }
        PatchCommand::Init { output } => {
            Patch::default()
                .save(&output)
                .with_context(|| format!("writing '{}'", output.display()))?;
            println!("wrote {}", output.display());
        }
        PatchCommand::Check { file } => {
            Patch::load(&file).with_context(|| format!("checking '{}'", file.display()))?;
            println!("{}: ok", file.display());
        }
    }
    Ok(())
}
