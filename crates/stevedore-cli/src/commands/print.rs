//! The `stevedore print` subcommand.
//!
//! Dumps the build metadata to stdout. Reads only; running it twice in a
//! row changes nothing on disk.

use clap::Args;
use color_eyre::eyre::Result;

use super::Scope;

/// Arguments for `stevedore print`.
#[derive(Args)]
pub struct PrintArgs {
    /// Output a JSON object instead of `KEY=value` lines.
    #[arg(long)]
    pub json: bool,
}

/// Execute the print command.
pub fn execute(args: &PrintArgs, scope: &Scope) -> Result<()> {
    let record = scope.collect()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!("{record}");
    }

    Ok(())
}
