//! The `stevedore labels` subcommand.

use clap::Args;
use color_eyre::eyre::Result;
use stevedore_build::{LabelSchema, to_dockerfile_instruction};

use super::Scope;

/// Arguments for `stevedore labels`.
#[derive(Args)]
pub struct LabelsArgs {
    /// Print a Dockerfile `LABEL` instruction instead of `key=value` lines.
    #[arg(long)]
    pub dockerfile: bool,
}

/// Execute the labels command.
pub fn execute(args: &LabelsArgs, scope: &Scope) -> Result<()> {
    let record = scope.collect()?;
    let labels = LabelSchema::new(&scope.config.labels).render(&record);

    if args.dockerfile {
        println!("{}", to_dockerfile_instruction(&labels));
    } else {
        for label in &labels {
            println!("{}={}", label.key, label.value);
        }
    }

    Ok(())
}
