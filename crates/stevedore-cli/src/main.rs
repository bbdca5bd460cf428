//! Stevedore CLI: labelled container image builds.
//!
//! Collect build provenance from git and the environment, then hand it to
//! `docker build` as build arguments.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Stevedore: build provenance for container images.
///
/// Computes the commit, build date, repository name, and invoking user,
/// and passes them to `docker build` so the Dockerfile can stamp them
/// onto the image as `org.label-schema.*` labels.
#[derive(Parser)]
#[command(name = "stevedore", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (repeat for more detail: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output logs as JSON (for machine consumption).
    #[arg(long, global = true)]
    json_logs: bool,

    /// Project directory inside the git checkout (defaults to current directory).
    #[arg(short = 'd', long, global = true, value_name = "PATH")]
    project_dir: Option<PathBuf>,

    /// Configuration file (defaults to `stevedore.toml` lookup).
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the build metadata, one `KEY=value` line per entry.
    Print(commands::print::PrintArgs),
    /// Build the image, passing the build metadata as build arguments.
    Build(commands::build::BuildArgs),
    /// Print the `org.label-schema.*` labels rendered from the metadata and config.
    ///
    /// A Dockerfile that hardcodes the fixed label strings keeps its own
    /// values; use `build --inline-labels` to apply these exactly.
    Labels(commands::labels::LabelsArgs),
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so `print` output stays clean on stdout
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let scope = commands::Scope::resolve(cli.project_dir, cli.config)?;

    match cli.command {
        Commands::Print(args) => commands::print::execute(&args, &scope),
        Commands::Build(args) => commands::build::execute(args, &scope),
        Commands::Labels(args) => commands::labels::execute(&args, &scope),
    }
}
