//! `stevedore build`: collect build metadata, then build the image.
//!
//! The two steps run strictly in sequence. The build tool's output is
//! passed through untouched, and its exit code becomes ours.

use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::Result;
use stevedore_build::{BuildError, ImageBuild, render_command};

use super::Scope;

/// Build the image, passing the build metadata as build arguments.
#[derive(Args)]
pub struct BuildArgs {
    /// Image tag (overrides the configured tag).
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Build context path, relative to the project directory.
    #[arg(long, value_name = "PATH")]
    pub context: Option<PathBuf>,

    /// Dockerfile path, relative to the project directory.
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub dockerfile: Option<PathBuf>,

    /// Build tool binary (e.g. `docker`, `podman`).
    #[arg(long)]
    pub tool: Option<String>,

    /// Also pass every `org.label-schema.*` label with `--label`.
    #[arg(long)]
    pub inline_labels: bool,

    /// Print the assembled build command instead of running it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the `build` command.
///
/// # Errors
///
/// Returns an error if metadata collection fails or the build tool is
/// missing. A failed build exits the process with the tool's exit code.
pub fn execute(args: BuildArgs, scope: &Scope) -> Result<()> {
    let mut config = scope.config.clone();
    if let Some(tag) = args.tag {
        config.tag = tag;
    }
    if let Some(context) = args.context {
        config.context = context;
    }
    if let Some(dockerfile) = args.dockerfile {
        config.dockerfile = Some(dockerfile);
    }
    if let Some(tool) = args.tool {
        config.tool = tool;
    }
    config.inline_labels |= args.inline_labels;

    let record = scope.collect()?;
    let build = ImageBuild::new(config, scope.project_dir.clone())?;

    if args.dry_run {
        println!("{}", render_command(&build.build_command(&record)));
        return Ok(());
    }

    tracing::info!(
        tag = %build.config().tag,
        version = %record.version(),
        "starting image build"
    );

    match build.run(&record) {
        Ok(()) => Ok(()),
        // The tool already printed its diagnostics; mirror its exit code.
        Err(BuildError::ToolFailed { code, .. }) => std::process::exit(code.unwrap_or(1)),
        Err(e) => Err(e.into()),
    }
}
