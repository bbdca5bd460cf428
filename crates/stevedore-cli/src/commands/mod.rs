//! CLI subcommands.

use std::path::PathBuf;

use color_eyre::eyre::{Result, eyre};
use stevedore_build::{BuildConfig, resolve_config};
use stevedore_meta::{BuildMetadata, CollectOptions};

#[expect(
    unreachable_pub,
    reason = "binary crate, pub inside private module is fine"
)]
pub mod build;
#[expect(
    unreachable_pub,
    reason = "binary crate, pub inside private module is fine"
)]
pub mod labels;
#[expect(
    unreachable_pub,
    reason = "binary crate, pub inside private module is fine"
)]
pub mod print;

/// Project directory and configuration shared by every subcommand.
pub(crate) struct Scope {
    pub(crate) project_dir: PathBuf,
    pub(crate) config: BuildConfig,
}

impl Scope {
    /// Resolve the project directory (default: cwd, made absolute) and its configuration.
    pub(crate) fn resolve(project_dir: Option<PathBuf>, config: Option<PathBuf>) -> Result<Self> {
        let project_dir = match project_dir {
            Some(d) => std::path::absolute(&d)
                .map_err(|e| eyre!("cannot resolve project directory {}: {e}", d.display()))?,
            None => std::env::current_dir().map_err(|e| {
                eyre!("--project-dir not specified and current directory is inaccessible: {e}")
            })?,
        };

        let config = resolve_config(config.as_deref(), &project_dir)?;

        Ok(Self {
            project_dir,
            config,
        })
    }

    /// Collect a fresh metadata record for the project.
    pub(crate) fn collect(&self) -> Result<BuildMetadata> {
        let options = CollectOptions {
            abbrev: self.config.abbrev,
        };
        Ok(stevedore_meta::collect(&self.project_dir, options)?)
    }
}
