//! Image build invoker.
//!
//! Constructs and executes a single `<tool> build` invocation that
//! forwards every metadata key as a `--build-arg`. The Dockerfile turns
//! those arguments into labels; the tool owns layer caching, image
//! storage, and its own atomicity.
//!
//! Argument order: `-f`, build args, inline labels, `-t`, context last.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use stevedore_meta::BuildMetadata;
use tracing::{debug, info, warn};

use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::labels::LabelSchema;
use crate::util::expand_tilde;

/// Builds a labelled image from a [`BuildMetadata`] record.
pub struct ImageBuild {
    config: BuildConfig,
    /// Directory the tool runs in; relative context and Dockerfile paths
    /// resolve against it.
    project_dir: PathBuf,
    /// Resolved path of the build tool binary.
    tool_path: PathBuf,
}

impl ImageBuild {
    /// Create an invoker for builds run from `project_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::ToolNotFound`] if the configured tool is not
    /// on PATH.
    pub fn new(config: BuildConfig, project_dir: PathBuf) -> Result<Self, BuildError> {
        let tool_path = which::which(&config.tool)
            .map_err(|_| BuildError::ToolNotFound(config.tool.clone()))?;

        info!(
            tool = %tool_path.display(),
            tag = %config.tag,
            project_dir = %project_dir.display(),
            "prepared image build"
        );

        Ok(Self {
            config,
            project_dir,
            tool_path,
        })
    }

    /// The configuration this invoker builds with.
    #[must_use]
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Directory the build tool runs in.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Assemble the build command for `record` without running it.
    #[must_use]
    pub fn build_command(&self, record: &BuildMetadata) -> Command {
        let mut cmd = Command::new(&self.tool_path);
        cmd.current_dir(&self.project_dir);
        cmd.arg("build");

        if let Some(dockerfile) = &self.config.dockerfile {
            cmd.arg("-f").arg(expand_tilde(dockerfile));
        }

        for (key, value) in record.entries() {
            cmd.arg("--build-arg").arg(format!("{key}={value}"));
        }

        if self.config.inline_labels {
            for label in LabelSchema::new(&self.config.labels).render(record) {
                cmd.arg("--label").arg(format!("{}={}", label.key, label.value));
            }
        }

        cmd.args(["-t", &self.config.tag]);
        cmd.arg(expand_tilde(&self.config.context));

        debug!(
            args = ?cmd.get_args().collect::<Vec<_>>(),
            "built image build command"
        );

        cmd
    }

    /// Run the build and block until the tool exits.
    ///
    /// The tool inherits stdin, stdout, and stderr, so its progress and
    /// diagnostics reach the user unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::SpawnFailed`] if the tool cannot be started
    /// and [`BuildError::ToolFailed`] with the tool's exit code if it
    /// exits unsuccessfully. Nothing is retried or cleaned up.
    pub fn run(&self, record: &BuildMetadata) -> Result<(), BuildError> {
        let mut cmd = self.build_command(record);
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        let status = cmd.status()?;

        if status.success() {
            info!(tag = %self.config.tag, "image build completed");
            Ok(())
        } else {
            warn!(exit_code = ?status.code(), "image build failed");
            Err(BuildError::ToolFailed {
                tool: self.config.tool.clone(),
                code: status.code(),
            })
        }
    }
}
