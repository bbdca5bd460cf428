//! Build configuration and resolution.
//!
//! The configuration is a TOML file naming the build tool, image tag,
//! build context, and the fixed label strings. Every field has a
//! default, so an empty file (or no file at all) is valid.
//!
//! Resolution order:
//! 1. An explicit path passed on the command line (must exist)
//! 2. `stevedore.toml` in the project directory
//! 3. `stevedore.toml` in the XDG config dir (`~/.config/stevedore/`)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use serde::Deserialize;
use tracing::debug;

use crate::error::BuildError;

/// File name searched for in the project and XDG config directories.
pub const CONFIG_FILE_NAME: &str = "stevedore.toml";

/// XDG config directory, resolved lazily.
static USER_CONFIG_DIR: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    directories::ProjectDirs::from("dev", "stevedore", "stevedore")
        .map(|dirs| dirs.config_dir().to_path_buf())
});

/// How to build the image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Build tool binary (`docker`, or a compatible CLI such as `podman`).
    pub tool: String,
    /// Tag applied to the built image.
    pub tag: String,
    /// Build context path.
    pub context: PathBuf,
    /// Dockerfile path passed as `-f`; the tool's default when unset.
    pub dockerfile: Option<PathBuf>,
    /// Length of the abbreviated commit hash.
    pub abbrev: usize,
    /// Also pass every label directly with `--label`.
    pub inline_labels: bool,
    /// Fixed strings used by the label schema.
    pub labels: LabelDefaults,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            tool: "docker".to_owned(),
            tag: "go-docker-multi-stage-build:latest".to_owned(),
            context: PathBuf::from("."),
            dockerfile: None,
            abbrev: stevedore_meta::vcs::DEFAULT_ABBREV,
            inline_labels: false,
            labels: LabelDefaults::default(),
        }
    }
}

/// Descriptive label values that are not derived from build metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelDefaults {
    /// `org.label-schema.description`.
    pub description: String,
    /// `org.label-schema.url`.
    pub url: String,
    /// Prepended to `VCS_URL` to form `org.label-schema.vcs-url`.
    pub vcs_url_prefix: String,
    /// `org.label-schema.docker.cmd`.
    pub run_command: String,
}

impl Default for LabelDefaults {
    fn default() -> Self {
        Self {
            description: "A Go program packaged with a multi-stage Docker build".to_owned(),
            url: "https://docs.docker.com/build/building/multi-stage/".to_owned(),
            vcs_url_prefix: "https://github.com/".to_owned(),
            run_command: "docker run --rm go-docker-multi-stage-build:latest".to_owned(),
        }
    }
}

/// Resolve the configuration for a build in `project_dir`.
///
/// An `explicit` path must exist. Otherwise the project directory and
/// the XDG config dir are searched for [`CONFIG_FILE_NAME`], falling
/// back to [`BuildConfig::default`].
///
/// # Errors
///
/// Returns [`BuildError::ConfigNotFound`] if `explicit` does not exist,
/// and [`BuildError::InvalidConfig`] if the chosen file fails to parse.
pub fn resolve_config(
    explicit: Option<&Path>,
    project_dir: &Path,
) -> Result<BuildConfig, BuildError> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let found = std::iter::once(project_dir.to_path_buf())
        .chain(USER_CONFIG_DIR.iter().cloned())
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|p| p.is_file());

    let Some(path) = found else {
        debug!("no config file found, using defaults");
        return Ok(BuildConfig::default());
    };

    load_config(&path)
}

fn load_config(path: &Path) -> Result<BuildConfig, BuildError> {
    let content = std::fs::read_to_string(path)
        .map_err(|_| BuildError::ConfigNotFound(path.to_path_buf()))?;

    debug!(path = %path.display(), "loading config");

    toml::from_str(&content).map_err(|source| BuildError::InvalidConfig {
        path: path.display().to_string(),
        source,
    })
}
