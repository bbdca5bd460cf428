//! Error types for the image build subsystem.

use std::path::PathBuf;

/// Errors from configuring or running an image build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The build tool binary is not on PATH.
    #[error("build tool `{0}` not found on PATH")]
    ToolNotFound(String),

    /// The build tool process failed to start or could not be waited on.
    #[error("failed to run build tool: {0}")]
    SpawnFailed(#[from] std::io::Error),

    /// The build tool ran and exited unsuccessfully.
    ///
    /// The tool's own diagnostics were already written to the inherited
    /// stderr; `code` is its exit code (`None` if killed by a signal).
    #[error("`{tool} build` failed with {}", describe_code(.code))]
    ToolFailed {
        /// Name of the build tool binary.
        tool: String,
        /// Exit code of the tool.
        code: Option<i32>,
    },

    /// An explicitly requested configuration file does not exist.
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// A configuration file failed to parse.
    #[error("invalid config `{path}`: {source}")]
    InvalidConfig {
        /// Path of the offending file.
        path: String,
        /// The underlying TOML parse error.
        source: toml::de::Error,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(
        || "termination by signal".to_owned(),
        |c| format!("exit code {c}"),
    )
}
