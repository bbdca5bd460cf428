//! Error types for metadata collection.

use std::path::PathBuf;

/// Errors raised while collecting build metadata from the environment.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The directory is not inside a git checkout, or HEAD cannot be read.
    #[error("git metadata unavailable: {0}")]
    GitError(String),

    /// The repository is bare, so there is no top-level directory to name it after.
    #[error("repository at {0} has no working directory")]
    NoWorkdir(PathBuf),

    /// Neither the passwd database nor `$USER`/`$LOGNAME` identify the invoking user.
    #[error("cannot determine the invoking user")]
    VendorUnavailable,
}
