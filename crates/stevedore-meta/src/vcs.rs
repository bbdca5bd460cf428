//! Git state capture for build metadata.
//!
//! Captures the HEAD commit (full and abbreviated) and the top-level
//! working directory of the checkout enclosing a project directory.

use std::path::{Path, PathBuf};

use gix::discover;
use tracing::debug;

use crate::error::MetadataError;

/// Abbreviated hash length used when none is configured (git's own default).
pub const DEFAULT_ABBREV: usize = 7;

/// Shortest abbreviation git accepts for `core.abbrev`.
const MIN_ABBREV: usize = 4;

/// Snapshot of git repository state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitState {
    /// Full commit hash (hex-encoded).
    pub commit: String,
    /// Abbreviated commit hash, always a strict prefix of `commit`.
    pub short_commit: String,
    /// Top-level working directory of the checkout.
    pub toplevel: PathBuf,
}

impl GitState {
    /// Name of the repository: the final component of its top-level directory.
    ///
    /// Returns `None` when the top-level directory has no file name
    /// (a checkout rooted at `/`).
    #[must_use]
    pub fn repository_name(&self) -> Option<String> {
        repository_name(&self.toplevel)
    }
}

/// Final path component of a checkout's top-level directory.
#[must_use]
pub fn repository_name(toplevel: &Path) -> Option<String> {
    toplevel
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

/// Capture the git state of the checkout enclosing `project_dir`.
///
/// `project_dir` may be relative; it is canonicalized first so the
/// upward search sees every parent and the top-level directory always
/// has a file name. The repository is discovered by walking upward,
/// the same way `git rev-parse` does. `abbrev` is clamped so the short
/// hash stays a strict prefix of the full one.
///
/// # Errors
///
/// Returns [`MetadataError::GitError`] if `project_dir` does not exist,
/// no repository encloses it, or HEAD has no commit yet, and
/// [`MetadataError::NoWorkdir`] for a bare repository.
pub fn capture(project_dir: &Path, abbrev: usize) -> Result<GitState, MetadataError> {
    let project_dir = std::fs::canonicalize(project_dir).map_err(|e| {
        MetadataError::GitError(format!(
            "cannot resolve project directory {}: {e}",
            project_dir.display()
        ))
    })?;

    let repo = discover(&project_dir)
        .map_err(|e| MetadataError::GitError(format!("failed to discover git repo: {e}")))?;

    let head = repo
        .head_commit()
        .map_err(|e| MetadataError::GitError(format!("failed to read HEAD commit: {e}")))?;
    let commit = head.id.to_hex().to_string();

    let len = clamp_abbrev(abbrev, commit.len());
    let short_commit = head.id.to_hex_with_len(len).to_string();

    let toplevel = repo
        .work_dir()
        .map(Path::to_path_buf)
        .ok_or_else(|| MetadataError::NoWorkdir(repo.git_dir().to_path_buf()))?;

    debug!(
        commit = %commit,
        toplevel = %toplevel.display(),
        "captured git state"
    );

    Ok(GitState {
        commit,
        short_commit,
        toplevel,
    })
}

fn clamp_abbrev(abbrev: usize, hex_len: usize) -> usize {
    abbrev.clamp(MIN_ABBREV, hex_len.saturating_sub(1))
}
