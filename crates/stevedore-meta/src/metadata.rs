//! Collects the Build Metadata Record from the ambient environment.
//!
//! Three sources are read, in order: the enclosing git checkout, the
//! system clock, and the identity of the invoking user. Nothing is
//! written.

use std::path::Path;

use chrono::{DateTime, Local, TimeZone};
use tracing::info;

use crate::error::MetadataError;
use crate::record::BuildMetadata;
use crate::vcs::{self, DEFAULT_ABBREV};

/// Knobs for [`collect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectOptions {
    /// Length of the abbreviated commit hash (`VCS_REF`).
    pub abbrev: usize,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            abbrev: DEFAULT_ABBREV,
        }
    }
}

/// Collect a fresh record for the checkout enclosing `project_dir`.
///
/// # Errors
///
/// Returns a [`MetadataError`] when `project_dir` is not inside a git
/// checkout with at least one commit, or the invoking user cannot be
/// identified.
pub fn collect(
    project_dir: &Path,
    options: CollectOptions,
) -> Result<BuildMetadata, MetadataError> {
    let git = vcs::capture(project_dir, options.abbrev)?;
    let name = git
        .repository_name()
        .ok_or_else(|| MetadataError::NoWorkdir(git.toplevel.clone()))?;
    let vendor = capture_vendor().ok_or(MetadataError::VendorUnavailable)?;
    let date = build_date(&Local::now());

    info!(
        version = %git.commit,
        name = %name,
        vendor = %vendor,
        "collected build metadata"
    );

    Ok(BuildMetadata::new(git.commit, date, name, git.short_commit, vendor))
}

/// Render a timestamp the way `date -R` does (RFC 2822).
#[must_use]
pub fn build_date<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.to_rfc2822()
}

/// Login name of the invoking user.
///
/// Looks up the real uid in the passwd database via `nix`, falling back
/// to `$USER` and then `$LOGNAME`. Returns `None` if none of them yield
/// a non-empty name.
#[must_use]
pub fn capture_vendor() -> Option<String> {
    nix::unistd::User::from_uid(nix::unistd::getuid())
        .ok()
        .flatten()
        .map(|user| user.name)
        .or_else(|| std::env::var("USER").ok())
        .or_else(|| std::env::var("LOGNAME").ok())
        .filter(|name| !name.is_empty())
}
