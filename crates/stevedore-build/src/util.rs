//! Path expansion and command rendering.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Expand a leading `~` to the user's home directory.
///
/// Embedded tildes are left alone. Tries `$HOME` first and falls back
/// to the passwd lookup done by `directories::BaseDirs`; if both fail
/// the path is returned unchanged with a warning.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| directories::BaseDirs::new().map(|b| b.home_dir().to_path_buf()));
    let Some(home) = home else {
        tracing::warn!(
            path = %path.display(),
            "$HOME is not set and passwd lookup failed, tilde path will not be expanded"
        );
        return path.to_path_buf();
    };
    home.join(rest)
}

/// Render a command as a single shell-like line, for `--dry-run` output.
///
/// Arguments containing whitespace or quotes are single-quoted.
#[must_use]
pub fn render_command(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|arg| shell_quote(&arg.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(arg: &str) -> String {
    if !arg.is_empty()
        && !arg
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '\\' | '$' | '`'))
    {
        return arg.to_owned();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}
