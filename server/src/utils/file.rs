//! Path helpers

use std::path::PathBuf;

/// Turn a user-supplied path (config flag or env var) into an absolute path
///
/// `~` and `~/...` resolve against the home directory; anything relative
/// resolves against the current working directory. An empty string yields
/// the working directory itself.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    let expanded = match path {
        "~" => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        _ => match (path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(path),
        },
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}
