//! `~` expansion for configured paths.

use std::path::{Path, PathBuf};

/// Rewrite a leading `~` component to the home directory, in place.
pub fn expand_tilde(path: &mut PathBuf) {
    *path = expand_tilde_path(path);
}

/// Return `path` with a leading `~` component replaced by the home directory.
///
/// Paths without a leading `~`, or systems without a home directory, are
/// returned unchanged.
pub fn expand_tilde_path(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
