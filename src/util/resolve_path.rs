use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Expands a path that starts with ~ to use the user's home directory
pub fn expand_tilde_path(path: &Path) -> Result<PathBuf> {
    let Some(path_str) = path.to_str() else {
        return Ok(path.to_path_buf());
    };
    if path_str.starts_with('~') {
        let home = dirs::home_dir()
            .context("Unable to determine the home directory")?;
        if path_str == "~" {
            return Ok(home);
        } else if let Some(rest) = path_str.strip_prefix("~/") {
            return Ok(home.join(rest));
        }
    }
    Ok(path.to_path_buf())
}

/* Turns whatever the operator typed into an absolute location. Existing
 * paths are canonicalized so symlinks are resolved, anything else is joined
 * onto the current directory and cleaned up lexically. The empty string is
 * the current directory.
 */
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let cwd =
        std::env::current_dir().context("failed to get current directory")?;
    let path = expand_tilde_path(Path::new(path))?;
    let joined = cwd.join(path);

    match joined.canonicalize() {
        Ok(canonical) => Ok(canonical),
        Err(_) => Ok(normalize(&joined)),
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => (),
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
