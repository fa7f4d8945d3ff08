use std::path::{Component, Path, PathBuf};

use super::{fs::FontFs, FontError};

/// Turns a user supplied path into an absolute one that's known to exist
///
/// A leading `~` expands to the home directory and relative paths are resolved against the current
/// directory. The result is canonicalized through the filesystem, so `..` after a symlink steps out
/// of the link's target the same way the OS would
pub fn normalize_path<F: FontFs>(fs: &F, raw: &str) -> Result<PathBuf, FontError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FontError::PathNotFound(PathBuf::from(raw)));
    }

    let expanded = expand_home(fs, trimmed);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = fs
            .current_dir()
            .map_err(|_| FontError::PathNotFound(expanded.clone()))?;
        cwd.join(expanded)
    };

    match fs.canonicalize(&absolute) {
        Ok(normalized) => {
            tracing::trace!(raw, path = %normalized.display(), "Normalized font path");
            Ok(normalized)
        }
        // Only used to give a readable error
        Err(_) => Err(FontError::PathNotFound(collapse_dots(&absolute))),
    }
}

fn expand_home<F: FontFs>(fs: &F, path: &str) -> PathBuf {
    let Some(rest) = path.strip_prefix('~') else {
        return PathBuf::from(path);
    };
    let rest = if rest.is_empty() {
        Some("")
    } else {
        rest.strip_prefix('/').or_else(|| {
            fs.backslash_is_separator()
                .then(|| rest.strip_prefix('\\'))
                .flatten()
        })
    };

    // `~user` style paths and a missing home dir are left as-is
    match (rest, fs.home_dir()) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn collapse_dots(path: &Path) -> PathBuf {
    let mut collapsed = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the root is a no-op, same as the OS treats `/..`
                collapsed.pop();
            }
            other => collapsed.push(other),
        }
    }
    collapsed
}
