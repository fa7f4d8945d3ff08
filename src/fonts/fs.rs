//! The little bit of OS interaction that path resolution and directory scanning need
//!
//! Kept behind a trait so that the resolver can be driven entirely by a fake filesystem in tests

use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Other,
}

pub trait FontFs {
    fn home_dir(&self) -> Option<PathBuf>;
    fn current_dir(&self) -> io::Result<PathBuf>;
    /// `None` when nothing exists at `path`
    fn entry_kind(&self, path: &Path) -> Option<EntryKind>;
    /// The immediate entries of `dir` as full paths. Order is unspecified
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
    /// Resolves an absolute path to the entry it points at, following symlinks. Fails when there's
    /// nothing there
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Whether `~\` should be treated as a home-directory marker too
    fn backslash_is_separator(&self) -> bool {
        cfg!(windows)
    }
}

/// The actual filesystem
#[derive(Clone, Copy, Debug, Default)]
pub struct RealFs;

impl FontFs for RealFs {
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn entry_kind(&self, path: &Path) -> Option<EntryKind> {
        // Follows symlinks, so a link to a font file counts as a file
        let meta = fs::metadata(path).ok()?;
        let kind = if meta.is_file() {
            EntryKind::File
        } else if meta.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::Other
        };
        Some(kind)
    }

    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::read_dir(dir)?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect()
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }
}

impl<F: FontFs + ?Sized> FontFs for &F {
    fn home_dir(&self) -> Option<PathBuf> {
        (**self).home_dir()
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        (**self).current_dir()
    }

    fn entry_kind(&self, path: &Path) -> Option<EntryKind> {
        (**self).entry_kind(path)
    }

    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).list_dir(dir)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        (**self).canonicalize(path)
    }

    fn backslash_is_separator(&self) -> bool {
        (**self).backslash_is_separator()
    }
}
