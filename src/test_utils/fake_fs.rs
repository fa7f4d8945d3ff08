use std::{
    collections::BTreeMap,
    io,
    path::{Component, Path, PathBuf},
};

use crate::fonts::fs::{EntryKind, FontFs};

/// An in-memory filesystem that only knows what kind of entry lives at each path
///
/// There are no symlinks, so canonicalizing is purely lexical
#[derive(Clone, Debug)]
pub struct FakeFs {
    entries: BTreeMap<PathBuf, EntryKind>,
    home: Option<PathBuf>,
    cwd: PathBuf,
    backslash_separators: bool,
}

impl FakeFs {
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(PathBuf::from("/"), EntryKind::Dir);
        Self {
            entries,
            home: None,
            cwd: "/".into(),
            backslash_separators: false,
        }
    }

    pub fn home(mut self, home: &str) -> Self {
        self = self.dir(home);
        self.home = Some(home.into());
        self
    }

    pub fn cwd(mut self, cwd: &str) -> Self {
        self = self.dir(cwd);
        self.cwd = cwd.into();
        self
    }

    pub fn backslash_separators(mut self, enabled: bool) -> Self {
        self.backslash_separators = enabled;
        self
    }

    pub fn dir(self, path: &str) -> Self {
        self.entry(path, EntryKind::Dir)
    }

    pub fn file(self, path: &str) -> Self {
        self.entry(path, EntryKind::File)
    }

    pub fn files(self, dir: &str, names: &[&str]) -> Self {
        names.iter().fold(self.dir(dir), |fs, name| {
            let path = Path::new(dir).join(name);
            fs.entry(path.to_str().unwrap(), EntryKind::File)
        })
    }

    fn entry(mut self, path: &str, kind: EntryKind) -> Self {
        let path = PathBuf::from(path);
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.entries
                .entry(ancestor.to_owned())
                .or_insert(EntryKind::Dir);
        }
        self.entries.insert(path, kind);
        self
    }
}

impl FontFs for FakeFs {
    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }

    fn entry_kind(&self, path: &Path) -> Option<EntryKind> {
        self.entries.get(path).copied()
    }

    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        match self.entries.get(dir) {
            Some(EntryKind::Dir) => {}
            Some(_) => return Err(io::Error::new(io::ErrorKind::Other, "Not a directory")),
            None => return Err(io::ErrorKind::NotFound.into()),
        }
        // Reverse the natural order to make sure nothing relies on the listing being sorted
        let listing = self
            .entries
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .rev()
            .cloned()
            .collect();
        Ok(listing)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        let mut canonical = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    canonical.pop();
                }
                other => canonical.push(other),
            }
        }
        if self.entries.contains_key(&canonical) {
            Ok(canonical)
        } else {
            Err(io::ErrorKind::NotFound.into())
        }
    }

    fn backslash_is_separator(&self) -> bool {
        self.backslash_separators
    }
}
