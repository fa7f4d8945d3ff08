use std::{fs, path::PathBuf};

use tempfile::{Builder, TempDir};

const TEST_PREFIX: &str = "posterfont-tests-";

pub fn dir() -> (TempDir, PathBuf) {
    let dir = Builder::new().prefix(TEST_PREFIX).tempdir().unwrap();
    let path = dir.path().canonicalize().unwrap();
    (dir, path)
}

/// A temp dir pre-populated with (empty unless specified) files
pub fn dir_with_files(names: &[&str]) -> (TempDir, PathBuf) {
    let (tmp, path) = dir();
    for name in names {
        fs::write(path.join(name), name.as_bytes()).unwrap();
    }
    (tmp, path)
}
