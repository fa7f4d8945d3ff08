use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::fonts::{FontError, FontFormat, FontWeight};

use tempfile::NamedTempFile;

// Checked in order when looking for a cached face
const CACHED_FORMATS: [FontFormat; 4] = [
    FontFormat::Woff2,
    FontFormat::Ttf,
    FontFormat::Otf,
    FontFormat::Woff,
];

/// A face that was found in the cache
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedFace {
    pub path: PathBuf,
    pub format: FontFormat,
    /// The catalog weight that got stored when there was no exact match
    pub substitute: Option<u16>,
}

/// On-disk cache of downloaded font faces
///
/// Files are named `{family key}_{weight}.{ext}`, or `{family key}_{weight}~{used}.{ext}` when a
/// face of a different weight stood in, and are only ever written once. Each write lands in a temp
/// file that then gets atomically moved into place, so concurrent readers either see the complete
/// file or nothing at all
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontCache {
    dir: PathBuf,
}

impl FontCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Normalizes a family name into something that's safe to use in a file name
    ///
    /// `None` when there's nothing left of the name
    pub fn key(family: &str) -> Option<String> {
        let key: String = family
            .trim()
            .chars()
            .flat_map(char::to_lowercase)
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        if key.chars().all(|c| c == '_') {
            None
        } else {
            Some(key)
        }
    }

    fn file_path(
        &self,
        key: &str,
        weight: FontWeight,
        substitute: Option<u16>,
        format: FontFormat,
    ) -> PathBuf {
        let name = match substitute {
            Some(used) => format!("{key}_{weight}~{used}.{format}"),
            None => format!("{key}_{weight}.{format}"),
        };
        self.dir.join(name)
    }

    /// Exact faces win over substitutes
    pub fn lookup(&self, key: &str, weight: FontWeight) -> Option<CachedFace> {
        CACHED_FORMATS
            .into_iter()
            .find_map(|format| {
                let path = self.file_path(key, weight, None, format);
                path.is_file().then_some(CachedFace {
                    path,
                    format,
                    substitute: None,
                })
            })
            .or_else(|| self.lookup_substitute(key, weight))
    }

    fn lookup_substitute(&self, key: &str, weight: FontWeight) -> Option<CachedFace> {
        let prefix = format!("{key}_{weight}~");
        fs::read_dir(&self.dir)
            .ok()?
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let (used, ext) = name.strip_prefix(&prefix)?.split_once('.')?;
                let used = used.parse().ok()?;
                let format = FontFormat::from_ext(ext)?;
                let path = entry.path();
                path.is_file().then_some(CachedFace {
                    path,
                    format,
                    substitute: Some(used),
                })
            })
            .min_by(|a, b| a.path.cmp(&b.path))
    }

    pub fn store(
        &self,
        key: &str,
        weight: FontWeight,
        substitute: Option<u16>,
        format: FontFormat,
        bytes: &[u8],
    ) -> Result<PathBuf, FontError> {
        let path = self.file_path(key, weight, substitute, format);
        self.store_inner(&path, bytes)
            .map_err(|err| FontError::fetch_failed(format!("caching {}: {err}", path.display())))?;
        Ok(path)
    }

    fn store_inner(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)?;
        Ok(())
    }
}
