use std::path::{Path, PathBuf};

use super::{
    fs::{EntryKind, FontFs},
    weight, FontCandidate, FontError, FontFormat, PartialBundle, Provenance,
};

/// What a directory scan turned up
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DirScan {
    pub found: PartialBundle,
    /// Supported font files whose weight couldn't be detected. These never get used
    pub unclassified: Vec<PathBuf>,
}

/// Picks at most one font file per weight from the immediate entries of `dir`
///
/// Files are visited in lexicographic order of their file names and the first file to match a
/// weight claims it. Only fails when there isn't a single file with a supported extension
pub fn scan_dir<F: FontFs>(fs: &F, dir: &Path) -> Result<DirScan, FontError> {
    let mut listing = fs
        .list_dir(dir)
        .map_err(|_| FontError::PathNotFound(dir.to_owned()))?;
    listing.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let fonts: Vec<_> = listing
        .into_iter()
        .filter(|path| fs.entry_kind(path) == Some(EntryKind::File))
        .filter_map(|path| match FontFormat::validate(&path) {
            Ok(format) => Some((path, format)),
            Err(err) => {
                tracing::trace!(path = %path.display(), %err, "Skipping non-font file");
                None
            }
        })
        .collect();
    if fonts.is_empty() {
        return Err(FontError::NoFontsFound(dir.to_owned()));
    }

    let mut scan = DirScan::default();
    for (path, format) in fonts {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        match weight::classify(&file_name).known() {
            Some(weight) => {
                let candidate =
                    FontCandidate::new(path, weight, format, Provenance::LocalDirectory);
                if !scan.found.fill(candidate) {
                    tracing::debug!(%file_name, %weight, "Weight already claimed by an earlier file");
                }
            }
            None => scan.unclassified.push(path),
        }
    }

    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fonts::{fs::RealFs, FontWeight},
        test_utils::{fake_fs::FakeFs, temp},
    };

    use pretty_assertions::assert_eq;

    fn found_path(scan: &DirScan, weight: FontWeight) -> Option<&Path> {
        scan.found.get(weight).map(|candidate| candidate.path.as_path())
    }

    #[test]
    fn picks_one_per_weight() {
        let fs = FakeFs::new().files(
            "/fonts",
            &["a-bold.ttf", "a-regular.ttf", "notes.txt", "a-light.WOFF2"],
        );
        let scan = scan_dir(&fs, Path::new("/fonts")).unwrap();

        assert_eq!(found_path(&scan, FontWeight::Bold), Some(Path::new("/fonts/a-bold.ttf")));
        assert_eq!(
            found_path(&scan, FontWeight::Regular),
            Some(Path::new("/fonts/a-regular.ttf"))
        );
        let light = scan.found.get(FontWeight::Light).unwrap();
        assert_eq!(light.format, FontFormat::Woff2);
        assert_eq!(light.provenance, Provenance::LocalDirectory);
        assert!(scan.unclassified.is_empty());
    }

    #[test]
    fn lexicographic_tie_break() {
        // The fake lists entries in reverse, so this also checks that we sort
        let fs = FakeFs::new().files("/fonts", &["b-bold.ttf", "a-700.otf", "c-bold.ttf"]);
        let scan = scan_dir(&fs, Path::new("/fonts")).unwrap();
        assert_eq!(found_path(&scan, FontWeight::Bold), Some(Path::new("/fonts/a-700.otf")));
        assert_eq!(
            scan.found.missing(),
            [FontWeight::Regular, FontWeight::Light]
        );
    }

    #[test]
    fn not_recursive_and_skips_dirs() {
        let fs = FakeFs::new()
            .file("/fonts/nested/x-bold.ttf")
            .dir("/fonts/weird-regular.ttf")
            .file("/fonts/x-light.otf");
        let scan = scan_dir(&fs, Path::new("/fonts")).unwrap();
        assert_eq!(scan.found.missing(), [FontWeight::Bold, FontWeight::Regular]);
    }

    #[test]
    fn unclassified_files_are_not_an_error() {
        let fs = FakeFs::new().files("/fonts", &["Custom.ttf", "Other.otf"]);
        let scan = scan_dir(&fs, Path::new("/fonts")).unwrap();
        assert_eq!(scan.found, PartialBundle::default());
        assert_eq!(
            scan.unclassified,
            [PathBuf::from("/fonts/Custom.ttf"), PathBuf::from("/fonts/Other.otf")]
        );
    }

    #[test]
    fn no_supported_files() {
        let fs = FakeFs::new().files("/fonts", &["notes.txt", "bold.ttc"]);
        assert_eq!(
            scan_dir(&fs, Path::new("/fonts")),
            Err(FontError::NoFontsFound("/fonts".into()))
        );

        let fs = FakeFs::new().dir("/empty");
        assert_eq!(
            scan_dir(&fs, Path::new("/empty")),
            Err(FontError::NoFontsFound("/empty".into()))
        );
    }

    #[test]
    fn real_directory() {
        let (_tmp, dir) = temp::dir_with_files(&["Inter-700.ttf", "Inter-400.ttf", "README.md"]);
        let scan = scan_dir(&RealFs, &dir).unwrap();
        assert_eq!(
            found_path(&scan, FontWeight::Bold),
            Some(dir.join("Inter-700.ttf").as_path())
        );
        assert_eq!(
            found_path(&scan, FontWeight::Regular),
            Some(dir.join("Inter-400.ttf").as_path())
        );
        assert!(!scan.found.contains(FontWeight::Light));
    }
}
