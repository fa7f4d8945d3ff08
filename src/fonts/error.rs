use std::{fmt, path::PathBuf};

/// Failure of a single resolution stage
///
/// None of these ever escape the resolver. They get downgraded into report entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontError {
    PathNotFound(PathBuf),
    /// Holds the offending extension, or `None` when there wasn't one
    UnsupportedFormat(Option<String>),
    NoFontsFound(PathBuf),
    FamilyNotFound(String),
    FetchFailed(String),
}

impl FontError {
    pub fn fetch_failed<D: fmt::Display>(reason: D) -> Self {
        Self::FetchFailed(reason.to_string())
    }
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathNotFound(path) => write!(f, "font path does not exist: {}", path.display()),
            Self::UnsupportedFormat(Some(ext)) => write!(
                f,
                "unsupported font format: .{ext} (supported: .ttf, .otf, .woff, .woff2)"
            ),
            Self::UnsupportedFormat(None) => f.write_str(
                "unsupported font format: missing extension (supported: .ttf, .otf, .woff, .woff2)",
            ),
            Self::NoFontsFound(dir) => write!(f, "no font files found in: {}", dir.display()),
            Self::FamilyNotFound(family) => write!(f, "font family '{family}' not found"),
            Self::FetchFailed(reason) => write!(f, "fetching font family failed: {reason}"),
        }
    }
}

impl std::error::Error for FontError {}
