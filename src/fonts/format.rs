use std::{fmt, path::Path};

use super::FontError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontFormat {
    Ttf,
    Otf,
    Woff,
    Woff2,
}

impl FontFormat {
    pub fn from_ext(ext: &str) -> Option<Self> {
        let format = match ext.to_ascii_lowercase().as_str() {
            "ttf" => Self::Ttf,
            "otf" => Self::Otf,
            "woff" => Self::Woff,
            "woff2" => Self::Woff2,
            _ => return None,
        };
        Some(format)
    }

    /// Checks the file's extension against our supported formats
    pub fn validate(path: &Path) -> Result<Self, FontError> {
        match path.extension() {
            None => Err(FontError::UnsupportedFormat(None)),
            Some(ext) => {
                let ext = ext.to_string_lossy();
                Self::from_ext(&ext).ok_or_else(|| FontError::UnsupportedFormat(Some(ext.into())))
            }
        }
    }

    pub fn ext(&self) -> &'static str {
        match self {
            Self::Ttf => "ttf",
            Self::Otf => "otf",
            Self::Woff => "woff",
            Self::Woff2 => "woff2",
        }
    }
}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ext())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive() {
        for (name, format) in [
            ("a.ttf", FontFormat::Ttf),
            ("a.OTF", FontFormat::Otf),
            ("a.Woff", FontFormat::Woff),
            ("dir/a.WOFF2", FontFormat::Woff2),
        ] {
            assert_eq!(FontFormat::validate(Path::new(name)), Ok(format), "{name}");
        }
    }

    #[test]
    fn names_the_offending_extension() {
        assert_eq!(
            FontFormat::validate(Path::new("notes.txt")),
            Err(FontError::UnsupportedFormat(Some("txt".into())))
        );
        assert_eq!(
            FontFormat::validate(Path::new("LICENSE")),
            Err(FontError::UnsupportedFormat(None))
        );
        let err = FontFormat::validate(Path::new("font.ttc")).unwrap_err();
        assert!(err.to_string().contains(".ttc"));
    }
}
