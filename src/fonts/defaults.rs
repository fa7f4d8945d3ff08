use std::path::{Path, PathBuf};

use super::{FontCandidate, FontFormat, FontWeight, Provenance};

use anyhow::Context;

/// The family that we ship as our built-in fallback
pub const BUILTIN_FAMILY: &str = "Roboto";

/// Handle to the bundled fallback fonts
///
/// Loaded once at startup and then only ever read. The resolver assumes that these files exist,
/// so loading fails loudly if any of them are missing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltinFonts {
    bold: PathBuf,
    regular: PathBuf,
    light: PathBuf,
}

impl BuiltinFonts {
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let dir = dir.canonicalize().with_context(|| {
            format!("Failed to locate built-in font dir at '{}'", dir.display())
        })?;
        let fonts = Self::new_unchecked(&dir);
        for candidate in fonts.candidates() {
            anyhow::ensure!(
                candidate.path.is_file(),
                "Missing built-in {} font: {}",
                candidate.weight,
                candidate.path.display()
            );
        }

        tracing::debug!(dir = %dir.display(), "Loaded built-in fonts");
        Ok(fonts)
    }

    pub fn new_unchecked(dir: &Path) -> Self {
        Self {
            bold: dir.join(Self::file_name(FontWeight::Bold)),
            regular: dir.join(Self::file_name(FontWeight::Regular)),
            light: dir.join(Self::file_name(FontWeight::Light)),
        }
    }

    pub fn file_name(weight: FontWeight) -> &'static str {
        match weight {
            FontWeight::Bold => "Roboto-Bold.ttf",
            FontWeight::Regular => "Roboto-Regular.ttf",
            FontWeight::Light => "Roboto-Light.ttf",
        }
    }

    pub fn path(&self, weight: FontWeight) -> &Path {
        match weight {
            FontWeight::Bold => &self.bold,
            FontWeight::Regular => &self.regular,
            FontWeight::Light => &self.light,
        }
    }

    pub fn candidate(&self, weight: FontWeight) -> FontCandidate {
        FontCandidate::new(
            self.path(weight).to_owned(),
            weight,
            FontFormat::Ttf,
            Provenance::BuiltinDefault,
        )
    }

    fn candidates(&self) -> impl Iterator<Item = FontCandidate> + '_ {
        FontWeight::ALL
            .into_iter()
            .map(|weight| self.candidate(weight))
    }

    pub fn is_builtin_family(family: &str) -> bool {
        family.trim().eq_ignore_ascii_case(BUILTIN_FAMILY)
    }
}
