//! Contains our font resolution logic
//!
//! A poster is always rendered with three font files: bold, regular and light. Users can hint at
//! which fonts they want in a couple of ways, and the resolver walks those hints in priority order
//!
//! 1. A family name that gets fetched from a remote catalog (Google Fonts by default)
//! 2. A local path that's either a single font file or a directory of weighted font files
//! 3. The built-in defaults that ship alongside the application
//!
//! Every weight is resolved independently, so a single bundle can mix sources e.g. bold and
//! regular from a directory while light comes from the built-in defaults. Failures along the way
//! never bubble up to the caller. They get recorded in a [`ResolutionReport`] instead and the
//! resolver moves on to the next tier

use std::{fmt, path::PathBuf};

mod defaults;
mod error;
mod format;
pub mod fs;
mod path;
pub mod remote;
mod resolve;
mod scan;
mod weight;

pub use defaults::BuiltinFonts;
pub use error::FontError;
pub use format::FontFormat;
pub use path::normalize_path;
pub use resolve::Resolver;
pub use scan::scan_dir;
pub use weight::classify;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FontWeight {
    Bold,
    Regular,
    Light,
}

impl FontWeight {
    pub const ALL: [Self; 3] = [Self::Bold, Self::Regular, Self::Light];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Regular => "regular",
            Self::Light => "light",
        }
    }

    /// The CSS `font-weight` that this weight corresponds to
    pub fn numeric(&self) -> u16 {
        match self {
            Self::Bold => 700,
            Self::Regular => 400,
            Self::Light => 300,
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Bold => 0,
            Self::Regular => 1,
            Self::Light => 2,
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which resolution tier supplied a font file
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provenance {
    RemoteFamily,
    LocalSingle,
    LocalDirectory,
    BuiltinDefault,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RemoteFamily => "remote family",
            Self::LocalSingle => "local file",
            Self::LocalDirectory => "local directory",
            Self::BuiltinDefault => "built-in default",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user asked for. Either, both, or neither can be set
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontRequest {
    pub family_name: Option<String>,
    pub local_path: Option<String>,
}

#[cfg(test)]
impl FontRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family<S: Into<String>>(mut self, name: S) -> Self {
        self.family_name = Some(name.into());
        self
    }

    pub fn path<S: Into<String>>(mut self, path: S) -> Self {
        self.local_path = Some(path.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontCandidate {
    pub path: PathBuf,
    /// The weight this file fills in the bundle
    pub weight: FontWeight,
    /// The weight detected from the file itself, if any. A single font file fills every weight
    /// even though it was only detected as one of them (or none at all)
    pub detected: Option<FontWeight>,
    pub format: FontFormat,
    pub provenance: Provenance,
}

impl FontCandidate {
    pub fn new(
        path: PathBuf,
        weight: FontWeight,
        format: FontFormat,
        provenance: Provenance,
    ) -> Self {
        Self {
            path,
            weight,
            detected: Some(weight),
            format,
            provenance,
        }
    }
}

/// The in-progress set of resolved weights
///
/// The only way to turn this into a [`FontBundle`] is by backfilling the gaps from the built-in
/// defaults, which keeps an incomplete bundle unrepresentable
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialBundle([Option<FontCandidate>; 3]);

impl PartialBundle {
    pub fn get(&self, weight: FontWeight) -> Option<&FontCandidate> {
        self.0[weight.index()].as_ref()
    }

    pub fn contains(&self, weight: FontWeight) -> bool {
        self.get(weight).is_some()
    }

    /// Fills the slot only if it's still empty. Returns whether the candidate was used
    pub fn fill(&mut self, candidate: FontCandidate) -> bool {
        let slot = &mut self.0[candidate.weight.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(candidate);
        true
    }

    pub fn missing(&self) -> Vec<FontWeight> {
        FontWeight::ALL
            .into_iter()
            .filter(|weight| !self.contains(*weight))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    pub fn complete_with(self, defaults: &BuiltinFonts) -> FontBundle {
        let [bold, regular, light] = self.0;
        FontBundle {
            bold: bold.unwrap_or_else(|| defaults.candidate(FontWeight::Bold)),
            regular: regular.unwrap_or_else(|| defaults.candidate(FontWeight::Regular)),
            light: light.unwrap_or_else(|| defaults.candidate(FontWeight::Light)),
        }
    }
}

/// The fully resolved fonts that get handed off for rendering
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontBundle {
    pub bold: FontCandidate,
    pub regular: FontCandidate,
    pub light: FontCandidate,
}

impl FontBundle {
    pub fn get(&self, weight: FontWeight) -> &FontCandidate {
        match weight {
            FontWeight::Bold => &self.bold,
            FontWeight::Regular => &self.regular,
            FontWeight::Light => &self.light,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FontCandidate> {
        [&self.bold, &self.regular, &self.light].into_iter()
    }
}

impl fmt::Display for FontBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, candidate) in self.iter().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{}: {} ({})",
                candidate.weight,
                candidate.path.display(),
                candidate.provenance
            )?;
        }
        Ok(())
    }
}
