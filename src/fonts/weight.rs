use std::path::Path;

use super::FontWeight;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightClass {
    Known(FontWeight),
    Unknown,
}

impl WeightClass {
    pub fn known(self) -> Option<FontWeight> {
        match self {
            Self::Known(weight) => Some(weight),
            Self::Unknown => None,
        }
    }
}

// Checked in order, first match wins
const RULES: &[(FontWeight, &[&str], &str)] = &[
    (FontWeight::Bold, &["bold"], "700"),
    (FontWeight::Regular, &["regular", "normal"], "400"),
    (FontWeight::Light, &["light", "thin"], "300"),
];

/// Detects the weight of a font from its file name
///
/// Only the file stem is considered. Keywords are matched anywhere in the (lowercased) stem while
/// numeric weights have to stand on their own as a full run of digits, so `font-700` is bold but
/// `font-1700` isn't anything
pub fn classify(file_name: &str) -> WeightClass {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    RULES
        .iter()
        .find(|(_, keywords, number)| {
            keywords.iter().any(|keyword| stem.contains(keyword)) || has_number_token(&stem, number)
        })
        .map_or(WeightClass::Unknown, |(weight, _, _)| WeightClass::Known(*weight))
}

fn has_number_token(haystack: &str, number: &str) -> bool {
    haystack
        .split(|c: char| !c.is_ascii_digit())
        .any(|digits| digits == number)
}
