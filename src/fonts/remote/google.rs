use std::{
    collections::BTreeMap,
    io::{self, Read},
    time::Instant,
};

use super::{Catalog, RemoteFace};
use crate::fonts::{FontError, FontFormat};

use url::Url;

pub const GOOGLE_FONTS_CSS_URL: &str = "https://fonts.googleapis.com/css2";

const BODY_SIZE_LIMIT: u64 = 20 * 1_024 * 1_024;
const DESCRIPTIVE_USER_AGENT: &str = concat!("posterfont ", env!("CARGO_PKG_VERSION"));

/// Catalog backed by the Google Fonts CSS2 API
///
/// The API answers with a stylesheet full of `@font-face` blocks that point at the actual font
/// files. A non-browser user agent gets served plain TrueType files which is exactly what we want
pub struct GoogleFonts {
    agent: ureq::Agent,
    css_url: Url,
}

impl GoogleFonts {
    pub fn new(css_url: Url) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(DESCRIPTIVE_USER_AGENT)
            .build();
        Self { agent, css_url }
    }

    fn stylesheet(&self, family_query: &str, deadline: Instant) -> Result<String, ureq::Error> {
        let mut url = self.css_url.clone();
        url.query_pairs_mut().append_pair("family", family_query);
        let body = self.get(&url, deadline)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Each request only gets whatever is left until `deadline`
    fn get(&self, url: &Url, deadline: Instant) -> Result<Vec<u8>, ureq::Error> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            let err = io::Error::new(io::ErrorKind::TimedOut, "out of time for fetching fonts");
            return Err(err.into());
        }

        tracing::debug!(%url, ?remaining, "Requesting");
        let resp = self
            .agent
            .request_url("GET", url)
            .timeout(remaining)
            .call()?;
        let mut body = Vec::new();
        // Read one byte past the limit to tell a body that's exactly at the limit from a bigger one
        resp.into_reader()
            .take(BODY_SIZE_LIMIT + 1)
            .read_to_end(&mut body)?;
        if body.len() as u64 > BODY_SIZE_LIMIT {
            let err = io::Error::new(
                io::ErrorKind::InvalidData,
                format!("response body exceeds {BODY_SIZE_LIMIT} bytes"),
            );
            return Err(err.into());
        }
        Ok(body)
    }
}

impl Catalog for GoogleFonts {
    fn family_faces(
        &self,
        family: &str,
        weights: &[u16],
        deadline: Instant,
    ) -> Result<Vec<RemoteFace>, FontError> {
        let mut weights = weights.to_vec();
        weights.sort_unstable();
        weights.dedup();
        let axis = weights
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(";");

        // The API rejects the whole request when any single weight is missing, so fall back to
        // the family's default face and let closest-weight matching sort it out
        let css = match self.stylesheet(&format!("{family}:wght@{axis}"), deadline) {
            Err(ureq::Error::Status(400, _)) => {
                tracing::debug!(family, "Requested weights unavailable, asking for any face");
                self.stylesheet(family, deadline)
            }
            res => res,
        };
        let css = match css {
            Ok(css) => css,
            Err(ureq::Error::Status(400 | 404, _)) => {
                return Err(FontError::FamilyNotFound(family.into()))
            }
            Err(err) => return Err(FontError::fetch_failed(err)),
        };

        let faces = parse_stylesheet(&css);
        if faces.is_empty() {
            return Err(FontError::FamilyNotFound(family.into()));
        }
        Ok(faces)
    }

    fn download(&self, face: &RemoteFace, deadline: Instant) -> Result<Vec<u8>, FontError> {
        let url = Url::parse(&face.url).map_err(FontError::fetch_failed)?;
        self.get(&url, deadline).map_err(FontError::fetch_failed)
    }
}

/// Pulls one face per weight out of a stylesheet
///
/// When the same weight shows up in multiple blocks (one per unicode subset) the last block wins.
/// Blocks without a numeric weight or a supported source get skipped
fn parse_stylesheet(css: &str) -> Vec<RemoteFace> {
    let mut faces = BTreeMap::new();
    for block in css.split("@font-face").skip(1) {
        let block = block.split('}').next().unwrap_or_default();
        let block = block.split_once('{').map_or(block, |(_, body)| body);
        let Some(weight) = property(block, "font-weight")
            .and_then(|value| value.split_whitespace().next())
            .and_then(|weight| weight.parse::<u16>().ok())
        else {
            continue;
        };
        let Some((url, format)) = property(block, "src").and_then(source_url) else {
            continue;
        };
        faces.insert(weight, RemoteFace { weight, url, format });
    }
    faces.into_values().collect()
}

fn property<'css>(block: &'css str, name: &str) -> Option<&'css str> {
    block.split(';').find_map(|decl| {
        let (key, value) = decl.split_once(':')?;
        (key.trim() == name).then(|| value.trim())
    })
}

fn source_url(src: &str) -> Option<(String, FontFormat)> {
    src.split("url(").skip(1).find_map(|rest| {
        let (url, _) = rest.split_once(')')?;
        let url = url.trim().trim_matches(|c| c == '\'' || c == '"');
        let path = url.split(['?', '#']).next()?;
        let (_, ext) = path.rsplit_once('.')?;
        let format = FontFormat::from_ext(ext)?;
        Some((url.to_owned(), format))
    })
}
