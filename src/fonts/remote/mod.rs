//! Fetching whole font families from a remote catalog
//!
//! The catalog only has to list the faces it has for a family and hand over their bytes. Picking
//! faces for each of our weights, along with persisting them to the cache, happens here so that
//! every catalog gets the same behavior

use std::{
    fmt,
    time::{Duration, Instant},
};

use super::{FontCandidate, FontError, FontFormat, FontWeight, Provenance};

mod cache;
mod google;

pub use cache::FontCache;
pub use google::{GoogleFonts, GOOGLE_FONTS_CSS_URL};

/// A single static face that a catalog has for a family
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteFace {
    /// CSS numeric weight e.g. 400
    pub weight: u16,
    pub url: String,
    pub format: FontFormat,
}

/// Every call gets the deadline for the whole family fetch. Anything still running past it should
/// fail with [`FontError::FetchFailed`]
pub trait Catalog {
    /// Lists the faces that the catalog has for `family`, ideally at the requested weights
    ///
    /// Should fail with [`FontError::FamilyNotFound`] when the family doesn't exist and with
    /// [`FontError::FetchFailed`] for anything else
    fn family_faces(
        &self,
        family: &str,
        weights: &[u16],
        deadline: Instant,
    ) -> Result<Vec<RemoteFace>, FontError>;

    fn download(&self, face: &RemoteFace, deadline: Instant) -> Result<Vec<u8>, FontError>;
}

/// Noteworthy things that happened while fetching a family that didn't prevent it from working
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchNote {
    Cached(FontWeight),
    Substituted { weight: FontWeight, used: u16 },
    Failed { weight: FontWeight, err: FontError },
}

impl fmt::Display for FetchNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cached(weight) => write!(f, "using cached {weight} face"),
            Self::Substituted { weight, used } => write!(
                f,
                "using weight {used} for {weight} (requested {} not available)",
                weight.numeric()
            ),
            Self::Failed { weight, err } => write!(f, "failed to fetch {weight} face: {err}"),
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct FamilyFetch {
    pub found: Vec<FontCandidate>,
    pub notes: Vec<FetchNote>,
}

/// Fetches families from a catalog through the local cache
///
/// The catalog is the last field so that a fetcher for any concrete catalog can be handed around
/// as a `&RemoteFetcher<dyn Catalog>`
pub struct RemoteFetcher<C: ?Sized> {
    cache: FontCache,
    /// Budget for everything a single family fetch does over the network
    timeout: Duration,
    catalog: C,
}

impl<C: Catalog> RemoteFetcher<C> {
    pub fn new(catalog: C, cache: FontCache, timeout: Duration) -> Self {
        Self {
            cache,
            timeout,
            catalog,
        }
    }
}

impl<C: Catalog + ?Sized> RemoteFetcher<C> {
    #[cfg(test)]
    pub fn cache(&self) -> &FontCache {
        &self.cache
    }

    /// Fetches the `wanted` weights of `family`
    ///
    /// Weights that are already cached never hit the catalog. Individual weights can fail without
    /// failing the whole family, but an error is returned when nothing at all could be obtained.
    /// All of the catalog calls share a single deadline
    pub fn fetch_family(
        &self,
        family: &str,
        wanted: &[FontWeight],
    ) -> Result<FamilyFetch, FontError> {
        let key = FontCache::key(family).ok_or_else(|| FontError::FamilyNotFound(family.into()))?;

        let mut fetch = FamilyFetch::default();
        let mut remaining = Vec::new();
        for &weight in wanted {
            match self.cache.lookup(&key, weight) {
                Some(cached) => {
                    tracing::debug!(family, %weight, "Using cached font");
                    fetch.found.push(FontCandidate::new(
                        cached.path,
                        weight,
                        cached.format,
                        Provenance::RemoteFamily,
                    ));
                    fetch.notes.push(FetchNote::Cached(weight));
                    if let Some(used) = cached.substitute {
                        fetch.notes.push(FetchNote::Substituted { weight, used });
                    }
                }
                None => remaining.push(weight),
            }
        }
        if remaining.is_empty() {
            return Ok(fetch);
        }

        let deadline = Instant::now() + self.timeout;
        let numeric: Vec<_> = remaining.iter().map(FontWeight::numeric).collect();
        let faces = match self.catalog.family_faces(family, &numeric, deadline) {
            Ok(faces) if faces.is_empty() => Err(FontError::FamilyNotFound(family.into())),
            res => res,
        };
        let faces = match faces {
            Ok(faces) => faces,
            Err(err) if fetch.found.is_empty() => return Err(err),
            Err(err) => {
                for weight in remaining {
                    fetch.notes.push(FetchNote::Failed {
                        weight,
                        err: err.clone(),
                    });
                }
                return Ok(fetch);
            }
        };

        let mut last_err = None;
        for weight in remaining {
            let Some(face) = closest_face(&faces, weight.numeric()) else {
                continue;
            };
            let substitute = (face.weight != weight.numeric()).then_some(face.weight);
            if let Some(used) = substitute {
                tracing::info!(family, %weight, used, "Substituting closest weight");
                fetch.notes.push(FetchNote::Substituted { weight, used });
            }

            tracing::info!(family, %weight, url = %face.url, "Downloading font");
            let stored = self
                .catalog
                .download(face, deadline)
                .and_then(|bytes| {
                    self.cache
                        .store(&key, weight, substitute, face.format, &bytes)
                });
            match stored {
                Ok(path) => fetch.found.push(FontCandidate::new(
                    path,
                    weight,
                    face.format,
                    Provenance::RemoteFamily,
                )),
                Err(err) => {
                    tracing::warn!(family, %weight, %err, "Failed fetching font face");
                    last_err = Some(err.clone());
                    fetch.notes.push(FetchNote::Failed { weight, err });
                }
            }
        }

        match (fetch.found.is_empty(), last_err) {
            (true, Some(err)) => Err(err),
            (true, None) => Err(FontError::FamilyNotFound(family.into())),
            (false, _) => Ok(fetch),
        }
    }
}

/// Exact matches always win, otherwise the numerically closest weight with ties going to the
/// lighter face
fn closest_face(faces: &[RemoteFace], target: u16) -> Option<&RemoteFace> {
    faces
        .iter()
        .min_by_key(|face| (face.weight.abs_diff(target), face.weight))
}
