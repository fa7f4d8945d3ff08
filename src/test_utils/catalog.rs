use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    rc::Rc,
    time::Instant,
};

use crate::fonts::{
    remote::{Catalog, RemoteFace},
    FontError, FontFormat,
};

/// An in-memory catalog that records how it was used
#[derive(Default)]
pub struct FakeCatalog {
    families: BTreeMap<String, Vec<(u16, Vec<u8>)>>,
    broken_downloads: BTreeSet<u16>,
    unreachable: bool,
    /// Every family that was listed, shared so it can be inspected after handing off the catalog
    pub listed: Rc<RefCell<Vec<String>>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family(mut self, name: &str, weights: &[u16]) -> Self {
        let faces = weights
            .iter()
            .map(|&weight| (weight, format!("{name} {weight}").into_bytes()))
            .collect();
        self.families.insert(name.to_owned(), faces);
        self
    }

    pub fn broken_download(mut self, weight: u16) -> Self {
        self.broken_downloads.insert(weight);
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }
}

impl Catalog for FakeCatalog {
    fn family_faces(
        &self,
        family: &str,
        _: &[u16],
        _: Instant,
    ) -> Result<Vec<RemoteFace>, FontError> {
        self.listed.borrow_mut().push(family.to_owned());
        if self.unreachable {
            return Err(FontError::fetch_failed("timed out"));
        }
        let faces = self
            .families
            .get(family)
            .ok_or_else(|| FontError::FamilyNotFound(family.into()))?;
        Ok(faces
            .iter()
            .map(|(weight, _)| RemoteFace {
                weight: *weight,
                url: format!("fake://{family}/{weight}.ttf"),
                format: FontFormat::Ttf,
            })
            .collect())
    }

    fn download(&self, face: &RemoteFace, _: Instant) -> Result<Vec<u8>, FontError> {
        if self.broken_downloads.contains(&face.weight) {
            return Err(FontError::fetch_failed("connection reset"));
        }
        let (family, _) = face
            .url
            .strip_prefix("fake://")
            .and_then(|rest| rest.split_once('/'))
            .unwrap();
        let (_, bytes) = self.families[family]
            .iter()
            .find(|(weight, _)| *weight == face.weight)
            .unwrap();
        Ok(bytes.clone())
    }
}
