use std::path::Path;

use super::{
    classify,
    fs::{EntryKind, FontFs},
    normalize_path,
    remote::{Catalog, FetchNote, RemoteFetcher},
    scan_dir, BuiltinFonts, FontBundle, FontCandidate, FontFormat, FontRequest, FontWeight,
    PartialBundle, Provenance,
};

mod report;

pub use report::{Outcome, ResolutionReport, Stage};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    TryFamily,
    TryLocalPath,
    UseDefault,
    Done,
}

/// The outcome of a single resolution
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub bundle: FontBundle,
    pub report: ResolutionReport,
}

/// Walks the family -> local path -> built-in default tiers until every weight is resolved
///
/// Resolution never fails. Anything that goes wrong gets recorded in the report and the next tier
/// takes over for whichever weights are still missing
pub struct Resolver<'a, F> {
    defaults: &'a BuiltinFonts,
    fs: F,
    remote: Option<&'a RemoteFetcher<dyn Catalog + 'a>>,
}

impl<'a, F: FontFs> Resolver<'a, F> {
    pub fn new(defaults: &'a BuiltinFonts, fs: F) -> Self {
        Self {
            defaults,
            fs,
            remote: None,
        }
    }

    pub fn with_remote(mut self, remote: &'a RemoteFetcher<dyn Catalog + 'a>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn resolve(&self, request: &FontRequest) -> Resolution {
        let mut found = PartialBundle::default();
        let mut report = ResolutionReport::default();

        let mut state = match request.family_name {
            Some(_) => State::TryFamily,
            None => State::TryLocalPath,
        };
        loop {
            tracing::trace!(?state, missing = ?found.missing(), "Resolving fonts");
            state = match state {
                State::TryFamily => {
                    let family = request.family_name.as_deref().unwrap_or_default();
                    self.try_family(family, &mut found, &mut report);
                    Self::next(&found, State::TryLocalPath)
                }
                State::TryLocalPath => {
                    if let Some(raw) = &request.local_path {
                        self.try_local_path(raw, &mut found, &mut report);
                    }
                    Self::next(&found, State::UseDefault)
                }
                State::UseDefault => {
                    let missing = found.missing();
                    report.push(
                        Stage::Default,
                        Outcome::Resolved,
                        format!("using built-in defaults for {}", join(&missing)),
                    );
                    State::Done
                }
                State::Done => break,
            };
        }

        Resolution {
            bundle: found.complete_with(self.defaults),
            report,
        }
    }

    fn next(found: &PartialBundle, otherwise: State) -> State {
        if found.is_complete() {
            State::Done
        } else {
            otherwise
        }
    }

    fn try_family(&self, family: &str, found: &mut PartialBundle, report: &mut ResolutionReport) {
        if BuiltinFonts::is_builtin_family(family) {
            report.push(
                Stage::Family,
                Outcome::Skipped,
                format!("'{family}' is the built-in family"),
            );
            return;
        }
        let Some(remote) = self.remote else {
            report.push(
                Stage::Family,
                Outcome::Skipped,
                format!("can't fetch '{family}' with the font catalog disabled"),
            );
            return;
        };

        let wanted = found.missing();
        let fetch = match remote.fetch_family(family, &wanted) {
            Ok(fetch) => fetch,
            Err(err) => {
                report.push(Stage::Family, Outcome::Failed, err.to_string());
                return;
            }
        };

        for note in &fetch.notes {
            let outcome = match note {
                FetchNote::Failed { .. } => Outcome::Failed,
                FetchNote::Cached(_) | FetchNote::Substituted { .. } => Outcome::Note,
            };
            report.push(Stage::Family, outcome, note.to_string());
        }
        let filled: Vec<_> = fetch
            .found
            .into_iter()
            .filter_map(|candidate| {
                let weight = candidate.weight;
                found.fill(candidate).then_some(weight)
            })
            .collect();
        Self::report_filled(report, Stage::Family, &filled, found, format!("'{family}'"));
    }

    fn try_local_path(&self, raw: &str, found: &mut PartialBundle, report: &mut ResolutionReport) {
        let path = match normalize_path(&self.fs, raw) {
            Ok(path) => path,
            Err(err) => {
                report.push(Stage::LocalPath, Outcome::Failed, err.to_string());
                return;
            }
        };

        match self.fs.entry_kind(&path) {
            Some(EntryKind::File) => self.use_single_file(&path, found, report),
            Some(EntryKind::Dir) => self.use_dir(&path, found, report),
            Some(EntryKind::Other) | None => report.push(
                Stage::LocalPath,
                Outcome::Failed,
                format!("not a file or directory: {}", path.display()),
            ),
        }
    }

    /// A lone font file stands in for every missing weight, whatever weight it was detected as
    fn use_single_file(&self, path: &Path, found: &mut PartialBundle, report: &mut ResolutionReport) {
        let format = match FontFormat::validate(path) {
            Ok(format) => format,
            Err(err) => {
                report.push(Stage::LocalPath, Outcome::Failed, err.to_string());
                return;
            }
        };
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let detected = classify(&file_name).known();

        let missing = found.missing();
        for &weight in &missing {
            found.fill(FontCandidate {
                path: path.to_owned(),
                weight,
                detected,
                format,
                provenance: Provenance::LocalSingle,
            });
        }

        let detected_msg = match detected {
            Some(weight) => format!("detected as {weight}"),
            None => "weight not detected".to_owned(),
        };
        report.push(
            Stage::LocalPath,
            Outcome::Resolved,
            format!(
                "using {} ({detected_msg}) for {}",
                path.display(),
                join(&missing)
            ),
        );
    }

    fn use_dir(&self, dir: &Path, found: &mut PartialBundle, report: &mut ResolutionReport) {
        let scan = match scan_dir(&self.fs, dir) {
            Ok(scan) => scan,
            Err(err) => {
                report.push(Stage::LocalPath, Outcome::Failed, err.to_string());
                return;
            }
        };

        if !scan.unclassified.is_empty() {
            let names: Vec<_> = scan
                .unclassified
                .iter()
                .filter_map(|path| path.file_name())
                .map(|name| name.to_string_lossy())
                .collect();
            report.push(
                Stage::LocalPath,
                Outcome::Note,
                format!("ignoring files with no detectable weight: {}", names.join(", ")),
            );
        }

        let filled: Vec<_> = FontWeight::ALL
            .into_iter()
            .filter_map(|weight| scan.found.get(weight).cloned())
            .filter_map(|candidate| {
                let weight = candidate.weight;
                found.fill(candidate).then_some(weight)
            })
            .collect();
        Self::report_filled(
            report,
            Stage::LocalPath,
            &filled,
            found,
            dir.display().to_string(),
        );
    }

    fn report_filled(
        report: &mut ResolutionReport,
        stage: Stage,
        filled: &[FontWeight],
        found: &PartialBundle,
        source: String,
    ) {
        if filled.is_empty() {
            report.push(
                stage,
                Outcome::NoMatch,
                format!("{source} had nothing for {}", join(&found.missing())),
            );
        } else if found.is_complete() {
            report.push(
                stage,
                Outcome::Resolved,
                format!("using {} from {source}", join(filled)),
            );
        } else {
            report.push(
                stage,
                Outcome::Partial,
                format!(
                    "using {} from {source}, still missing {}",
                    join(filled),
                    join(&found.missing())
                ),
            );
        }
    }
}

fn join(weights: &[FontWeight]) -> String {
    weights
        .iter()
        .map(FontWeight::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
