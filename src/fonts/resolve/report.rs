use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Family,
    LocalPath,
    Default,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::LocalPath => "local path",
            Self::Default => "default",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every weight the stage was asked for got resolved
    Resolved,
    /// Only some of the weights got resolved
    Partial,
    /// The stage worked, but didn't turn up anything usable
    NoMatch,
    /// The stage failed entirely
    Failed,
    Skipped,
    /// Informational detail about the stage
    Note,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resolved => "resolved",
            Self::Partial => "partial",
            Self::NoMatch => "no match",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Note => "note",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportEntry {
    pub stage: Stage,
    pub outcome: Outcome,
    pub message: String,
}

impl ReportEntry {
    /// Whether this entry is worth warning the user about
    pub fn is_warning(&self) -> bool {
        matches!(
            self.outcome,
            Outcome::Partial | Outcome::NoMatch | Outcome::Failed
        )
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.stage.as_str(),
            self.outcome.as_str(),
            self.message
        )
    }
}

/// Everything noteworthy that happened during a resolution, in order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolutionReport(Vec<ReportEntry>);

impl ResolutionReport {
    pub(super) fn push<M: Into<String>>(&mut self, stage: Stage, outcome: Outcome, message: M) {
        let entry = ReportEntry {
            stage,
            outcome,
            message: message.into(),
        };
        tracing::debug!(%entry, "Resolution step");
        self.0.push(entry);
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.0
    }
}
