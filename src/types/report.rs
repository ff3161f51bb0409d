use super::common::RepoRef;
use super::issue::ReportItem;

/// Result of one repository's search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    Items(Vec<ReportItem>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoBucket {
    pub repo: RepoRef,
    pub outcome: RepoOutcome,
}

/// Per-repository results in target resolution order.
///
/// Stored as a sequence rather than a map so a repository named twice shows
/// up twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedReport {
    pub buckets: Vec<RepoBucket>,
}

impl AggregatedReport {
    /// Items of the first bucket for `repo`, if it succeeded.
    pub fn items_for(&self, repo: &RepoRef) -> Option<&[ReportItem]> {
        self.buckets
            .iter()
            .find(|b| &b.repo == repo)
            .and_then(|b| match &b.outcome {
                RepoOutcome::Items(items) => Some(items.as_slice()),
                RepoOutcome::Failed(_) => None,
            })
    }
}
