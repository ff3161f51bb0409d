use indexmap::IndexSet;
use serde::Deserialize;

use crate::types::RepoRef;
use crate::window::TimeRange;

// ---------------------------------------------------------------------------
// Filter enums
// ---------------------------------------------------------------------------

/// Which kind of entity a search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Issue,
    PullRequest,
}

impl EntityKind {
    /// Value of the `is:` search qualifier.
    pub fn qualifier(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::PullRequest => "pr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StateFilter {
    #[default]
    Open,
    Closed,
    All,
}

impl StateFilter {
    /// Value of the `state:` qualifier; `None` means no state constraint.
    pub fn qualifier(self) -> Option<&'static str> {
        match self {
            Self::Open => Some("open"),
            Self::Closed => Some("closed"),
            Self::All => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Search filter
// ---------------------------------------------------------------------------

/// Filter shared by every per-repository search of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub kind: EntityKind,
    pub state: StateFilter,
    pub updated: TimeRange,
    /// Empty means no assignee constraint.
    pub assignees: IndexSet<String>,
}

/// Build the filter from user options. Pure and deterministic.
pub fn build(kind: EntityKind, state: StateFilter, assignees: &str, range: TimeRange) -> SearchFilter {
    SearchFilter {
        kind,
        state,
        updated: range,
        assignees: parse_assignees(assignees),
    }
}

/// Split a comma-separated login list, trimming whitespace and dropping empty
/// entries. Repeated logins collapse into one; first-seen order is kept.
pub fn parse_assignees(raw: &str) -> IndexSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

impl SearchFilter {
    /// Qualifier terms in the order they are sent: `is:`, `state:`,
    /// `updated:`, then one `assignee:` per login.
    pub fn terms(&self) -> Vec<String> {
        let mut terms = vec![format!("is:{}", self.kind.qualifier())];
        if let Some(state) = self.state.qualifier() {
            terms.push(format!("state:{state}"));
        }
        terms.push(format!("updated:{}", self.updated.representation()));
        terms.extend(self.assignees.iter().map(|login| format!("assignee:{login}")));
        terms
    }

    /// Full search query scoped to one repository.
    pub fn query_for(&self, repo: &RepoRef) -> String {
        let mut query = format!("repo:{repo}");
        for term in self.terms() {
            query.push(' ');
            query.push_str(&term);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn range() -> TimeRange {
        TimeRange::starting_at(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn assignees_drop_blank_entries() {
        let set = parse_assignees("alice, bob,,carol");
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec!["alice", "bob", "carol"]
        );
    }

    #[test]
    fn assignees_empty_input_means_no_constraint() {
        assert!(parse_assignees("").is_empty());
        assert!(parse_assignees(" , ,").is_empty());
    }

    #[test]
    fn assignees_deduplicate() {
        assert_eq!(parse_assignees("alice,alice").len(), 1);
    }

    #[test]
    fn query_for_open_issues() {
        let filter = build(EntityKind::Issue, StateFilter::Open, "alice,bob", range());
        assert_eq!(
            filter.query_for(&RepoRef::new("acme", "api")),
            "repo:acme/api is:issue state:open updated:2023-01-01T00:00:00+00:00..* \
             assignee:alice assignee:bob"
        );
    }

    #[test]
    fn state_all_omits_state_qualifier() {
        let filter = build(EntityKind::PullRequest, StateFilter::All, "", range());
        assert_eq!(
            filter.terms(),
            vec!["is:pr", "updated:2023-01-01T00:00:00+00:00..*"]
        );
    }

    #[test]
    fn build_always_injects_range() {
        let filter = build(EntityKind::Issue, StateFilter::Closed, "", range());
        assert_eq!(filter.updated, range());
        assert!(filter.terms().contains(&"state:closed".to_owned()));
    }
}
