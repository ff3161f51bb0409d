use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::ReportError;
use crate::filter::EntityKind;
use crate::types::{ForgeComment, ForgeIssue, RepoRef};

use super::interface::{Forge, SearchOptions};

/// A stub forge that serves pre-loaded fixture data without any network calls.
///
/// Useful for integration tests and demos that must not require a `GITHUB_TOKEN`.
/// Search results are returned in full regardless of the requested limit.
#[derive(Default)]
pub struct StubForge {
    search_results: HashMap<String, Vec<ForgeIssue>>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    issues: HashMap<(String, u64), ForgeIssue>,
    comments: HashMap<(String, u64), Vec<ForgeComment>>,
    queries: Mutex<Vec<String>>,
}

impl StubForge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `items` for searches in `repo` (`owner/name`).
    pub fn with_search(mut self, repo: &str, items: Vec<ForgeIssue>) -> Self {
        self.search_results.insert(repo.to_owned(), items);
        self
    }

    /// Make every search in `repo` fail with an upstream error.
    pub fn with_failure(mut self, repo: &str) -> Self {
        self.failing.insert(repo.to_owned());
        self
    }

    /// Delay searches in `repo`, to shuffle completion order.
    pub fn with_delay(mut self, repo: &str, delay: Duration) -> Self {
        self.delays.insert(repo.to_owned(), delay);
        self
    }

    pub fn with_issue(
        mut self,
        repo: &str,
        id: u64,
        issue: ForgeIssue,
        comments: Vec<ForgeComment>,
    ) -> Self {
        self.issues.insert((repo.to_owned(), id), issue);
        self.comments.insert((repo.to_owned(), id), comments);
        self
    }

    /// Every search query received so far, in arrival order.
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

impl Forge for StubForge {
    async fn search_issues(
        &self,
        repo: &RepoRef,
        query: &str,
        _options: SearchOptions,
    ) -> Result<Vec<ForgeIssue>, ReportError> {
        let key = repo.full_name();
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_owned());
        }
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&key) {
            return Err(ReportError::upstream(
                format!("searching {key}"),
                "stub failure",
            ));
        }
        Ok(self.search_results.get(&key).cloned().unwrap_or_default())
    }

    async fn get_issue(
        &self,
        repo: &RepoRef,
        id: u64,
        _kind: EntityKind,
    ) -> Result<ForgeIssue, ReportError> {
        let key = repo.full_name();
        self.issues
            .get(&(key.clone(), id))
            .cloned()
            .ok_or(ReportError::NotFound { repo: key, id })
    }

    async fn list_issue_comments(
        &self,
        repo: &RepoRef,
        id: u64,
    ) -> Result<Vec<ForgeComment>, ReportError> {
        let key = repo.full_name();
        self.comments
            .get(&(key.clone(), id))
            .cloned()
            .ok_or(ReportError::NotFound { repo: key, id })
    }
}
