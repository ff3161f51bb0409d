use std::future::Future;

use crate::error::ReportError;
use crate::filter::EntityKind;
use crate::types::{ForgeComment, ForgeIssue, RepoRef};

/// Sort and size options for a search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub sort: &'static str,
    pub order: &'static str,
    /// Maximum number of results wanted; implementations may return more.
    pub limit: u32,
}

impl SearchOptions {
    /// Most recently updated first.
    pub fn recently_updated(limit: u32) -> Self {
        Self {
            sort: "updated",
            order: "desc",
            limit,
        }
    }
}

/// Read-only access to a code forge, implemented by the GitHub client and by
/// `StubForge`.
///
/// Pagination and rate limiting are the implementation's business; search
/// results come back already sorted as requested.
pub trait Forge: Send + Sync + 'static {
    /// Run one search scoped to `repo`. `query` already carries the
    /// `repo:` qualifier.
    fn search_issues(
        &self,
        repo: &RepoRef,
        query: &str,
        options: SearchOptions,
    ) -> impl Future<Output = Result<Vec<ForgeIssue>, ReportError>> + Send;

    /// Fetch one issue or pull request. Unknown ids fail with `NotFound`.
    fn get_issue(
        &self,
        repo: &RepoRef,
        id: u64,
        kind: EntityKind,
    ) -> impl Future<Output = Result<ForgeIssue, ReportError>> + Send;

    /// Every conversation comment, in API order.
    fn list_issue_comments(
        &self,
        repo: &RepoRef,
        id: u64,
    ) -> impl Future<Output = Result<Vec<ForgeComment>, ReportError>> + Send;
}
