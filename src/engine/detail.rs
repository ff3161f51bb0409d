use crate::error::ReportError;
use crate::filter::EntityKind;
use crate::types::{Comment, IssueDetail, RepoRef};

use super::interface::Forge;

/// Fetch one issue or pull request together with the first `comment_limit`
/// comments of its thread.
///
/// The head of the thread is kept (oldest comments in API order), unlike the
/// list report which keeps the most recently updated items.
pub async fn fetch_detail<F: Forge>(
    forge: &F,
    repo: &RepoRef,
    id: u64,
    kind: EntityKind,
    comment_limit: usize,
) -> Result<IssueDetail, ReportError> {
    tracing::debug!("detail: fetching {repo}#{id}");
    let issue = forge.get_issue(repo, id, kind).await?;
    let mut comments = forge.list_issue_comments(repo, id).await?;
    tracing::debug!("detail: {repo}#{id} comments={}", comments.len());
    comments.truncate(comment_limit);

    Ok(IssueDetail {
        title: issue.title,
        created_at: issue.created_at,
        body: issue.body,
        comments: comments
            .into_iter()
            .map(|c| Comment { body: c.body })
            .collect(),
    })
}
