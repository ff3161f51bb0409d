use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::engine::{Aggregator, FailurePolicy, Forge, fetch_detail};
use crate::error::ReportError;
use crate::filter::{self, EntityKind, StateFilter};
use crate::render;
use crate::targets;
use crate::types::RepoRef;
use crate::window;

/// Fully merged options of a list command (`issues`, `pulls`).
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub kind: EntityKind,
    pub state: StateFilter,
    pub limit: u32,
    /// Explicit lower bound; empty means use `offset`.
    pub since: String,
    pub offset: String,
    pub owner: String,
    /// Comma-separated logins.
    pub assignees: String,
    pub policy: FailurePolicy,
    pub concurrency: usize,
}

/// Fully merged options of a detail command (`issue`, `pull`).
#[derive(Debug, Clone)]
pub struct DetailOptions {
    pub kind: EntityKind,
    pub owner: String,
    pub comments_limit: usize,
}

/// Build the filter, search every target repository and render the list
/// report.
pub async fn run_list<F: Forge>(
    forge: Arc<F>,
    opts: &ListOptions,
    repos: &[String],
    defaults: &[RepoRef],
    now: DateTime<Utc>,
) -> Result<String, ReportError> {
    let range = window::resolve(&opts.since, &opts.offset, now)?;
    let search_filter = filter::build(opts.kind, opts.state, &opts.assignees, range);
    let targets = targets::resolve_targets(&opts.owner, repos, defaults)?;
    tracing::info!(
        "listing {:?} in {} repositories updated since {}",
        opts.kind,
        targets.len(),
        search_filter.updated.lower_bound()
    );

    let report = Aggregator::new(forge)
        .with_concurrency(opts.concurrency)
        .with_policy(opts.policy)
        .aggregate(&targets, &search_filter, opts.limit)
        .await?;
    Ok(render::render_list(&report))
}

/// Fetch one issue or pull request and render its detail report.
pub async fn run_detail<F: Forge>(
    forge: &F,
    opts: &DetailOptions,
    repo: &str,
    id: u64,
    defaults: &[RepoRef],
) -> Result<String, ReportError> {
    let target = targets::resolve_detail_target(&opts.owner, repo, defaults)?;
    let detail = fetch_detail(forge, &target, id, opts.kind, opts.comments_limit).await?;
    Ok(render::render_detail(&detail))
}
