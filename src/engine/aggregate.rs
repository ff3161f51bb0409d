use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::ReportError;
use crate::filter::SearchFilter;
use crate::types::{AggregatedReport, ForgeIssue, RepoBucket, RepoOutcome, RepoRef, ReportItem};

use super::interface::{Forge, SearchOptions};

/// What happens to the run when one repository's search fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// The first failing repository (in target order) aborts the run.
    #[default]
    Abort,
    /// Failed repositories are kept in the report with their error.
    Partial,
}

/// Runs one search per target repository and merges the results.
pub struct Aggregator<F> {
    forge: Arc<F>,
    concurrency: usize,
    policy: FailurePolicy,
}

impl<F: Forge> Aggregator<F> {
    pub fn new(forge: Arc<F>) -> Self {
        Self {
            forge,
            concurrency: 1,
            policy: FailurePolicy::Abort,
        }
    }

    /// Maximum number of searches in flight. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Search every target and keep at most `per_repo_limit` items for each,
    /// in the order the forge returned them (most recently updated first).
    ///
    /// Repositories without results are kept with an empty bucket. The
    /// report order is `targets` order whatever order the searches finish in.
    pub async fn aggregate(
        &self,
        targets: &[RepoRef],
        filter: &SearchFilter,
        per_repo_limit: u32,
    ) -> Result<AggregatedReport, ReportError> {
        let options = SearchOptions::recently_updated(per_repo_limit);
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        for (idx, repo) in targets.iter().enumerate() {
            let forge = Arc::clone(&self.forge);
            let permits = Arc::clone(&permits);
            let repo = repo.clone();
            let query = filter.query_for(&repo);
            tasks.spawn(async move {
                // The semaphore is never closed, so acquiring cannot fail.
                let _permit = permits.acquire_owned().await.ok();
                tracing::debug!("aggregator: searching {repo} q={query:?}");
                let result = forge.search_issues(&repo, &query, options).await;
                (idx, result)
            });
        }

        let mut results = Vec::with_capacity(targets.len());
        while let Some(joined) = tasks.join_next().await {
            let (idx, result) =
                joined.map_err(|e| ReportError::upstream("search task", e.to_string()))?;
            results.push((idx, result));
        }
        results.sort_by_key(|(idx, _)| *idx);

        let limit = usize::try_from(per_repo_limit).unwrap_or(usize::MAX);
        let mut buckets = Vec::with_capacity(targets.len());
        for (repo, (_, result)) in targets.iter().zip(results) {
            let outcome = match result {
                Ok(issues) => RepoOutcome::Items(truncate(issues, limit)),
                Err(e) => match self.policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Partial => {
                        tracing::warn!("aggregator: {repo} failed: {e}");
                        RepoOutcome::Failed(e.to_string())
                    }
                },
            };
            if let RepoOutcome::Items(items) = &outcome {
                tracing::debug!("aggregator: {repo} count={}", items.len());
            }
            buckets.push(RepoBucket {
                repo: repo.clone(),
                outcome,
            });
        }

        Ok(AggregatedReport { buckets })
    }
}

/// Keep the first `limit` results; the forge already sorted them.
fn truncate(issues: Vec<ForgeIssue>, limit: usize) -> Vec<ReportItem> {
    issues.into_iter().take(limit).map(ReportItem::from).collect()
}
