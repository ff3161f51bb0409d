use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};

use crate::engine::{Forge, SearchOptions};
use crate::error::ReportError;
use crate::filter::EntityKind;
use crate::github::{auth, rate_limit};
use crate::types::{ForgeComment, ForgeIssue, RepoRef};

/// GitHub caps REST pages at 100 items.
const MAX_PAGE_SIZE: u32 = 100;

/// The search API only serves the first 1000 results of a query; later pages
/// answer 422.
const MAX_SEARCH_RESULTS: u32 = 1000;

// ---------------------------------------------------------------------------
// Raw API response types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RawSearchResponse {
    #[serde(default)]
    items: Vec<RawIssue>,
}

#[derive(Deserialize)]
struct RawIssue {
    title: String,
    #[serde(default)]
    body: Option<String>,
    html_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RawIssue {
    fn into_domain(self) -> ForgeIssue {
        ForgeIssue {
            updated_at: self.updated_at,
            created_at: self.created_at,
            html_url: self.html_url,
            title: self.title,
            body: self.body.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
struct RawComment {
    #[serde(default)]
    body: Option<String>,
}

#[derive(Serialize)]
struct SearchParams<'a> {
    q: &'a str,
    sort: &'a str,
    order: &'a str,
    per_page: u32,
    page: u32,
}

#[derive(Serialize)]
struct PageParams {
    per_page: u32,
    page: u32,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Read-only GitHub REST client.
pub struct GitHubClient {
    octocrab: Arc<Octocrab>,
}

impl GitHubClient {
    /// Build a client for `host`, resolving the token via [`auth::resolve_token`].
    pub fn new(host: &str, token: Option<&str>) -> Result<Self> {
        let token = auth::resolve_token(host, token)?;

        let builder = if host == "github.com" {
            Octocrab::builder().personal_token(token)
        } else {
            Octocrab::builder()
                .personal_token(token)
                .base_uri(format!("https://{host}/api/v3"))
                .context("setting GHE base URI")?
        };

        let octocrab = builder.build().context("building octocrab instance")?;
        Ok(Self::from_octocrab(octocrab))
    }

    /// Wrap an already configured Octocrab instance.
    pub fn from_octocrab(octocrab: Octocrab) -> Self {
        Self {
            octocrab: Arc::new(octocrab),
        }
    }
}

impl Forge for GitHubClient {
    async fn search_issues(
        &self,
        repo: &RepoRef,
        query: &str,
        options: SearchOptions,
    ) -> Result<Vec<ForgeIssue>, ReportError> {
        let per_page = options.limit.clamp(1, MAX_PAGE_SIZE);
        let wanted =
            usize::try_from(options.limit.min(MAX_SEARCH_RESULTS)).unwrap_or(usize::MAX);
        let mut issues = Vec::new();
        let mut page = 1;

        loop {
            let params = SearchParams {
                q: query,
                sort: options.sort,
                order: options.order,
                per_page,
                page,
            };
            let response: RawSearchResponse = self
                .octocrab
                .get("/search/issues", Some(&params))
                .await
                .map_err(|e| {
                    ReportError::upstream(format!("searching {repo}"), rate_limit::describe(&e))
                })?;

            let fetched = response.items.len();
            issues.extend(response.items.into_iter().map(RawIssue::into_domain));
            tracing::debug!("github: search {repo} page={page} fetched={fetched}");

            if fetched < per_page as usize
                || issues.len() >= wanted
                || page * per_page >= MAX_SEARCH_RESULTS
            {
                break;
            }
            page += 1;
        }

        Ok(issues)
    }

    async fn get_issue(
        &self,
        repo: &RepoRef,
        id: u64,
        kind: EntityKind,
    ) -> Result<ForgeIssue, ReportError> {
        let collection = match kind {
            EntityKind::Issue => "issues",
            EntityKind::PullRequest => "pulls",
        };
        let route = format!("/repos/{}/{}/{collection}/{id}", repo.owner, repo.name);
        let raw: RawIssue = self
            .octocrab
            .get(route, None::<&()>)
            .await
            .map_err(|e| {
                if rate_limit::is_not_found(&e) {
                    ReportError::NotFound {
                        repo: repo.full_name(),
                        id,
                    }
                } else {
                    ReportError::upstream(format!("fetching {repo}#{id}"), rate_limit::describe(&e))
                }
            })?;
        Ok(raw.into_domain())
    }

    async fn list_issue_comments(
        &self,
        repo: &RepoRef,
        id: u64,
    ) -> Result<Vec<ForgeComment>, ReportError> {
        let route = format!("/repos/{}/{}/issues/{id}/comments", repo.owner, repo.name);
        let mut comments = Vec::new();
        let mut page = 1;

        loop {
            let params = PageParams {
                per_page: MAX_PAGE_SIZE,
                page,
            };
            let batch: Vec<RawComment> = self
                .octocrab
                .get(&route, Some(&params))
                .await
                .map_err(|e| {
                    if rate_limit::is_not_found(&e) {
                        ReportError::NotFound {
                            repo: repo.full_name(),
                            id,
                        }
                    } else {
                        ReportError::upstream(
                            format!("listing comments of {repo}#{id}"),
                            rate_limit::describe(&e),
                        )
                    }
                })?;

            let fetched = batch.len();
            comments.extend(batch.into_iter().map(|c| ForgeComment {
                body: c.body.unwrap_or_default(),
            }));
            if fetched < MAX_PAGE_SIZE as usize {
                break;
            }
            page += 1;
        }

        Ok(comments)
    }
}
