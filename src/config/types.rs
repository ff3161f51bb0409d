use serde::Deserialize;

use crate::engine::FailurePolicy;
use crate::filter::StateFilter;
use crate::types::RepoRef;
use crate::window::DEFAULT_OFFSET;

// ---------------------------------------------------------------------------
// Custom repository list deserialization
// ---------------------------------------------------------------------------

/// Deserialize a list of `"owner/name"` strings into `RepoRef`s.
pub(crate) mod repo_list_de {
    use serde::{self, Deserialize, Deserializer};

    use crate::types::RepoRef;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<RepoRef>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names: Vec<String> = Vec::deserialize(deserializer)?;
        names
            .iter()
            .map(|name| {
                RepoRef::from_full_name(name).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "invalid repository {name:?} in github.repos: expected owner/name"
                    ))
                })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub github: GitHubConfig,
    pub defaults: Defaults,
    pub slack: SlackConfig,
}

// ---------------------------------------------------------------------------
// GitHub
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Personal access token; falls back to `gh auth token`, `GH_TOKEN`,
    /// `GITHUB_TOKEN`.
    pub token: Option<String>,
    /// `github.com` or a GitHub Enterprise host.
    pub host: String,
    /// Default owner for bare repository names.
    pub owner: Option<String>,
    /// Repositories reported when none are given on the command line.
    #[serde(deserialize_with = "repo_list_de::deserialize")]
    pub repos: Vec<RepoRef>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            host: "github.com".to_owned(),
            owner: None,
            repos: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub state: StateFilter,
    /// Per-repository result limit.
    pub limit: u32,
    pub offset: String,
    pub comments_limit: usize,
    /// Maximum number of repository searches in flight.
    pub concurrency: usize,
    pub on_error: FailurePolicy,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            state: StateFilter::Open,
            limit: 20,
            offset: DEFAULT_OFFSET.to_owned(),
            comments_limit: 3,
            concurrency: 4,
            on_error: FailurePolicy::Abort,
        }
    }
}

// ---------------------------------------------------------------------------
// Slack
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    pub token: Option<String>,
    pub channel: Option<String>,
    pub api_url: String,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            token: None,
            channel: None,
            api_url: "https://slack.com/api".to_owned(),
        }
    }
}
