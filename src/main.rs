use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use gh_report::app::{self, DetailOptions, ListOptions};
use gh_report::config::loader;
use gh_report::config::types::AppConfig;
use gh_report::engine::FailurePolicy;
use gh_report::filter::{EntityKind, StateFilter};
use gh_report::github::GitHubClient;
use gh_report::relay::{SlackRelay, deliver};

#[derive(Parser)]
#[command(
    name = "gh-report",
    version,
    about = "Report recently updated GitHub issues and pull requests"
)]
struct Cli {
    /// Path to config file.
    #[arg(short = 'C', long, global = true)]
    config: Option<PathBuf>,

    /// GitHub token (overrides github.token).
    #[arg(short = 'T', long, global = true)]
    token: Option<String>,

    /// Also send the report to Slack.
    #[arg(long, global = true)]
    slack: bool,

    /// Slack token (overrides slack.token).
    #[arg(long, global = true)]
    slack_token: Option<String>,

    /// Slack channel (overrides slack.channel).
    #[arg(long, global = true)]
    slack_channel: Option<String>,

    /// Enable debug logging on stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recently updated issues.
    Issues(ListArgs),
    /// List recently updated pull requests.
    Pulls(ListArgs),
    /// Show one issue with its first comments.
    Issue(DetailArgs),
    /// Show one pull request with its first comments.
    Pull(DetailArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Repositories as `name`, `owner/name` or URL. Defaults to `github.repos`.
    repos: Vec<String>,

    /// Issue state.
    #[arg(long, value_enum)]
    state: Option<StateFilter>,

    /// Maximum number of items per repository.
    #[arg(long)]
    limit: Option<u32>,

    /// Only items updated at or after this time (RFC 3339); overrides --offset.
    #[arg(long, default_value = "")]
    since: String,

    /// Window start relative to now, e.g. -48h or -1h30m.
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<String>,

    /// Owner for bare repository names (overrides github.owner).
    #[arg(long)]
    owner: Option<String>,

    /// Assignees, separated by comma.
    #[arg(long, default_value = "")]
    assignees: String,

    /// Report failing repositories inline instead of aborting.
    #[arg(long)]
    partial: bool,
}

#[derive(Args)]
struct DetailArgs {
    /// Repository as `name`, `owner/name` or URL.
    repo: String,

    /// Issue or pull request number.
    id: u64,

    /// Maximum number of comments shown, oldest first.
    #[arg(long)]
    comments_limit: Option<usize>,

    /// Owner for a bare repository name (overrides github.owner).
    #[arg(long)]
    owner: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the report on stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if cli.debug { "debug" } else { "warn" })
            }),
        )
        .init();

    let mut config = loader::load_config(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli);

    gh_report::install_crypto_provider();

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(run(cli, config))
}

/// Global flags win over the config file.
fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(ref token) = cli.token {
        config.github.token = Some(token.clone());
    }
    if let Some(ref token) = cli.slack_token {
        config.slack.token = Some(token.clone());
    }
    if let Some(ref channel) = cli.slack_channel {
        config.slack.channel = Some(channel.clone());
    }
}

async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    tracing::info!("gh-report starting");
    let client = GitHubClient::new(&config.github.host, config.github.token.as_deref())?;

    let text = match cli.command {
        Commands::Issues(args) => list(client, &config, args, EntityKind::Issue).await?,
        Commands::Pulls(args) => list(client, &config, args, EntityKind::PullRequest).await?,
        Commands::Issue(args) => detail(&client, &config, args, EntityKind::Issue).await?,
        Commands::Pull(args) => detail(&client, &config, args, EntityKind::PullRequest).await?,
    };

    let relay = cli.slack.then(|| SlackRelay::new(&config.slack));
    let mut stdout = std::io::stdout().lock();
    deliver(&text, &mut stdout, relay.as_ref()).await?;
    Ok(())
}

async fn list(
    client: GitHubClient,
    config: &AppConfig,
    args: ListArgs,
    kind: EntityKind,
) -> Result<String> {
    let defaults = &config.defaults;
    let opts = ListOptions {
        kind,
        state: args.state.unwrap_or(defaults.state),
        limit: args.limit.unwrap_or(defaults.limit),
        since: args.since,
        offset: args.offset.unwrap_or_else(|| defaults.offset.clone()),
        owner: args
            .owner
            .or_else(|| config.github.owner.clone())
            .unwrap_or_default(),
        assignees: args.assignees,
        policy: if args.partial {
            FailurePolicy::Partial
        } else {
            defaults.on_error
        },
        concurrency: defaults.concurrency,
    };
    let text = app::run_list(
        Arc::new(client),
        &opts,
        &args.repos,
        &config.github.repos,
        Utc::now(),
    )
    .await?;
    Ok(text)
}

async fn detail(
    client: &GitHubClient,
    config: &AppConfig,
    args: DetailArgs,
    kind: EntityKind,
) -> Result<String> {
    let opts = DetailOptions {
        kind,
        owner: args
            .owner
            .or_else(|| config.github.owner.clone())
            .unwrap_or_default(),
        comments_limit: args
            .comments_limit
            .unwrap_or(config.defaults.comments_limit),
    };
    let text = app::run_detail(client, &opts, &args.repo, args.id, &config.github.repos).await?;
    Ok(text)
}
