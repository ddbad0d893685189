use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use milestone_board::models::{RepoSlug, Report};
use milestone_board::{
    build_report, report, Config, GitHubClient, ReportConfig, ReportPipeline, Snapshot,
    ZenHubClient,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "milestone-board")]
#[command(version = "0.1.0")]
#[command(about = "Summarize milestone points across a ZenHub board and its GitHub repositories")]
struct Args {
    /// Milestone title to report on (overrides MILESTONE)
    #[arg(short, long)]
    milestone: Option<String>,

    /// Repository as owner/name, repeatable (overrides REPOSITORIES)
    #[arg(short, long = "repo")]
    repos: Vec<RepoSlug>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Build the report from board.json and issues.json in this directory
    /// instead of calling GitHub and ZenHub
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Write the fetched board and issues to this directory
    #[arg(long)]
    save_snapshot: Option<PathBuf>,

    /// Maximum concurrent requests (overrides CONCURRENCY_LIMIT)
    #[arg(long)]
    concurrency: Option<usize>,

    /// Look up missing estimates issue by issue in ZenHub
    #[arg(long)]
    resolve_estimates: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("milestone_board=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(concurrency) = args.concurrency {
        config.concurrency_limit = concurrency.max(1);
    }
    if args.resolve_estimates {
        config.resolve_estimates = true;
    }
    let report_config = ReportConfig::resolve(&config, args.milestone.clone())?;

    let report = match args.snapshot {
        Some(ref dir) => {
            tracing::info!("Loading snapshot from: {}", dir.display());
            let snapshot = Snapshot::load(dir)?;
            build_report(&snapshot.board, snapshot.issues, &report_config.milestone)
        }
        None => fetch_report(&config, report_config, &args).await?,
    };

    output_report(&report, &args)?;

    Ok(())
}

async fn fetch_report(
    config: &Config,
    report_config: ReportConfig,
    args: &Args,
) -> anyhow::Result<Report> {
    let repos = if args.repos.is_empty() {
        config.repositories.clone()
    } else {
        args.repos.clone()
    };
    if repos.is_empty() {
        anyhow::bail!("No repositories given; pass --repo or set REPOSITORIES");
    }

    let github = GitHubClient::new(config.require_github_token()?)?;
    let (workspace_id, repo_id) = config.require_workspace()?;
    let zenhub = ZenHubClient::new(config.require_zenhub_token()?, workspace_id, repo_id)?;

    let pipeline = ReportPipeline::new(github, zenhub, report_config);
    tracing::info!(
        "Building report for milestone '{}' across {} repositories",
        pipeline.config().milestone,
        repos.len()
    );

    let snapshot = pipeline.collect(&repos).await?;
    if let Some(ref dir) = args.save_snapshot {
        snapshot.save(dir)?;
    }

    Ok(build_report(
        &snapshot.board,
        snapshot.issues,
        &pipeline.config().milestone,
    ))
}

fn output_report(report: &Report, args: &Args) -> anyhow::Result<()> {
    let output = match args.format {
        Format::Json => serde_json::to_string_pretty(&serde_json::json!({
            "generated_at": Utc::now(),
            "report": report,
        }))?,
        Format::Text => report::render(report),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    Ok(())
}
