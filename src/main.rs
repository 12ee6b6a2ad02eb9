use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use contest_tracker::api::{build_router, state::AppState};
use contest_tracker::bookmarks::Bookmarks;
use contest_tracker::config::AppConfig;
use contest_tracker::fetch::{FetcherConfig, SourceSet};
use contest_tracker::listing::{collect_listing, ListingRequest};
use contest_tracker::models::{NormalizedContest, PlatformSelector, StatusCounts};

#[derive(Parser)]
#[command(name = "contest-tracker")]
#[command(about = "Track programming contests across CodeChef, Codeforces and LeetCode")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Fetch and print the contest listing
    List {
        /// Platform slug, or "all"
        #[arg(long)]
        platform: Option<String>,

        /// Search by name, platform or id
        #[arg(long)]
        query: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(Path::new(&cli.config))
        .with_context(|| format!("loading config from {}", cli.config))?;

    // Initialize tracing
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    tracing::info!("Starting contest-tracker v{}", env!("CARGO_PKG_VERSION"));

    let fetcher_config = FetcherConfig::try_from(&config.upstream)?;
    let sources = SourceSet::http(&fetcher_config)?;
    tracing::info!("Upstream API: {}", fetcher_config.base_url);

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let app = build_router(AppState::new(config, sources));
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::List {
            platform,
            query,
            json,
        } => {
            let selector = PlatformSelector::parse(platform.as_deref());
            if selector == PlatformSelector::Bookmarks {
                anyhow::bail!("Bookmarks live in the browser cookie; use the API to list them");
            }
            let request = ListingRequest {
                selector,
                query: query.as_deref(),
                completed_per_platform: config.display.completed_per_platform,
            };
            let listing =
                collect_listing(&sources, &Bookmarks::default(), &request, Utc::now()).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                print_table(&listing);
            }
        }
    }

    Ok(())
}

fn print_table(listing: &[NormalizedContest]) {
    let counts = StatusCounts::from_statuses(listing.iter().map(|c| c.status));
    println!(
        "{} ongoing, {} upcoming, {} completed",
        counts.ongoing, counts.upcoming, counts.completed
    );
    println!();
    println!(
        "{:<10} {:<11} {:<17} {:<17} NAME",
        "STATUS", "PLATFORM", "START (UTC)", "END (UTC)"
    );
    for contest in listing {
        println!(
            "{:<10} {:<11} {:<17} {:<17} {}{}",
            contest.status.as_str(),
            contest.platform(),
            contest.start_instant.format("%Y-%m-%d %H:%M").to_string(),
            contest.end_instant.format("%Y-%m-%d %H:%M").to_string(),
            contest.name(),
            if contest.degraded { " (?)" } else { "" }
        );
    }
}
