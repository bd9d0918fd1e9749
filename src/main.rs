use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use cloudflare_status_aggregator::{
    aggregator::aggregate,
    cli::{Cli, Commands, SourceArgs},
    config::Settings,
    listing::{self, DataCenterQuery},
    monitor::{stdin_refresh_requests, StatusMonitor},
    report::{self, OutputFormat},
    snapshot::Snapshot,
    statuspage::{SnapshotSource, StatusPageClient},
    utils::setup_shutdown_handler,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load_or_default(cli.command.config_path().map(|p| p.as_path()))
        .context("Failed to load configuration")?;

    init_logging(&settings);
    info!("Cloudflare Status Aggregator v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Summary { source } => {
            let snapshot = fetch_once(&settings, &source).await?;
            let summary = aggregate(&snapshot);

            match source.format {
                OutputFormat::Json => println!("{}", report::to_json(&summary)?),
                OutputFormat::Text => println!("{}", report::render_summary(&summary, Utc::now())),
            }
        }

        Commands::Watch { source } => {
            let snapshot_source = SnapshotSource::from_settings(&settings, source.input.as_deref())?;
            let monitor = StatusMonitor::new(settings, snapshot_source);
            let format = source.format;

            println!("Watching status. Press Enter to refresh, Ctrl-C to stop.");

            monitor
                .run(stdin_refresh_requests(), setup_shutdown_handler(), |outcome| match outcome {
                    Ok(refresh) => {
                        let rendered = match format {
                            OutputFormat::Json => report::to_json(&refresh.summary)
                                .unwrap_or_else(|e| report::error_json(&e)),
                            OutputFormat::Text => report::render_summary(&refresh.summary, Utc::now()),
                        };
                        println!("\n{}", rendered);
                    }
                    Err(e) => {
                        println!("\nConnection error: unable to fetch status data ({})", e);
                        println!("Press Enter to retry.");
                    }
                })
                .await?;

            info!("Shutdown complete");
        }

        Commands::Datacenters {
            source,
            search,
            status,
            sort,
            desc,
        } => {
            let snapshot = fetch_once(&settings, &source).await?;
            let query = DataCenterQuery {
                search,
                status,
                sort,
                descending: desc,
            };
            let rows = listing::query_data_centers(&snapshot, &query);

            match source.format {
                OutputFormat::Json => println!("{}", report::to_json(&rows)?),
                OutputFormat::Text => println!("{}", report::render_data_centers(&rows)),
            }
        }

        Commands::Services { source } => {
            let snapshot = fetch_once(&settings, &source).await?;
            let services = listing::services(&snapshot);

            match source.format {
                OutputFormat::Json => println!("{}", report::to_json(&services)?),
                OutputFormat::Text => println!("{}", report::render_services(&services)),
            }
        }

        Commands::Incidents { source } => {
            let snapshot = fetch_once(&settings, &source).await?;
            let incidents = listing::active_incidents(&snapshot);

            match source.format {
                OutputFormat::Json => println!("{}", report::to_json(&incidents)?),
                OutputFormat::Text => println!("{}", report::render_incidents(&incidents, Utc::now())),
            }
        }

        Commands::Maintenance { source } => {
            let snapshot = fetch_once(&settings, &source).await?;
            let windows = listing::active_maintenance(&snapshot);

            match source.format {
                OutputFormat::Json => println!("{}", report::to_json(&windows)?),
                OutputFormat::Text => println!("{}", report::render_maintenance(&windows)),
            }
        }

        Commands::TestApi { .. } => {
            let client = StatusPageClient::new(&settings)?;
            let page_name = client
                .test_connection()
                .await
                .with_context(|| format!("Status API at {} is not reachable", client.base_url()))?;

            println!("✓ Status API connection successful ({})", page_name);
        }
    }

    Ok(())
}

async fn fetch_once(settings: &Settings, args: &SourceArgs) -> anyhow::Result<Snapshot> {
    let source = SnapshotSource::from_settings(settings, args.input.as_deref())?;
    let snapshot = source
        .fetch()
        .await
        .with_context(|| format!("Unable to fetch status data from {}", source.describe()))?;
    Ok(snapshot)
}

fn init_logging(settings: &Settings) {
    let log_level = settings.logging.level.as_str();
    let log_format = settings.logging.format.as_str();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    // stdout carries the report itself
    match log_format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
