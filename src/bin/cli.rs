use std::sync::Arc;

use anyhow::Context;
use bharat_digital::bharat_cache::{CacheConfig, RecordStore, RedisCache, keys};
use bharat_digital::bharat_config::{ScheduleConfig, UpstreamConfig};
use bharat_digital::bharat_ingest::{DataGovClient, StatsSource, rows_to_records};
use bharat_digital::bharat_models::PeriodType;
use bharat_digital::scheduler::Pipeline;
use bharat_digital::server::shutdown_signal;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "bharat-cli")]
#[command(about = "Bharat Digital CLI - pipeline and cache tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the fetch-transform-store pipeline once against Redis
    RunOnce {
        /// Skip the pause between fiscal years
        #[arg(long)]
        no_delay: bool,
    },
    /// Fetch and transform one fiscal year, printing the records without writing them
    Fetch {
        /// Fiscal year, e.g. 2024-2025
        #[arg(long)]
        fy: String,
    },
    /// Print the cache keys a district range query would read
    Keys {
        /// District code, e.g. 1810
        district: String,

        /// month or year
        #[arg(short = 't', long = "type", default_value = "year")]
        period: PeriodType,

        /// First calendar year
        #[arg(short = 's', long)]
        start: i32,

        /// End calendar year (exclusive)
        #[arg(short = 'e', long)]
        end: i32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bharat_digital=info,bharat_ingest=info".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::RunOnce { no_delay } => handle_run_once(no_delay).await,
        Commands::Fetch { fy } => handle_fetch(&fy).await,
        Commands::Keys {
            district,
            period,
            start,
            end,
        } => {
            for key in keys::district_range(&district, period, start, end) {
                println!("{key}");
            }
            Ok(())
        }
    }
}

async fn handle_run_once(no_delay: bool) -> anyhow::Result<()> {
    let upstream = UpstreamConfig::from_env();
    let mut schedule = ScheduleConfig::from_env();
    if no_delay {
        schedule.fy_delay = std::time::Duration::ZERO;
    }

    let cache = RedisCache::new(&CacheConfig::from_env().redis_url)
        .await
        .context("connecting to Redis")?;
    cache.ping().await.context("pinging Redis")?;

    let store: Arc<dyn RecordStore> = Arc::new(cache);
    let source: Arc<dyn StatsSource> = Arc::new(DataGovClient::new(&upstream)?);
    let pipeline = Pipeline::from_config(source, store, &upstream, &schedule);

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel.clone()));

    let report = pipeline.run(&cancel).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.failed > 0 {
        anyhow::bail!("{} of {} fiscal years failed", report.failed, report.attempted);
    }
    Ok(())
}

async fn handle_fetch(fy: &str) -> anyhow::Result<()> {
    let upstream = UpstreamConfig::from_env();
    let client = DataGovClient::new(&upstream)?;

    let rows = client
        .fetch_rows(&upstream.state_name, fy)
        .await
        .with_context(|| format!("fetching fiscal year {fy}"))?;
    let batch = rows_to_records(&rows).into_batch();

    eprintln!("{} rows -> {} records", rows.len(), batch.len());
    println!("{}", serde_json::to_string_pretty(&batch)?);
    Ok(())
}
