//! Periodically closes tasks whose deadline has passed.
//!
//! Usage:
//!
//! ```text
//! overdue_closer --database-url postgres://localhost/taskboard [--interval-secs 900] [--once]
//! ```
//!
//! The first tick runs immediately, then one tick per interval until the
//! process receives Ctrl-C. Ticks that fall behind are skipped rather than
//! bunched. A failed tick is logged and the loop keeps going. A `.env` file in
//! the working directory is loaded first when present.

use clap::Parser;
use mockable::DefaultClock;
use std::sync::Arc;
use std::time::Duration;
use taskboard::storage::postgres::{self, PostgresTaskRepository};
use taskboard::task::services::OverdueTaskCloser;
use thiserror::Error;
use tokio::time::MissedTickBehavior;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "taskboard=info,overdue_closer=info";

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "overdue_closer")]
#[command(about = "Marks tasks past their deadline as done")]
#[command(version)]
struct Args {
    /// `PostgreSQL` connection URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Seconds between ticks.
    #[arg(long, env = "OVERDUE_CLOSE_INTERVAL_SECS", default_value_t = 900)]
    interval_secs: u64,

    /// Maximum number of pooled connections.
    #[arg(long, default_value_t = 2)]
    pool_size: u32,

    /// Run a single tick and exit.
    #[arg(long)]
    once: bool,
}

/// Errors that stop the closer before its loop starts.
#[derive(Debug, Error)]
enum CloserError {
    #[error("interval must be at least one second")]
    ZeroInterval,
    #[error("failed to open connection pool: {0}")]
    Pool(#[source] diesel::r2d2::PoolError),
    #[error("failed to listen for shutdown signal: {0}")]
    Signal(#[source] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        return Err(err.into());
    }
    init_tracing();

    let args = Args::parse();
    run(&args).await.map_err(Into::into)
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(args: &Args) -> Result<(), CloserError> {
    if args.interval_secs == 0 {
        return Err(CloserError::ZeroInterval);
    }

    let pool = postgres::connect(&args.database_url, args.pool_size).map_err(CloserError::Pool)?;
    let closer = OverdueTaskCloser::new(
        Arc::new(PostgresTaskRepository::new(pool)),
        Arc::new(DefaultClock),
    );

    if args.once {
        closer.run_tick().await;
        return Ok(());
    }

    info!(interval_secs = args.interval_secs, "overdue closer started");
    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            signal = &mut shutdown => {
                signal.map_err(CloserError::Signal)?;
                info!("shutdown requested; stopping overdue closer");
                return Ok(());
            }
            _ = ticker.tick() => {
                closer.run_tick().await;
            }
        }
    }
}
