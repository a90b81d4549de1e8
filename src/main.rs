use std::str::FromStr;

use anyhow::{Context, Result};
use args::{Args, Command};
use clap::Parser;
use db::Db;
use migration::RevisionGraph;
use tracing::*;
use tracing_subscriber::prelude::*;

mod args;
mod db;

fn main() -> Result<()> {
    std::env::set_var("RUST_BACKTRACE", "1");

    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer().with_filter(
                tracing_subscriber::filter::LevelFilter::from_str(&args.log_level)
                    .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO),
            ),
        )
        .with(
            sentry::integrations::tracing::layer().event_filter(|md| match *md.level() {
                Level::TRACE => sentry::integrations::tracing::EventFilter::Ignore,
                _ => sentry::integrations::tracing::EventFilter::Breadcrumb,
            }),
        )
        .try_init()?;

    let _sentry_guard = match std::env::var("SENTRY_DSN") {
        Ok(d) => {
            let guard = sentry::init((
                d,
                sentry::ClientOptions {
                    release: sentry::release_name!(),
                    attach_stacktrace: true,
                    ..Default::default()
                },
            ));
            Some(guard)
        }
        Err(e) => {
            warn!("can't get SENTRY_DSN: {:?}", e);
            None
        }
    };

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(_main(args))
}

async fn _main(args: Args) -> Result<()> {
    let graph = migration::resolve().context("invalid revision chain")?;
    debug!(
        base = ?graph.base().map(|r| r.id),
        head = ?graph.head().map(|r| r.id),
        "resolved {} revisions",
        graph.len()
    );

    let result = run(args, &graph).await;
    if let Err(e) = &result {
        error!("{e:#}");
        sentry::integrations::anyhow::capture_anyhow(e);
    }
    result
}

async fn run(args: Args, graph: &RevisionGraph) -> Result<()> {
    match args.command {
        Command::Upgrade { steps } => connect(args.database_url).await?.upgrade(steps).await?,
        Command::Downgrade { steps } => {
            connect(args.database_url).await?.downgrade(steps).await?
        }
        Command::Status => {
            for (revision, applied) in connect(args.database_url).await?.status().await? {
                let status = if applied { "applied" } else { "pending" };
                println!("{revision} {status}");
            }
        }
        Command::History => {
            for revision in graph.revisions() {
                println!(
                    "{} -> {}",
                    revision.down_revision.unwrap_or("<base>"),
                    revision.id
                );
            }
        }
    }

    Ok(())
}

async fn connect(db_url: Option<String>) -> Result<Db> {
    let db_url = db_url.context("DATABASE_URL is not set")?;
    Db::connect(&db_url).await
}
