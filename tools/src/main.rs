//! coachdash: CSR training dashboard backend.
//!
//! Usage:
//!   coachdash serve --seed 42 --bind 0.0.0.0:3000
//!   coachdash serve --dataset fixed.json
//!   coachdash export --out snapshot.json --include-simulations
//!   coachdash summary --days 30

mod http;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coachdash_core::{
    generator::generate, snapshot::StaticSnapshot, types::Days, DashboardConfig,
    DashboardQuery, Dataset, FixedClock, SystemClock,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "coachdash")]
#[command(about = "Analytics backend for CSR sales-training simulations", version)]
struct Cli {
    /// JSON configuration file; defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Master seed for the record generator
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Serve a fixed dataset file instead of generating one
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the query surface over HTTP
    Serve {
        /// Listen address, overrides the config file
        #[arg(long)]
        bind: Option<String>,
    },
    /// Write every view for the configured windows to a static file
    Export {
        #[arg(long, default_value = "snapshot.json")]
        out: PathBuf,

        /// Also embed the raw simulation records
        #[arg(long)]
        include_simulations: bool,

        /// Also write the underlying dataset, loadable with --dataset
        #[arg(long)]
        save_dataset: Option<PathBuf>,
    },
    /// Print headline KPIs for one window
    Summary {
        #[arg(long)]
        days: Option<Days>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.generator.seed = Some(seed);
    }

    let dataset = match &cli.dataset {
        Some(path) => Dataset::from_json_file(path)
            .with_context(|| format!("Cannot load dataset {}", path.display()))?,
        None => generate(&config.generator, chrono::Utc::now())?,
    };
    let dataset = Arc::new(dataset);

    match cli.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind_addr = bind;
            }
            let query = DashboardQuery::new(dataset, Arc::new(SystemClock))
                .with_default_window(config.server.default_window_days);
            serve(query, &config.server.bind_addr).await
        }
        Command::Export {
            out,
            include_simulations,
            save_dataset,
        } => {
            // Pinned to the generation instant so re-exports of a fixed dataset agree.
            let clock = FixedClock::new(dataset.generated_at);
            let query = DashboardQuery::new(dataset.clone(), Arc::new(clock))
                .with_default_window(config.server.default_window_days);
            let snapshot =
                StaticSnapshot::build(&query, &config.server.export_windows, include_simulations)?;
            snapshot.write_to(&out)?;
            if let Some(path) = save_dataset {
                dataset.to_json_file(&path)?;
                log::info!("dataset {} written to {}", dataset.snapshot_id, path.display());
            }
            println!("snapshot {} -> {}", snapshot.snapshot_id, out.display());
            Ok(())
        }
        Command::Summary { days } => {
            let query = DashboardQuery::new(dataset, Arc::new(SystemClock))
                .with_default_window(config.server.default_window_days);
            print_summary(&query, days.unwrap_or(query.default_window()));
            Ok(())
        }
    }
}

async fn serve(query: DashboardQuery, bind_addr: &str) -> Result<()> {
    let dataset = query.dataset();
    log::info!(
        "serving dataset {} ({} simulations, {} csrs) on http://{bind_addr}",
        dataset.snapshot_id,
        dataset.simulations.len(),
        dataset.csrs.len()
    );

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Cannot bind {bind_addr}"))?;
    axum::serve(listener, http::router(query))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("cannot listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}

fn print_summary(query: &DashboardQuery, days: Days) {
    let dataset = query.dataset();
    let global = query.global_metrics(days);

    println!("=== DATASET ===");
    println!("  snapshot:     {}", dataset.snapshot_id);
    println!("  seed:         {}", dataset.seed);
    println!("  generated at: {}", dataset.generated_at.to_rfc3339());
    println!("  now:          {}", query.now().to_rfc3339());
    println!("  csrs:         {}", dataset.csrs.len());
    println!("  simulations:  {}", dataset.simulations.len());

    println!();
    println!("=== LAST {days} DAYS ===");
    println!("  simulations:  {}", global.metrics.total_simulations);
    println!("  success rate: {}%", global.metrics.success_rate);
    println!("  avg score:    {:.1}", global.metrics.avg_score);
    match &global.metrics.top_csr {
        Some(top) => println!("  top csr:      {} ({:.1})", top.csr.name, top.avg),
        None => println!("  top csr:      (no simulations in window)"),
    }

    println!();
    println!("=== RANKING ===");
    for (rank, entry) in query.csr_ranking(days).iter().enumerate() {
        println!(
            "  {:>2}. {:<20} avg {:>4.1} | success {:>3}% | sims {}",
            rank + 1,
            entry.csr.name,
            entry.avg_score,
            entry.success_rate,
            entry.total_sims
        );
    }

    println!();
    println!("=== CRITERIA ===");
    for dist in query.criteria_distribution(days) {
        println!(
            "  {:<22} success {:>3}% | failure {:>3}% | unknown {:>3}%",
            dist.name, dist.success_pct, dist.failure_pct, dist.unknown_pct
        );
    }
}
