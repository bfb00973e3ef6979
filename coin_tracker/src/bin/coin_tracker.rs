use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use coin_ingestor::{
    io::{
        csv::CsvHistorySink,
        json::JsonReportSink,
        sink::{DataSink, OutputTarget},
    },
    notify::{Notifier, TokioPacer, telegram::TelegramNotifier},
    providers::coingecko_rest::CoinGeckoProvider,
};
use coin_tracker::{
    clock::SystemClock,
    config::AppConfig,
    pipeline::{self, CycleOptions, CycleOutcome},
    render,
    store::{SqliteStore, TimeSeriesStore},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Track top crypto coins, keep price history and raise move alerts")]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// SQLite database path or URL; overrides config and DATABASE_URL.
    #[arg(long, global = true, value_name = "URL")]
    database: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run one fetch-store-alert cycle and print the batch.
    Fetch {
        #[arg(long)]
        top_n: Option<u32>,
        #[arg(long)]
        vs_currency: Option<String>,
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Run cycles until interrupted.
    Watch {
        #[arg(long)]
        interval_secs: Option<u64>,
    },
    /// Show the most recent stored batch.
    Latest {
        /// Rows to show; defaults to the configured top_n.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Summarize one coin's trailing window.
    Stats {
        coin_id: String,
        #[arg(long)]
        hours: Option<u32>,
    },
    /// Write one coin's trailing window to a file.
    Export {
        coin_id: String,
        #[arg(long)]
        hours: Option<u32>,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Fetch and list alerts without storing or sending them.
    Alerts {
        #[arg(long)]
        threshold: Option<f64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

fn notifier_from_env() -> Option<TelegramNotifier> {
    match TelegramNotifier::from_env() {
        Ok(Some(n)) => Some(n),
        Ok(None) => {
            info!("TELEGRAM_BOT_TOKEN not set; notifications disabled");
            None
        }
        Err(e) => {
            warn!(error = %e, "telegram misconfigured; notifications disabled");
            None
        }
    }
}

fn cycle_options(cfg: &AppConfig) -> CycleOptions {
    CycleOptions {
        params: cfg.markets_params(),
        alert_threshold_pct: cfg.alert_threshold_pct,
        notify_spacing: cfg.notify_spacing(),
    }
}

fn latest_limit(flag: Option<usize>, cfg: &AppConfig) -> usize {
    flag.unwrap_or(cfg.top_n as usize)
}

fn print_outcome(outcome: &CycleOutcome) {
    match outcome {
        CycleOutcome::SourceUnavailable => println!("market data unavailable; nothing stored"),
        CycleOutcome::Completed(report) => {
            print!("{}", render::render_batch_table(&report.batch));
            println!("stored {} of {} snapshots", report.stored, report.fetched);
            print!("{}", render::render_alerts(&report.alerts));
            if let Some(d) = report.dispatch {
                println!("notifications: {} sent, {} failed", d.sent, d.failed);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut cfg = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(db) = cli.database {
        cfg.database_url = db;
    }

    match cli.cmd {
        Cmd::Fetch {
            top_n,
            vs_currency,
            threshold,
        } => {
            if let Some(v) = top_n {
                cfg.top_n = v;
            }
            if let Some(v) = vs_currency {
                cfg.vs_currency = v;
            }
            if let Some(v) = threshold {
                cfg.alert_threshold_pct = v;
            }
            cfg.validate()?;

            let source = CoinGeckoProvider::with_base_url(&cfg.api_base_url)?;
            let mut store = SqliteStore::open_default(&cfg.database_url)?;
            let notifier = notifier_from_env();

            let outcome = pipeline::run_cycle(
                &source,
                &mut store,
                notifier.as_ref().map(|n| n as &dyn Notifier),
                &TokioPacer,
                &cycle_options(&cfg),
                &SystemClock,
            )
            .await?;
            print_outcome(&outcome);
        }

        Cmd::Watch { interval_secs } => {
            if let Some(v) = interval_secs {
                cfg.fetch_interval_secs = v;
            }
            cfg.validate()?;

            let source = CoinGeckoProvider::with_base_url(&cfg.api_base_url)?;
            let mut store = SqliteStore::open_default(&cfg.database_url)?;
            let notifier = notifier_from_env();
            let opts = cycle_options(&cfg);
            info!(
                interval_secs = cfg.fetch_interval_secs,
                top_n = cfg.top_n,
                "watching markets"
            );

            loop {
                let outcome = pipeline::run_cycle(
                    &source,
                    &mut store,
                    notifier.as_ref().map(|n| n as &dyn Notifier),
                    &TokioPacer,
                    &opts,
                    &SystemClock,
                )
                .await?;
                if let CycleOutcome::Completed(report) = &outcome {
                    info!(
                        stored = report.stored,
                        alerts = report.alerts.len(),
                        "cycle complete"
                    );
                }

                tokio::select! {
                    _ = tokio::time::sleep(cfg.fetch_interval()) => {}
                    _ = tokio::signal::ctrl_c() => {
                        info!("interrupted; stopping");
                        break;
                    }
                }
            }
        }

        Cmd::Latest { limit } => {
            let mut store = SqliteStore::open_default(&cfg.database_url)?;
            let latest = store.latest_batch(latest_limit(limit, &cfg))?;
            match latest.first() {
                None => println!("no snapshots stored yet"),
                Some(first) => {
                    println!(
                        "batch recorded {}",
                        first.recorded_at.format("%Y-%m-%d %H:%M:%S UTC")
                    );
                    let batch: Vec<_> = latest.into_iter().map(|s| s.snapshot).collect();
                    print!("{}", render::render_batch_table(&batch));
                }
            }
        }

        Cmd::Stats { coin_id, hours } => {
            if let Some(v) = hours {
                cfg.history_hours = v;
            }
            cfg.validate()?;

            let mut store = SqliteStore::open_default(&cfg.database_url)?;
            let (summary, _) = pipeline::summarize(&mut store, &coin_id, cfg.history_hours)?;
            print!(
                "{}",
                render::render_summary(&coin_id, cfg.history_hours, summary.as_ref())
            );
        }

        Cmd::Export {
            coin_id,
            hours,
            format,
            output,
        } => {
            if let Some(v) = hours {
                cfg.history_hours = v;
            }
            cfg.validate()?;

            let mut store = SqliteStore::open_default(&cfg.database_url)?;
            let report =
                pipeline::build_report(&mut store, &SystemClock, &coin_id, cfg.history_hours)?;
            let target = match output {
                Some(path) => OutputTarget::File(path),
                None => OutputTarget::Dir(cfg.export_dir.clone()),
            };
            let path = match format {
                ExportFormat::Csv => CsvHistorySink::new(target).write(&report)?,
                ExportFormat::Json => JsonReportSink::new(target).write(&report)?,
            };
            println!(
                "exported {} samples to {}",
                report.history.len(),
                path.display()
            );
        }

        Cmd::Alerts { threshold } => {
            if let Some(v) = threshold {
                cfg.alert_threshold_pct = v;
            }
            cfg.validate()?;

            let source = CoinGeckoProvider::with_base_url(&cfg.api_base_url)?;
            let alerts =
                pipeline::preview_alerts(&source, cfg.markets_params(), cfg.alert_threshold_pct)
                    .await?;
            print!("{}", render::render_alerts(&alerts));
        }
    }

    Ok(())
}
