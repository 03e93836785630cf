//! hirrd - Job board for the terminal

mod display;
mod formatting;
mod listing;
mod models;
mod session;
mod source;
mod tui;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::listing::{
    FetchStatus, ListingController, ListingEvent, spawn_company_fetcher, spawn_job_fetcher,
};
use crate::models::BoardConfig;
use crate::session::{Session, SessionProfile};
use crate::source::{CatalogSource, JobSource};

#[derive(Parser)]
#[command(name = "hirrd")]
#[command(about = "Browse and filter job listings from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Catalog file to read jobs from (overrides the config file)
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI mode (default)
    #[command(alias = "ui")]
    Tui,

    /// List one page of jobs
    Jobs {
        /// Case-insensitive substring of the job title
        #[arg(short, long)]
        search: Option<String>,

        /// Exact job location (e.g. Karnataka)
        #[arg(short, long)]
        location: Option<String>,

        /// Company id
        #[arg(short, long)]
        company: Option<String>,

        /// Page to show
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// List every company
    #[command(alias = "co")]
    Companies,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Tui));

    init_logging(interactive)?;

    let (mut config, warnings) = BoardConfig::load()?;
    if let Some(path) = cli.catalog {
        config.source.catalog = Some(path);
    }

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Some(Commands::Jobs {
            search,
            location,
            company,
            page,
        }) => {
            print_warnings(&warnings);
            let output = rt.block_on(handle_jobs_command(
                &config,
                search.as_deref(),
                location.as_deref(),
                company.as_deref(),
                page,
            ))?;
            println!("{}", output);
        }
        Some(Commands::Companies) => {
            print_warnings(&warnings);
            let output = rt.block_on(handle_companies_command(&config))?;
            println!("{}", output);
        }
        Some(Commands::Tui) | None => {
            // Warnings show in the TUI status bar
            rt.block_on(tui::run_tui(config, warnings))?;
        }
    }

    Ok(())
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}

/// Log filter from HIRRD_LOG (default "warn").
///
/// The CLI logs to stderr. The TUI owns the terminal, so it only logs when
/// HIRRD_LOG_FILE names a file to write to.
fn init_logging(interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env("HIRRD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    if let Some(path) = std::env::var_os("HIRRD_LOG_FILE") {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("could not open log file {}", PathBuf::from(&path).display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }
    Ok(())
}

fn catalog_source(config: &BoardConfig) -> CatalogSource {
    CatalogSource::new(config.catalog_path())
        .with_latency(Duration::from_millis(config.source.latency_ms))
}

fn session_profile(config: &BoardConfig) -> SessionProfile {
    SessionProfile {
        signed_in: config.session.signed_in,
        role: config.session.role,
    }
}

fn is_settled(status: FetchStatus) -> bool {
    matches!(status, FetchStatus::Success | FetchStatus::Failure)
}

async fn handle_jobs_command(
    config: &BoardConfig,
    search: Option<&str>,
    location: Option<&str>,
    company: Option<&str>,
    page: usize,
) -> Result<String> {
    let source = Arc::new(catalog_source(config));
    // Headless runs skip the sign-in wait
    let session = Session::ready(session_profile(config));

    let mut listing = ListingController::new(config.listing.items_per_page, session.subscribe_ready());
    listing.set_search(search.unwrap_or_default());
    listing.set_location(location.unwrap_or_default());
    listing.set_company(company.unwrap_or_default());

    let (tx, mut rx) = mpsc::channel::<ListingEvent>(8);
    let cancel = CancellationToken::new();
    let jobs_task = spawn_job_fetcher(
        Arc::clone(&source),
        listing.subscribe_filters(),
        session.subscribe_ready(),
        tx.clone(),
        cancel.clone(),
    );
    let companies_task =
        spawn_company_fetcher(source, session.subscribe_ready(), tx, cancel.clone());

    while !(is_settled(listing.jobs().status()) && is_settled(listing.companies().status())) {
        match rx.recv().await {
            Some(event) => {
                listing.apply(event);
            }
            None => break,
        }
    }
    cancel.cancel();
    let _ = tokio::join!(jobs_task, companies_task);

    if let Some(err) = listing.jobs().error() {
        bail!("Error loading jobs: {}", err);
    }
    let Some(jobs) = listing.jobs().data() else {
        bail!("Job fetch did not complete");
    };
    let total_jobs = jobs.len();

    if page != 1 && !listing.go_to_page(page) {
        tracing::warn!(
            "Page {} is out of range (1..={}), showing page {}",
            page,
            listing.pages().total_pages(),
            listing.pages().current_page()
        );
    }
    listing.settle();

    let companies = listing.companies().data().unwrap_or_default();
    let filters = listing.filters();

    Ok(format!(
        "{}\n{}\n{}",
        display::format_filters(&filters, companies),
        display::format_jobs(
            listing.page_items(),
            companies,
            config.display.title_max_length,
            chrono::Utc::now(),
        ),
        display::format_page_footer(listing.pages(), total_jobs)
    ))
}

async fn handle_companies_command(config: &BoardConfig) -> Result<String> {
    let companies = catalog_source(config).fetch_companies().await?;
    Ok(display::format_companies(&companies))
}
