// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Either run the connectivity check, or:
// 3. Fill in missing settings from interactive prompts
// 4. Search GitHub, then write the report (fetching READMEs as we go)
//
// Everything runs one request at a time. Network problems are reported and
// degrade the report; only bad input or a failed file write ends the run
// with an error (exit code 1).
// =============================================================================

mod cli;
mod config;
mod github;
mod report;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::Config;
use github::GithubClient;
use report::ReportOptions;

// One outstanding request at a time, so a single-threaded runtime is enough
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Check) => github::run_check(&cli.api_url, cli.token.as_deref()).await,
        None => {
            let stdin = io::stdin();
            let config = Config::resolve(&cli, &mut stdin.lock(), &mut io::stdout())?;
            generate_report(&config).await
        }
    }
}

async fn generate_report(config: &Config) -> Result<()> {
    println!(
        "🔍 Searching for repositories created in the last {} days",
        config.window_days
    );

    let client = GithubClient::new(&config.api_url, &config.token)?;
    let repos = client
        .search_trending(config.window_days, Local::now().date_naive())
        .await;

    let options = ReportOptions {
        window_days: config.window_days,
        include_readme: config.include_readme,
    };

    report::save_report(
        &config.output_path,
        &repos,
        &client,
        &options,
        Local::now().naive_local(),
    )
    .await
}

// RUST_LOG wins when set; otherwise --verbose turns on our debug events
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "trending_report=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
