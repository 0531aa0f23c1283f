// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Running `trending-report` with no arguments asks for everything
// interactively (token, days, README choice). Each question can be answered
// up front with a flag instead, which makes the tool scriptable:
//
//   trending-report --token ghp_xxx --days 7 --include-readme yes
//
// The `check` subcommand only tests whether the GitHub API is reachable.
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::github::DEFAULT_API_URL;
use crate::report::DEFAULT_OUTPUT;

#[derive(Parser, Debug)]
#[command(
    name = "trending-report",
    version,
    about = "Write a Markdown report of recently created, highly starred GitHub repositories",
    long_about = "trending-report searches GitHub for repositories created in the last N days, \
                  sorted by stars, and writes their details (optionally with README text and \
                  images) to a Markdown file. Anything not given as a flag is asked for interactively."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// GitHub API token, sent as `Authorization: token <value>`
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Only include repositories created within this many days
    #[arg(long)]
    pub days: Option<u32>,

    /// Include README text and images: yes or no
    #[arg(long, value_name = "yes|no", value_parser = parse_yes_no_flag)]
    pub include_readme: Option<bool>,

    /// Report file, overwritten on every run
    #[arg(long, short, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// GitHub API root (change for GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Print request-level debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Check that the GitHub API is reachable, with and without the token
    ///
    /// Example: trending-report check --token ghp_xxx
    Check,
}

fn parse_yes_no_flag(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" => Ok(true),
        "no" => Ok(false),
        other => Err(format!("expected 'yes' or 'no', got '{}'", other)),
    }
}
