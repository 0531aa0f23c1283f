// src/config.rs
// =============================================================================
// Run configuration: flags first, interactive prompts for whatever is missing.
//
// Prompt order is fixed: token, lookback window, README choice.
// A lookback window that isn't a non-negative whole number is the one input
// error we don't recover from; it aborts the run.
//
// The prompt functions take any BufRead/Write pair instead of touching
// stdin/stdout directly, so tests can feed scripted answers.
// =============================================================================

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::cli::Cli;

const TOKEN_PROMPT: &str = "Please enter your GitHub API token: ";
const DAYS_PROMPT: &str = "Enter the number of days to look back: ";
const README_PROMPT: &str = "Do you want to include README files? (yes/no): ";

/// Everything one report run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub window_days: u32,
    pub include_readme: bool,
    pub output_path: PathBuf,
    pub api_url: String,
}

impl Config {
    /// Builds the config from parsed flags, prompting on `output` and
    /// reading answers from `input` for each value the flags left out.
    pub fn resolve<R: BufRead, W: Write>(cli: &Cli, input: &mut R, output: &mut W) -> Result<Self> {
        let token = match &cli.token {
            Some(token) => token.clone(),
            None => prompt(input, output, TOKEN_PROMPT)?.trim().to_string(),
        };

        let window_days = match cli.days {
            Some(days) => days,
            None => parse_days(&prompt(input, output, DAYS_PROMPT)?)?,
        };

        let include_readme = match cli.include_readme {
            Some(include) => include,
            None => is_yes(&prompt(input, output, README_PROMPT)?),
        };

        Ok(Self {
            token,
            window_days,
            include_readme,
            output_path: cli.output.clone(),
            api_url: cli.api_url.clone(),
        })
    }
}

/// Parses the lookback window typed at the prompt.
pub fn parse_days(answer: &str) -> Result<u32> {
    let answer = answer.trim();
    answer
        .parse::<u32>()
        .with_context(|| format!("Invalid number of days: '{}'", answer))
}

/// Only "yes" (any case, surrounding whitespace ignored) counts as yes.
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

// Prints the question, then reads one line with the line ending removed
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read answer from stdin")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why generic over BufRead and Write?
//    - main passes stdin().lock() and stdout()
//    - tests pass a byte slice (&[u8] implements BufRead) and a Vec<u8>
//    - the prompting logic is the same either way
//
// 2. Why does an empty token still work?
//    - the client simply omits the Authorization header
//    - GitHub then serves the request with unauthenticated rate limits
// -----------------------------------------------------------------------------
