// src/github/health.rs
// =============================================================================
// Connectivity self-check for the GitHub API.
//
// Sends a plain GET to the API root, first without credentials and then
// (if we have one) with the token, and prints whether each probe worked.
// Nothing here affects the report; it's a diagnostic for "is it me or them?".
//
// Rust concepts:
// - Enums with data: ApiStatus carries the status code or error text
// - Option::filter: Skip the second probe when the token is empty
// =============================================================================

use anyhow::Result;
use reqwest::Client;
use tracing::debug;

use super::client::{build_http_client, with_token};

/// Outcome of a single probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    /// HTTP 200
    Accessible,
    /// Got a response, but not 200
    Failed(u16),
    /// The request never completed (DNS, connect, TLS...)
    Error(String),
}

// Probes the API root once
//
// Parameters:
//   http: shared reqwest client
//   api_url: API root, e.g. "https://api.github.com"
//   token: Some(token) to authenticate, None for an anonymous request
//
// Returns: Accessible on HTTP 200, Failed(code) on any other status,
// Error(message) when no response arrived
pub async fn probe(http: &Client, api_url: &str, token: Option<&str>) -> ApiStatus {
    let url = format!("{}/", api_url.trim_end_matches('/'));
    let request = match token {
        Some(token) => with_token(http.get(&url), token),
        None => http.get(&url),
    };

    match request.send().await {
        Ok(response) => {
            let status = response.status();
            debug!(%url, status = status.as_u16(), "probe response");
            if status == reqwest::StatusCode::OK {
                ApiStatus::Accessible
            } else {
                ApiStatus::Failed(status.as_u16())
            }
        }
        Err(e) => ApiStatus::Error(e.to_string()),
    }
}

// Human-readable line for a probe result
//
// Example:
//   (Failed(401), true) -> "Failed to access GitHub API with token. Status code: 401"
pub fn describe(status: &ApiStatus, with_token: bool) -> String {
    let suffix = if with_token { " with token" } else { "" };
    match status {
        ApiStatus::Accessible => format!("GitHub API is accessible{}.", suffix),
        ApiStatus::Failed(code) => format!(
            "Failed to access GitHub API{}. Status code: {}",
            suffix, code
        ),
        ApiStatus::Error(message) => format!("An error occurred: {}", message),
    }
}

// Runs both probes and prints the results. Always returns Ok: an
// unreachable API is a finding, not an error.
pub async fn run_check(api_url: &str, token: Option<&str>) -> Result<()> {
    let http = build_http_client()?;

    println!("🔍 Checking connectivity to {}", api_url);

    let anonymous = probe(&http, api_url, None).await;
    println!("   {}", describe(&anonymous, false));

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        let authenticated = probe(&http, api_url, Some(token)).await;
        println!("   {}", describe(&authenticated, true));
    }

    Ok(())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why an enum instead of a bool?
//    - "reachable" has three outcomes: OK, answered-but-refused, no answer
//    - an enum names each one and lets describe() match on them exhaustively
//
// 2. Why does probe() not return Result?
//    - a failed request is exactly what we are here to report
//    - turning it into ApiStatus::Error keeps the caller simple
// -----------------------------------------------------------------------------
