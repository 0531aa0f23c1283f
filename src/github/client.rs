// src/github/client.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Two calls are made:
// - Repository search: repos created after a cutoff date, most stars first
// - README contents: one request per repository, base64 payload
//
// Failures never escape this module as errors. The search degrades to an
// empty list and the README fetch to None, after printing what went wrong.
// The fallible versions (try_*) return anyhow::Result so the cause keeps
// its context until the point where we print it.
//
// Rust concepts:
// - async/await: Each request is awaited before the next one starts
// - Result vs Option: try_* keep the error, the public calls flatten it
// - Builder pattern: reqwest's RequestBuilder collects headers and params
// =============================================================================

use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{Days, NaiveDate};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use tracing::debug;

use super::models::{ReadmeResponse, RepositoryRecord, SearchResponse};

/// Public GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Maximum number of repositories a search returns
pub const SEARCH_LIMIT: usize = 10;

// GitHub rejects requests without a User-Agent
const USER_AGENT: &str = concat!("trending-report/", env!("CARGO_PKG_VERSION"));

const GITHUB_JSON: &str = "application/vnd.github+json";

// Builds the reqwest client shared by every GitHub call
//
// Returns: Client with our User-Agent set, or an error if the TLS backend
// can't be initialised
pub fn build_http_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to create HTTP client")
}

// Adds `Authorization: token <value>` to a request
//
// An empty token sends no Authorization header at all, so GitHub serves the
// request anonymously (lower rate limit) instead of rejecting "token ".
pub fn with_token(request: RequestBuilder, token: &str) -> RequestBuilder {
    if token.is_empty() {
        request
    } else {
        request.header(AUTHORIZATION, format!("token {}", token))
    }
}

// Builds the search query for repositories created after `today - days`
//
// Parameters:
//   today: the current local date
//   days: lookback window
//
// Example:
//   (2024-05-08, 7) -> "created:>2024-05-01"
pub fn search_query(today: NaiveDate, days: u32) -> String {
    let cutoff = today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN);
    format!("created:>{}", cutoff.format("%Y-%m-%d"))
}

// Decodes the `content` field of a README response
//
// GitHub wraps the base64 text with newlines, which the standard engine
// rejects, so all ASCII whitespace is removed first.
//
// Returns: the README as UTF-8 text, or an error for bad base64 / bad UTF-8
pub fn decode_readme(content: &str) -> Result<String> {
    let compact: String = content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .context("README content is not valid base64")?;

    String::from_utf8(bytes).context("README content is not valid UTF-8")
}

/// Authenticated client for one report run.
pub struct GithubClient {
    http: Client,
    api_url: String,
    token: String,
}

impl GithubClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        Ok(Self {
            http: build_http_client()?,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn get(&self, url: &str) -> RequestBuilder {
        with_token(self.http.get(url), &self.token).header(ACCEPT, GITHUB_JSON)
    }

    // Searches for the most starred repositories created in the last `days`
    //
    // Parameters:
    //   days: lookback window
    //   today: date the window counts back from
    //
    // Returns: up to SEARCH_LIMIT repositories, most stars first.
    // Empty on any failure (network, HTTP status, bad JSON).
    pub async fn search_trending(&self, days: u32, today: NaiveDate) -> Vec<RepositoryRecord> {
        match self.try_search_trending(days, today).await {
            Ok(repos) => {
                println!(
                    "📊 Found {} repositories created in the last {} days",
                    repos.len(),
                    days
                );
                repos
            }
            Err(e) => {
                println!("⚠️  An error occurred while searching repositories: {:#}", e);
                Vec::new()
            }
        }
    }

    pub async fn try_search_trending(
        &self,
        days: u32,
        today: NaiveDate,
    ) -> Result<Vec<RepositoryRecord>> {
        let url = format!("{}/search/repositories", self.api_url);
        let query = search_query(today, days);
        let per_page = SEARCH_LIMIT.to_string();
        debug!(%url, %query, "searching repositories");

        let response = self
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await
            .context("Search request failed")?
            .error_for_status()
            .context("Search returned an error status")?;

        let mut body: SearchResponse = response
            .json()
            .await
            .context("Failed to parse search response")?;

        body.items.truncate(SEARCH_LIMIT);
        Ok(body.items)
    }

    // Fetches and decodes a repository README
    //
    // Parameters:
    //   full_name: "owner/repo"
    //
    // Returns: Some(text), or None if the README is missing, inaccessible,
    // undecodable, or the request failed. The cause is printed.
    pub async fn fetch_readme(&self, full_name: &str) -> Option<String> {
        match self.try_fetch_readme(full_name).await {
            Ok(text) => Some(text),
            Err(e) => {
                println!(
                    "⚠️  An error occurred while fetching README for {}: {:#}",
                    full_name, e
                );
                None
            }
        }
    }

    pub async fn try_fetch_readme(&self, full_name: &str) -> Result<String> {
        let url = format!("{}/repos/{}/readme", self.api_url, full_name);
        debug!(%url, "fetching README");

        let response = self
            .get(&url)
            .send()
            .await
            .context("README request failed")?
            .error_for_status()
            .context("README request returned an error status")?;

        let body: ReadmeResponse = response
            .json()
            .await
            .context("Failed to parse README response")?;

        match body.encoding.as_deref() {
            None | Some("base64") => {}
            Some(other) => return Err(anyhow!("Unsupported README encoding: {}", other)),
        }

        let text = decode_readme(&body.content)?;
        debug!(repo = full_name, bytes = text.len(), "decoded README");
        Ok(text)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does error_for_status() do?
//    - reqwest only fails send() for transport problems (DNS, refused, TLS)
//    - a 404 or 500 is still a successful "send"
//    - error_for_status() turns any 4xx/5xx into an Err so ? catches it
//
// 2. What is .context()?
//    - From anyhow: wraps an error with a message describing what we tried
//    - Printing with {:#} shows the whole chain: "README request failed: ..."
//
// 3. Why both fetch_readme and try_fetch_readme?
//    - try_fetch_readme uses ? freely and returns the full error
//    - fetch_readme is what the report calls: it prints the error once and
//      gives back None, so one bad repository doesn't stop the report
//
// 4. What does truncate() do?
//    - Shortens a Vec in place, dropping elements past the given length
//    - Does nothing if the Vec is already short enough
// -----------------------------------------------------------------------------
