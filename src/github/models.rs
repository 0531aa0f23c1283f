// src/github/models.rs
// =============================================================================
// Data structures for the two GitHub REST responses we consume.
//
// - GET /search/repositories  -> SearchResponse { items: [RepositoryRecord] }
// - GET /repos/{owner}/{repo}/readme -> ReadmeResponse { content, encoding }
//
// Only the fields the report renders are declared; serde ignores the rest.
// Everything the API may send as `null` is an Option so that one odd
// repository never fails deserialization of the whole page.
// =============================================================================

use serde::Deserialize;

/// Placeholder rendered for any field the API left empty.
pub const NOT_AVAILABLE: &str = "N/A";

/// One repository as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryRecord {
    /// Short name, e.g. "ripgrep"
    pub name: String,
    /// Owner-qualified identifier, e.g. "BurntSushi/ripgrep"
    pub full_name: String,
    /// Human-facing page, used as the base for relative image links
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    #[serde(default)]
    pub open_issues_count: Option<u64>,
    #[serde(default)]
    pub forks_count: Option<u64>,
    #[serde(default)]
    pub watchers_count: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl RepositoryRecord {
    pub fn description_or_na(&self) -> &str {
        text_or_na(self.description.as_deref())
    }

    pub fn language_or_na(&self) -> &str {
        text_or_na(self.language.as_deref())
    }

    /// Creation date as `YYYY-MM-DD` (first 10 characters of the timestamp)
    pub fn created_date(&self) -> String {
        date_prefix(self.created_at.as_deref())
    }

    /// Last update date as `YYYY-MM-DD`
    pub fn updated_date(&self) -> String {
        date_prefix(self.updated_at.as_deref())
    }
}

/// Body of the repository search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<RepositoryRecord>,
}

/// Body of the README endpoint. `content` is base64 wrapped at 60 columns.
#[derive(Debug, Deserialize)]
pub struct ReadmeResponse {
    pub content: String,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// Renders a count, or "N/A" when the API sent null.
pub fn count_or_na(count: Option<u64>) -> String {
    match count {
        Some(n) => n.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

// Empty strings count as missing, same as null
fn text_or_na(text: Option<&str>) -> &str {
    match text {
        Some(t) if !t.is_empty() => t,
        _ => NOT_AVAILABLE,
    }
}

// Truncates on characters, not bytes, so odd timestamps can't split a code point
fn date_prefix(timestamp: Option<&str>) -> String {
    match timestamp {
        Some(ts) if !ts.is_empty() => ts.chars().take(10).collect(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
