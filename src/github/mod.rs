// src/github/mod.rs
// =============================================================================
// This module handles everything that talks to GitHub.
//
// Currently implements:
// - Searching for recently created repositories, sorted by stars
// - Fetching and base64-decoding a repository's README
// - A connectivity check against the API root
// =============================================================================

mod client;
mod health;
mod models;

#[cfg(test)]
mod test_server;

pub use client::{GithubClient, DEFAULT_API_URL};
pub use health::run_check;
pub use models::{count_or_na, RepositoryRecord};
