// src/report/mod.rs
// =============================================================================
// This module turns search results into the Markdown report.
//
// Submodules:
// - images: Finds ![alt](url) links in README text and resolves them
// - markdown: Writes the report file section by section
// =============================================================================

mod images;
mod markdown;

pub use markdown::{save_report, ReportOptions, DEFAULT_OUTPUT};
