// src/report/images.rs
// =============================================================================
// This module extracts image links from README text.
//
// We look for the Markdown image syntax ![alt](url) with a regex rather
// than a full Markdown parser: the report only needs the raw targets, in
// the order they appear, duplicates included.
//
// We use the `url` crate to resolve relative links (img/logo.png) against
// the repository's GitHub page, the same way a browser resolves an <img>
// src against the page it sits on.
//
// Rust concepts:
// - OnceLock: Compile the regex once, on first use
// - Iterators: captures_iter() walks every match in order
// - String slicing: Splitting a link into target and trailing title
// =============================================================================

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

// Non-greedy and line-bound: `.` does not cross newlines
const IMAGE_PATTERN: &str = r"!\[.*?\]\((.*?)\)";

fn image_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // The pattern is a constant known to be valid
    RE.get_or_init(|| Regex::new(IMAGE_PATTERN).unwrap())
}

// Returns every image target in a README, in order of appearance
//
// Parameters:
//   markdown: the README text (borrowed as &str)
//
// Returns: Vec<String> with the raw text between the parentheses
//
// Example:
//   "![logo](img/logo.png) and ![](https://x.io/a.svg)"
//   -> ["img/logo.png", "https://x.io/a.svg"]
pub fn extract_image_links(markdown: &str) -> Vec<String> {
    image_regex()
        .captures_iter(markdown)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

// Resolves a link against the repository page if it has no host part
//
// Parameters:
//   link: raw image target, possibly followed by a title ("img/x.png \"Logo\"")
//   page_url: the repository's GitHub page
//
// Returns: the absolute URL, with any title kept verbatim after it
//
// Passed through unchanged:
//   - links that already name a host (https://cdn.x/y.png, //cdn.x/y.png)
//   - links whose scheme differs from the page's (mailto:, data:, http:foo)
//   - anything when the page URL itself doesn't parse
//
// Example:
//   ("img/x.png \"Logo\"", "https://example.com/owner/repo")
//   -> "https://example.com/owner/img/x.png \"Logo\""
pub fn resolve_image_link(link: &str, page_url: &str) -> String {
    if has_network_location(link) {
        return link.to_string();
    }

    let base = match Url::parse(page_url) {
        Ok(base) => base,
        Err(_) => return link.to_string(),
    };

    if let Some((scheme, _)) = split_scheme(link) {
        if !scheme.eq_ignore_ascii_case(base.scheme()) {
            return link.to_string();
        }
    }

    // Only the target goes through the URL parser. The tail after the first
    // whitespace (a title, or the rest of a path with a space) is appended
    // as written, so it isn't percent-encoded.
    let (target, tail) = split_target(link);
    match base.join(target) {
        Ok(resolved) => format!("{}{}", resolved, tail),
        Err(_) => link.to_string(),
    }
}

// Extracts and resolves all image links of one README
pub fn extract_image_urls(markdown: &str, page_url: &str) -> Vec<String> {
    extract_image_links(markdown)
        .iter()
        .map(|link| resolve_image_link(link, page_url))
        .collect()
}

// True when the link carries an authority: "scheme://host..." or "//host..."
fn has_network_location(link: &str) -> bool {
    let rest = match split_scheme(link) {
        Some((_, rest)) => rest,
        None => link,
    };

    match rest.strip_prefix("//") {
        Some(authority) => {
            let end = authority.find(['/', '?', '#']).unwrap_or(authority.len());
            end > 0
        }
        None => false,
    }
}

// RFC 3986: scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"
fn split_scheme(link: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = link.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        Some((scheme, rest))
    } else {
        None
    }
}

// Splits "img/x.png \"Logo\"" into ("img/x.png", " \"Logo\"").
// A link with leading whitespace is kept whole.
fn split_target(link: &str) -> (&str, &str) {
    match link.find(char::is_whitespace) {
        Some(at) if at > 0 => link.split_at(at),
        _ => (link, ""),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is OnceLock?
//    - A cell that is written exactly once and then only read
//    - get_or_init() runs the closure the first time and caches the result
//    - Compiling a regex is slow; matching with a compiled one is fast
//
// 2. What does (.*?) mean in the pattern?
//    - A capture group: the part we want back from each match
//    - *? is "lazy": it stops at the first ")" instead of the last one
//    - Without it, two images on one line would merge into one match
//
// 3. What does Url::join do?
//    - Resolves a relative reference the way a browser does
//    - "img/x.png" against ".../owner/repo" replaces the last segment
//    - "/img/x.png" replaces the whole path
//
// 4. Why return (&str, &str) from split_target?
//    - Both halves borrow from the input, so nothing is copied
//    - The caller only allocates once, for the final String
// -----------------------------------------------------------------------------
