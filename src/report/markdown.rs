// src/report/markdown.rs
// =============================================================================
// This module writes the Markdown report.
//
// Layout:
//   # title naming the lookback window
//   Generated at: timestamp
//   ## one section per repository, in search order
//      - fixed list of fields (missing ones read "N/A")
//      ### Images / ### README (only when requested and images were found)
//
// The writer is generic over std::io::Write so tests can render into a
// Vec<u8>; save_report wraps it around the output file.
//
// README text is fetched lazily, one repository at a time, through the
// ReadmeSource trait. The real source is the GitHub client; tests plug in
// an in-memory map.
//
// Rust concepts:
// - Traits: ReadmeSource abstracts "where READMEs come from"
// - Generics: write_report works with any Write and any ReadmeSource
// - writeln!: Formatted writes that return io::Result, so ? works
// =============================================================================

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::fs::File;
use std::future::Future;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::images::extract_image_urls;
use crate::github::{count_or_na, GithubClient, RepositoryRecord};

/// Default report file name, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "trending_repos.md";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Anything that can hand us a repository's README text.
///
/// None means "no README": missing, inaccessible, or the fetch failed.
pub trait ReadmeSource {
    fn readme(&self, full_name: &str) -> impl Future<Output = Option<String>>;
}

impl ReadmeSource for GithubClient {
    async fn readme(&self, full_name: &str) -> Option<String> {
        self.fetch_readme(full_name).await
    }
}

/// Settings that shape the report body
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Lookback window the search used, shown in the title
    pub window_days: u32,
    /// Fetch READMEs and add Images/README subsections
    pub include_readme: bool,
}

// Writes the full report to `out`
//
// Parameters:
//   out: destination (the buffered file, or a Vec<u8> in tests)
//   repos: search results, rendered in this order
//   readmes: where README text comes from
//   options: window size and README switch
//   generated_at: timestamp for the header line
//
// The timestamp is passed in rather than read from the clock so the same
// inputs always produce the same bytes.
pub async fn write_report<W, R>(
    out: &mut W,
    repos: &[RepositoryRecord],
    readmes: &R,
    options: &ReportOptions,
    generated_at: NaiveDateTime,
) -> Result<()>
where
    W: Write,
    R: ReadmeSource,
{
    write_header(out, options.window_days, generated_at)?;

    for repo in repos {
        write_repository(out, repo)?;

        if options.include_readme {
            // A missing README only skips the extra subsections
            if let Some(readme) = readmes.readme(&repo.full_name).await {
                write_readme(out, repo, &readme)?;
            }
        }
    }

    Ok(())
}

// Creates (or truncates) `path` and writes the report into it
//
// The file is not written atomically: if the run is interrupted, a partial
// report is left behind. Prints the completion line on success.
pub async fn save_report<R: ReadmeSource>(
    path: &Path,
    repos: &[RepositoryRecord],
    readmes: &R,
    options: &ReportOptions,
    generated_at: NaiveDateTime,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    write_report(&mut writer, repos, readmes, options, generated_at)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✅ Data saved to {}", path.display());
    Ok(())
}

fn write_header<W: Write>(out: &mut W, window_days: u32, generated_at: NaiveDateTime) -> Result<()> {
    writeln!(
        out,
        "# GitHub Trending Repositories (Last {} Days)\n",
        window_days
    )?;
    writeln!(
        out,
        "Generated at: {}\n",
        generated_at.format(TIMESTAMP_FORMAT)
    )?;
    Ok(())
}

// Fixed field order: URL, stars, description, language, issues, forks,
// watchers, created, updated
fn write_repository<W: Write>(out: &mut W, repo: &RepositoryRecord) -> Result<()> {
    writeln!(out, "## {}", repo.name)?;
    writeln!(out, "- **URL**: [{}]({})", repo.name, repo.html_url)?;
    writeln!(out, "- **Stars**: {}", count_or_na(repo.stargazers_count))?;
    writeln!(out, "- **Description**: {}", repo.description_or_na())?;
    writeln!(out, "- **Language**: {}", repo.language_or_na())?;
    writeln!(out, "- **Open Issues**: {}", count_or_na(repo.open_issues_count))?;
    writeln!(out, "- **Forks**: {}", count_or_na(repo.forks_count))?;
    writeln!(out, "- **Watchers**: {}", count_or_na(repo.watchers_count))?;
    writeln!(out, "- **Created At**: {}", repo.created_date())?;
    writeln!(out, "- **Updated At**: {}\n", repo.updated_date())?;
    Ok(())
}

// README text is only written when at least one image was found. See
// DESIGN.md, "README without images".
fn write_readme<W: Write>(out: &mut W, repo: &RepositoryRecord, readme: &str) -> Result<()> {
    let images = extract_image_urls(readme, &repo.html_url);
    if images.is_empty() {
        return Ok(());
    }

    writeln!(out, "### Images")?;
    for image in &images {
        writeln!(out, "![Image]({})", image)?;
    }
    writeln!(out)?;

    writeln!(out, "### README")?;
    write!(out, "{}", readme)?;
    writeln!(out, "\n")?;
    Ok(())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is ReadmeSource a trait?
//    - The report doesn't care whether READMEs come from GitHub or a HashMap
//    - GithubClient implements it for real runs, FakeReadmes for tests
//
// 2. What is BufWriter?
//    - Collects many small writes into larger ones before hitting the disk
//    - flush() pushes out whatever is still buffered; we call it explicitly
//      so a write error is reported instead of lost when the writer drops
//
// 3. Why `W: Write` instead of `File`?
//    - Any byte sink works: File, Vec<u8>, stdout
//    - Tests render into a Vec<u8> and compare strings
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::cell::Cell;
    use std::collections::HashMap;

    /// In-memory README source that counts lookups
    #[derive(Default)]
    struct FakeReadmes {
        readmes: HashMap<String, String>,
        calls: Cell<usize>,
    }

    impl FakeReadmes {
        fn with(mut self, full_name: &str, text: &str) -> Self {
            self.readmes.insert(full_name.to_string(), text.to_string());
            self
        }
    }

    impl ReadmeSource for FakeReadmes {
        async fn readme(&self, full_name: &str) -> Option<String> {
            self.calls.set(self.calls.get() + 1);
            self.readmes.get(full_name).cloned()
        }
    }

    fn repo(name: &str) -> RepositoryRecord {
        RepositoryRecord {
            name: name.to_string(),
            full_name: format!("owner/{}", name),
            html_url: format!("https://github.com/owner/{}", name),
            description: Some(format!("The {} project", name)),
            language: Some("Rust".to_string()),
            stargazers_count: Some(1200),
            open_issues_count: Some(4),
            forks_count: Some(30),
            watchers_count: Some(1200),
            created_at: Some("2024-05-01T08:00:00Z".to_string()),
            updated_at: Some("2024-05-07T19:30:00Z".to_string()),
        }
    }

    fn fixed_clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 8)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap()
    }

    async fn render(repos: &[RepositoryRecord], readmes: &FakeReadmes, include_readme: bool) -> String {
        let options = ReportOptions {
            window_days: 7,
            include_readme,
        };
        let mut out = Vec::new();
        write_report(&mut out, repos, readmes, &options, fixed_clock())
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_full_section_layout() {
        let report = render(&[repo("alpha")], &FakeReadmes::default(), false).await;

        let expected = "\
# GitHub Trending Repositories (Last 7 Days)

Generated at: 2024-05-08 09:15:00

## alpha
- **URL**: [alpha](https://github.com/owner/alpha)
- **Stars**: 1200
- **Description**: The alpha project
- **Language**: Rust
- **Open Issues**: 4
- **Forks**: 30
- **Watchers**: 1200
- **Created At**: 2024-05-01
- **Updated At**: 2024-05-07

";
        assert_eq!(report, expected);
    }

    #[tokio::test]
    async fn test_sections_follow_input_order() {
        let repos = vec![repo("zeta"), repo("alpha"), repo("mid")];
        let report = render(&repos, &FakeReadmes::default(), false).await;

        assert_eq!(report.matches("\n## ").count(), 3);
        let zeta = report.find("## zeta").unwrap();
        let alpha = report.find("## alpha").unwrap();
        let mid = report.find("## mid").unwrap();
        assert!(zeta < alpha && alpha < mid);
    }

    #[tokio::test]
    async fn test_null_fields_render_na() {
        let mut bare = repo("bare");
        bare.description = None;
        bare.language = None;
        bare.forks_count = None;
        bare.updated_at = None;

        let report = render(&[bare], &FakeReadmes::default(), false).await;
        assert!(report.contains("- **Description**: N/A\n"));
        assert!(report.contains("- **Language**: N/A\n"));
        assert!(report.contains("- **Forks**: N/A\n"));
        assert!(report.contains("- **Updated At**: N/A\n"));
    }

    #[tokio::test]
    async fn test_readme_not_fetched_when_disabled() {
        let readmes = FakeReadmes::default().with("owner/alpha", "![x](x.png)");
        let report = render(&[repo("alpha")], &readmes, false).await;

        assert_eq!(readmes.calls.get(), 0);
        assert!(!report.contains("### README"));
    }

    #[tokio::test]
    async fn test_images_and_readme_sections() {
        let text = "# Alpha\n\n![shot](docs/shot.png)\n![cdn](https://cdn.example.com/x.png)\n";
        let readmes = FakeReadmes::default().with("owner/alpha", text);
        let report = render(&[repo("alpha")], &readmes, true).await;

        let expected_tail = "\
### Images
![Image](https://github.com/owner/docs/shot.png)
![Image](https://cdn.example.com/x.png)

### README
# Alpha

![shot](docs/shot.png)
![cdn](https://cdn.example.com/x.png)


";
        assert!(report.ends_with(expected_tail), "got:\n{}", report);
    }

    #[tokio::test]
    async fn test_failed_readme_keeps_metadata() {
        // No entry for owner/alpha: the fake behaves like a failed fetch
        let readmes = FakeReadmes::default();
        let report = render(&[repo("alpha")], &readmes, true).await;

        assert_eq!(readmes.calls.get(), 1);
        assert!(report.contains("- **Updated At**: 2024-05-07\n"));
        assert!(!report.contains("### Images"));
        assert!(!report.contains("### README"));
    }

    #[tokio::test]
    async fn test_readme_without_images_is_omitted() {
        let readmes = FakeReadmes::default().with("owner/alpha", "# Alpha\n\nNo pictures here.");
        let report = render(&[repo("alpha")], &readmes, true).await;

        assert!(!report.contains("### Images"));
        assert!(!report.contains("### README"));
        assert!(!report.contains("No pictures here."));
    }

    #[tokio::test]
    async fn test_fixed_clock_is_deterministic() {
        let repos = vec![repo("alpha"), repo("beta")];
        let readmes = FakeReadmes::default().with("owner/beta", "![b](b.png)");

        let first = render(&repos, &readmes, true).await;
        let second = render(&repos, &readmes, true).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_save_report_overwrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT);
        std::fs::write(&path, "stale content that must disappear").unwrap();

        let options = ReportOptions {
            window_days: 3,
            include_readme: false,
        };
        save_report(&path, &[repo("alpha")], &FakeReadmes::default(), &options, fixed_clock())
            .await
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# GitHub Trending Repositories (Last 3 Days)\n"));
        assert!(!written.contains("stale content"));
    }

    #[tokio::test]
    async fn test_empty_repo_list_writes_header_only() {
        let report = render(&[], &FakeReadmes::default(), true).await;
        assert_eq!(
            report,
            "# GitHub Trending Repositories (Last 7 Days)\n\nGenerated at: 2024-05-08 09:15:00\n\n"
        );
    }
}
