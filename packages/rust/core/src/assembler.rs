//! Page data assembler.
//!
//! Fetches each listed repository's README, slices out its overview, renders
//! it to HTML, then does the same for the profile README's intro. Runs
//! strictly sequentially in list order.

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, instrument, warn};

use vibesite_github::ReadmeSource;
use vibesite_markdown::{HEADING_ABOUT_ME, HEADING_OVERVIEW, RenderOptions, render_section};
use vibesite_shared::{AppConfig, PageData, Project, RepoRef, Result};

/// Inputs for one assembly run.
#[derive(Debug, Clone)]
pub struct AssembleConfig {
    /// Owner of the listed repositories and of the profile README.
    pub username: String,
    /// Host used for public repository links (e.g., `github.com`).
    pub host: String,
    /// Markdown rendering options.
    pub render: RenderOptions,
}

impl From<&AppConfig> for AssembleConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            username: config.site.username.trim().to_string(),
            host: config.github.host.trim().to_string(),
            render: RenderOptions {
                allow_raw_html: config.site.allow_raw_html,
            },
        }
    }
}

/// A repository left off the page, and why.
#[derive(Debug, Clone)]
pub struct SkippedRepo {
    pub repo: RepoRef,
    pub reason: String,
}

/// Output of a successful assembly.
#[derive(Debug, Clone)]
pub struct AssembleReport {
    /// Data ready for the page template.
    pub page: PageData,
    /// Repositories whose README could not be fetched.
    pub skipped: Vec<SkippedRepo>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting assembly status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after a project README was fetched and rendered.
    fn readme_fetched(&self, repo: &str, current: usize, total: usize);
    /// Called when a project is dropped because its README fetch failed.
    fn readme_skipped(&self, repo: &str, reason: &str);
    /// Called when assembly completes.
    fn done(&self, report: &AssembleReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn readme_fetched(&self, _repo: &str, _current: usize, _total: usize) {}
    fn readme_skipped(&self, _repo: &str, _reason: &str) {}
    fn done(&self, _report: &AssembleReport) {}
}

/// Public link to a repository: `https://<host>/<username>/<repo>`.
pub fn project_url(host: &str, username: &str, repo: &str) -> String {
    format!("https://{host}/{username}/{repo}")
}

/// Build [`PageData`] for `repos`.
///
/// A README that cannot be fetched drops that one project (logged, reported,
/// listed in [`AssembleReport::skipped`]). Failing to fetch the profile
/// README fails the whole assembly.
#[instrument(skip_all, fields(username = %config.username, repos = repos.len()))]
pub async fn assemble<S: ReadmeSource>(
    source: &S,
    config: &AssembleConfig,
    repos: &[RepoRef],
    progress: &dyn ProgressReporter,
) -> Result<AssembleReport> {
    let start = Instant::now();

    // --- Phase 1: Project READMEs ---
    progress.phase("Fetching project READMEs");

    let wanted: Vec<&RepoRef> = repos
        .iter()
        .filter(|r| !r.as_str().trim().is_empty())
        .collect();
    let total = wanted.len();

    let mut projects = Vec::with_capacity(total);
    let mut skipped = Vec::new();

    for (i, repo) in wanted.into_iter().enumerate() {
        let name = repo.as_str().trim();

        let readme = match source.fetch_readme(&config.username, name).await {
            Ok(readme) => readme,
            Err(e) => {
                warn!(repo = name, error = %e, "failed to fetch README, skipping project");
                let reason = e.to_string();
                progress.readme_skipped(name, &reason);
                skipped.push(SkippedRepo {
                    repo: RepoRef::new(name),
                    reason,
                });
                continue;
            }
        };

        let overview_html = render_section(&readme, HEADING_OVERVIEW, &config.render);
        projects.push(Project {
            name: name.to_string(),
            overview_html,
            source_url: project_url(&config.host, &config.username, name),
        });
        progress.readme_fetched(name, i + 1, total);
    }

    // --- Phase 2: Profile README ---
    progress.phase("Fetching profile README");

    let profile = source
        .fetch_readme(&config.username, &config.username)
        .await?;
    let about_me_html = render_section(&profile, HEADING_ABOUT_ME, &config.render);

    let report = AssembleReport {
        page: PageData {
            username: config.username.clone(),
            projects,
            about_me_html,
            generated_at: Utc::now(),
        },
        skipped,
        elapsed: start.elapsed(),
    };

    info!(
        projects = report.page.projects.len(),
        skipped = report.skipped.len(),
        elapsed_ms = report.elapsed.as_millis(),
        "page data assembled"
    );

    progress.done(&report);
    Ok(report)
}
