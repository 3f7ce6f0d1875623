//! Core page assembly and rendering for Vibesite.
//!
//! This crate ties together the projects file, README fetching, section
//! extraction, and template rendering into one workflow
//! ([`gather_page_data`] followed by [`PageRenderer::render`]).

pub mod assembler;
pub mod projects;
pub mod render;

use tracing::instrument;

use vibesite_github::ReadmeSource;
use vibesite_shared::{AppConfig, Result};

pub use assembler::{
    AssembleConfig, AssembleReport, ProgressReporter, SilentProgress, SkippedRepo, assemble,
    project_url,
};
pub use projects::{parse_repo_list, read_repo_list};
pub use render::{INDEX_TEMPLATE, PageRenderer};

/// Read the projects file named in `config` and assemble page data.
///
/// Fails if the projects file cannot be read or the profile README cannot
/// be fetched; individual project failures are absorbed.
#[instrument(skip_all, fields(projects_file = %config.site.projects_file.display()))]
pub async fn gather_page_data<S: ReadmeSource>(
    source: &S,
    config: &AppConfig,
    progress: &dyn ProgressReporter,
) -> Result<AssembleReport> {
    progress.phase("Reading projects file");
    let repos = read_repo_list(&config.site.projects_file)?;

    assemble(source, &AssembleConfig::from(config), &repos, progress).await
}
