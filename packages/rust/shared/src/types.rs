//! Core domain types for the rendered portfolio page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RepoRef
// ---------------------------------------------------------------------------

/// A repository name as listed in the projects file (e.g., `vibesite`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoRef(pub String);

impl RepoRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RepoRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// TrustedHtml
// ---------------------------------------------------------------------------

/// An HTML fragment that templates embed verbatim, without escaping.
///
/// Only produced by the Markdown renderer. Whether raw HTML inside the
/// Markdown survives is decided by the renderer options, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Project / PageData
// ---------------------------------------------------------------------------

/// One project card on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Repository name, shown as the card title.
    pub name: String,
    /// Rendered `## Overview` section of the README.
    pub overview_html: TrustedHtml,
    /// Link to the repository on the hosting site.
    pub source_url: String,
}

/// Everything the page template needs for one render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageData {
    /// Owner of the listed repositories.
    pub username: String,
    /// Project cards, in projects-file order.
    pub projects: Vec<Project>,
    /// Rendered intro section of the profile README.
    pub about_me_html: TrustedHtml,
    /// When the data was assembled.
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_ref_display_is_plain_name() {
        let repo = RepoRef::from("vibesite");
        assert_eq!(repo.to_string(), "vibesite");
        assert_eq!(repo.as_str(), "vibesite");
    }

    #[test]
    fn trusted_html_serializes_transparently() {
        let html = TrustedHtml::new("<p>hi</p>");
        let json = serde_json::to_string(&html).expect("serialize");
        assert_eq!(json, r#""<p>hi</p>""#);
    }
}
