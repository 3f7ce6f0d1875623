//! Reading the projects file: one repository name per line.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use vibesite_shared::{RepoRef, Result, VibesiteError};

/// Read and parse the projects file at `path`.
///
/// A missing or unreadable file is an error; the page cannot be built without it.
pub fn read_repo_list(path: &Path) -> Result<Vec<RepoRef>> {
    let content = std::fs::read_to_string(path).map_err(|e| VibesiteError::io(path, e))?;
    let repos = parse_repo_list(&content);

    debug!(path = %path.display(), count = repos.len(), "projects file read");
    Ok(repos)
}

/// Parse newline-delimited repository names.
///
/// Lines are trimmed, blank lines dropped, and repeated names keep only
/// their first position.
pub fn parse_repo_list(content: &str) -> Vec<RepoRef> {
    let mut seen = HashSet::new();
    let mut repos = Vec::new();

    for line in content.lines() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name) {
            debug!(repo = name, "duplicate entry in projects file, ignoring");
            continue;
        }
        repos.push(RepoRef::new(name));
    }

    repos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(repos: &[RepoRef]) -> Vec<&str> {
        repos.iter().map(RepoRef::as_str).collect()
    }

    #[test]
    fn keeps_order_and_skips_blanks() {
        let repos = parse_repo_list("alpha\n\n  beta  \n\t\ngamma\n");
        assert_eq!(names(&repos), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let repos = parse_repo_list("alpha\r\nbeta\r\n");
        assert_eq!(names(&repos), vec!["alpha", "beta"]);
    }

    #[test]
    fn drops_duplicates_after_first() {
        let repos = parse_repo_list("alpha\nbeta\nalpha\n");
        assert_eq!(names(&repos), vec!["alpha", "beta"]);
    }

    #[test]
    fn empty_file_yields_empty_list() {
        assert!(parse_repo_list("").is_empty());
        assert!(parse_repo_list("\n \n").is_empty());
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.txt");
        std::fs::write(&path, "vibesite\nchess-engine\n").unwrap();

        let repos = read_repo_list(&path).unwrap();
        assert_eq!(names(&repos), vec!["vibesite", "chess-engine"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_repo_list(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, VibesiteError::Io { .. }));
    }
}
