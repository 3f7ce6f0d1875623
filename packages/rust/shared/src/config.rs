//! Application configuration for Vibesite.
//!
//! Config lives at `./vibesite.toml` unless `--config` points elsewhere.
//! CLI flags override config file values, which override defaults.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, VibesiteError};

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "vibesite.toml";

// ---------------------------------------------------------------------------
// Config structs (matching vibesite.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// What to render and where the inputs live.
    #[serde(default)]
    pub site: SiteConfig,

    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Repository host settings.
    #[serde(default)]
    pub github: GithubConfig,
}

/// When page data is assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Fetch and render on every request to `/`.
    #[default]
    PerRequest,
    /// Fetch and render once when the server starts; failures abort startup.
    Startup,
}

impl std::str::FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "per-request" => Ok(Self::PerRequest),
            "startup" => Ok(Self::Startup),
            other => Err(format!(
                "unknown render mode '{other}': expected 'per-request' or 'startup'"
            )),
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PerRequest => f.write_str("per-request"),
            Self::Startup => f.write_str("startup"),
        }
    }
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Account that owns the listed repositories and the profile README.
    #[serde(default = "default_username")]
    pub username: String,

    /// Newline-delimited list of repository names.
    #[serde(default = "default_projects_file")]
    pub projects_file: PathBuf,

    /// Directory holding `pages/` and `partials/` templates.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    /// Directory served under `/static/`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// When to assemble page data.
    #[serde(default)]
    pub mode: RenderMode,

    /// Pass raw HTML found in READMEs through to the page.
    #[serde(default = "default_true")]
    pub allow_raw_html: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            projects_file: default_projects_file(),
            templates_dir: default_templates_dir(),
            static_dir: default_static_dir(),
            mode: RenderMode::default(),
            allow_raw_html: true,
        }
    }
}

fn default_username() -> String {
    "Matthew-Berthoud".into()
}
fn default_projects_file() -> PathBuf {
    PathBuf::from("projects.txt")
}
fn default_templates_dir() -> PathBuf {
    PathBuf::from("ui/html")
}
fn default_static_dir() -> PathBuf {
    PathBuf::from("ui/static")
}
fn default_true() -> bool {
    true
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".into()
}

/// `[github]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// REST API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Host used when building public repository links.
    #[serde(default = "default_host")]
    pub host: String,

    /// Name of the env var holding the access token (never store the token itself).
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            host: default_host(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.github.com".into()
}
fn default_host() -> String {
    "github.com".into()
}
fn default_token_env() -> String {
    "GITHUB_TOKEN".into()
}
fn default_timeout_secs() -> u64 {
    10
}

impl AppConfig {
    /// Check values that would otherwise fail late (at first request).
    pub fn validate(&self) -> Result<()> {
        let username = self.site.username.trim();
        if username.is_empty() {
            return Err(VibesiteError::config("site.username must not be empty"));
        }
        if username.contains('/') {
            return Err(VibesiteError::config(format!(
                "site.username '{username}' must not contain '/'"
            )));
        }

        let api = Url::parse(&self.github.api_base).map_err(|e| {
            VibesiteError::config(format!(
                "github.api_base '{}' is not a valid URL: {e}",
                self.github.api_base
            ))
        })?;
        if !matches!(api.scheme(), "http" | "https") {
            return Err(VibesiteError::config(format!(
                "github.api_base has unsupported scheme '{}'",
                api.scheme()
            )));
        }

        if self.github.host.trim().is_empty() {
            return Err(VibesiteError::config("github.host must not be empty"));
        }
        if self.github.timeout_secs == 0 {
            return Err(VibesiteError::config("github.timeout_secs must be at least 1"));
        }

        self.bind_addr()?;
        Ok(())
    }

    /// Parsed `server.bind`.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server.bind.parse().map_err(|e| {
            VibesiteError::config(format!(
                "server.bind '{}' is not a socket address: {e}",
                self.server.bind
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the application config from `path`. Returns defaults if the file does not exist.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| VibesiteError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        VibesiteError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Read the access token from the env var named in `config`.
///
/// Returns `None` (unauthenticated, rate-limited access) when unset or empty.
pub fn resolve_token(config: &GithubConfig) -> Option<String> {
    match std::env::var(&config.token_env) {
        Ok(val) if !val.trim().is_empty() => Some(val.trim().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("projects_file"));
        assert!(toml_str.contains("GITHUB_TOKEN"));
        assert!(toml_str.contains("per-request"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let toml_str = r#"
[site]
username = "octocat"
mode = "startup"

[server]
bind = "0.0.0.0:3000"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.site.username, "octocat");
        assert_eq!(config.site.mode, RenderMode::Startup);
        assert_eq!(config.site.projects_file, PathBuf::from("projects.txt"));
        assert!(config.site.allow_raw_html);
        assert_eq!(config.github.api_base, "https://api.github.com");
        assert_eq!(config.bind_addr().unwrap().port(), 3000);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.github.timeout_secs, 10);
        assert_eq!(config.server.bind, "127.0.0.1:8080");
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vibesite.toml");
        std::fs::write(&path, "[site\nusername = ").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, VibesiteError::Config { .. }));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.site.username = "  ".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.github.api_base = "ftp://example.com".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.server.bind = "not-an-addr".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.github.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn render_mode_parses_from_str() {
        assert_eq!("startup".parse::<RenderMode>().unwrap(), RenderMode::Startup);
        assert_eq!(
            "per-request".parse::<RenderMode>().unwrap(),
            RenderMode::PerRequest
        );
        assert!("eager".parse::<RenderMode>().is_err());
    }

    #[test]
    fn token_resolution_ignores_blank() {
        let config = GithubConfig {
            // Unique name to avoid interfering with other tests
            token_env: "VIBESITE_TEST_NONEXISTENT_TOKEN_12345".into(),
            ..GithubConfig::default()
        };
        assert_eq!(resolve_token(&config), None);
    }
}
