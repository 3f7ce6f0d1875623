//! README retrieval from the GitHub REST API.
//!
//! The page assembler only needs one remote operation: "give me the README
//! text of repository X owned by user U". That contract is the
//! [`ReadmeSource`] trait; [`GithubClient`] is the production implementation.

mod payload;

use std::future::Future;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument};
use url::Url;

use vibesite_shared::{GithubConfig, Result, VibesiteError, resolve_token};

/// Maximum number of redirects to follow (renamed repositories redirect).
const MAX_REDIRECTS: usize = 5;

/// Maximum README response size we accept (5 MB).
const MAX_RESPONSE_SIZE: u64 = 5 * 1024 * 1024;

/// Media type for the JSON contents API.
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Pinned REST API version.
const API_VERSION: &str = "2022-11-28";

/// User-Agent string for API requests (GitHub rejects requests without one).
const USER_AGENT: &str = concat!("Vibesite/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// ReadmeSource
// ---------------------------------------------------------------------------

/// Anything that can produce the raw README text of a repository.
pub trait ReadmeSource: Send + Sync {
    /// Fetch the README of `owner/repo` as text.
    ///
    /// Returns [`VibesiteError::NotFound`] when the repository or its README
    /// does not exist.
    fn fetch_readme(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

// ---------------------------------------------------------------------------
// Client options
// ---------------------------------------------------------------------------

/// Settings for building a [`GithubClient`].
#[derive(Clone)]
pub struct ClientOptions {
    /// REST API base URL (e.g., `https://api.github.com`).
    pub api_base: String,
    /// Access token; `None` means unauthenticated, rate-limited access.
    pub token: Option<String>,
    /// Timeout for each request in seconds.
    pub timeout_secs: u64,
}

impl ClientOptions {
    /// Build options from config, reading the token from the configured env var.
    pub fn from_config(config: &GithubConfig) -> Self {
        let token = resolve_token(config);
        if token.is_none() {
            info!(
                token_env = %config.token_env,
                "access token not set, using unauthenticated client"
            );
        }

        Self {
            api_base: config.api_base.clone(),
            token,
            timeout_secs: config.timeout_secs,
        }
    }
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_base", &self.api_base)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// GithubClient
// ---------------------------------------------------------------------------

/// GitHub REST client, built once and shared read-only.
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    api_base: Url,
    token: Option<String>,
}

impl GithubClient {
    /// Create a new client with the given options.
    pub fn new(opts: &ClientOptions) -> Result<Self> {
        let api_base = Url::parse(&opts.api_base).map_err(|e| {
            VibesiteError::config(format!("invalid API base '{}': {e}", opts.api_base))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(VibesiteError::config(format!(
                "API base '{}' cannot carry a path",
                opts.api_base
            )));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()
            .map_err(|e| VibesiteError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base,
            token: opts.token.clone(),
        })
    }

    /// Whether requests carry an access token.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// `{api_base}/repos/{owner}/{repo}/readme`, with each segment escaped.
    fn readme_url(&self, owner: &str, repo: &str) -> Url {
        let mut url = self.api_base.clone();
        // cannot_be_a_base() was rejected in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", owner, repo, "readme"]);
        }
        url
    }
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("api_base", &self.api_base.as_str())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl ReadmeSource for GithubClient {
    #[instrument(skip(self), fields(authenticated = self.is_authenticated()))]
    async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<String> {
        let url = self.readme_url(owner, repo);

        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, GITHUB_JSON)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| VibesiteError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(VibesiteError::NotFound(format!("{owner}/{repo}: no README")));
        }
        if !status.is_success() {
            return Err(VibesiteError::Network(format!("{url}: HTTP {status}")));
        }

        if let Some(len) = response.content_length() {
            if len > MAX_RESPONSE_SIZE {
                return Err(VibesiteError::validation(format!(
                    "{url}: response too large ({len} bytes, max {MAX_RESPONSE_SIZE})"
                )));
            }
        }

        let payload: payload::ReadmePayload = response
            .json()
            .await
            .map_err(|e| VibesiteError::decode(format!("{url}: unexpected response body: {e}")))?;

        let text = payload::decode_content(payload)?;
        debug!(len = text.len(), "README fetched");

        Ok(text)
    }
}
