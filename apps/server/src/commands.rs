//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use vibesite_core::{AssembleReport, PageRenderer, ProgressReporter, gather_page_data};
use vibesite_github::{ClientOptions, GithubClient};
use vibesite_shared::{AppConfig, DEFAULT_CONFIG_FILE, RenderMode, load_config};

use crate::routes::{self, AppState};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Vibesite: a portfolio page built from GitHub READMEs.
#[derive(Parser)]
#[command(
    name = "vibesite",
    version,
    about = "Serve a portfolio page assembled from your GitHub READMEs.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Path to the TOML config file (defaults apply if it does not exist).
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: PathBuf,

    /// Optional KEY=VALUE file loaded into the environment at startup.
    #[arg(long, default_value = ".env", global = true)]
    pub env_file: PathBuf,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Start the HTTP server.
    Serve {
        /// Address to listen on (overrides `server.bind`).
        #[arg(long)]
        bind: Option<String>,

        /// When to fetch READMEs: per-request or startup (overrides `site.mode`).
        #[arg(long)]
        mode: Option<RenderMode>,
    },

    /// Assemble the page once and write it to a file.
    Render {
        /// Output HTML file.
        #[arg(short, long, default_value = "index.html")]
        out: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Environment file
// ---------------------------------------------------------------------------

/// Outcome of loading the optional env file, reported once tracing is up.
pub(crate) enum EnvFileStatus {
    Loaded,
    Missing,
    Failed(String),
}

/// Load `path` into the process environment without overriding existing vars.
///
/// Runs before tracing is initialized so the file may set `RUST_LOG`.
pub(crate) fn load_env_file(path: &Path) -> EnvFileStatus {
    match dotenvy::from_path(path) {
        Ok(()) => EnvFileStatus::Loaded,
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            EnvFileStatus::Missing
        }
        Err(e) => EnvFileStatus::Failed(e.to_string()),
    }
}

pub(crate) fn report_env_file(path: &Path, status: EnvFileStatus) {
    match status {
        EnvFileStatus::Loaded => info!(path = %path.display(), "loaded env file"),
        EnvFileStatus::Missing => debug!(path = %path.display(), "no env file"),
        EnvFileStatus::Failed(error) => {
            warn!(path = %path.display(), %error, "failed to load env file, continuing")
        }
    }
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "vibesite=info,tower_http=info",
        1 => "vibesite=debug,tower_http=debug",
        _ => "vibesite=trace,tower_http=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.config)?;

    match cli.command {
        Command::Serve { bind, mode } => cmd_serve(config, bind, mode).await,
        Command::Render { out } => cmd_render(config, &out).await,
    }
}

/// Build the README client from config (reads the token env var once).
fn build_client(config: &AppConfig) -> Result<GithubClient> {
    let client = GithubClient::new(&ClientOptions::from_config(&config.github))?;
    Ok(client)
}

async fn cmd_serve(
    mut config: AppConfig,
    bind: Option<String>,
    mode: Option<RenderMode>,
) -> Result<()> {
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    if let Some(mode) = mode {
        config.site.mode = mode;
    }
    config.validate()?;

    let addr = config.bind_addr()?;
    let client = build_client(&config)?;
    let renderer = PageRenderer::new(&config.site.templates_dir);

    let prerendered = match config.site.mode {
        RenderMode::PerRequest => None,
        RenderMode::Startup => {
            info!("assembling page at startup");
            let html = routes::render_page(&client, &config, &renderer)
                .await
                .wrap_err("failed to build the page at startup")?;
            Some(Arc::<str>::from(html))
        }
    };

    info!(
        %addr,
        username = %config.site.username,
        mode = %config.site.mode,
        authenticated = client.is_authenticated(),
        "starting server"
    );

    let state = AppState::new(config, client, renderer, prerendered);
    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("failed to bind {addr}"))?;

    println!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

async fn cmd_render(config: AppConfig, out: &Path) -> Result<()> {
    config.validate()?;

    let client = build_client(&config)?;
    let renderer = PageRenderer::new(&config.site.templates_dir);

    info!(out = %out.display(), username = %config.site.username, "rendering page");

    let reporter = CliProgress::new();
    let report = gather_page_data(&client, &config, &reporter).await?;
    let html = renderer.render(&report.page)?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| eyre!("cannot create '{}': {e}", parent.display()))?;
    }
    std::fs::write(out, &html).map_err(|e| eyre!("cannot write '{}': {e}", out.display()))?;

    println!();
    println!("  Page rendered!");
    println!("  Projects: {}", report.page.projects.len());
    println!("  Skipped:  {}", report.skipped.len());
    for skipped in &report.skipped {
        println!("    - {}: {}", skipped.repo, skipped.reason);
    }
    println!("  Output:   {}", out.display());
    println!("  Time:     {:.1}s", report.elapsed.as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn readme_fetched(&self, repo: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Fetched [{current}/{total}] {repo}"));
    }

    fn readme_skipped(&self, repo: &str, reason: &str) {
        self.spinner.println(format!("  skipped {repo}: {reason}"));
    }

    fn done(&self, _report: &AssembleReport) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        // Clears the spinner when assembly fails before done().
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}
