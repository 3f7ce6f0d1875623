//! HTTP routes: the index page and static assets.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use vibesite_core::{PageRenderer, SilentProgress, gather_page_data};
use vibesite_github::ReadmeSource;
use vibesite_shared::{AppConfig, Result, VibesiteError};

/// Shared, read-only state for all requests.
pub(crate) struct AppState<S> {
    config: Arc<AppConfig>,
    source: Arc<S>,
    renderer: PageRenderer,
    /// Page built at startup; `None` means build on each request.
    prerendered: Option<Arc<str>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            source: Arc::clone(&self.source),
            renderer: self.renderer.clone(),
            prerendered: self.prerendered.clone(),
        }
    }
}

impl<S: ReadmeSource + 'static> AppState<S> {
    pub(crate) fn new(
        config: AppConfig,
        source: S,
        renderer: PageRenderer,
        prerendered: Option<Arc<str>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            source: Arc::new(source),
            renderer,
            prerendered,
        }
    }
}

/// Build the router: `/` renders the page, `/static/*` serves assets,
/// everything else is 404.
pub(crate) fn build_router<S: ReadmeSource + 'static>(state: AppState<S>) -> Router {
    let assets = ServeDir::new(&state.config.site.static_dir);

    Router::new()
        .route("/", get(index_handler::<S>))
        .nest_service("/static", assets)
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Assemble page data and render it to HTML.
pub(crate) async fn render_page<S: ReadmeSource>(
    source: &S,
    config: &AppConfig,
    renderer: &PageRenderer,
) -> Result<String> {
    let report = gather_page_data(source, config, &SilentProgress).await?;
    renderer.render(&report.page)
}

async fn index_handler<S: ReadmeSource + 'static>(State(state): State<AppState<S>>) -> Response {
    if let Some(html) = &state.prerendered {
        return Html(html.to_string()).into_response();
    }

    match render_page(state.source.as_ref(), &state.config, &state.renderer).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => page_error(e),
    }
}

async fn not_found_handler() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 page not found")
}

/// Map a fatal page error to a 500 with no partial output.
fn page_error(e: VibesiteError) -> Response {
    let message = if e.is_template() {
        error!(error = %e, "error rendering template");
        "Failed to render template."
    } else {
        error!(error = %e, "error getting page data");
        "Failed to get project data from GitHub."
    };

    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}
