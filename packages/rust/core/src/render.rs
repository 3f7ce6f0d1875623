//! HTML page rendering with minijinja templates loaded from disk.
//!
//! Layout under the templates directory:
//! ```text
//! <templates_dir>/
//! ├── pages/
//! │   └── index.html       (entry point)
//! └── partials/
//!     └── project.html     (included once per project)
//! ```
//!
//! Templates are re-read on every render so edits show up without a restart.

use std::path::PathBuf;

use minijinja::{Environment, Value, context, path_loader};
use tracing::{debug, instrument};

use vibesite_shared::{PageData, Result, TrustedHtml, VibesiteError};

/// Entry template, relative to the templates directory.
pub const INDEX_TEMPLATE: &str = "pages/index.html";

/// Renders [`PageData`] into a complete HTML document.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    templates_dir: PathBuf,
}

impl PageRenderer {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    /// Load templates and render the page.
    ///
    /// Any template problem (missing file, syntax error, render failure)
    /// is a [`VibesiteError::Template`].
    #[instrument(skip_all, fields(projects = page.projects.len()))]
    pub fn render(&self, page: &PageData) -> Result<String> {
        let mut env = Environment::new();
        env.set_loader(path_loader(&self.templates_dir));

        let template = env.get_template(INDEX_TEMPLATE).map_err(template_error)?;

        let projects: Vec<Value> = page
            .projects
            .iter()
            .map(|p| {
                context! {
                    name => p.name,
                    overview => trusted(&p.overview_html),
                    source_url => p.source_url,
                }
            })
            .collect();

        let html = template
            .render(context! {
                username => page.username,
                projects => Value::from(projects),
                about_me => trusted(&page.about_me_html),
                generated_at => page.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
                version => env!("CARGO_PKG_VERSION"),
            })
            .map_err(template_error)?;

        debug!(len = html.len(), "page rendered");
        Ok(html)
    }
}

/// Mark a rendered fragment as safe so autoescaping leaves it alone.
fn trusted(html: &TrustedHtml) -> Value {
    Value::from_safe_string(html.as_str().to_string())
}

fn template_error(e: minijinja::Error) -> VibesiteError {
    VibesiteError::Template(format!("{e:#}"))
}
