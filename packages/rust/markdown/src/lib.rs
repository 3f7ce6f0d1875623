//! README section extraction and Markdown-to-HTML rendering.
//!
//! Two steps, always used together by the page assembler:
//! 1. [`extract_section`] slices a README down to one heading's content
//! 2. [`render_html`] turns that Markdown into an HTML fragment

mod render;
mod section;

use tracing::{debug, instrument};

use vibesite_shared::TrustedHtml;

pub use render::{RenderOptions, render_html};
pub use section::{
    HEADING_ABOUT_ME, HEADING_OVERVIEW, OVERVIEW_NOT_FOUND, extract_section, not_found_message,
};

/// Extract the section under `heading` and render it as trusted HTML.
///
/// A missing section renders the placeholder text as a paragraph.
#[instrument(skip(document, opts), fields(doc_len = document.len()))]
pub fn render_section(document: &str, heading: &str, opts: &RenderOptions) -> TrustedHtml {
    let section = extract_section(document, heading);
    let html = render_html(&section, opts);

    debug!(section_len = section.len(), html_len = html.len(), "section rendered");

    TrustedHtml::new(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_overview_of_readme() {
        let readme = "# vibesite\n\n![badge](b.svg)\n\n## Overview\n\nA *tiny* site.\n\n## Build\n\ncargo build";
        let html = render_section(readme, HEADING_OVERVIEW, &RenderOptions::default());
        assert_eq!(html.as_str(), "<p>A <em>tiny</em> site.</p>\n");
    }

    #[test]
    fn missing_section_renders_placeholder() {
        let html = render_section("# Nothing here", HEADING_OVERVIEW, &RenderOptions::default());
        assert_eq!(html.as_str(), "<p>No overview section found.</p>\n");
    }
}
