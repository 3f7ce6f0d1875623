//! Markdown → HTML rendering via `pulldown-cmark`.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// Options for Markdown rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Emit raw HTML blocks and inline tags verbatim. When `false`, they are
    /// rendered as escaped text instead, and link or image targets with a
    /// scheme other than http, https or mailto are replaced by `#`.
    pub allow_raw_html: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            allow_raw_html: true,
        }
    }
}

/// GitHub-flavoured extensions READMEs commonly rely on.
fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Render a Markdown fragment to an HTML fragment.
pub fn render_html(markdown: &str, opts: &RenderOptions) -> String {
    let parser = Parser::new_ext(markdown, markdown_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);

    if opts.allow_raw_html {
        html::push_html(&mut out, parser);
    } else {
        html::push_html(&mut out, parser.map(sanitize_event));
    }

    out
}

/// Link targets allowed through when raw HTML is disallowed.
const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Replacement for a link or image target with a disallowed scheme.
const BLOCKED_URL: &str = "#";

fn sanitize_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

/// Keep relative targets and safe schemes; block everything else.
fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let scheme = match url.find(':') {
        Some(colon) if !url[..colon].contains(['/', '?', '#']) => &url[..colon],
        _ => return url,
    };

    if SAFE_SCHEMES
        .iter()
        .any(|safe| scheme.trim().eq_ignore_ascii_case(safe))
    {
        url
    } else {
        CowStr::Borrowed(BLOCKED_URL)
    }
}
