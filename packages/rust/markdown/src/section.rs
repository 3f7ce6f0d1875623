//! Heading-delimited section extraction.
//!
//! A flat, single pass over the raw text: find the heading as a literal
//! substring, then cut at the next line starting with `#`. No heading-level
//! awareness, so a `###` subheading also ends the section.
//!
//! Known limitation: the heading is matched anywhere, including inside code
//! blocks or prose that happens to contain the same characters.

/// Heading that marks a project description in a repository README.
pub const HEADING_OVERVIEW: &str = "## Overview";

/// Heading that opens the intro of a profile README.
pub const HEADING_ABOUT_ME: &str = "# Hi there 👋";

/// Placeholder shown in a project card whose README has no overview.
pub const OVERVIEW_NOT_FOUND: &str = "No overview section found.";

/// Marker for "a line that starts a heading".
const NEXT_HEADING: &str = "\n#";

/// Return the trimmed text between `heading` and the next heading line.
///
/// If `heading` is absent, returns [`not_found_message`] rather than failing;
/// a README without the section is expected, not an error.
pub fn extract_section(document: &str, heading: &str) -> String {
    let Some(start) = document.find(heading) else {
        return not_found_message(heading);
    };

    let rest = &document[start + heading.len()..];

    match rest.find(NEXT_HEADING) {
        Some(end) => rest[..end].trim().to_string(),
        None => rest.trim().to_string(),
    }
}

/// Placeholder text used when `heading` is not in the document.
///
/// The overview heading has a fixed placeholder ([`OVERVIEW_NOT_FOUND`]).
/// Any other heading is named in the message with its `#` markers removed,
/// so `"# Hi there 👋"` becomes `"No Hi there 👋 section found."`.
pub fn not_found_message(heading: &str) -> String {
    if heading == HEADING_OVERVIEW {
        return OVERVIEW_NOT_FOUND.to_string();
    }
    let title = heading.trim_start_matches('#').trim();
    format!("No {title} section found.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn extracts_between_headings() {
        let doc = "## Overview\nHello\n## Usage\nMore";
        assert_eq!(extract_section(doc, HEADING_OVERVIEW), "Hello");
    }

    #[test]
    fn missing_heading_returns_sentinel() {
        let doc = "# Other\nText";
        assert_eq!(
            extract_section(doc, HEADING_OVERVIEW),
            "No overview section found."
        );
    }

    #[test]
    fn overview_placeholder_is_fixed_text() {
        assert_eq!(not_found_message(HEADING_OVERVIEW), OVERVIEW_NOT_FOUND);
        assert_eq!(
            extract_section("## Overviewish
", "## Overview text"),
            "No Overview text section found."
        );
    }

    #[test]
    fn last_section_runs_to_end_of_document() {
        let doc = "# Project\n\nIntro.\n\n## Overview\n\nFirst paragraph.\n\nSecond paragraph.\n\n";
        assert_eq!(
            extract_section(doc, HEADING_OVERVIEW),
            "First paragraph.\n\nSecond paragraph."
        );
    }

    #[test]
    fn deeper_subheading_also_ends_section() {
        let doc = "## Overview\nTop level.\n### Details\nNested.";
        assert_eq!(extract_section(doc, HEADING_OVERVIEW), "Top level.");
    }

    #[test]
    fn only_first_occurrence_is_used() {
        let doc = "## Overview\none\n## Overview\ntwo";
        assert_eq!(extract_section(doc, HEADING_OVERVIEW), "one");
    }

    #[test]
    fn heading_inside_code_block_still_matches() {
        // Literal substring search; documented imprecision.
        let doc = "# Tool\n```md\n## Overview\n```\n\n## Overview\nReal text";
        assert_eq!(extract_section(doc, HEADING_OVERVIEW), "```");
    }

    #[test]
    fn about_me_heading_requires_emoji() {
        let doc = "# Hi there 👋\n\nI build things.\n\n## Projects\n- a";
        assert_eq!(extract_section(doc, HEADING_ABOUT_ME), "I build things.");

        let without_emoji = "# Hi there\n\nI build things.";
        assert_eq!(
            extract_section(without_emoji, HEADING_ABOUT_ME),
            "No Hi there 👋 section found."
        );
    }

    #[test]
    fn hash_mid_line_does_not_end_section() {
        let doc = "## Overview\nIssue #42 is fixed.\nStill here.\n## Next";
        assert_eq!(
            extract_section(doc, HEADING_OVERVIEW),
            "Issue #42 is fixed.\nStill here."
        );
    }

    #[test]
    fn heading_at_end_yields_empty_section() {
        assert_eq!(extract_section("text\n## Overview", HEADING_OVERVIEW), "");
        assert_eq!(extract_section("## Overview\n## Usage", HEADING_OVERVIEW), "");
    }

    #[test]
    fn sentinel_strips_heading_markers() {
        assert_eq!(not_found_message("### Install "), "No Install section found.");
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    /// Text that can never contain a heading marker.
    fn plain_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,*_\\-\n]{0,80}"
    }

    proptest! {
        #[test]
        fn returns_trimmed_text_between_headings(
            prefix in plain_text(),
            body in plain_text(),
            tail in plain_text(),
        ) {
            let doc = format!("{prefix}{HEADING_OVERVIEW}{body}\n## Next{tail}");
            prop_assert_eq!(extract_section(&doc, HEADING_OVERVIEW), body.trim());
        }

        #[test]
        fn returns_trimmed_remainder_without_next_heading(
            prefix in plain_text(),
            body in plain_text(),
        ) {
            let doc = format!("{prefix}{HEADING_OVERVIEW}{body}");
            prop_assert_eq!(extract_section(&doc, HEADING_OVERVIEW), body.trim());
        }

        #[test]
        fn absent_heading_returns_sentinel(doc in plain_text()) {
            prop_assert_eq!(
                extract_section(&doc, HEADING_OVERVIEW),
                not_found_message(HEADING_OVERVIEW)
            );
        }

        #[test]
        fn extraction_is_idempotent(doc in ".{0,200}", pick in 0usize..2) {
            let heading = [HEADING_OVERVIEW, HEADING_ABOUT_ME][pick];
            prop_assert_eq!(extract_section(&doc, heading), extract_section(&doc, heading));
        }
    }
}
