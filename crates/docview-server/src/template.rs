//! Page assembly.
//!
//! Merges sidebar, breadcrumb, and content fragments into the page
//! template by simple placeholder replacement (first occurrence each).

use docview_site::escape_html;

/// Built-in page template.
pub(crate) const DEFAULT_TEMPLATE: &str = include_str!("../assets/page.html");

/// Substitute the template placeholders.
///
/// `title` is escaped; the three fragments are already markup and embed
/// verbatim. Each placeholder is replaced at its first occurrence.
pub(crate) fn assemble(
    template: &str,
    title: &str,
    sidebar_html: &str,
    breadcrumb_html: &str,
    content_html: &str,
) -> String {
    template
        .replacen("{{TITLE}}", &escape_html(title), 1)
        .replacen("{{SIDEBAR_HTML}}", sidebar_html, 1)
        .replacen("{{BREADCRUMB_HTML}}", breadcrumb_html, 1)
        .replacen("{{CONTENT_HTML}}", content_html, 1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_assemble_substitutes_each_placeholder_once() {
        let template = "t={{TITLE}} s={{SIDEBAR_HTML}} b={{BREADCRUMB_HTML}} c={{CONTENT_HTML}}";

        let page = assemble(template, "Guide", "<ul/>", "<nav/>", "<p>body</p>");

        assert_eq!(page, "t=Guide s=<ul/> b=<nav/> c=<p>body</p>");
    }

    #[test]
    fn test_assemble_escapes_title_only() {
        let template = "{{TITLE}}|{{CONTENT_HTML}}";

        let page = assemble(template, "a < b", "", "", "<em>kept</em>");

        assert_eq!(page, "a &lt; b|<em>kept</em>");
    }

    #[test]
    fn test_assemble_first_occurrence_wins() {
        let template = "{{TITLE}} and again {{TITLE}}";

        let page = assemble(template, "X", "", "", "");

        assert_eq!(page, "X and again {{TITLE}}");
    }

    #[test]
    fn test_default_template_has_all_placeholders() {
        for placeholder in [
            "{{TITLE}}",
            "{{SIDEBAR_HTML}}",
            "{{BREADCRUMB_HTML}}",
            "{{CONTENT_HTML}}",
        ] {
            assert_eq!(DEFAULT_TEMPLATE.matches(placeholder).count(), 1);
        }
    }
}
