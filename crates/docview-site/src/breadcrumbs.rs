//! Breadcrumb trail from the site root to the current page.

use std::fmt::Write;

use crate::name::format_name;
use crate::sidebar::escape_html;

/// One entry in the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbEntry {
    /// Display label.
    pub label: String,
    /// Link target. `None` for the final, current-page entry, which is
    /// rendered as plain text.
    pub href: Option<String>,
}

/// Build the breadcrumb trail for a requested path.
///
/// The trail always starts with a "Home" entry pointing at the site root,
/// followed by one entry per non-empty path segment. Every segment except
/// the last links to its accumulated `/docs/` path; the last segment is a
/// link only when the resolution went through a directory index file (the
/// segment still names a navigable directory).
#[must_use]
pub fn build(requested_path: &str, is_index_resolution: bool) -> Vec<BreadcrumbEntry> {
    let mut entries = vec![BreadcrumbEntry {
        label: "Home".to_owned(),
        href: Some("/".to_owned()),
    }];

    let segments: Vec<&str> = requested_path.split('/').filter(|s| !s.is_empty()).collect();
    let mut path_so_far = String::new();
    for (pos, segment) in segments.iter().enumerate() {
        if !path_so_far.is_empty() {
            path_so_far.push('/');
        }
        path_so_far.push_str(segment);

        let is_last = pos + 1 == segments.len();
        let href = (!is_last || is_index_resolution).then(|| format!("/docs/{path_so_far}"));
        entries.push(BreadcrumbEntry {
            label: format_name(segment),
            href,
        });
    }

    entries
}

/// Render breadcrumb entries as markup.
#[must_use]
pub fn render(entries: &[BreadcrumbEntry]) -> String {
    let mut out = String::from("<nav class=\"breadcrumbs\">");
    for (pos, entry) in entries.iter().enumerate() {
        if pos > 0 {
            out.push_str("<span class=\"breadcrumb-sep\">/</span>");
        }
        let label = escape_html(&entry.label);
        match &entry.href {
            Some(href) => {
                let _ = write!(out, "<a href=\"{}\">{label}</a>", escape_html(href));
            }
            None => {
                let _ = write!(out, "<span class=\"breadcrumb-current\">{label}</span>");
            }
        }
    }
    out.push_str("</nav>");
    out
}
