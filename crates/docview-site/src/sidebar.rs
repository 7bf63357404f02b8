//! Sidebar navigation tree.
//!
//! Builds a fresh, immutable [`NavNode`] tree from the docs directory on
//! every request and renders it as nested list markup. The tree mirrors
//! the filesystem: files become links, directories become sections, and a
//! directory's `index.md`/`README.md` becomes the section's own link.

use std::fmt::Write;
use std::path::Path;

use crate::name::format_name;
use crate::scanner;

/// Node kind in the navigation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKind {
    /// A markdown file with a URL.
    Link,
    /// A directory; may carry a link of its own when it has an index file.
    Section,
}

/// One entry in the sidebar tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavNode {
    /// Node kind.
    pub kind: NavKind,
    /// Display title derived from the filesystem name.
    pub title: String,
    /// URL path. Always present for links; present for a section only
    /// when the directory has an index file.
    pub href: Option<String>,
    /// Child nodes, only ever non-empty for sections. Files sort before
    /// subdirectories, each group alphabetical by filesystem name.
    pub children: Vec<NavNode>,
    /// Nesting depth, drives presentation indentation only.
    pub depth: usize,
}

/// Build the navigation tree for a docs root.
///
/// Never fails: unreadable subtrees degrade to empty children via the
/// scanner's failure policy. Empty directories still appear as
/// non-clickable labels.
#[must_use]
pub fn build(root: &Path) -> NavNode {
    let root_title = root
        .file_name()
        .map_or_else(|| "Documentation".to_owned(), |name| {
            format_name(&name.to_string_lossy())
        });
    build_section(root, "", &root_title, 0)
}

/// Build one section node from a directory.
fn build_section(dir: &Path, url_path: &str, title: &str, depth: usize) -> NavNode {
    let listing = scanner::scan(dir);
    let mut files = listing.files;

    // An index file becomes the section's own link rather than a child;
    // index.md wins over README.md when both exist.
    let index_pos = files
        .iter()
        .position(|f| f.eq_ignore_ascii_case("index.md"))
        .or_else(|| files.iter().position(|f| f.eq_ignore_ascii_case("README.md")));
    let href = index_pos.map(|pos| {
        files.remove(pos);
        section_url(url_path)
    });

    let mut children = Vec::with_capacity(files.len() + listing.subdirs.len());
    for file in &files {
        children.push(NavNode {
            kind: NavKind::Link,
            title: format_name(file),
            href: Some(entry_url(url_path, file)),
            children: Vec::new(),
            depth: depth + 1,
        });
    }
    for subdir in &listing.subdirs {
        let child_url = join_url(url_path, subdir);
        children.push(build_section(
            &dir.join(subdir),
            &child_url,
            &format_name(subdir),
            depth + 1,
        ));
    }

    NavNode {
        kind: NavKind::Section,
        title: title.to_owned(),
        href,
        children,
        depth,
    }
}

/// Canonical URL for a directory (resolves via its index file).
fn section_url(url_path: &str) -> String {
    if url_path.is_empty() {
        "/docs/".to_owned()
    } else {
        format!("/docs/{url_path}")
    }
}

/// URL for a file entry inside a directory.
fn entry_url(url_path: &str, file: &str) -> String {
    format!("/docs/{}", join_url(url_path, file))
}

/// Join URL path segments, tolerating an empty prefix.
fn join_url(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_owned()
    } else {
        format!("{prefix}/{segment}")
    }
}

/// Render a navigation tree as nested list markup.
///
/// The root node's children form the top-level list; sections without a
/// link render as plain labels.
#[must_use]
pub fn render(root: &NavNode) -> String {
    let mut out = String::with_capacity(1024);
    render_children(root, &mut out);
    out
}

fn render_children(node: &NavNode, out: &mut String) {
    let pad = "  ".repeat(node.depth);
    let class = if node.depth == 0 { " class=\"nav-tree\"" } else { "" };
    let _ = writeln!(out, "{pad}<ul{class}>");
    for child in &node.children {
        render_node(child, out);
    }
    let _ = writeln!(out, "{pad}</ul>");
}

fn render_node(node: &NavNode, out: &mut String) {
    let pad = "  ".repeat(node.depth);
    let title = escape_html(&node.title);
    let label = match &node.href {
        Some(href) => format!("<a href=\"{}\">{title}</a>", escape_html(href)),
        None => format!("<span class=\"nav-label\">{title}</span>"),
    };

    if node.children.is_empty() {
        let _ = writeln!(out, "{pad}<li>{label}</li>");
    } else {
        let _ = writeln!(out, "{pad}<li>{label}");
        render_children(node, out);
        let _ = writeln!(out, "{pad}</li>");
    }
}

/// Escape text for safe embedding in HTML markup.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
