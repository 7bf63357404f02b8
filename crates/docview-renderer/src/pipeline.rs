//! The markdown rendering pipeline.

use std::ops::Range;
use std::sync::OnceLock;

use pulldown_cmark::{Options, Parser, html};
use regex::{Captures, Regex};

use crate::entity::decode_entities;

/// A rendered page fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// HTML fragment with all diagram blocks substituted.
    pub html: String,
    /// Title from the first top-level heading, if any.
    pub title: Option<String>,
}

/// Markdown to HTML pipeline with diagram substitution.
///
/// Stateless apart from configuration; safe to share across requests.
#[derive(Debug, Clone)]
pub struct MarkdownPipeline {
    dot_enabled: bool,
}

impl Default for MarkdownPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownPipeline {
    /// Create a pipeline with graphviz rendering enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { dot_enabled: true }
    }

    /// Enable or disable server-side graphviz rendering.
    ///
    /// When disabled, `dot`/`graphviz` fences keep their default code
    /// block rendering.
    #[must_use]
    pub fn with_dot_enabled(mut self, enabled: bool) -> Self {
        self.dot_enabled = enabled;
        self
    }

    /// Render markdown to an HTML fragment.
    ///
    /// Every diagram block reaches a terminal state: substituted with its
    /// rendered markup, or with an inline error fragment. One bad diagram
    /// never fails the page.
    pub async fn render(&self, markdown: &str) -> RenderedPage {
        let title = extract_title(markdown);
        let html = convert_markdown(markdown);
        let html = substitute_mermaid(&html);
        let html = if self.dot_enabled {
            substitute_dot(&html).await
        } else {
            html
        };

        RenderedPage { html, title }
    }
}

/// GFM parser options, matching what the fence post-processing expects
/// from the engine's standard code block wrapping.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Generic markdown to HTML conversion, default code block handling.
fn convert_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, parser_options());
    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// Fenced `mermaid` blocks as rendered by the markdown engine.
fn mermaid_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<pre><code class="language-mermaid">(.*?)</code></pre>"#)
            .expect("valid pattern")
    })
}

/// Fenced `dot`/`graphviz` blocks as rendered by the markdown engine.
fn dot_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<pre><code class="language-(?:dot|graphviz)">(.*?)</code></pre>"#)
            .expect("valid pattern")
    })
}

/// Replace every mermaid fence with the container markup consumed by the
/// client-side renderer. The body is entity-decoded back to its source.
fn substitute_mermaid(html: &str) -> String {
    mermaid_block()
        .replace_all(html, |caps: &Captures<'_>| {
            let source = decode_entities(&caps[1]);
            format!("<div class=\"mermaid\">{}</div>", source.trim())
        })
        .into_owned()
}

/// Replace every dot/graphviz fence with rendered SVG.
///
/// Substitutions are independent; a failing block yields a local error
/// fragment from the diagram renderer and the rest of the page renders.
async fn substitute_dot(html: &str) -> String {
    let blocks: Vec<(Range<usize>, String)> = dot_block()
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let body = caps.get(1)?;
            Some((
                whole.range(),
                decode_entities(body.as_str()).trim().to_owned(),
            ))
        })
        .collect();
    if blocks.is_empty() {
        return html.to_owned();
    }

    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    for (range, source) in blocks {
        out.push_str(&html[cursor..range.start]);
        out.push_str(&docview_diagrams::render_dot(&source).await);
        cursor = range.end;
    }
    out.push_str(&html[cursor..]);
    out
}

/// Extract the first top-level ATX heading as the page title.
///
/// Fenced code blocks are skipped so a `#` line inside a fence is never
/// mistaken for a heading.
fn extract_title(markdown: &str) -> Option<String> {
    let mut in_fence = false;
    for line in markdown.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("# ") {
            let title = rest.trim().trim_end_matches('#').trim();
            if !title.is_empty() {
                return Some(title.to_owned());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn pipeline() -> MarkdownPipeline {
        MarkdownPipeline::new()
    }

    #[tokio::test]
    async fn test_render_plain_markdown() {
        let page = pipeline().render("# Hello\n\nSome *text*.").await;

        assert!(page.html.contains("<h1>Hello</h1>"));
        assert!(page.html.contains("<em>text</em>"));
        assert_eq!(page.title.as_deref(), Some("Hello"));
    }

    #[tokio::test]
    async fn test_render_mermaid_round_trip() {
        let markdown = "```mermaid\ngraph TD; A-->B;\n```";

        let page = pipeline().render(markdown).await;

        // Decoded exactly once, no double-escaping of the arrow
        assert!(page
            .html
            .contains("<div class=\"mermaid\">graph TD; A-->B;</div>"));
        assert!(!page.html.contains("language-mermaid"));
    }

    #[tokio::test]
    async fn test_render_substitutes_all_mermaid_blocks() {
        let markdown = "```mermaid\ngraph TD; A-->B;\n```\n\ntext\n\n```mermaid\ngraph LR; C-->D;\n```";

        let page = pipeline().render(markdown).await;

        assert_eq!(page.html.matches("<div class=\"mermaid\">").count(), 2);
        assert!(!page.html.contains("language-mermaid"));
    }

    #[tokio::test]
    async fn test_render_leaves_other_languages_untouched() {
        let markdown = "```rust\nfn main() {}\n```";

        let page = pipeline().render(markdown).await;

        assert!(page.html.contains("language-rust"));
        assert!(page.html.contains("<pre><code"));
    }

    #[tokio::test]
    async fn test_render_dot_disabled_keeps_code_block() {
        let markdown = "```dot\ndigraph { a -> b }\n```";

        let page = pipeline().with_dot_enabled(false).render(markdown).await;

        assert!(page.html.contains("language-dot"));
    }

    #[tokio::test]
    async fn test_render_dot_blocks_always_substituted() {
        let markdown = "```dot\ndigraph { a -> b }\n```\n\n```graphviz\ndigraph { c -> d }\n```";

        let page = pipeline().render(markdown).await;

        // Both fences reach a terminal state whether or not a dot binary
        // exists: SVG markup or an inline error fragment
        assert!(!page.html.contains("language-dot"));
        assert!(!page.html.contains("language-graphviz"));
    }

    #[tokio::test]
    async fn test_render_isolates_invalid_dot_block() {
        if which::which("dot").is_err() {
            return;
        }
        let markdown = "```dot\ndigraph { a -> b }\n```\n\n```dot\nthis is broken\n```";

        let page = pipeline().render(markdown).await;

        // The valid block rendered to SVG, the broken one degraded to an
        // error fragment, and the render as a whole succeeded
        assert!(page.html.contains("<svg"));
        assert!(page.html.contains("diagram-error"));
        assert!(page.html.contains("this is broken"));
    }

    #[tokio::test]
    async fn test_render_gfm_table() {
        let markdown = "| a | b |\n|---|---|\n| 1 | 2 |";

        let page = pipeline().render(markdown).await;

        assert!(page.html.contains("<table>"));
    }

    #[test]
    fn test_extract_title_first_h1() {
        assert_eq!(
            extract_title("intro\n\n# Real Title\n\n# Second"),
            Some("Real Title".to_owned())
        );
    }

    #[test]
    fn test_extract_title_skips_fenced_blocks() {
        let markdown = "```sh\n# not a title\n```\n\n# Actual";

        assert_eq!(extract_title(markdown), Some("Actual".to_owned()));
    }

    #[test]
    fn test_extract_title_none_without_h1() {
        assert_eq!(extract_title("## Subheading only"), None);
    }
}
