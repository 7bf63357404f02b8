//! Graphviz diagram rendering.
//!
//! Converts DOT source into inline SVG using a process-wide, lazily
//! initialized engine (a validated `dot` executable). The engine is
//! constructed at most once; concurrent first callers await the same
//! in-flight initialization, and a failed construction is cached so later
//! diagrams render a static "unavailable" fragment instead of retrying.
//!
//! Rendering never propagates errors: a bad diagram yields an inline
//! error fragment carrying its source, so one broken block cannot take
//! down the rest of a page.

mod engine;

pub use engine::{DiagramError, EngineError, GraphvizEngine};

use tokio::sync::OnceCell;

/// The shared engine handle. Callers never touch this directly; the only
/// entry points are [`ensure_engine`] and [`render_dot`].
static ENGINE: OnceCell<Result<GraphvizEngine, EngineError>> = OnceCell::const_new();

/// Get the shared Graphviz engine, constructing it on first use.
///
/// Construction runs at most once per process. A construction failure is
/// permanent: every later call observes the same [`EngineError`].
pub async fn ensure_engine() -> Result<&'static GraphvizEngine, &'static EngineError> {
    ENGINE.get_or_init(GraphvizEngine::construct).await.as_ref()
}

/// Render one DOT source block to an HTML fragment.
///
/// Returns inline SVG markup on success and an inline error fragment on
/// any failure (engine unavailable or invalid diagram source). Never
/// returns an error.
pub async fn render_dot(source: &str) -> String {
    let engine = match ensure_engine().await {
        Ok(engine) => engine,
        Err(err) => {
            tracing::warn!(error = %err, "Graphviz engine unavailable, emitting fallback fragment");
            return unavailable_fragment(source);
        }
    };

    match engine.render_svg(source).await {
        Ok(svg) => format!("<div class=\"diagram diagram-graphviz\">{svg}</div>"),
        Err(err) => {
            tracing::warn!(error = %err, "Diagram rendering failed");
            error_fragment(source, &err.to_string())
        }
    }
}

/// Fragment shown for every DOT block when the engine could not be built.
fn unavailable_fragment(source: &str) -> String {
    format!(
        "<pre class=\"diagram-error\">Graphviz renderer unavailable\n\n{}</pre>",
        escape_html(source)
    )
}

/// Fragment shown for a single DOT block that failed to render.
fn error_fragment(source: &str, message: &str) -> String {
    format!(
        "<pre class=\"diagram-error\">Failed to render diagram: {}\n\n{}</pre>",
        escape_html(message),
        escape_html(source)
    )
}

/// Escape text for safe embedding in the error fragments.
fn escape_html(text: &str) -> String {
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

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_error_fragment_escapes_source() {
        let fragment = error_fragment("digraph { a -> b }", "syntax error");

        assert!(fragment.starts_with("<pre class=\"diagram-error\">"));
        assert!(fragment.contains("Failed to render diagram: syntax error"));
        assert!(fragment.contains("digraph { a -&gt; b }"));
    }

    #[test]
    fn test_unavailable_fragment_carries_source() {
        let fragment = unavailable_fragment("digraph {}");

        assert!(fragment.contains("Graphviz renderer unavailable"));
        assert!(fragment.contains("digraph {}"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a -> <b>"), "a -&gt; &lt;b&gt;");
    }

    #[tokio::test]
    async fn test_render_dot_never_errors() {
        // With a dot binary installed this produces SVG; without one it
        // produces the unavailable fragment. Either way the call succeeds.
        let html = render_dot("digraph { a -> b }").await;

        if which::which("dot").is_ok() {
            assert!(html.contains("<svg"));
            assert!(html.contains("diagram-graphviz"));
        } else {
            assert!(html.contains("diagram-error"));
        }
    }

    #[tokio::test]
    async fn test_render_dot_invalid_source_yields_fragment() {
        if which::which("dot").is_err() {
            return;
        }

        let html = render_dot("this is not dot").await;

        assert!(html.contains("diagram-error"));
        assert!(html.contains("this is not dot"));
    }
}
