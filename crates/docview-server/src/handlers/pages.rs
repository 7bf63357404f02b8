//! Page endpoints.
//!
//! Resolves the requested path to a markdown document, renders it, and
//! assembles the response page from sidebar, breadcrumbs, and content
//! fragments. The sidebar and breadcrumbs are re-derived from the
//! filesystem on every request.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use docview_site::{breadcrumbs, format_name, resolver, sidebar};

use crate::error::ServerError;
use crate::state::AppState;
use crate::template;

/// Handle GET / (redirect to the default documentation page).
pub(crate) async fn redirect_root(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::temporary(&state.default_page)
}

/// Handle GET /docs (root page).
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    page_impl("", &state).await
}

/// Handle GET /docs/{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    page_impl(&path, &state).await
}

/// Shared implementation for page rendering.
async fn page_impl(path: &str, state: &AppState) -> Result<Html<String>, ServerError> {
    let doc = resolver::resolve(path, &state.docs_dir)?;
    let page = state.pipeline.render(&doc.markdown).await;

    let sidebar_html = sidebar::render(&sidebar::build(&state.docs_dir));
    let breadcrumb_html = breadcrumbs::render(&breadcrumbs::build(path, doc.is_index));
    let title = page
        .title
        .unwrap_or_else(|| fallback_title(path, &state.site_title));

    Ok(Html(template::assemble(
        &state.template,
        &title,
        &sidebar_html,
        &breadcrumb_html,
        &page.html,
    )))
}

/// Title when the document has no top-level heading: the formatted final
/// path segment, or the site title at the docs root.
fn fallback_title(path: &str, site_title: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .map_or_else(|| site_title.to_owned(), format_name)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use docview_renderer::MarkdownPipeline;
    use pretty_assertions::assert_eq;

    use super::*;

    fn test_state(docs_dir: std::path::PathBuf) -> AppState {
        AppState {
            docs_dir,
            default_page: "/docs/".to_owned(),
            site_title: "Test Docs".to_owned(),
            pipeline: MarkdownPipeline::new().with_dot_enabled(false),
            template: template::DEFAULT_TEMPLATE.to_owned(),
        }
    }

    #[test]
    fn test_fallback_title_uses_last_segment() {
        assert_eq!(fallback_title("guide/03_setup.md", "Docs"), "Setup");
        assert_eq!(fallback_title("guide", "Docs"), "Guide");
    }

    #[test]
    fn test_fallback_title_root_uses_site_title() {
        assert_eq!(fallback_title("", "Docs"), "Docs");
    }

    #[tokio::test]
    async fn test_page_impl_assembles_all_fragments() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("index.md"), "# Welcome\n\nHello.").unwrap();
        fs::write(temp_dir.path().join("guide.md"), "# Guide").unwrap();
        let state = test_state(temp_dir.path().to_path_buf());

        let Html(body) = page_impl("", &state).await.unwrap();

        assert!(body.contains("<title>Welcome</title>"));
        assert!(body.contains("<h1>Welcome</h1>"));
        assert!(body.contains("<a href=\"/docs/guide.md\">Guide</a>"));
        assert!(body.contains("class=\"breadcrumbs\""));
        assert!(!body.contains("{{"));
    }

    #[tokio::test]
    async fn test_page_impl_missing_page_is_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let state = test_state(temp_dir.path().to_path_buf());

        let err = page_impl("nope.md", &state).await.unwrap_err();

        assert!(matches!(err, ServerError::NotFound(path) if path == "nope.md"));
    }

    #[tokio::test]
    async fn test_page_impl_breadcrumb_last_entry_linked_for_index() {
        let temp_dir = tempfile::tempdir().unwrap();
        let guide = temp_dir.path().join("guide");
        fs::create_dir(&guide).unwrap();
        fs::write(guide.join("index.md"), "content").unwrap();
        let state = test_state(temp_dir.path().to_path_buf());

        let Html(via_dir) = page_impl("guide", &state).await.unwrap();
        let Html(via_file) = page_impl("guide/index.md", &state).await.unwrap();

        // Directory request: the final crumb stays navigable
        assert!(via_dir.contains("<a href=\"/docs/guide\">Guide</a>"));
        // Direct file request: the final crumb is plain text
        assert!(via_file.contains("<span class=\"breadcrumb-current\">Index</span>"));
    }
}
