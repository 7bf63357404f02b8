//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;

use docview_renderer::MarkdownPipeline;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Documentation source directory.
    pub(crate) docs_dir: PathBuf,
    /// Path the site root redirects to.
    pub(crate) default_page: String,
    /// Site title, used as the fallback page title.
    pub(crate) site_title: String,
    /// Markdown rendering pipeline.
    pub(crate) pipeline: MarkdownPipeline,
    /// Page template text with substitution placeholders.
    pub(crate) template: String,
}
