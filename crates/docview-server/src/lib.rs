//! HTTP server for the docview documentation engine.
//!
//! Serves a directory of markdown files as a browsable documentation
//! website: every request derives the sidebar from the filesystem tree,
//! resolves the URL path to a markdown file, renders it (with mermaid and
//! graphviz substitution) and assembles the fragments into the shared
//! page template.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docview_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         docs_dir: PathBuf::from("docs"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod template;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use docview_renderer::MarkdownPipeline;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Documentation source directory.
    pub docs_dir: PathBuf,
    /// Path the site root redirects to.
    pub default_page: String,
    /// Site title, used as the fallback page title.
    pub site_title: String,
    /// Render `dot`/`graphviz` fences server-side.
    pub graphviz: bool,
    /// Custom page template (`None` uses the built-in template).
    pub template_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
            docs_dir: PathBuf::from("docs"),
            default_page: "/docs/".to_owned(),
            site_title: "Documentation".to_owned(),
            graphviz: true,
            template_path: None,
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the template cannot be read or the server fails
/// to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let template = match &config.template_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => template::DEFAULT_TEMPLATE.to_owned(),
    };

    let pipeline = MarkdownPipeline::new().with_dot_enabled(config.graphviz);
    let state = Arc::new(AppState {
        docs_dir: config.docs_dir.clone(),
        default_page: config.default_page.clone(),
        site_title: config.site_title.clone(),
        pipeline,
        template,
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, docs_dir = %config.docs_dir.display(), "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from a docview config.
#[must_use]
pub fn server_config_from_config(config: &docview_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        docs_dir: config.docs_resolved.source_dir.clone(),
        default_page: config.docs_resolved.default_page.clone(),
        site_title: config.site.title.clone(),
        graphviz: config.diagrams.graphviz,
        template_path: config.site.template.clone(),
    }
}
