//! Server error types and HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use docview_site::{ResolveError, escape_html};

/// Error crossing the request-handling boundary.
///
/// Only resolution failures and unexpected I/O reach this type; subtree-
/// and block-scoped failures are contained inside the pipeline and never
/// surface here.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Requested path does not name a markdown document. Covers both
    /// missing paths and existing non-markdown files; as a document, the
    /// resource genuinely does not exist either way.
    #[error("Documentation page not found: {0}")]
    NotFound(String),
    /// Unexpected failure; detail is logged, never sent to the client.
    #[error("Internal server error")]
    Internal(String),
}

impl From<ResolveError> for ServerError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound(path) | ResolveError::InvalidTarget(path) => {
                Self::NotFound(path)
            }
            ResolveError::Io { .. } => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
        };
        (status, error_page(status, &message)).into_response()
    }
}

/// Minimal standalone error page.
fn error_page(status: StatusCode, message: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html><head><title>{status}</title></head>\
         <body><h1>{status}</h1><p>{}</p></body></html>",
        escape_html(message)
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ServerError::NotFound("guide/missing.md".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_target_maps_to_404() {
        let err: ServerError = ResolveError::InvalidTarget("image.png".to_owned()).into();

        assert!(matches!(err, ServerError::NotFound(path) if path == "image.png"));
    }

    #[test]
    fn test_io_maps_to_500_without_detail() {
        let err: ServerError = ResolveError::Io {
            path: "/docs/x.md".into(),
            source: std::io::Error::other("disk on fire"),
        }
        .into();

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_page_escapes_message() {
        let page = error_page(StatusCode::NOT_FOUND, "no <script> here");

        assert!(page.0.contains("no &lt;script&gt; here"));
    }
}
