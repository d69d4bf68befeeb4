//! Error types for the blog front end.
//!
//! Errors are rendered as simple HTML error pages rather than JSON,
//! since this is a user-facing HTML service. The load-more endpoint's
//! inline script only inspects the response status, so a non-2xx page
//! body is harmless there.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, html};

/// Blog front-end error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The content gateway request failed (network or HTTP status).
    #[error("gateway error: {0}")]
    Gateway(#[from] reqwest::Error),

    /// The gateway answered with a shape or value we cannot use.
    #[error("unexpected gateway response: {0}")]
    UnexpectedResponse(String),

    /// The requested post does not exist in the content repository.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error (rendering, configuration, etc.).
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            Self::Gateway(err) => {
                tracing::error!(error = %err, "gateway request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Service Unavailable",
                    "The content service is temporarily unavailable. Please try again later."
                        .to_string(),
                )
            }
            Self::UnexpectedResponse(msg) => {
                tracing::error!(error = %msg, "unexpected gateway response");
                (
                    StatusCode::BAD_GATEWAY,
                    "Service Unavailable",
                    "The content service returned an unexpected response.".to_string(),
                )
            }
            Self::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "Post Not Found",
                format!("The requested post was not found: {msg}"),
            ),
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error",
                    "An internal error occurred. Please try again later.".to_string(),
                )
            }
        };

        let markup = html! {
            (DOCTYPE)
            html lang="pt-BR" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) }
                    meta name="robots" content="noindex";
                    style { (maud::PreEscaped(crate::render::components::ERROR_CSS)) }
                }
                body {
                    main class="error-page" {
                        h1 { (title) }
                        p { (message) }
                        a href="/" { "Back to all posts" }
                    }
                }
            }
        };

        (status, markup).into_response()
    }
}
