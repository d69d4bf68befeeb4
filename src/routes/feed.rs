//! Load-more endpoint.
//!
//! `GET /feed?next={cursor}` proxies a gateway next-page URL for the
//! listing page's inline script. The cursor is validated against the
//! configured gateway host before any request leaves this process.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::posts::PaginationState;
use crate::render;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedParams {
    /// Gateway-supplied next-page URL.
    next: String,
}

/// One appended page: the new cursor plus the rendered summary fragment.
#[derive(Debug, Serialize)]
pub struct FeedPage {
    pub next_page: Option<String>,
    pub html: String,
}

/// Handle `GET /feed`.
pub async fn load_more(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<FeedPage>, AppError> {
    let response = state
        .gateway
        .fetch_page(&params.next)
        .await
        .inspect_err(|error| tracing::error!(error = %error, "load more failed"))?;

    let page = PaginationState::new(response);

    tracing::debug!(
        posts = page.results.len(),
        has_more = page.has_more(),
        "load more page fetched"
    );

    Ok(Json(FeedPage {
        next_page: page.next_page,
        html: render::home::summaries_fragment(&page.results).into_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_page_serializes_null_cursor() {
        let page = FeedPage {
            next_page: None,
            html: "<a>post</a>".to_string(),
        };
        let json = serde_json::to_string(&page).unwrap();
        assert!(json.contains("\"next_page\":null"));
        assert!(json.contains("<a>post</a>"));
    }

    #[test]
    fn feed_page_serializes_cursor() {
        let page = FeedPage {
            next_page: Some("https://g/page3".to_string()),
            html: String::new(),
        };
        let json = serde_json::to_string(&page).unwrap();
        assert!(json.contains("\"next_page\":\"https://g/page3\""));
    }
}
