//! Post detail handler and startup pre-rendering.
//!
//! A bounded set of posts is rendered into the cache at startup; every other
//! slug resolves on first request against the gateway. A slug the gateway
//! does not know renders the not-found page — the route itself never fails
//! for unknown identifiers.

use axum::extract::{Path, State};
use axum::response::Response;

use crate::error::AppError;
use crate::posts::PostDetail;
use crate::prismic::{Document, QueryOptions};
use crate::render;
use crate::state::{AppState, CachedHtml};

/// Handle `GET /post/{slug}`.
pub async fn detail_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let slug = slug.trim();

    if let Some(cached) = state.post_cache.get(slug).await {
        tracing::debug!(slug = %slug, "post cache hit");
        return Ok(super::html_response(&cached.html, super::CACHE_DETAIL));
    }

    tracing::debug!(slug = %slug, "post cache miss, resolving");

    let html = render_post(&state, slug).await?;
    cache_post(&state, slug, html.clone()).await;
    Ok(super::html_response(&html, super::CACHE_DETAIL))
}

/// Fetch one post from the gateway, normalize it, and render the page.
async fn render_post(state: &AppState, slug: &str) -> Result<String, AppError> {
    let doc = state
        .gateway
        .get_by_uid("posts", slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {slug}")))?;
    render_document(state, slug, &doc)
}

/// Normalize an already fetched document and render the page.
fn render_document(state: &AppState, slug: &str, doc: &Document) -> Result<String, AppError> {
    let post = PostDetail::from_document(doc).ok_or_else(|| {
        AppError::UnexpectedResponse(format!("document for {slug} has no uid"))
    })?;

    let markup = render::post::detail_page(&post, &state.config.base_url, &state.config.site_name);
    Ok(markup.into_string())
}

async fn cache_post(state: &AppState, slug: &str, html: String) {
    let cached = CachedHtml {
        html,
        cached_at: chrono::Utc::now(),
    };
    state.post_cache.insert(slug.to_string(), cached).await;
}

/// Render the first `prerender_count` posts into the cache at startup.
///
/// The documents come straight from the warmup query; nothing is refetched
/// per slug. Failures are logged and non-fatal; affected posts simply
/// resolve on first request instead.
pub async fn warm_prerendered(state: AppState) {
    let options = QueryOptions {
        page_size: Some(state.config.prerender_count),
        ..Default::default()
    };

    let response = match state.gateway.query("posts", &options).await {
        Ok(response) => response,
        Err(error) => {
            tracing::warn!(error = %error, "prerender query failed, skipping warmup");
            return;
        }
    };

    let mut warmed = 0usize;
    for doc in &response.results {
        let Some(slug) = doc.uid.as_deref() else {
            continue;
        };
        match render_document(&state, slug, doc) {
            Ok(html) => {
                cache_post(&state, slug, html).await;
                warmed += 1;
            }
            Err(error) => {
                tracing::warn!(slug = %slug, error = %error, "prerender failed");
            }
        }
    }

    tracing::info!(warmed, "post prerender warmup finished");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::Router;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;

    use super::*;
    use crate::config::Config;

    const META: &str = r#"{"refs": [{"id": "m", "ref": "master", "isMasterRef": true}]}"#;

    const EMPTY_PAGE: &str = r#"{"results": [], "next_page": null}"#;

    const ONE_POST_PAGE: &str = r#"{
        "results": [{
            "id": "XyZ",
            "uid": "my-post",
            "first_publication_date": "2021-03-15T00:00:00+0000",
            "data": {
                "title": "My Post",
                "author": "Ana",
                "banner": {"url": "https://images.example.com/banner.png"},
                "content": [{
                    "heading": "Part one",
                    "body": [{"type": "paragraph", "text": "one two", "spans": []}]
                }]
            }
        }],
        "next_page": null
    }"#;

    /// Serve canned gateway JSON on a local port, counting search requests.
    async fn stub_gateway(search_body: &'static str, searches: Arc<AtomicUsize>) -> String {
        let app = Router::new()
            .route("/api/v2", get(|| async { META }))
            .route(
                "/api/v2/documents/search",
                get(move || {
                    let searches = searches.clone();
                    async move {
                        searches.fetch_add(1, Ordering::SeqCst);
                        search_body
                    }
                }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api/v2")
    }

    fn state_for(api_url: String) -> AppState {
        AppState::new(Config {
            bind_addr: "127.0.0.1:0".to_string(),
            api_url,
            access_token: None,
            base_url: "https://blog.example.com".to_string(),
            site_name: "spacetraveling".to_string(),
            revalidate_secs: 3600,
            page_size: 1,
            prerender_count: 2,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn unknown_slug_resolves_to_not_found() {
        let api_url = stub_gateway(EMPTY_PAGE, Arc::new(AtomicUsize::new(0))).await;
        let state = state_for(api_url);

        let err = render_post(&state, "no-such-post").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let response = detail_page(State(state), Path("no-such-post".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn known_slug_renders_detail_page() {
        let api_url = stub_gateway(ONE_POST_PAGE, Arc::new(AtomicUsize::new(0))).await;
        let state = state_for(api_url);

        let html = render_post(&state, "my-post").await.unwrap();
        assert!(html.contains("My Post"));
        assert!(html.contains("15 mar 2021"));
        assert!(html.contains("Ana"));
    }

    #[tokio::test]
    async fn warmup_renders_without_refetching_each_post() {
        let searches = Arc::new(AtomicUsize::new(0));
        let api_url = stub_gateway(ONE_POST_PAGE, searches.clone()).await;
        let state = state_for(api_url);

        warm_prerendered(state.clone()).await;

        assert_eq!(searches.load(Ordering::SeqCst), 1);
        assert!(state.post_cache.get("my-post").await.is_some());
    }
}
