//! Route definitions for the blog front end.
//!
//! ## Routes
//!
//! - `GET /` - Listing page (paginated post summaries)
//! - `GET /feed?next={cursor}` - Load-more fragment (JSON)
//! - `GET /post/{slug}` - Post detail page
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions

mod feed;
mod health;
mod home;
pub mod post;

use axum::Router;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::render;
use crate::state::AppState;

/// Cache-Control for the listing page: an hour of CDN freshness with
/// stale-while-revalidate headroom, mirroring the in-process regeneration
/// window.
const CACHE_LISTING: &str = "public, max-age=60, s-maxage=3600, stale-while-revalidate=600";

/// Cache-Control for detail pages: regenerated at most once a minute.
const CACHE_DETAIL: &str = "public, max-age=60, s-maxage=60, stale-while-revalidate=60";

/// Build the complete blog router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::listing_page))
        .route("/feed", get(feed::load_more))
        .route("/post/{slug}", get(post::detail_page))
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .with_state(state)
}

/// Serve robots.txt allowing all crawlers.
async fn robots_txt() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        "User-agent: *\nAllow: /\n",
    )
}

/// Build an HTTP response with HTML content and security/cache headers.
pub(crate) fn html_response(html: &str, cache_control: &str) -> Response {
    let mut headers = HeaderMap::new();

    // Content type
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    // Security headers
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(render::components::CSP_HEADER),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    if let Ok(val) = HeaderValue::from_str(cache_control) {
        headers.insert(header::CACHE_CONTROL, val);
    }

    (StatusCode::OK, headers, html.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_response_headers() {
        let response = html_response("<p>hi</p>", CACHE_LISTING);
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        assert!(headers.contains_key(header::ETAG));
        assert!(headers.contains_key(header::CONTENT_SECURITY_POLICY));
        assert_eq!(
            headers.get(header::CACHE_CONTROL).unwrap(),
            CACHE_LISTING
        );
    }

    #[test]
    fn html_response_etag_is_content_addressed() {
        let a = html_response("<p>a</p>", CACHE_DETAIL);
        let b = html_response("<p>a</p>", CACHE_DETAIL);
        let c = html_response("<p>c</p>", CACHE_DETAIL);
        let etag = |r: &Response| r.headers().get(header::ETAG).unwrap().clone();
        assert_eq!(etag(&a), etag(&b));
        assert_ne!(etag(&a), etag(&c));
    }
}
