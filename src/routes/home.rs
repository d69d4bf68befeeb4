//! Listing page handler.
//!
//! The rendered listing is cached in-process and considered fresh for the
//! configured revalidation window (an hour by default). A stale entry is
//! still served immediately; regeneration happens in the background and
//! replaces the cached entry when it succeeds, so readers never wait on the
//! gateway once the first render exists.

use std::sync::atomic::Ordering;

use axum::extract::State;
use axum::response::Response;

use crate::error::AppError;
use crate::posts::PaginationState;
use crate::prismic::QueryOptions;
use crate::render;
use crate::state::{AppState, CachedHtml};

/// Cache key for the single listing entry.
const LISTING_KEY: &str = "listing";

/// Fields requested for the listing query; everything else the gateway
/// stores for a post is not needed for summaries.
const SUMMARY_FIELDS: &[&str] = &["post.title", "post.subtitle", "post.author"];

/// Handle `GET /`.
pub async fn listing_page(State(state): State<AppState>) -> Result<Response, AppError> {
    if let Some(cached) = state.listing_cache.get(LISTING_KEY).await {
        let age = chrono::Utc::now().signed_duration_since(cached.cached_at);
        if age.num_seconds() >= state.config.revalidate_secs as i64 {
            tracing::debug!(age_secs = age.num_seconds(), "listing stale, regenerating");
            spawn_refresh(state.clone());
        }
        return Ok(super::html_response(&cached.html, super::CACHE_LISTING));
    }

    // First request after startup (or after an eviction): render inline.
    let html = render_listing(&state).await?;
    cache_listing(&state, html.clone()).await;
    Ok(super::html_response(&html, super::CACHE_LISTING))
}

/// Query the gateway for the first page of posts and render the listing.
pub(crate) async fn render_listing(state: &AppState) -> Result<String, AppError> {
    let options = QueryOptions {
        fetch: SUMMARY_FIELDS.iter().map(|f| f.to_string()).collect(),
        page_size: Some(state.config.page_size),
    };
    let response = state.gateway.query("posts", &options).await?;
    let pagination = PaginationState::new(response);

    tracing::debug!(
        posts = pagination.results.len(),
        has_more = pagination.has_more(),
        "listing rendered"
    );

    let markup = render::home::listing_page(
        &pagination,
        &state.config.base_url,
        &state.config.site_name,
    );
    Ok(markup.into_string())
}

pub(crate) async fn cache_listing(state: &AppState, html: String) {
    let cached = CachedHtml {
        html,
        cached_at: chrono::Utc::now(),
    };
    state.listing_cache.insert(LISTING_KEY.to_string(), cached).await;
}

/// Kick off a background regeneration unless one is already running.
///
/// On failure the stale entry stays in place and the next stale hit tries
/// again.
fn spawn_refresh(state: AppState) {
    if state
        .listing_refresh
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        return;
    }

    tokio::spawn(async move {
        match render_listing(&state).await {
            Ok(html) => {
                cache_listing(&state, html).await;
                tracing::info!("listing regenerated");
            }
            Err(error) => {
                tracing::error!(error = %error, "listing regeneration failed, serving stale");
            }
        }
        state.listing_refresh.store(false, Ordering::Release);
    });
}
