//! Application state shared across all request handlers.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use moka::future::Cache;

use crate::config::Config;
use crate::prismic;

/// Cached rendered HTML with metadata for staleness decisions.
#[derive(Clone, Debug)]
pub struct CachedHtml {
    /// Rendered HTML string.
    pub html: String,
    /// When this entry was cached.
    pub cached_at: chrono::DateTime<chrono::Utc>,
}

/// Type alias for the HTML response cache.
pub type HtmlCache = Cache<String, CachedHtml>;

/// Detail page cache capacity (number of posts).
const POST_CACHE_CAPACITY: u64 = 10_000;

/// Hard TTL for detail pages. The original site regenerates a detail page
/// at most once a minute.
pub const POST_CACHE_TTL: Duration = Duration::from_secs(60);

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Content gateway client.
    pub gateway: Arc<prismic::Client>,

    /// Application configuration.
    pub config: Arc<Config>,

    /// Rendered listing page. A single entry keyed by a fixed string;
    /// entries never hard-expire — stale ones are served while a background
    /// regeneration replaces them.
    pub listing_cache: HtmlCache,

    /// Rendered detail pages keyed by slug.
    pub post_cache: HtmlCache,

    /// Set while a background listing regeneration is in flight, so at most
    /// one runs at a time.
    pub listing_refresh: Arc<AtomicBool>,
}

impl AppState {
    /// Create a new application state from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let gateway = prismic::Client::new(&config.api_url, config.access_token.clone())?;

        let listing_cache = Cache::builder().max_capacity(1).build();

        let post_cache = Cache::builder()
            .max_capacity(POST_CACHE_CAPACITY)
            .time_to_live(POST_CACHE_TTL)
            .build();

        tracing::info!(
            post_cache_capacity = POST_CACHE_CAPACITY,
            post_cache_ttl_secs = POST_CACHE_TTL.as_secs(),
            listing_revalidate_secs = config.revalidate_secs,
            "application state initialized"
        );

        Ok(Self {
            gateway: Arc::new(gateway),
            config: Arc::new(config),
            listing_cache,
            post_cache,
            listing_refresh: Arc::new(AtomicBool::new(false)),
        })
    }
}
