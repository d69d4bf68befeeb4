//! Application configuration loaded from environment variables.

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// Content gateway API URL (e.g., "https://myrepo.cdn.prismic.io/api/v2").
    pub api_url: String,

    /// Optional gateway access token, appended to every request.
    pub access_token: Option<String>,

    /// Base URL for this site (used in canonical URLs and OG tags).
    pub base_url: String,

    /// Site name shown in page titles and the header.
    pub site_name: String,

    /// How long a rendered listing page stays fresh before a background
    /// regeneration is triggered, in seconds.
    pub revalidate_secs: u64,

    /// Page size for the initial listing query.
    pub page_size: u32,

    /// How many posts are rendered into the cache at startup.
    pub prerender_count: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables have defaults for local development:
    /// - `BLOG_BIND_ADDR`: bind address (default: "0.0.0.0:8080")
    /// - `PRISMIC_API_URL`: gateway API URL (default: "http://localhost:9009/api/v2")
    /// - `PRISMIC_ACCESS_TOKEN`: gateway access token (default: none)
    /// - `BLOG_BASE_URL`: site base URL (default: "http://localhost:8080")
    /// - `BLOG_SITE_NAME`: site name (default: "spacetraveling")
    /// - `BLOG_REVALIDATE_SECS`: listing freshness window (default: 3600)
    /// - `BLOG_PAGE_SIZE`: initial listing page size (default: 1)
    /// - `BLOG_PRERENDER_COUNT`: posts warmed at startup (default: 2)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("BLOG_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let api_url = std::env::var("PRISMIC_API_URL")
            .unwrap_or_else(|_| "http://localhost:9009/api/v2".to_string());

        let access_token = std::env::var("PRISMIC_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        let base_url = std::env::var("BLOG_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string();

        let site_name =
            std::env::var("BLOG_SITE_NAME").unwrap_or_else(|_| "spacetraveling".to_string());

        let revalidate_secs = parse_env("BLOG_REVALIDATE_SECS", 3600)?;
        let page_size = parse_env("BLOG_PAGE_SIZE", 1)?;
        let prerender_count = parse_env("BLOG_PRERENDER_COUNT", 2)?;

        tracing::info!(
            bind_addr = %bind_addr,
            api_url = %api_url,
            base_url = %base_url,
            site_name = %site_name,
            revalidate_secs,
            page_size,
            prerender_count,
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            api_url,
            access_token,
            base_url,
            site_name,
            revalidate_secs,
            page_size,
            prerender_count,
        })
    }
}

/// Parse a numeric env var, falling back to a default when unset.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {key}={raw}: {e}")),
        Err(_) => Ok(default),
    }
}
