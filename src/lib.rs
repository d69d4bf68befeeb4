//! spacetraveling - Server-rendered blog front end over a headless CMS.
//!
//! This crate provides a lightweight HTTP server that renders a blog from
//! documents stored in a Prismic-style content repository: a listing page
//! with incremental "load more" pagination and per-post detail pages.
//!
//! # Architecture
//!
//! - **Gateway**: typed HTTP client for the content repository
//!   (paginated queries plus single-document lookups by uid)
//! - **Normalize**: gateway documents are reduced to the view models the
//!   pages need; extra fields are ignored on both the listing and detail
//!   paths
//! - **Render**: HTML generated with maud (compile-time templates);
//!   rich-text bodies are converted to markup in-process
//! - **Cache**: in-process moka cache + Cache-Control headers. The listing
//!   page revalidates in the background after its freshness window; detail
//!   pages are rendered at startup for a bounded set of posts and on demand
//!   for the rest
//!
//! # URL Pattern
//!
//! ```text
//! GET /                listing page
//! GET /feed?next=...   load-more fragment (JSON)
//! GET /post/{slug}     post detail page
//! ```
//!
//! # Security
//!
//! - All dynamic values are HTML-escaped by maud; converted rich text is
//!   escaped during conversion
//! - URLs are validated (HTTPS/HTTP only) before use in attributes
//! - Load-more cursors are checked against the configured gateway host
//!   before being fetched
//! - Strict Content-Security-Policy; X-Frame-Options: DENY

pub mod config;
pub mod error;
pub mod posts;
pub mod prismic;
pub mod render;
pub mod richtext;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
